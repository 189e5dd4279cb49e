//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Screen areas shared by every screen
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Bordered content area
    pub body: Rect,
    /// Single row for the current notice
    pub notice: Rect,
    /// Single row of key hints
    pub help: Rect,
}

pub fn create(area: Rect) -> ScreenAreas {
    let [body, notice, help] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    ScreenAreas { body, notice, help }
}

/// Center a rectangle within another rectangle
pub fn center_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center);

    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
