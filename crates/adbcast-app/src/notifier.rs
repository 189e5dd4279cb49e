//! Notification capability
//!
//! The session emits [`Notice`]s without reading them back. [`NoticeBoard`]
//! keeps the latest notice for the TUI to draw; [`ConsoleNotifier`] prints
//! them for headless commands.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use adbcast_core::prelude::*;
use adbcast_core::Notice;

/// Sink for user-facing notices
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Show `notice`, replacing whatever is currently shown
    fn notify(&self, notice: Notice);

    /// Remove the current notice
    fn dismiss(&self);
}

#[derive(Debug)]
struct PostedNotice {
    notice: Notice,
    posted_at: Instant,
}

/// Latest notice, shared between the session and the renderer
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    current: Arc<Mutex<Option<PostedNotice>>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<PostedNotice>> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn current(&self) -> Option<Notice> {
        self.lock().as_ref().map(|posted| posted.notice.clone())
    }

    /// Drop a success or failure notice older than `ttl`
    ///
    /// Progress notices stay until dismissed or replaced.
    pub fn expire(&self, ttl: Duration) {
        let mut current = self.lock();
        let expired = current
            .as_ref()
            .is_some_and(|posted| !posted.notice.is_progress() && posted.posted_at.elapsed() >= ttl);
        if expired {
            *current = None;
        }
    }
}

impl Notifier for NoticeBoard {
    fn notify(&self, notice: Notice) {
        debug!("Notice: {}", notice.display_line());
        *self.lock() = Some(PostedNotice {
            notice,
            posted_at: Instant::now(),
        });
    }

    fn dismiss(&self) {
        *self.lock() = None;
    }
}

/// Prints notices to stderr
///
/// Progress notices are only printed when `verbose` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier {
    verbose: bool,
}

impl ConsoleNotifier {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        if notice.is_progress() && !self.verbose {
            return;
        }
        eprintln!("{}", notice.display_line());
    }

    fn dismiss(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_keeps_latest() {
        let board = NoticeBoard::new();
        board.notify(Notice::progress("Sending..."));
        board.notify(Notice::success("Complete!"));

        assert_eq!(board.current(), Some(Notice::success("Complete!")));
    }

    #[test]
    fn test_board_dismiss() {
        let board = NoticeBoard::new();
        board.notify(Notice::progress("Searching for devices..."));
        board.dismiss();

        assert_eq!(board.current(), None);
    }

    #[test]
    fn test_board_clones_share_state() {
        let board = NoticeBoard::new();
        let clone = board.clone();
        clone.notify(Notice::failure("Error", "Message is empty"));

        assert!(board.current().is_some());
    }

    #[test]
    fn test_expire_keeps_progress() {
        let board = NoticeBoard::new();
        board.notify(Notice::progress("Sending..."));

        board.expire(Duration::ZERO);

        assert_eq!(board.current(), Some(Notice::progress("Sending...")));
    }

    #[test]
    fn test_expire_drops_old_success() {
        let board = NoticeBoard::new();
        board.notify(Notice::success("Complete!"));

        board.expire(Duration::from_secs(60));
        assert!(board.current().is_some());

        board.expire(Duration::ZERO);
        assert!(board.current().is_none());
    }
}
