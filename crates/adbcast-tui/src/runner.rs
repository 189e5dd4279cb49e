//! Main TUI loop

use adbcast_app::config::Settings;
use adbcast_app::{AppController, NoticeBoard};
use adbcast_core::prelude::*;

use crate::app::{App, TICK};
use crate::event;

/// Run the interactive session until the user quits
pub async fn run(settings: &Settings, initial_message: Option<String>) -> Result<()> {
    install_panic_hook();
    let mut term = ratatui::init();

    let controller = AppController::from_settings(settings, NoticeBoard::new());
    let mut app = App::new(controller);

    let result = run_loop(&mut app, &mut term, initial_message).await;

    app.save_draft().await;
    ratatui::restore();

    result
}

/// Restore the terminal before the default hook prints, and keep the panic in the log file
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        error!("adbcast panicked: {}", panic_info);
        default_hook(panic_info);
    }));
}

async fn run_loop<B: ratatui::backend::Backend>(
    app: &mut App<adbcast_app::FileStore, adbcast_bridge::TokioCommandRunner>,
    term: &mut ratatui::Terminal<B>,
    initial_message: Option<String>,
) -> Result<()> {
    app.start(term, initial_message).await?;

    loop {
        app.expire_notices();
        app.draw(term)?;

        if let Some(key) = event::poll(TICK)? {
            if app.handle_input(term, key).await? {
                info!("Quit requested");
                return Ok(());
            }
        }
    }
}
