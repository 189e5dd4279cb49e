//! Interactive session: key handling, session work and redraws

use std::future::Future;
use std::time::Duration;

use adbcast_app::handler::{handle_key, update};
use adbcast_app::{
    AddValueOutcome, InputKey, KeyValueStore, NoticeBoard, Notifier, SessionController,
    SubmitForm, SubmitOutcome, UpdateAction, ViewState,
};
use adbcast_bridge::CommandRunner;
use adbcast_core::prelude::*;
use adbcast_core::Notice;
use ratatui::backend::Backend;
use ratatui::Terminal;

use crate::render;

/// Redraw interval while a session operation is pending
pub const TICK: Duration = Duration::from_millis(100);

/// How long success and failure notices stay on screen
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

pub const NOTICE_STORAGE_CLEARED: &str = "Local storage cleared";

/// TUI-side application: the session plus what the user is editing
pub struct App<S, R> {
    controller: SessionController<S, R, NoticeBoard>,
    board: NoticeBoard,
    view: ViewState,
}

impl<S, R> App<S, R>
where
    S: KeyValueStore,
    R: CommandRunner,
{
    pub fn new(controller: SessionController<S, R, NoticeBoard>) -> Self {
        let board = controller.notifier().clone();
        Self {
            controller,
            board,
            view: ViewState::default(),
        }
    }

    pub fn controller(&self) -> &SessionController<S, R, NoticeBoard> {
        &self.controller
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn board(&self) -> &NoticeBoard {
        &self.board
    }

    pub fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()> {
        let notice = self.board.current();
        terminal
            .draw(|frame| {
                render::view(frame, self.controller.state(), &self.view, notice.as_ref())
            })
            .map_err(|e| Error::terminal(e.to_string()))?;
        Ok(())
    }

    /// Run startup and prepare the form
    ///
    /// `initial_message` takes precedence over a saved draft.
    pub async fn start<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        initial_message: Option<String>,
    ) -> Result<()> {
        self.draw(terminal)?;
        self.controller.start().await;

        let draft = match initial_message {
            Some(message) => Some(message),
            None => self.controller.load_draft().await,
        };
        self.view = ViewState::with_draft(draft);
        if let Some(ready) = self.controller.state().ready() {
            self.view.reset_selections(ready);
        }

        self.draw(terminal)
    }

    /// Handle one key press; returns `true` when the app should exit
    pub async fn handle_input<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        key: InputKey,
    ) -> Result<bool> {
        let Some(message) = handle_key(self.controller.state(), &self.view, key) else {
            return Ok(false);
        };
        let Some(action) = update(self.controller.state(), &mut self.view, message) else {
            return Ok(false);
        };
        self.perform(terminal, action).await
    }

    async fn perform<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        action: UpdateAction,
    ) -> Result<bool> {
        match action {
            UpdateAction::Quit => return Ok(true),
            UpdateAction::Submit(form) => self.submit(terminal, form).await?,
            UpdateAction::SaveValue { list, value } => {
                match self.controller.add_value(list, &value).await {
                    Ok(AddValueOutcome::Added(_)) => {
                        if let Some(ready) = self.controller.state().ready() {
                            self.view.on_value_saved(ready, list);
                        }
                    }
                    Ok(AddValueOutcome::Invalid(e)) => {
                        self.board.notify(Notice::failure("Error", e.to_string()))
                    }
                    Err(e) => self.board.notify(Notice::failure("Error", e.to_string())),
                }
            }
            UpdateAction::ClearStorage => match self.controller.clear_storage().await {
                Ok(()) => {
                    if let Some(ready) = self.controller.state().ready() {
                        self.view.reset_selections(ready);
                    }
                    self.board.notify(Notice::success(NOTICE_STORAGE_CLEARED));
                }
                Err(e) => self.board.notify(Notice::failure("Error", e.to_string())),
            },
        }
        Ok(false)
    }

    /// Submit while redrawing the pre-submit screen so progress stays visible
    async fn submit<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        form: SubmitForm,
    ) -> Result<()> {
        let state = self.controller.state().clone();
        let view = self.view.clone();
        let board = self.board.clone();

        let outcome = await_with_redraw(self.controller.submit(&form), || {
            let notice = board.current();
            terminal
                .draw(|frame| render::view(frame, &state, &view, notice.as_ref()))
                .map_err(|e| Error::terminal(e.to_string()))?;
            Ok(())
        })
        .await;

        if let Some(ready) = self.controller.state().ready() {
            match outcome {
                SubmitOutcome::Sent { .. } => self.view.on_sent(ready),
                SubmitOutcome::Failed { .. } => self.view.reset_list_selection(
                    ready,
                    adbcast_app::MruList::MessageHistory,
                ),
                SubmitOutcome::Invalid(_) => {}
            }
        }
        Ok(())
    }

    /// Keep the unsent new message for the next launch
    pub async fn save_draft(&self) {
        if !self.controller.state().is_ready() {
            return;
        }
        if let Err(e) = self.controller.save_draft(&self.view.new_message).await {
            warn!("Failed to save draft: {}", e);
        }
    }

    pub fn expire_notices(&self) {
        self.board.expire(NOTICE_TTL);
    }
}

/// Await `pending` while calling `redraw` every [`TICK`]
///
/// A failed redraw is logged and `pending` always runs to completion.
async fn await_with_redraw<T>(
    pending: impl Future<Output = T>,
    mut redraw: impl FnMut() -> Result<()>,
) -> T {
    tokio::pin!(pending);
    let mut ticker = tokio::time::interval(TICK);

    loop {
        tokio::select! {
            output = &mut pending => return output,
            _ = ticker.tick() => {
                if let Err(e) = redraw() {
                    warn!("Redraw while sending failed: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adbcast_app::{Field, MemoryStore, MruList, Screen};
    use adbcast_bridge::test_utils::{devices_output, FakeRunner};
    use adbcast_bridge::{BridgeLocator, BRIDGE_BINARY};
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    struct Harness {
        app: App<MemoryStore, FakeRunner>,
        terminal: Terminal<TestBackend>,
        runner: FakeRunner,
        store: MemoryStore,
        _dir: TempDir,
    }

    fn harness() -> Harness {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(BRIDGE_BINARY), "").unwrap();
        let runner = FakeRunner::new();
        let store = MemoryStore::new();
        let controller = SessionController::new(
            BridgeLocator::new(dir.path()),
            runner.clone(),
            store.clone(),
            NoticeBoard::new(),
        );
        Harness {
            app: App::new(controller),
            terminal: Terminal::new(TestBackend::new(100, 24)).unwrap(),
            runner,
            store,
            _dir: dir,
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    async fn type_text(h: &mut Harness, text: &str) {
        for c in text.chars() {
            h.app
                .handle_input(&mut h.terminal, InputKey::Char(c))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_start_prefills_draft() {
        let mut h = harness();
        h.runner.push_stdout(&devices_output(&["EMU001"]));
        h.store.insert_raw("draft_message", "half typed");

        h.app.start(&mut h.terminal, None).await.unwrap();

        assert_eq!(h.app.view().new_message, "half typed");
        assert!(screen_text(&h.terminal).contains("half typed"));
    }

    #[tokio::test]
    async fn test_initial_message_overrides_draft() {
        let mut h = harness();
        h.runner.push_stdout(&devices_output(&["EMU001"]));
        h.store.insert_raw("draft_message", "half typed");

        h.app
            .start(&mut h.terminal, Some("from flag".to_string()))
            .await
            .unwrap();

        assert_eq!(h.app.view().new_message, "from flag");
    }

    #[tokio::test]
    async fn test_send_clears_message_and_shows_complete() {
        let mut h = harness();
        h.runner.push_stdout(&devices_output(&["EMU001"]));
        h.app.start(&mut h.terminal, None).await.unwrap();

        type_text(&mut h, "hello").await;
        let quit = h
            .app
            .handle_input(&mut h.terminal, InputKey::Enter)
            .await
            .unwrap();

        assert!(!quit);
        assert!(h.app.view().new_message.is_empty());
        assert_eq!(h.app.board().current(), Some(Notice::success("Complete!")));
        assert_eq!(h.runner.call_count(), 2);
        assert_eq!(h.store.raw("message_history").as_deref(), Some(r#"["hello"]"#));
    }

    #[tokio::test]
    async fn test_failed_send_keeps_message() {
        let mut h = harness();
        h.runner.push_stdout(&devices_output(&["EMU001"]));
        h.runner.push_exit_failure(Some(1), "error: closed");
        h.app.start(&mut h.terminal, None).await.unwrap();

        type_text(&mut h, "hello").await;
        h.app
            .handle_input(&mut h.terminal, InputKey::Enter)
            .await
            .unwrap();

        assert_eq!(h.app.view().new_message, "hello");
        let notice = h.app.board().current().unwrap();
        assert_eq!(notice.title, "Error");
        assert!(h.app.controller().state().is_ready());
    }

    #[tokio::test]
    async fn test_add_action_returns_to_form() {
        let mut h = harness();
        h.runner.push_stdout(&devices_output(&["EMU001"]));
        h.app.start(&mut h.terminal, None).await.unwrap();

        h.app
            .handle_input(&mut h.terminal, InputKey::CharCtrl('a'))
            .await
            .unwrap();
        type_text(&mut h, "ACT").await;
        h.app
            .handle_input(&mut h.terminal, InputKey::Enter)
            .await
            .unwrap();

        assert_eq!(h.app.view().screen, Screen::Main);
        let ready = h.app.controller().state().ready().unwrap();
        assert_eq!(ready.actions, vec!["ACT"]);
        assert_eq!(h.app.view().selected_value(ready, Field::Action), Some("ACT"));
    }

    #[tokio::test]
    async fn test_clear_storage_notice() {
        let mut h = harness();
        h.runner.push_stdout(&devices_output(&["EMU001"]));
        h.store.insert_raw(MruList::Actions.key(), r#"["ACT"]"#);
        h.app.start(&mut h.terminal, None).await.unwrap();

        h.app
            .handle_input(&mut h.terminal, InputKey::CharCtrl('l'))
            .await
            .unwrap();

        assert!(h.store.raw("adb_actions").is_none());
        assert_eq!(
            h.app.board().current(),
            Some(Notice::success(NOTICE_STORAGE_CLEARED))
        );
    }

    #[tokio::test]
    async fn test_esc_quits_and_draft_saved() {
        let mut h = harness();
        h.runner.push_stdout(&devices_output(&["EMU001"]));
        h.app.start(&mut h.terminal, None).await.unwrap();
        type_text(&mut h, "later").await;

        let quit = h
            .app
            .handle_input(&mut h.terminal, InputKey::Esc)
            .await
            .unwrap();
        h.app.save_draft().await;

        assert!(quit);
        assert_eq!(h.store.raw("draft_message").as_deref(), Some("later"));
    }

    #[tokio::test]
    async fn test_error_screen_rendered() {
        let mut h = harness();
        h.runner.push_stdout("List of devices attached\n");

        h.app.start(&mut h.terminal, None).await.unwrap();

        assert!(screen_text(&h.terminal).contains("No devices found!"));
        h.app.save_draft().await;
        assert!(h.store.raw("draft_message").is_none());
    }

    #[tokio::test]
    async fn test_failed_redraw_does_not_abandon_pending_send() {
        let mut redraws = 0;

        let output = await_with_redraw(
            async {
                tokio::time::sleep(TICK * 3).await;
                "sent"
            },
            || {
                redraws += 1;
                Err(Error::terminal("backend gone"))
            },
        )
        .await;

        assert_eq!(output, "sent");
        assert!(redraws >= 1);
    }
}
