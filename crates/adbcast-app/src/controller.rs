//! Session orchestration
//!
//! [`SessionController`] owns the [`SessionState`] and drives startup
//! (bridge check, discovery, list loads) and submissions (history record,
//! command build, dispatch). It talks to the outside world only through the
//! injected store, runner and notifier.

use adbcast_bridge::{
    discover_devices, dispatch, BridgeLocator, BroadcastCommand, CommandRunner, TokioCommandRunner,
};
use adbcast_core::prelude::*;
use adbcast_core::Notice;

use crate::config::Settings;
use crate::form::{SubmitForm, ValidSubmission, ValidationError};
use crate::notifier::Notifier;
use crate::state::{ErrorScreen, ReadyState, SessionState};
use crate::storage::{FileStore, KeyValueStore, MruList, MruStore};

pub const NOTICE_SEARCHING: &str = "Searching for devices...";
pub const NOTICE_SENDING: &str = "Sending...";
pub const NOTICE_COMPLETE: &str = "Complete!";
pub const NOTICE_FAILURE_TITLE: &str = "Error";

/// Result of a submit attempt; the session state is unchanged in every case
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The bridge accepted the broadcast
    Sent { command: BroadcastCommand },
    /// Rejected before anything was recorded or run
    Invalid(ValidationError),
    /// Recording or dispatch failed
    Failed { message: String },
}

impl SubmitOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, SubmitOutcome::Sent { .. })
    }
}

/// Result of an add-value attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddValueOutcome {
    /// Stored; carries the list as persisted
    Added(Vec<String>),
    Invalid(ValidationError),
}

/// Drives one session from launch to dismissal
pub struct SessionController<S, R, N> {
    locator: BridgeLocator,
    runner: R,
    mru: MruStore<S>,
    notifier: N,
    state: SessionState,
}

/// Controller wired to the real process runner and storage file
pub type AppController<N> = SessionController<FileStore, TokioCommandRunner, N>;

impl<N: Notifier> SessionController<FileStore, TokioCommandRunner, N> {
    pub fn from_settings(settings: &Settings, notifier: N) -> Self {
        let locator = BridgeLocator::resolve(settings.adb_dir());
        let store = FileStore::new(settings.storage_path());
        debug!(
            "adb dir: {}, storage: {}",
            locator.directory().display(),
            store.path().display()
        );
        Self::new(locator, TokioCommandRunner, store, notifier)
    }
}

impl<S, R, N> SessionController<S, R, N>
where
    S: KeyValueStore,
    R: CommandRunner,
    N: Notifier,
{
    pub fn new(locator: BridgeLocator, runner: R, store: S, notifier: N) -> Self {
        Self {
            locator,
            runner,
            mru: MruStore::new(store),
            notifier,
            state: SessionState::Loading,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn locator(&self) -> &BridgeLocator {
        &self.locator
    }

    pub fn mru(&self) -> &MruStore<S> {
        &self.mru
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    // ─────────────────────────────────────────────────────────
    // Startup
    // ─────────────────────────────────────────────────────────

    /// Move from `Loading` to `Error` or `Ready`
    ///
    /// Calling this again after the first transition does nothing.
    pub async fn start(&mut self) -> &SessionState {
        if !self.state.is_loading() {
            warn!("Session already started");
            return &self.state;
        }

        if !self.locator.exists() {
            self.state = SessionState::Error(ErrorScreen::bridge_not_found());
            return &self.state;
        }

        self.notifier.notify(Notice::progress(NOTICE_SEARCHING));

        self.state = match self.load_ready().await {
            Ok(Some(ready)) => {
                info!(
                    "Session ready with {} device(s), {} action(s), {} extra param(s), {} message(s)",
                    ready.devices.len(),
                    ready.actions.len(),
                    ready.extra_params.len(),
                    ready.message_history.len()
                );
                SessionState::Ready(ready)
            }
            Ok(None) => {
                info!("No devices attached");
                SessionState::Error(ErrorScreen::no_devices())
            }
            Err(e) => {
                error!("Session startup failed: {}", e);
                SessionState::Error(ErrorScreen::unknown(e.to_string()))
            }
        };

        self.notifier.dismiss();
        &self.state
    }

    /// Discovery followed by the three list loads; `None` when no device is attached
    async fn load_ready(&self) -> Result<Option<ReadyState>> {
        let devices = discover_devices(&self.runner, &self.locator).await?;
        if devices.is_empty() {
            return Ok(None);
        }

        let actions = self.mru.load(MruList::Actions).await?;
        let extra_params = self.mru.load(MruList::ExtraParams).await?;
        let message_history = self.mru.load(MruList::MessageHistory).await?;

        Ok(Some(ReadyState {
            devices,
            actions,
            extra_params,
            message_history,
        }))
    }

    // ─────────────────────────────────────────────────────────
    // Submit
    // ─────────────────────────────────────────────────────────

    /// Validate, record the message, then dispatch the broadcast
    pub async fn submit(&mut self, form: &SubmitForm) -> SubmitOutcome {
        let submission = match self.validate(form) {
            Ok(submission) => submission,
            Err(e) => {
                debug!("Submit rejected: {}", e);
                self.notifier
                    .notify(Notice::failure(NOTICE_FAILURE_TITLE, e.to_string()));
                return SubmitOutcome::Invalid(e);
            }
        };

        match self
            .mru
            .upsert(MruList::MessageHistory, &submission.message)
            .await
        {
            Ok(history) => self.refresh_list(MruList::MessageHistory, history),
            Err(e) => return self.fail(e),
        }

        let command = BroadcastCommand::new(
            submission.device,
            submission.action,
            submission.extra_param,
            &submission.message,
            self.locator.directory(),
        );

        self.notifier.notify(Notice::progress(NOTICE_SENDING));

        match dispatch(&self.runner, &command).await {
            Ok(_) => {
                if let Err(e) = self.mru.save_draft("").await {
                    warn!("Failed to clear draft: {}", e);
                }
                self.notifier.notify(Notice::success(NOTICE_COMPLETE));
                SubmitOutcome::Sent { command }
            }
            Err(e) => self.fail(e),
        }
    }

    fn validate(&self, form: &SubmitForm) -> std::result::Result<ValidSubmission, ValidationError> {
        if !self.state.is_ready() {
            return Err(ValidationError::NotReady);
        }
        form.validate()
    }

    fn fail(&self, e: Error) -> SubmitOutcome {
        let message = e.to_string();
        warn!("Broadcast failed: {}", message);
        self.notifier
            .notify(Notice::failure(NOTICE_FAILURE_TITLE, message.clone()));
        SubmitOutcome::Failed { message }
    }

    // ─────────────────────────────────────────────────────────
    // Recall lists
    // ─────────────────────────────────────────────────────────

    /// Record a new action or extra param key
    ///
    /// Works in any state so headless commands can seed the lists without
    /// an attached device.
    pub async fn add_value(&mut self, list: MruList, value: &str) -> Result<AddValueOutcome> {
        if value.is_empty() {
            return Ok(AddValueOutcome::Invalid(ValidationError::EmptyValue));
        }

        let values = self.mru.upsert(list, value).await?;
        self.refresh_list(list, values.clone());
        Ok(AddValueOutcome::Added(values))
    }

    /// Remove all three recall lists
    pub async fn clear_storage(&mut self) -> Result<()> {
        self.mru.clear_all().await?;
        if let Some(ready) = self.state.ready_mut() {
            for list in MruList::ALL {
                ready.set_list(list, Vec::new());
            }
        }
        Ok(())
    }

    pub async fn load_draft(&self) -> Option<String> {
        match self.mru.load_draft().await {
            Ok(draft) => draft,
            Err(e) => {
                warn!("Failed to load draft: {}", e);
                None
            }
        }
    }

    pub async fn save_draft(&self, draft: &str) -> Result<()> {
        self.mru.save_draft(draft).await
    }

    fn refresh_list(&mut self, list: MruList, values: Vec<String>) {
        if let Some(ready) = self.state.ready_mut() {
            ready.set_list(list, values);
        }
    }
}
