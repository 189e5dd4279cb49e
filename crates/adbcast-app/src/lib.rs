//! # adbcast-app - Session State and Orchestration
//!
//! Everything between the bridge and the screen: configuration, persisted
//! recall lists, the session state machine and the UI-independent form
//! handling. Rendering lives in `adbcast-tui`.
//!
//! ## Public API
//!
//! - [`SessionController`] - Startup and submit flows over injected capabilities
//! - [`SessionState`] - `Loading`, `Error` or `Ready`
//! - [`MruStore`] - Most-recently-used lists over a [`KeyValueStore`]
//! - [`Notifier`] - Sink for progress, success and failure notices
//! - [`handler::handle_key`] / [`handler::update`] - Key handling for the form screens

pub mod config;
pub mod controller;
pub mod form;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod notifier;
pub mod state;
pub mod storage;
pub mod view;

pub use controller::{
    AddValueOutcome, AppController, SessionController, SubmitOutcome, NOTICE_COMPLETE,
    NOTICE_FAILURE_TITLE, NOTICE_SEARCHING, NOTICE_SENDING,
};
pub use form::{AddValueForm, SubmitForm, ValidationError};
pub use handler::UpdateAction;
pub use input_key::InputKey;
pub use message::Message;
pub use notifier::{ConsoleNotifier, NoticeBoard, Notifier};
pub use state::{ErrorScreen, ReadyState, SessionState};
pub use storage::{FileStore, KeyValueStore, MruList, MruStore};
#[cfg(any(test, feature = "test-helpers"))]
pub use storage::MemoryStore;
pub use view::{Field, Screen, ViewState};
