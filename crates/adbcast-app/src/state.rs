//! Session state machine
//!
//! A session starts in [`SessionState::Loading`] and moves exactly once to
//! either [`SessionState::Error`] or [`SessionState::Ready`]. There is no way
//! back to `Loading`; submissions happen inside `Ready`.

use adbcast_bridge::Device;

use crate::storage::MruList;

pub const TITLE_BRIDGE_NOT_FOUND: &str = "adb command not found!";
pub const TITLE_NO_DEVICES: &str = "No devices found!";
pub const TITLE_UNKNOWN: &str = "Unknown error!";

pub const MESSAGE_NO_DEVICES: &str = "Please connect device and re-run.";

/// Remediation text for a missing bridge executable
pub fn bridge_not_found_message() -> String {
    "Please check the adb directory path. Set `adb_dir` under [bridge] in config.toml \
     or pass --adb-dir."
        .to_string()
}

/// Full-screen error content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorScreen {
    pub title: String,
    pub message: String,
}

impl ErrorScreen {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn bridge_not_found() -> Self {
        Self::new(TITLE_BRIDGE_NOT_FOUND, bridge_not_found_message())
    }

    pub fn no_devices() -> Self {
        Self::new(TITLE_NO_DEVICES, MESSAGE_NO_DEVICES)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(TITLE_UNKNOWN, message)
    }

    /// Markdown-style rendering: `# title`, blank line, message
    pub fn markdown(&self) -> String {
        format!("# {}\n\n{}", self.title, self.message)
    }
}

/// Everything the form needs once discovery succeeded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadyState {
    pub devices: Vec<Device>,
    pub actions: Vec<String>,
    pub extra_params: Vec<String>,
    pub message_history: Vec<String>,
}

impl ReadyState {
    pub fn list(&self, list: MruList) -> &[String] {
        match list {
            MruList::Actions => &self.actions,
            MruList::ExtraParams => &self.extra_params,
            MruList::MessageHistory => &self.message_history,
        }
    }

    /// Replace one recall list with freshly persisted contents
    pub fn set_list(&mut self, list: MruList, values: Vec<String>) {
        match list {
            MruList::Actions => self.actions = values,
            MruList::ExtraParams => self.extra_params = values,
            MruList::MessageHistory => self.message_history = values,
        }
    }

    pub fn device_ids(&self) -> Vec<&str> {
        self.devices.iter().map(|d| d.id.as_str()).collect()
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Loading,
    Error(ErrorScreen),
    Ready(ReadyState),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, SessionState::Ready(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SessionState::Error(_))
    }

    pub fn ready(&self) -> Option<&ReadyState> {
        match self {
            SessionState::Ready(ready) => Some(ready),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut ReadyState> {
        match self {
            SessionState::Ready(ready) => Some(ready),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorScreen> {
        match self {
            SessionState::Error(screen) => Some(screen),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_loading() {
        let state = SessionState::default();
        assert!(state.is_loading());
        assert!(state.ready().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_error_markdown() {
        let screen = ErrorScreen::no_devices();
        assert_eq!(
            screen.markdown(),
            "# No devices found!\n\nPlease connect device and re-run."
        );
    }

    #[test]
    fn test_bridge_not_found_mentions_setting() {
        let screen = ErrorScreen::bridge_not_found();
        assert_eq!(screen.title, "adb command not found!");
        assert!(screen.message.contains("adb_dir"));
    }

    #[test]
    fn test_ready_set_list() {
        let mut ready = ReadyState::default();
        ready.set_list(MruList::ExtraParams, vec!["EAN".to_string()]);

        assert_eq!(ready.list(MruList::ExtraParams), ["EAN".to_string()]);
        assert!(ready.list(MruList::Actions).is_empty());
    }

    #[test]
    fn test_ready_mut_only_in_ready() {
        let mut state = SessionState::Error(ErrorScreen::unknown("boom"));
        assert!(state.ready_mut().is_none());

        let mut state = SessionState::Ready(ReadyState::default());
        assert!(state.ready_mut().is_some());
    }

    #[test]
    fn test_device_ids() {
        let ready = ReadyState {
            devices: vec![Device::new("EMU001"), Device::new("R5CT")],
            ..Default::default()
        };
        assert_eq!(ready.device_ids(), vec!["EMU001", "R5CT"]);
    }
}
