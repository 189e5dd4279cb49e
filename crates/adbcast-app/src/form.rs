//! Submitted form values and their validation

use thiserror::Error;

/// Input errors reported to the user without changing session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("Device is not selected")]
    NoDevice,

    #[error("Value can't be empty")]
    EmptyValue,

    #[error("Devices are not loaded yet")]
    NotReady,
}

/// Initial error of an untouched add-value field
pub const INPUT_EMPTY_MESSAGE: &str = "Input can't be empty";

/// Field values of the main form at the moment of submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitForm {
    pub selected_message: Option<String>,
    pub new_message: String,
    pub action: Option<String>,
    pub extra_param: Option<String>,
    pub device: Option<String>,
}

/// A submission that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub message: String,
    pub device: String,
    pub action: String,
    pub extra_param: String,
}

impl SubmitForm {
    /// New message if typed, otherwise the selected history entry
    pub fn resolved_message(&self) -> Option<&str> {
        if !self.new_message.is_empty() {
            return Some(&self.new_message);
        }
        self.selected_message.as_deref().filter(|m| !m.is_empty())
    }

    /// Check message then device; action and extra param pass through even if empty
    pub fn validate(&self) -> Result<ValidSubmission, ValidationError> {
        let message = self
            .resolved_message()
            .ok_or(ValidationError::EmptyMessage)?;
        let device = self
            .device
            .as_deref()
            .filter(|d| !d.is_empty())
            .ok_or(ValidationError::NoDevice)?;

        Ok(ValidSubmission {
            message: message.to_string(),
            device: device.to_string(),
            action: self.action.clone().unwrap_or_default(),
            extra_param: self.extra_param.clone().unwrap_or_default(),
        })
    }
}

/// Single-field form used to add an action or extra param key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddValueForm {
    value: String,
    error: Option<String>,
}

impl Default for AddValueForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AddValueForm {
    pub fn new() -> Self {
        Self {
            value: String::new(),
            error: Some(INPUT_EMPTY_MESSAGE.to_string()),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Inline validation message, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the field contents and re-validate
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.error = if self.value.is_empty() {
            Some(ValidationError::EmptyValue.to_string())
        } else {
            None
        };
    }

    pub fn push_char(&mut self, c: char) {
        let mut value = std::mem::take(&mut self.value);
        value.push(c);
        self.set_value(value);
    }

    pub fn pop_char(&mut self) {
        let mut value = std::mem::take(&mut self.value);
        value.pop();
        self.set_value(value);
    }

    /// Value ready to store, or the reason it is rejected
    pub fn validated(&self) -> Result<&str, ValidationError> {
        if self.value.is_empty() {
            Err(ValidationError::EmptyValue)
        } else {
            Ok(&self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(new: &str, selected: Option<&str>, device: Option<&str>) -> SubmitForm {
        SubmitForm {
            selected_message: selected.map(String::from),
            new_message: new.to_string(),
            action: None,
            extra_param: None,
            device: device.map(String::from),
        }
    }

    #[test]
    fn test_new_message_wins_over_history() {
        let form = form("typed", Some("recalled"), Some("EMU001"));
        assert_eq!(form.resolved_message(), Some("typed"));
    }

    #[test]
    fn test_history_used_when_new_message_empty() {
        let form = form("", Some("recalled"), Some("EMU001"));
        assert_eq!(form.validate().unwrap().message, "recalled");
    }

    #[test]
    fn test_empty_message_rejected_first() {
        let form = form("", None, None);
        assert_eq!(form.validate(), Err(ValidationError::EmptyMessage));
    }

    #[test]
    fn test_missing_device_rejected() {
        let form = form("hello", None, None);
        assert_eq!(form.validate(), Err(ValidationError::NoDevice));

        let form = SubmitForm {
            device: Some(String::new()),
            ..form
        };
        assert_eq!(form.validate(), Err(ValidationError::NoDevice));
    }

    #[test]
    fn test_unset_action_and_key_become_empty() {
        let submission = form("hello", None, Some("EMU001")).validate().unwrap();
        assert_eq!(submission.action, "");
        assert_eq!(submission.extra_param, "");
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::EmptyMessage.to_string(), "Message is empty");
        assert_eq!(ValidationError::NoDevice.to_string(), "Device is not selected");
        assert_eq!(ValidationError::EmptyValue.to_string(), "Value can't be empty");
    }

    #[test]
    fn test_add_value_initial_error() {
        let form = AddValueForm::new();
        assert_eq!(form.error(), Some("Input can't be empty"));
        assert_eq!(form.validated(), Err(ValidationError::EmptyValue));
    }

    #[test]
    fn test_add_value_error_tracks_input() {
        let mut form = AddValueForm::new();
        form.push_char('E');
        assert_eq!(form.error(), None);
        assert_eq!(form.validated(), Ok("E"));

        form.pop_char();
        assert_eq!(form.error(), Some("Value can't be empty"));
    }
}
