//! UI-side state of the form screens
//!
//! Holds what the user is editing (focus, dropdown selections, typed text)
//! separately from [`SessionState`](crate::state::SessionState), which only
//! carries the option lists.

use crate::form::{AddValueForm, SubmitForm};
use crate::state::ReadyState;
use crate::storage::MruList;

/// Fields of the main form in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    MessageHistory,
    #[default]
    NewMessage,
    Action,
    ExtraParam,
    Device,
}

impl Field {
    pub const ORDER: [Field; 5] = [
        Field::MessageHistory,
        Field::NewMessage,
        Field::Action,
        Field::ExtraParam,
        Field::Device,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Field::MessageHistory => "Message",
            Field::NewMessage => "New message",
            Field::Action => "Action",
            Field::ExtraParam => "Extra string param key",
            Field::Device => "Device",
        }
    }

    pub fn is_dropdown(&self) -> bool {
        !matches!(self, Field::NewMessage)
    }

    fn index(&self) -> usize {
        Field::ORDER
            .iter()
            .position(|f| f == self)
            .unwrap_or_default()
    }

    pub fn next(&self) -> Field {
        Field::ORDER[(self.index() + 1) % Field::ORDER.len()]
    }

    pub fn prev(&self) -> Field {
        let len = Field::ORDER.len();
        Field::ORDER[(self.index() + len - 1) % len]
    }
}

/// Which screen is on top
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Main,
    AddValue { list: MruList, form: AddValueForm },
}

impl Screen {
    pub fn add_value(list: MruList) -> Self {
        Screen::AddValue {
            list,
            form: AddValueForm::new(),
        }
    }
}

/// Selected index per dropdown; `None` when the list is empty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selections {
    pub message_history: Option<usize>,
    pub action: Option<usize>,
    pub extra_param: Option<usize>,
    pub device: Option<usize>,
}

/// Everything the user is currently editing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub screen: Screen,
    pub focus: Field,
    pub new_message: String,
    pub selections: Selections,
}

fn option_len(ready: &ReadyState, field: Field) -> usize {
    match field {
        Field::MessageHistory => ready.message_history.len(),
        Field::Action => ready.actions.len(),
        Field::ExtraParam => ready.extra_params.len(),
        Field::Device => ready.devices.len(),
        Field::NewMessage => 0,
    }
}

fn first_or_none(len: usize) -> Option<usize> {
    (len > 0).then_some(0)
}

impl ViewState {
    /// Fresh view with `draft` pre-filled into the new-message field
    pub fn with_draft(draft: Option<String>) -> Self {
        Self {
            new_message: draft.unwrap_or_default(),
            ..Default::default()
        }
    }

    fn selection_mut(&mut self, field: Field) -> Option<&mut Option<usize>> {
        match field {
            Field::MessageHistory => Some(&mut self.selections.message_history),
            Field::Action => Some(&mut self.selections.action),
            Field::ExtraParam => Some(&mut self.selections.extra_param),
            Field::Device => Some(&mut self.selections.device),
            Field::NewMessage => None,
        }
    }

    pub fn selection(&self, field: Field) -> Option<usize> {
        match field {
            Field::MessageHistory => self.selections.message_history,
            Field::Action => self.selections.action,
            Field::ExtraParam => self.selections.extra_param,
            Field::Device => self.selections.device,
            Field::NewMessage => None,
        }
    }

    /// Select the first entry of every dropdown, like a freshly opened form
    pub fn reset_selections(&mut self, ready: &ReadyState) {
        for field in Field::ORDER.into_iter().filter(Field::is_dropdown) {
            let len = option_len(ready, field);
            if let Some(selection) = self.selection_mut(field) {
                *selection = first_or_none(len);
            }
        }
    }

    /// Reset one dropdown after its list changed
    pub fn reset_list_selection(&mut self, ready: &ReadyState, list: MruList) {
        let field = match list {
            MruList::Actions => Field::Action,
            MruList::ExtraParams => Field::ExtraParam,
            MruList::MessageHistory => Field::MessageHistory,
        };
        let len = option_len(ready, field);
        if let Some(selection) = self.selection_mut(field) {
            *selection = first_or_none(len);
        }
    }

    /// Cycle the focused dropdown by `step` (wrapping)
    pub fn cycle_selection(&mut self, ready: &ReadyState, step: isize) {
        let field = self.focus;
        let len = option_len(ready, field);
        let Some(selection) = self.selection_mut(field) else {
            return;
        };
        if len == 0 {
            *selection = None;
            return;
        }
        let current = selection.unwrap_or(0).min(len - 1) as isize;
        let next = (current + step).rem_euclid(len as isize) as usize;
        *selection = Some(next);
    }

    /// Text shown for a dropdown field
    pub fn selected_value<'a>(&self, ready: &'a ReadyState, field: Field) -> Option<&'a str> {
        let index = self.selection(field)?;
        match field {
            Field::MessageHistory => ready.message_history.get(index).map(String::as_str),
            Field::Action => ready.actions.get(index).map(String::as_str),
            Field::ExtraParam => ready.extra_params.get(index).map(String::as_str),
            Field::Device => ready.devices.get(index).map(|d| d.id.as_str()),
            Field::NewMessage => None,
        }
    }

    /// Snapshot of the form values for submission
    pub fn submit_form(&self, ready: &ReadyState) -> SubmitForm {
        let value = |field| self.selected_value(ready, field).map(String::from);
        SubmitForm {
            selected_message: value(Field::MessageHistory),
            new_message: self.new_message.clone(),
            action: value(Field::Action),
            extra_param: value(Field::ExtraParam),
            device: value(Field::Device),
        }
    }

    /// Return to the neutral form after a successful send
    pub fn on_sent(&mut self, ready: &ReadyState) {
        self.screen = Screen::Main;
        self.new_message.clear();
        self.reset_list_selection(ready, MruList::MessageHistory);
    }

    /// Back to the main form after a value was stored
    pub fn on_value_saved(&mut self, ready: &ReadyState, list: MruList) {
        self.screen = Screen::Main;
        self.reset_list_selection(ready, list);
    }
}
