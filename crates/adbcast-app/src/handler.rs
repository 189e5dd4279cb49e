//! Key handling and view updates
//!
//! [`handle_key`] maps an [`InputKey`] to a [`Message`] based on what is on
//! screen; [`update`] applies the message to the [`ViewState`] and returns an
//! [`UpdateAction`] when async session work is required.

use crate::form::SubmitForm;
use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::SessionState;
use crate::storage::MruList;
use crate::view::{Screen, ViewState};

/// Session work requested by an update, performed by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    Submit(SubmitForm),
    SaveValue { list: MruList, value: String },
    ClearStorage,
    Quit,
}

/// Convert key events to messages based on the current screen
pub fn handle_key(state: &SessionState, view: &ViewState, key: InputKey) -> Option<Message> {
    if key == InputKey::CharCtrl('c') {
        return Some(Message::Quit);
    }

    match (state, &view.screen) {
        (SessionState::Ready(_), Screen::AddValue { .. }) => handle_key_add_value(key),
        (SessionState::Ready(_), Screen::Main) => handle_key_main(view, key),
        _ => handle_key_static(key),
    }
}

/// Loading and error screens only allow leaving
fn handle_key_static(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc | InputKey::Enter | InputKey::Char('q') => Some(Message::Quit),
        _ => None,
    }
}

fn handle_key_main(view: &ViewState, key: InputKey) -> Option<Message> {
    let dropdown = view.focus.is_dropdown();

    match key {
        InputKey::Esc => Some(Message::Quit),

        InputKey::Tab | InputKey::Down => Some(Message::FocusNext),
        InputKey::BackTab | InputKey::Up => Some(Message::FocusPrev),

        InputKey::Right if dropdown => Some(Message::SelectNext),
        InputKey::Left if dropdown => Some(Message::SelectPrev),

        InputKey::Enter => Some(Message::Submit),

        InputKey::CharCtrl('a') => Some(Message::OpenAddValue(MruList::Actions)),
        InputKey::CharCtrl('e') => Some(Message::OpenAddValue(MruList::ExtraParams)),
        InputKey::CharCtrl('l') => Some(Message::ClearStorage),

        InputKey::CharCtrl('u') if !dropdown => Some(Message::InputClear),
        InputKey::Backspace if !dropdown => Some(Message::InputBackspace),
        InputKey::Char(c) if !dropdown => Some(Message::InputChar(c)),

        _ => None,
    }
}

fn handle_key_add_value(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::CloseAddValue),
        InputKey::Enter => Some(Message::SaveValue),
        InputKey::CharCtrl('u') => Some(Message::InputClear),
        InputKey::Backspace => Some(Message::InputBackspace),
        InputKey::Char(c) => Some(Message::InputChar(c)),
        _ => None,
    }
}

/// Apply `message` to the view
pub fn update(state: &SessionState, view: &mut ViewState, message: Message) -> Option<UpdateAction> {
    if message == Message::Quit {
        return Some(UpdateAction::Quit);
    }

    let ready = state.ready()?;

    if let Screen::AddValue { list, form } = &mut view.screen {
        match message {
            Message::InputChar(c) => form.push_char(c),
            Message::InputBackspace => form.pop_char(),
            Message::InputClear => form.set_value(""),
            Message::CloseAddValue => view.screen = Screen::Main,
            Message::SaveValue => {
                return match form.validated() {
                    Ok(value) => Some(UpdateAction::SaveValue {
                        list: *list,
                        value: value.to_string(),
                    }),
                    Err(_) => {
                        form.set_value("");
                        None
                    }
                };
            }
            _ => {}
        }
        return None;
    }

    match message {
        Message::FocusNext => view.focus = view.focus.next(),
        Message::FocusPrev => view.focus = view.focus.prev(),
        Message::SelectNext => view.cycle_selection(ready, 1),
        Message::SelectPrev => view.cycle_selection(ready, -1),
        Message::InputChar(c) => view.new_message.push(c),
        Message::InputBackspace => {
            view.new_message.pop();
        }
        Message::InputClear => view.new_message.clear(),
        Message::Submit => return Some(UpdateAction::Submit(view.submit_form(ready))),
        Message::OpenAddValue(list) => view.screen = Screen::add_value(list),
        Message::ClearStorage => return Some(UpdateAction::ClearStorage),
        _ => {}
    }
    None
}
