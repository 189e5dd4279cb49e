//! Headless command runner

use std::io::Write;

use adbcast_app::{
    AddValueOutcome, KeyValueStore, MruList, Notifier, SessionController, SessionState,
    SubmitForm, SubmitOutcome,
};
use adbcast_bridge::CommandRunner;
use adbcast_core::prelude::*;

use super::{HeadlessEvent, HeadlessStatus};
use crate::cli::Command;

/// Run one headless command against `controller`
///
/// Events go to `out`; notices go through the controller's notifier.
pub async fn run_command<S, R, N>(
    controller: &mut SessionController<S, R, N>,
    command: Command,
    out: &mut impl Write,
    json: bool,
) -> Result<HeadlessStatus>
where
    S: KeyValueStore,
    R: CommandRunner,
    N: Notifier,
{
    info!("Running headless command: {:?}", command);

    let event = match command {
        Command::Devices => match start(controller).await {
            Ok(ready) => HeadlessEvent::Devices {
                devices: ready.devices.clone(),
            },
            Err(event) => event,
        },

        Command::Send {
            device,
            message,
            action,
            extra_param,
        } => {
            send(controller, device, message, action, extra_param).await
        }

        Command::AddAction { value } => add_value(controller, MruList::Actions, &value).await?,
        Command::AddExtraParam { value } => {
            add_value(controller, MruList::ExtraParams, &value).await?
        }

        Command::List { target } => {
            let list = MruList::from(target);
            HeadlessEvent::List {
                list: list.key().to_string(),
                values: controller.mru().load(list).await?,
            }
        }

        Command::Clear => {
            controller.clear_storage().await?;
            HeadlessEvent::StorageCleared
        }

        Command::InitConfig => {
            return Err(Error::config("init-config does not run a session"));
        }
    };

    event.emit(out, json)?;

    Ok(if event.is_error() {
        HeadlessStatus::Failure
    } else {
        HeadlessStatus::Success
    })
}

/// Start the session; any non-ready state becomes an error event
async fn start<'a, S, R, N>(
    controller: &'a mut SessionController<S, R, N>,
) -> std::result::Result<&'a adbcast_app::ReadyState, HeadlessEvent>
where
    S: KeyValueStore,
    R: CommandRunner,
    N: Notifier,
{
    match controller.start().await {
        SessionState::Ready(ready) => Ok(ready),
        SessionState::Error(screen) => Err(HeadlessEvent::error(&screen.title, &screen.message)),
        SessionState::Loading => Err(HeadlessEvent::error("Unknown error!", "Session did not start")),
    }
}

async fn send<S, R, N>(
    controller: &mut SessionController<S, R, N>,
    device: Option<String>,
    message: Option<String>,
    action: Option<String>,
    extra_param: Option<String>,
) -> HeadlessEvent
where
    S: KeyValueStore,
    R: CommandRunner,
    N: Notifier,
{
    let form = match start(controller).await {
        Ok(ready) => SubmitForm {
            selected_message: ready.message_history.first().cloned(),
            new_message: message.unwrap_or_default(),
            action: action.or_else(|| ready.actions.first().cloned()),
            extra_param: extra_param.or_else(|| ready.extra_params.first().cloned()),
            device,
        },
        Err(event) => return event,
    };

    match controller.submit(&form).await {
        SubmitOutcome::Sent { command } => HeadlessEvent::Sent {
            device: command.device.clone(),
            command: command.command_line(),
        },
        SubmitOutcome::Invalid(e) => HeadlessEvent::error("Error", e.to_string()),
        SubmitOutcome::Failed { message } => HeadlessEvent::error("Error", message),
    }
}

async fn add_value<S, R, N>(
    controller: &mut SessionController<S, R, N>,
    list: MruList,
    value: &str,
) -> Result<HeadlessEvent>
where
    S: KeyValueStore,
    R: CommandRunner,
    N: Notifier,
{
    Ok(match controller.add_value(list, value).await? {
        AddValueOutcome::Added(values) => HeadlessEvent::ValueAdded {
            list: list.key().to_string(),
            values,
        },
        AddValueOutcome::Invalid(e) => HeadlessEvent::error("Error", e.to_string()),
    })
}
