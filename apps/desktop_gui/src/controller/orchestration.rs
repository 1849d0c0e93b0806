//! Queueing helpers from widget callbacks to the render controller.

use crossbeam_channel::{Sender, TrySendError};

use crate::controller::events::{StatusLine, UiEvent};

pub fn dispatch_ui_event(ui_tx: &Sender<UiEvent>, event: UiEvent, status: &mut Option<StatusLine>) {
    let event_name = event.name();

    match ui_tx.try_send(event) {
        Ok(()) => tracing::debug!(event = event_name, "queued ui event"),
        Err(TrySendError::Full(_)) => {
            tracing::warn!(event = event_name, "ui event queue is full");
            *status = Some(StatusLine::warning(
                "Too many pending filter changes; change the filter again",
            ));
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(event = event_name, "ui event queue disconnected");
            *status = Some(StatusLine::warning("Event queue closed; restart the viewer"));
        }
    }
}
