use std::sync::mpsc::TryRecvError;
use std::time::Instant;

use tracing::{debug, warn};

use crate::app::App;
use crate::models::ipc::ConsoleEvent;

pub(crate) fn pump_console_events(app: &mut App) {
    loop {
        match app.event_rx.try_recv() {
            Ok(event) => apply_event(app, event),
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => break,
        }
    }
    app.notifications.expire(Instant::now());
}

pub(crate) fn apply_event(app: &mut App, event: ConsoleEvent) {
    match event {
        ConsoleEvent::BaseInfoLoaded(Ok(info)) => {
            debug!(topic = %info.topic_name, "topic metadata loaded");
            app.stores.base_info.set(info);
        }
        // The page stays in its loading state; nothing to retry here.
        ConsoleEvent::BaseInfoLoaded(Err(err)) => {
            warn!(%err, "topic metadata request failed");
        }
        ConsoleEvent::BusinessLoaded(Ok(business)) => {
            app.stores.business.set(business);
        }
        ConsoleEvent::BusinessLoaded(Err(err)) => {
            warn!(%err, "topic business request failed");
        }
        ConsoleEvent::AppsLoaded(Ok(apps)) => {
            debug!(count = apps.len(), "app list loaded");
            app.stores.apps.set(apps);
        }
        ConsoleEvent::AppsLoaded(Err(err)) => {
            warn!(%err, "app list request failed");
        }
        ConsoleEvent::SamplingFinished(outcome) => {
            let notification = app.sampling.finish(outcome);
            app.notifications.push(notification);
        }
        ConsoleEvent::TopicEdited(outcome) => {
            let succeeded = outcome.is_ok();
            let notification = app.edit.finish(outcome);
            app.notifications.push(notification);
            if succeeded {
                app.refresh_base_info();
            }
        }
    }
}
