use std::future::Future;
use std::sync::mpsc;

use async_trait::async_trait;
use eframe::egui;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::error::ApiError;
use crate::models::ipc::ConsoleEvent;
use crate::models::topic::{
    AppInfo, SampleRecord, SamplingRequest, TopicBaseInfo, TopicBusiness, TopicEdit,
};

pub(crate) mod http;
pub(crate) mod tls;

pub(crate) use http::HttpTopicApi;

/// Network operations the topic page depends on.
#[async_trait]
pub(crate) trait TopicApi: Send + Sync {
    async fn fetch_topic_base_info(
        &self,
        cluster_id: i64,
        topic: &str,
    ) -> Result<TopicBaseInfo, ApiError>;

    async fn fetch_topic_business(
        &self,
        cluster_id: i64,
        topic: &str,
    ) -> Result<TopicBusiness, ApiError>;

    async fn submit_topic_edit(&self, edit: &TopicEdit) -> Result<(), ApiError>;

    async fn submit_sampling(
        &self,
        request: &SamplingRequest,
        cluster_id: i64,
        topic: &str,
    ) -> Result<Vec<SampleRecord>, ApiError>;

    async fn fetch_app_list(&self) -> Result<Vec<AppInfo>, ApiError>;
}

/// Runs `request` on the runtime, reports its outcome to the UI thread and
/// wakes the UI so the event is applied on the next frame.
pub(crate) fn spawn_request<T, F>(
    runtime: &Runtime,
    event_tx: mpsc::Sender<ConsoleEvent>,
    repaint: egui::Context,
    request: F,
    into_event: fn(Result<T, ApiError>) -> ConsoleEvent,
) -> JoinHandle<()>
where
    T: Send + 'static,
    F: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    runtime.spawn(async move {
        let outcome = request.await;
        if event_tx.send(into_event(outcome)).is_ok() {
            repaint.request_repaint();
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// A context past its start-up frames, counting repaint requests.
    fn idle_context() -> (egui::Context, Arc<AtomicUsize>) {
        let ctx = egui::Context::default();
        for _ in 0..3 {
            let _ = ctx.run(egui::RawInput::default(), |_| {});
        }
        let wakeups = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&wakeups);
        ctx.set_request_repaint_callback(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (ctx, wakeups)
    }

    #[test]
    fn settled_request_wakes_the_ui() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let (event_tx, event_rx) = mpsc::channel();
        let (ctx, wakeups) = idle_context();

        let handle = spawn_request(
            &runtime,
            event_tx,
            ctx,
            async { Ok(Vec::new()) },
            ConsoleEvent::AppsLoaded,
        );
        runtime.block_on(handle).unwrap();

        assert!(matches!(event_rx.try_recv(), Ok(ConsoleEvent::AppsLoaded(Ok(apps))) if apps.is_empty()));
        assert!(wakeups.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn closed_channel_skips_the_wakeup() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let (event_tx, event_rx) = mpsc::channel();
        drop(event_rx);
        let (ctx, wakeups) = idle_context();

        let handle = spawn_request(
            &runtime,
            event_tx,
            ctx,
            async { Err(ApiError::EmptyPayload) },
            ConsoleEvent::AppsLoaded,
        );
        runtime.block_on(handle).unwrap();

        assert_eq!(wakeups.load(Ordering::SeqCst), 0);
    }
}
