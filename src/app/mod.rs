use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use eframe::egui;
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};
use url::Url;

use crate::app::edit::{TopicEditDialog, edit_allowed};
use crate::app::sampling::SamplingDrawer;
use crate::app::state::{SubmitStart, TopicTab};
use crate::app::tabs::TabRoute;
use crate::client::{self, TopicApi};
use crate::config::Config;
use crate::error::{ApiError, ConfigError};
use crate::models::identity::ViewIdentity;
use crate::models::ipc::{ConsoleEvent, ExternalAction};
use crate::models::location::Location;
use crate::models::notification::{Notification, Notifications};
use crate::models::topic::CurrentUser;
use crate::store::Stores;

pub(crate) mod edit;
pub(crate) mod events;
pub(crate) mod sampling;
pub(crate) mod state;
pub(crate) mod tabs;

pub struct App {
    pub(crate) config: Config,
    pub(crate) identity: ViewIdentity,
    pub(crate) route: TabRoute,
    pub(crate) stores: Stores,
    pub(crate) sampling: SamplingDrawer,
    pub(crate) edit: TopicEditDialog,
    pub(crate) notifications: Notifications,
    pub(crate) api: Arc<dyn TopicApi>,
    pub(crate) runtime: Runtime,
    pub(crate) event_tx: Sender<ConsoleEvent>,
    pub(crate) event_rx: Receiver<ConsoleEvent>,
    pub(crate) ctx: egui::Context,
}

impl App {
    pub(crate) fn new(
        config: Config,
        start_url: Url,
        api: Arc<dyn TopicApi>,
        ctx: egui::Context,
    ) -> Result<Self, ConfigError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(ConfigError::Runtime)?;
        let (event_tx, event_rx) = mpsc::channel();

        let identity = ViewIdentity::from_url(&start_url);
        let stores = Stores::default();
        stores.region.set(config.region.clone());
        stores.user.set(CurrentUser {
            username: config.username.clone(),
            role: config.role,
        });
        stores.consume_detail.set(false);

        let route = TabRoute::new(
            Location::new(start_url),
            identity.clone(),
            config.url_prefix(),
            stores.region.clone(),
            stores.consume_detail.clone(),
        );
        info!(?identity, "opening topic page");

        let mut app = Self {
            config,
            identity,
            route,
            stores,
            sampling: SamplingDrawer::default(),
            edit: TopicEditDialog::default(),
            notifications: Notifications::default(),
            api,
            runtime,
            event_tx,
            event_rx,
            ctx,
        };
        app.mount();
        Ok(app)
    }

    /// Issues the initial loads; each one fills its store when it settles.
    pub(crate) fn mount(&mut self) {
        self.refresh_base_info();

        let api = Arc::clone(&self.api);
        client::spawn_request(
            &self.runtime,
            self.event_tx.clone(),
            self.ctx.clone(),
            async move { api.fetch_app_list().await },
            ConsoleEvent::AppsLoaded,
        );

        let Some((cluster_id, topic)) = self.topic_key() else {
            return;
        };
        let api = Arc::clone(&self.api);
        client::spawn_request(
            &self.runtime,
            self.event_tx.clone(),
            self.ctx.clone(),
            async move { api.fetch_topic_business(cluster_id, &topic).await },
            ConsoleEvent::BusinessLoaded,
        );
    }

    pub(crate) fn refresh_base_info(&mut self) {
        let Some((cluster_id, topic)) = self.topic_key() else {
            warn!("page address lacks cluster id or topic, metadata not requested");
            self.stores.base_info.clear();
            return;
        };
        let api = Arc::clone(&self.api);
        client::spawn_request(
            &self.runtime,
            self.event_tx.clone(),
            self.ctx.clone(),
            async move { api.fetch_topic_base_info(cluster_id, &topic).await },
            ConsoleEvent::BaseInfoLoaded,
        );
    }

    fn topic_key(&self) -> Option<(i64, String)> {
        Some((self.identity.cluster_id?, self.identity.topic_name.clone()?))
    }

    pub(crate) fn active_tab(&self) -> Option<TopicTab> {
        TopicTab::from_key(self.route.active_tab())
    }

    pub(crate) fn visible_tabs(&self) -> Vec<TopicTab> {
        TopicTab::visible_tabs(self.stores.role())
    }

    /// A tab header was clicked; the widget reports a change only when the
    /// selection actually moves.
    pub(crate) fn select_tab(&mut self, key: &str) {
        let changed = self.route.active_tab() != key;
        self.route.on_tab_click(key);
        if changed {
            self.route.on_tab_change(key);
        }
    }

    pub(crate) fn open_sampling(&mut self) {
        self.sampling.open();
    }

    pub(crate) fn close_sampling(&mut self) {
        self.sampling.close();
    }

    pub(crate) fn submit_sampling(&mut self) {
        let request = match self.sampling.begin_submit() {
            SubmitStart::Ready(request) => request,
            SubmitStart::Busy | SubmitStart::Rejected(_) => return,
        };

        let Some((cluster_id, topic)) = self.topic_key() else {
            let notification = self
                .sampling
                .finish(Err(ApiError::MissingIdentity("cluster id or topic")));
            self.notifications.push(notification);
            return;
        };

        debug!(?request, cluster_id, %topic, "submitting sampling request");
        let api = Arc::clone(&self.api);
        client::spawn_request(
            &self.runtime,
            self.event_tx.clone(),
            self.ctx.clone(),
            async move { api.submit_sampling(&request, cluster_id, &topic).await },
            ConsoleEvent::SamplingFinished,
        );
    }

    pub(crate) fn copy_all_samples(&mut self, ctx: &egui::Context) {
        ctx.copy_text(self.sampling.copy_all());
        self.notifications.push(Notification::info("Copied all samples"));
    }

    pub(crate) fn copy_sample(&mut self, ctx: &egui::Context, index: usize) {
        let Some(record) = self.sampling.results.get(index) else {
            return;
        };
        ctx.copy_text(SamplingDrawer::copy_one(record));
        self.notifications.push(Notification::info("Copied sample"));
    }

    pub(crate) fn can_edit(&self) -> bool {
        let user = self.stores.user.get();
        let business = self.stores.business.get();
        edit_allowed(self.config.edit_enabled, user.as_ref(), business.as_ref())
    }

    pub(crate) fn open_edit(&mut self) {
        let Some(base_info) = self.stores.base_info.get() else {
            return;
        };
        self.edit.open(&self.identity, &base_info);
    }

    pub(crate) fn submit_edit(&mut self) {
        let edit = match self.edit.begin_submit(&self.identity) {
            SubmitStart::Ready(edit) => edit,
            SubmitStart::Busy | SubmitStart::Rejected(_) => return,
        };

        let api = Arc::clone(&self.api);
        client::spawn_request(
            &self.runtime,
            self.event_tx.clone(),
            self.ctx.clone(),
            async move { api.submit_topic_edit(&edit).await },
            ConsoleEvent::TopicEdited,
        );
    }

    pub(crate) fn external_action(&mut self, action: ExternalAction) {
        info!(?action, topic = self.identity.topic_or_empty(), "external dialog requested");
        self.notifications.push(Notification::info(format!(
            "{} for {}",
            action.label(),
            self.identity.topic_or_empty()
        )));
    }

    pub(crate) fn add_alarm(&mut self) {
        if let Some(url) = self.route.navigate("/alarm/add") {
            info!(url = %url, "leaving topic page");
        }
    }

    /// Steps back through the address history, or to the topic list.
    pub(crate) fn go_back(&mut self) {
        if !self.route.location.back() {
            let _ = self.route.navigate("/topic");
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        events::pump_console_events(self);
        crate::ui::render(self, ctx);
        ctx.request_repaint_after(std::time::Duration::from_millis(200));
    }
}
