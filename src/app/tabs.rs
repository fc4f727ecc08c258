use tracing::{debug, warn};
use url::Url;

use crate::models::identity::ViewIdentity;
use crate::models::location::Location;
use crate::store::Store;

pub(crate) const DEFAULT_TAB: &str = "1";
pub(crate) const CONSUMER_GROUP_TAB: &str = "4";
pub(crate) const CONSUMER_GROUP_PARAM: &str = "consumerGroup";

/// Keeps the selected tab and the address fragment in step.
///
/// The fragment is the only record of the active tab, so a copied address
/// reopens the same tab.
#[derive(Debug)]
pub(crate) struct TabRoute {
    pub(crate) location: Location,
    identity: ViewIdentity,
    url_prefix: String,
    region: Store<String>,
    consume_detail: Store<bool>,
}

impl TabRoute {
    pub(crate) fn new(
        location: Location,
        identity: ViewIdentity,
        url_prefix: &str,
        region: Store<String>,
        consume_detail: Store<bool>,
    ) -> Self {
        Self {
            location,
            identity,
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
            region,
            consume_detail,
        }
    }

    pub(crate) fn active_tab(&self) -> &str {
        match self.location.fragment() {
            "" => DEFAULT_TAB,
            fragment => fragment,
        }
    }

    /// The tab widget reported a selection change.
    pub(crate) fn on_tab_change(&mut self, key: &str) {
        self.location.set_fragment(key);
        if self.location.has_query_param(CONSUMER_GROUP_PARAM) {
            self.push_consume_url(key);
        }
    }

    /// A tab header was clicked, whether or not it was already active.
    pub(crate) fn on_tab_click(&mut self, key: &str) {
        self.location.set_fragment(key);
        if key == CONSUMER_GROUP_TAB {
            self.consume_detail.set(false);
            self.push_consume_url(key);
        }
    }

    pub(crate) fn consume_url(&self, key: &str) -> String {
        let cluster_id = self
            .identity
            .cluster_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        let region = self.region.get().unwrap_or_default();

        format!(
            "{}/topic/topic-detail?clusterId={cluster_id}&topic={}{}&region={region}#{key}",
            self.url_prefix,
            self.identity.topic_or_empty(),
            self.identity.physical_suffix(),
        )
    }

    /// Replaces the address with a clean topic-detail one, dropping any
    /// group-specific parameters, as a new history entry.
    fn push_consume_url(&mut self, key: &str) {
        let path = self.consume_url(key);
        match self.location.resolve(&path) {
            Ok(url) => {
                debug!(url = %url, "pushing consumer group address");
                self.location.push_state(url);
            }
            Err(err) => warn!(%err, %path, "could not build consumer group address"),
        }
    }

    /// Opens another console page in the same address bar.
    pub(crate) fn navigate(&mut self, path: &str) -> Option<&Url> {
        let target = format!("{}{path}", self.url_prefix);
        match self.location.resolve(&target) {
            Ok(url) => {
                self.location.push_state(url);
                Some(self.location.url())
            }
            Err(err) => {
                warn!(%err, %target, "could not navigate");
                None
            }
        }
    }

    pub(crate) fn on_topic_page(&self) -> bool {
        self.location.url().path().ends_with("/topic/topic-detail")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(href: &str) -> (TabRoute, Store<bool>) {
        let url = Url::parse(href).unwrap();
        let identity = ViewIdentity::from_url(&url);
        let consume_detail = Store::with_value(true);
        let route = TabRoute::new(
            Location::new(url),
            identity,
            "/kafka/",
            Store::with_value("cn".to_string()),
            consume_detail.clone(),
        );
        (route, consume_detail)
    }

    #[test]
    fn empty_fragment_defaults_to_first_tab() {
        let (route, _) = route("http://h/kafka/topic/topic-detail?clusterId=5&topic=orders");
        assert_eq!(route.active_tab(), "1");
    }

    #[test]
    fn change_updates_fragment() {
        let (mut route, _) = route("http://h/kafka/topic/topic-detail?clusterId=5&topic=orders");

        route.on_tab_change("3");
        assert_eq!(route.active_tab(), "3");
        assert_eq!(
            route.location.href(),
            "http://h/kafka/topic/topic-detail?clusterId=5&topic=orders#3"
        );
    }

    #[test]
    fn plain_change_does_not_rewrite_query() {
        let (mut route, consume_detail) =
            route("http://h/kafka/topic/topic-detail?clusterId=5&topic=orders&extra=1#1");

        route.on_tab_change("5");
        route.on_tab_click("5");
        assert_eq!(route.location.url().query(), Some("clusterId=5&topic=orders&extra=1"));
        assert_eq!(consume_detail.get(), Some(true));
    }

    #[test]
    fn change_with_consumer_group_rewrites_address() {
        let (mut route, _) = route(
            "http://h/kafka/topic/topic-detail?clusterId=5&topic=orders&isPhysicalClusterId&consumerGroup=g1&region=us#4",
        );

        route.on_tab_change("2");
        assert_eq!(
            route.location.href(),
            "http://h/kafka/topic/topic-detail?clusterId=5&topic=orders&isPhysicalClusterId=true&region=cn#2"
        );
        assert_eq!(route.active_tab(), "2");

        assert!(route.location.back());
        assert!(route.location.back());
        assert!(route.location.has_query_param(CONSUMER_GROUP_PARAM));
        assert_eq!(route.active_tab(), "4");
    }

    #[test]
    fn consumer_group_click_resets_detail_and_rewrites() {
        let (mut route, consume_detail) =
            route("http://h/kafka/topic/topic-detail?clusterId=7&topic=pay&extra=1#1");

        route.on_tab_click("4");
        assert_eq!(consume_detail.get(), Some(false));
        assert_eq!(
            route.location.href(),
            "http://h/kafka/topic/topic-detail?clusterId=7&topic=pay&region=cn#4"
        );
        assert_eq!(route.active_tab(), "4");
    }

    #[test]
    fn navigate_stays_on_origin() {
        let (mut route, _) = route("https://km.local/kafka/topic/topic-detail?clusterId=1&topic=t");
        assert!(route.on_topic_page());

        let url = route.navigate("/alarm/add").unwrap();
        assert_eq!(url.as_str(), "https://km.local/kafka/alarm/add");
        assert!(!route.on_topic_page());

        assert!(route.location.back());
        assert!(route.on_topic_page());
    }
}
