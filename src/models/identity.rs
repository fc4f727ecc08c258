use url::Url;

use crate::utils::url::{decode_component, decode_uri, raw_query_pairs};

pub(crate) const PHYSICAL_CLUSTER_KEY: &str = "isPhysicalClusterId";
pub(crate) const PHYSICAL_CLUSTER_SUFFIX: &str = "&isPhysicalClusterId=true";

/// Who this page is about, read once from the address it was opened with.
///
/// Parsing never fails: missing, blank or malformed parameters leave the
/// matching field empty and callers decide what to do without them. A blank
/// `clusterId=` names no cluster rather than cluster 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ViewIdentity {
    pub(crate) cluster_id: Option<i64>,
    pub(crate) cluster_name: Option<String>,
    pub(crate) topic_name: Option<String>,
    pub(crate) need_auth: Option<String>,
    pub(crate) is_physical_cluster: bool,
}

impl ViewIdentity {
    pub(crate) fn from_url(url: &Url) -> Self {
        Self::from_query(url.query().unwrap_or(""))
    }

    pub(crate) fn from_query(query: &str) -> Self {
        let pairs = raw_query_pairs(query);

        Self {
            cluster_id: pairs
                .get("clusterId")
                .and_then(|raw| decode_component(raw).trim().parse().ok()),
            // Upstream encodes the display name twice.
            cluster_name: pairs
                .get("clusterName")
                .map(|raw| decode_uri(&decode_uri(raw))),
            topic_name: pairs.get("topic").map(|raw| decode_component(raw)),
            need_auth: pairs.get("needAuth").map(|raw| decode_component(raw)),
            is_physical_cluster: pairs.contains_key(PHYSICAL_CLUSTER_KEY),
        }
    }

    pub(crate) fn needs_auth(&self) -> bool {
        self.need_auth.as_deref() == Some("true")
    }

    pub(crate) fn physical_suffix(&self) -> &'static str {
        if self.is_physical_cluster {
            PHYSICAL_CLUSTER_SUFFIX
        } else {
            ""
        }
    }

    pub(crate) fn topic_or_empty(&self) -> &str {
        self.topic_name.as_deref().unwrap_or("")
    }
}
