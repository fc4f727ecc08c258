use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct TopicBaseInfo {
    pub(crate) cluster_id: Option<i64>,
    pub(crate) physical_cluster_id: Option<i64>,
    pub(crate) topic_name: String,
    pub(crate) app_id: String,
    pub(crate) app_name: String,
    pub(crate) description: String,
    pub(crate) principals: String,
    pub(crate) partition_num: u32,
    pub(crate) replica_num: u32,
    pub(crate) retention_time: Option<u64>,
    pub(crate) bootstrap_servers: String,
    pub(crate) create_time: Option<i64>,
    pub(crate) modify_time: Option<i64>,
    pub(crate) score: Option<i32>,
    pub(crate) percentile: Option<String>,
    pub(crate) region_name_list: Vec<String>,
    #[serde(rename = "topicCodeC")]
    pub(crate) topic_code_c: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct TopicBusiness {
    pub(crate) topic_name: String,
    pub(crate) app_id: String,
    pub(crate) app_name: String,
    pub(crate) principals: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct AppInfo {
    pub(crate) app_id: String,
    pub(crate) name: String,
    pub(crate) principals: String,
    pub(crate) description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CurrentUser {
    pub(crate) username: String,
    pub(crate) role: i32,
}

impl CurrentUser {
    /// Role value of plain users; they do not see broker placement.
    pub(crate) const NORMAL_ROLE: i32 = 0;

    pub(crate) fn is_operator(&self) -> bool {
        self.role == 1 || self.role == 2
    }
}

/// Body of the topic "compile" edit.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TopicEdit {
    pub(crate) app_id: String,
    pub(crate) cluster_id: i64,
    pub(crate) description: String,
    pub(crate) topic_name: String,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SamplingRequest {
    pub(crate) max_msg_num: u32,
    #[serde(rename = "timeout")]
    pub(crate) timeout_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) partition_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) offset: Option<i64>,
    pub(crate) truncate: bool,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct SampleRecord {
    pub(crate) value: String,
    pub(crate) history: serde_json::Value,
}

impl SampleRecord {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            history: serde_json::Value::Null,
        }
    }
}
