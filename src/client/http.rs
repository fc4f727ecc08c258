use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::client::TopicApi;
use crate::error::ApiError;
use crate::models::topic::{
    AppInfo, SampleRecord, SamplingRequest, TopicBaseInfo, TopicBusiness, TopicEdit,
};

/// Response wrapper used by every management endpoint; `code == 0` is success.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: i64,
    #[serde(default)]
    message: String,
    data: Option<T>,
}

impl<T> Envelope<T> {
    fn ack(self) -> Result<Option<T>, ApiError> {
        if self.code != 0 {
            return Err(ApiError::Server {
                code: self.code,
                message: self.message,
            });
        }
        Ok(self.data)
    }

    fn into_data(self) -> Result<T, ApiError> {
        self.ack()?.ok_or(ApiError::EmptyPayload)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct HttpTopicApi {
    http: Client,
    base: String,
}

impl HttpTopicApi {
    pub(crate) fn new(http: Client, base: &str) -> Self {
        Self {
            http,
            base: base.trim_end_matches('/').to_string(),
        }
    }

    fn topic_url(&self, cluster_id: i64, topic: &str, leaf: &str) -> String {
        format!(
            "{}/normal/{cluster_id}/topics/{}/{leaf}",
            self.base,
            urlencoding::encode(topic)
        )
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Envelope<T>, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        Ok(response.json::<Envelope<T>>().await?)
    }
}

#[async_trait]
impl TopicApi for HttpTopicApi {
    #[instrument(skip(self))]
    async fn fetch_topic_base_info(
        &self,
        cluster_id: i64,
        topic: &str,
    ) -> Result<TopicBaseInfo, ApiError> {
        let url = self.topic_url(cluster_id, topic, "basic-info");
        self.send(self.http.get(url)).await?.into_data()
    }

    #[instrument(skip(self))]
    async fn fetch_topic_business(
        &self,
        cluster_id: i64,
        topic: &str,
    ) -> Result<TopicBusiness, ApiError> {
        let url = self.topic_url(cluster_id, topic, "business");
        self.send(self.http.get(url)).await?.into_data()
    }

    #[instrument(skip(self, edit), fields(topic = %edit.topic_name))]
    async fn submit_topic_edit(&self, edit: &TopicEdit) -> Result<(), ApiError> {
        let url = format!("{}/normal/topics", self.base);
        self.send::<serde_json::Value>(self.http.put(url).json(edit))
            .await?
            .ack()?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn submit_sampling(
        &self,
        request: &SamplingRequest,
        cluster_id: i64,
        topic: &str,
    ) -> Result<Vec<SampleRecord>, ApiError> {
        let url = self.topic_url(cluster_id, topic, "sample");
        let records: Vec<SampleRecord> = self
            .send::<Vec<SampleRecord>>(self.http.post(url).json(request))
            .await?
            .ack()?
            .unwrap_or_default();
        debug!(count = records.len(), "sample received");
        Ok(records)
    }

    #[instrument(skip(self))]
    async fn fetch_app_list(&self) -> Result<Vec<AppInfo>, ApiError> {
        let url = format!("{}/normal/apps", self.base);
        Ok(self
            .send::<Vec<AppInfo>>(self.http.get(url))
            .await?
            .ack()?
            .unwrap_or_default())
    }
}
