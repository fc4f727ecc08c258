use crate::error::ApiError;
use crate::models::topic::{AppInfo, SampleRecord, TopicBaseInfo, TopicBusiness};

/// Completions sent from runtime tasks back to the UI thread.
#[derive(Debug)]
pub(crate) enum ConsoleEvent {
    BaseInfoLoaded(Result<TopicBaseInfo, ApiError>),
    BusinessLoaded(Result<TopicBusiness, ApiError>),
    AppsLoaded(Result<Vec<AppInfo>, ApiError>),
    SamplingFinished(Result<Vec<SampleRecord>, ApiError>),
    TopicEdited(Result<(), ApiError>),
}

/// Header actions handled by dialogs outside this page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ExternalAction {
    RequestPermission,
    RequestQuota,
    RequestExpansion,
}

impl ExternalAction {
    pub(crate) fn label(self) -> &'static str {
        match self {
            ExternalAction::RequestPermission => "Request permission",
            ExternalAction::RequestQuota => "Request quota",
            ExternalAction::RequestExpansion => "Request partitions",
        }
    }
}
