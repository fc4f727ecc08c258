use tracing::{debug, warn};

use crate::app::state::SubmitStart;
use crate::error::ApiError;
use crate::form::schema::{FieldSpec, FormSchema};
use crate::form::{FieldErrors, FormState, FormValues};
use crate::models::notification::Notification;
use crate::models::topic::{SampleRecord, SamplingRequest};

pub(crate) const MAX_MSG_NUM: i64 = 100;
pub(crate) const MAX_TIMEOUT_MS: i64 = 500_000;
pub(crate) const DEFAULT_MSG_NUM: &str = "1";
pub(crate) const DEFAULT_TIMEOUT_MS: &str = "5000";

pub(crate) fn sampling_schema() -> FormSchema {
    FormSchema::new(vec![
        FieldSpec::number("maxMsgNum", "Max messages")
            .required("Enter the number of messages to sample")
            .range(1, MAX_MSG_NUM)
            .at_most(MAX_MSG_NUM, "Sample at most 100 messages at a time"),
        FieldSpec::number("timeout", "Timeout (ms)")
            .required("Enter the sampling timeout (ms)")
            .range(1, MAX_TIMEOUT_MS)
            .at_most(MAX_TIMEOUT_MS, "Timeout cannot exceed 500000 ms"),
        FieldSpec::number("partitionId", "Partition")
            .placeholder("any partition")
            .at_least(0, "Partition ids start at 0"),
        FieldSpec::number("offset", "Start offset")
            .placeholder("latest")
            .at_least(0, "Offsets start at 0"),
        FieldSpec::radio("truncate", "Truncate values", &[("Yes", "true"), ("No", "false")])
            .default_value("true")
            .required("Choose whether to truncate values"),
    ])
}

impl SamplingRequest {
    pub(crate) fn from_form(values: &FormValues) -> Result<Self, FieldErrors> {
        let max_msg_num = values
            .number("maxMsgNum")
            .and_then(|value| u32::try_from(value).ok())
            .ok_or_else(|| FieldErrors::single("maxMsgNum", "Max messages is required"))?;
        let timeout_ms = values
            .number("timeout")
            .and_then(|value| u64::try_from(value).ok())
            .ok_or_else(|| FieldErrors::single("timeout", "Timeout is required"))?;
        let partition_id = match values.number("partitionId") {
            Some(value) => Some(
                i32::try_from(value)
                    .map_err(|_| FieldErrors::single("partitionId", "Partition is out of range"))?,
            ),
            None => None,
        };

        Ok(Self {
            max_msg_num,
            timeout_ms,
            partition_id,
            offset: values.number("offset"),
            truncate: values.text("truncate") == Some("true"),
        })
    }
}

/// Side drawer that samples messages from the topic.
///
/// `in_flight` is a single-flight latch: it is set before validation starts
/// and cleared when validation fails or the request settles, so at most one
/// sampling request is outstanding at any time.
#[derive(Debug)]
pub(crate) struct SamplingDrawer {
    pub(crate) visible: bool,
    pub(crate) in_flight: bool,
    pub(crate) result_visible: bool,
    pub(crate) results: Vec<SampleRecord>,
    pub(crate) form: FormState,
}

impl Default for SamplingDrawer {
    fn default() -> Self {
        Self {
            visible: false,
            in_flight: false,
            result_visible: false,
            results: Vec::new(),
            form: FormState::new(
                sampling_schema(),
                &[
                    ("maxMsgNum", DEFAULT_MSG_NUM.to_string()),
                    ("timeout", DEFAULT_TIMEOUT_MS.to_string()),
                ],
            ),
        }
    }
}

impl SamplingDrawer {
    pub(crate) fn open(&mut self) {
        self.visible = true;
    }

    pub(crate) fn begin_submit(&mut self) -> SubmitStart<SamplingRequest> {
        if self.in_flight {
            debug!("sampling already in flight, ignoring submit");
            return SubmitStart::Busy;
        }
        self.in_flight = true;

        let request = self
            .form
            .validate_fields()
            .and_then(|values| SamplingRequest::from_form(&values));

        match request {
            Ok(request) => SubmitStart::Ready(request),
            Err(errors) => {
                self.in_flight = false;
                debug!(?errors, "sampling form rejected");
                SubmitStart::Rejected(errors)
            }
        }
    }

    /// Applies the settled request and returns the toast to show.
    pub(crate) fn finish(&mut self, outcome: Result<Vec<SampleRecord>, ApiError>) -> Notification {
        self.in_flight = false;

        match outcome {
            Ok(records) => {
                debug!(count = records.len(), "sampling finished");
                self.results = records;
                self.result_visible = true;
                Notification::success("Sampling finished")
            }
            Err(err) => {
                warn!(%err, "sampling failed");
                Notification::error(format!("Sampling failed: {err}"))
            }
        }
    }

    /// Hides the drawer and its results and resets the form. The last
    /// results stay cached until the next successful sample replaces them.
    pub(crate) fn close(&mut self) {
        self.visible = false;
        self.result_visible = false;
        self.form.reset_fields(None);
    }

    pub(crate) fn copy_all(&self) -> String {
        self.results
            .iter()
            .map(|record| record.value.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub(crate) fn copy_one(record: &SampleRecord) -> String {
        record.value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(drawer: &mut SamplingDrawer) -> SamplingRequest {
        match drawer.begin_submit() {
            SubmitStart::Ready(request) => request,
            other => panic!("expected a ready request, got {other:?}"),
        }
    }

    #[test]
    fn opens_with_default_fields() {
        let mut drawer = SamplingDrawer::default();
        drawer.open();

        assert!(drawer.visible);
        assert_eq!(drawer.form.get("maxMsgNum"), "1");
        assert_eq!(drawer.form.get("timeout"), "5000");
        assert_eq!(drawer.form.get("truncate"), "true");
        assert_eq!(drawer.form.get("partitionId"), "");
        assert_eq!(drawer.form.get("offset"), "");
    }

    #[test]
    fn builds_request_from_defaults() {
        let mut drawer = SamplingDrawer::default();
        drawer.open();

        let request = ready(&mut drawer);
        assert_eq!(
            request,
            SamplingRequest {
                max_msg_num: 1,
                timeout_ms: 5000,
                partition_id: None,
                offset: None,
                truncate: true,
            }
        );
        assert!(drawer.in_flight);
    }

    #[test]
    fn truncate_string_becomes_bool() {
        let mut drawer = SamplingDrawer::default();
        drawer.form.set("truncate", "false");
        drawer.form.set("partitionId", "3");
        drawer.form.set("offset", "1200");

        let request = ready(&mut drawer);
        assert!(!request.truncate);
        assert_eq!(request.partition_id, Some(3));
        assert_eq!(request.offset, Some(1200));
    }

    #[test]
    fn max_msg_num_bounds() {
        for (raw, accepted) in [("101", false), ("100", true), ("0", false), ("", false)] {
            let mut drawer = SamplingDrawer::default();
            drawer.form.set("maxMsgNum", raw);

            let start = drawer.begin_submit();
            assert_eq!(
                matches!(start, SubmitStart::Ready(_)),
                accepted,
                "maxMsgNum = {raw:?}"
            );
        }
    }

    #[test]
    fn timeout_upper_bound() {
        let mut drawer = SamplingDrawer::default();
        drawer.form.set("timeout", "500001");
        assert!(matches!(drawer.begin_submit(), SubmitStart::Rejected(_)));

        drawer.form.set("timeout", "500000");
        assert!(matches!(drawer.begin_submit(), SubmitStart::Ready(_)));
    }

    #[test]
    fn rejection_releases_the_latch() {
        let mut drawer = SamplingDrawer::default();
        drawer.form.set("maxMsgNum", "");

        let SubmitStart::Rejected(errors) = drawer.begin_submit() else {
            panic!("empty maxMsgNum must be rejected");
        };
        assert!(errors.get("maxMsgNum").is_some());
        assert!(!drawer.in_flight);

        drawer.form.set("maxMsgNum", "5");
        assert!(matches!(drawer.begin_submit(), SubmitStart::Ready(_)));
    }

    #[test]
    fn second_submit_while_in_flight_is_busy() {
        let mut drawer = SamplingDrawer::default();
        let _ = ready(&mut drawer);

        assert!(matches!(drawer.begin_submit(), SubmitStart::Busy));
        assert!(drawer.in_flight);
    }

    #[test]
    fn success_replaces_results() {
        let mut drawer = SamplingDrawer::default();
        drawer.results = vec![SampleRecord::new("old")];
        let _ = ready(&mut drawer);

        let toast = drawer.finish(Ok(vec![SampleRecord::new("a"), SampleRecord::new("b")]));
        assert_eq!(toast.message, "Sampling finished");
        assert!(!drawer.in_flight);
        assert!(drawer.result_visible);
        assert_eq!(drawer.copy_all(), "a\n\nb");
    }

    #[test]
    fn failure_keeps_drawer_and_results() {
        let mut drawer = SamplingDrawer::default();
        drawer.open();
        drawer.results = vec![SampleRecord::new("kept")];
        let _ = ready(&mut drawer);

        let toast = drawer.finish(Err(ApiError::Server {
            code: 500,
            message: "broker unavailable".to_string(),
        }));
        assert!(toast.message.contains("broker unavailable"));
        assert!(drawer.visible);
        assert!(!drawer.in_flight);
        assert!(!drawer.result_visible);
        assert_eq!(drawer.results, vec![SampleRecord::new("kept")]);
    }

    #[test]
    fn close_hides_and_resets_but_keeps_results() {
        let mut drawer = SamplingDrawer::default();
        drawer.open();
        drawer.form.set("maxMsgNum", "50");
        let _ = ready(&mut drawer);
        let _ = drawer.finish(Ok(vec![SampleRecord::new("x")]));

        drawer.close();
        assert!(!drawer.visible);
        assert!(!drawer.result_visible);
        assert_eq!(drawer.form.get("maxMsgNum"), "1");
        assert_eq!(drawer.results.len(), 1);
    }

    #[test]
    fn completion_after_close_lands_without_reopening() {
        let mut drawer = SamplingDrawer::default();
        drawer.open();
        drawer.results = vec![SampleRecord::new("old")];
        let _ = ready(&mut drawer);

        drawer.close();
        assert!(!drawer.visible);
        assert!(drawer.in_flight);
        assert!(matches!(drawer.begin_submit(), SubmitStart::Busy));

        let _ = drawer.finish(Ok(vec![SampleRecord::new("late")]));
        assert!(!drawer.visible);
        assert!(!drawer.in_flight);
        assert!(drawer.result_visible);
        assert_eq!(drawer.results, vec![SampleRecord::new("late")]);

        drawer.open();
        assert!(drawer.result_visible);
    }

    #[test]
    fn negative_partition_and_offset_are_rejected() {
        let mut drawer = SamplingDrawer::default();
        drawer.form.set("partitionId", "-1");
        drawer.form.set("offset", "-5");

        let SubmitStart::Rejected(errors) = drawer.begin_submit() else {
            panic!("negative partition must be rejected");
        };
        assert_eq!(errors.get("partitionId"), Some("Partition ids start at 0"));
        assert_eq!(errors.get("offset"), Some("Offsets start at 0"));
    }

    #[test]
    fn upper_bounds_report_their_own_messages() {
        let mut drawer = SamplingDrawer::default();
        drawer.form.set("maxMsgNum", "101");
        drawer.form.set("timeout", "600000");

        let SubmitStart::Rejected(errors) = drawer.begin_submit() else {
            panic!("out-of-range form must be rejected");
        };
        assert_eq!(errors.get("maxMsgNum"), Some("Sample at most 100 messages at a time"));
        assert_eq!(errors.get("timeout"), Some("Timeout cannot exceed 500000 ms"));
    }

    #[test]
    fn copy_helpers() {
        let record = SampleRecord::new("{\"id\":1}");
        assert_eq!(SamplingDrawer::copy_one(&record), "{\"id\":1}");
        assert_eq!(SamplingDrawer::default().copy_all(), "");
    }
}
