use tracing::warn;

use crate::app::state::SubmitStart;
use crate::error::ApiError;
use crate::form::schema::{FieldSpec, FormSchema};
use crate::form::{FieldErrors, FormState};
use crate::models::identity::ViewIdentity;
use crate::models::notification::Notification;
use crate::models::topic::{CurrentUser, TopicBaseInfo, TopicBusiness, TopicEdit};

fn edit_schema() -> FormSchema {
    FormSchema::new(vec![
        FieldSpec::input("topicName", "Topic").disabled(),
        FieldSpec::input("appName", "Application").disabled(),
        FieldSpec::text_area("description", "Description")
            .placeholder("What the topic carries")
            .required("Enter a description"),
    ])
}

/// Whether the edit action is offered: the deployment must enable it, and
/// the user must be an operator or one of the topic's principals.
pub(crate) fn edit_allowed(
    enabled: bool,
    user: Option<&CurrentUser>,
    business: Option<&TopicBusiness>,
) -> bool {
    let Some(user) = user else {
        return false;
    };
    enabled
        && (user.is_operator()
            || business.is_some_and(|business| business.principals.contains(&user.username)))
}

/// Dialog for editing the topic description.
#[derive(Debug, Default)]
pub(crate) struct TopicEditDialog {
    pub(crate) form: Option<FormState>,
    pub(crate) in_flight: bool,
    app_id: String,
}

impl TopicEditDialog {
    pub(crate) fn open(&mut self, identity: &ViewIdentity, base_info: &TopicBaseInfo) {
        self.app_id = base_info.app_id.clone();
        self.form = Some(FormState::new(
            edit_schema(),
            &[
                ("topicName", identity.topic_or_empty().to_string()),
                ("appName", base_info.app_name.clone()),
                ("description", base_info.description.clone()),
            ],
        ));
    }

    pub(crate) fn is_open(&self) -> bool {
        self.form.is_some()
    }

    pub(crate) fn close(&mut self) {
        self.form = None;
    }

    pub(crate) fn begin_submit(&mut self, identity: &ViewIdentity) -> SubmitStart<TopicEdit> {
        if self.in_flight {
            return SubmitStart::Busy;
        }
        let Some(form) = self.form.as_mut() else {
            return SubmitStart::Busy;
        };

        let values = match form.validate_fields() {
            Ok(values) => values,
            Err(errors) => return SubmitStart::Rejected(errors),
        };
        let Some(cluster_id) = identity.cluster_id else {
            return SubmitStart::Rejected(FieldErrors::single(
                "topicName",
                "The page address has no cluster id",
            ));
        };

        self.in_flight = true;
        SubmitStart::Ready(TopicEdit {
            app_id: self.app_id.clone(),
            cluster_id,
            description: values.text("description").unwrap_or_default().to_string(),
            topic_name: identity.topic_or_empty().to_string(),
        })
    }

    /// Closes the dialog on success; keeps it open for another try otherwise.
    pub(crate) fn finish(&mut self, outcome: Result<(), ApiError>) -> Notification {
        self.in_flight = false;
        match outcome {
            Ok(()) => {
                self.close();
                Notification::success("Topic updated")
            }
            Err(err) => {
                warn!(%err, "topic edit failed");
                Notification::error(format!("Topic update failed: {err}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> ViewIdentity {
        ViewIdentity::from_query("clusterId=3&topic=orders")
    }

    fn base_info() -> TopicBaseInfo {
        TopicBaseInfo {
            app_id: "app_7".to_string(),
            app_name: "billing".to_string(),
            description: "order events".to_string(),
            ..TopicBaseInfo::default()
        }
    }

    fn user(name: &str, role: i32) -> CurrentUser {
        CurrentUser {
            username: name.to_string(),
            role,
        }
    }

    #[test]
    fn gate_requires_config_and_permission() {
        let business = TopicBusiness {
            principals: vec!["bob".to_string()],
            ..TopicBusiness::default()
        };

        assert!(!edit_allowed(false, Some(&user("root", 2)), None));
        assert!(edit_allowed(true, Some(&user("root", 2)), None));
        assert!(edit_allowed(true, Some(&user("ops", 1)), None));
        assert!(edit_allowed(true, Some(&user("bob", 0)), Some(&business)));
        assert!(!edit_allowed(true, Some(&user("eve", 0)), Some(&business)));
        assert!(!edit_allowed(true, None, Some(&business)));
    }

    #[test]
    fn builds_edit_from_form() {
        let mut dialog = TopicEditDialog::default();
        dialog.open(&identity(), &base_info());
        dialog
            .form
            .as_mut()
            .unwrap()
            .set("description", "order lifecycle events");

        let SubmitStart::Ready(edit) = dialog.begin_submit(&identity()) else {
            panic!("valid edit must be ready");
        };
        assert_eq!(
            edit,
            TopicEdit {
                app_id: "app_7".to_string(),
                cluster_id: 3,
                description: "order lifecycle events".to_string(),
                topic_name: "orders".to_string(),
            }
        );
        assert!(matches!(dialog.begin_submit(&identity()), SubmitStart::Busy));

        let toast = dialog.finish(Ok(()));
        assert_eq!(toast.message, "Topic updated");
        assert!(!dialog.is_open());
    }

    #[test]
    fn blank_description_is_rejected() {
        let mut dialog = TopicEditDialog::default();
        dialog.open(&identity(), &base_info());
        dialog.form.as_mut().unwrap().set("description", "   ");

        let SubmitStart::Rejected(errors) = dialog.begin_submit(&identity()) else {
            panic!("blank description must be rejected");
        };
        assert_eq!(errors.get("description"), Some("Enter a description"));
        assert!(!dialog.in_flight);
    }

    #[test]
    fn failure_keeps_dialog_open() {
        let mut dialog = TopicEditDialog::default();
        dialog.open(&identity(), &base_info());
        let _ = dialog.begin_submit(&identity());

        let _ = dialog.finish(Err(ApiError::EmptyPayload));
        assert!(dialog.is_open());
        assert!(!dialog.in_flight);
    }
}
