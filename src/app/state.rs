use crate::form::FieldErrors;
use crate::models::topic::CurrentUser;

/// Tabs of the topic page, keyed by the fragment value that selects them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TopicTab {
    BaseInfo,
    StatusChart,
    Connections,
    ConsumerGroups,
    Partitions,
    Brokers,
    Apps,
    Bills,
}

impl TopicTab {
    pub(crate) const ALL: [TopicTab; 8] = [
        TopicTab::BaseInfo,
        TopicTab::StatusChart,
        TopicTab::Connections,
        TopicTab::ConsumerGroups,
        TopicTab::Partitions,
        TopicTab::Brokers,
        TopicTab::Apps,
        TopicTab::Bills,
    ];

    pub(crate) fn key(self) -> &'static str {
        match self {
            TopicTab::BaseInfo => "1",
            TopicTab::StatusChart => "2",
            TopicTab::Connections => "3",
            TopicTab::ConsumerGroups => "4",
            TopicTab::Partitions => "5",
            TopicTab::Brokers => "6",
            TopicTab::Apps => "7",
            TopicTab::Bills => "8",
        }
    }

    pub(crate) fn title(self) -> &'static str {
        match self {
            TopicTab::BaseInfo => "Basic info",
            TopicTab::StatusChart => "Status",
            TopicTab::Connections => "Connections",
            TopicTab::ConsumerGroups => "Consumer groups",
            TopicTab::Partitions => "Partitions",
            TopicTab::Brokers => "Brokers",
            TopicTab::Apps => "Apps",
            TopicTab::Bills => "Billing",
        }
    }

    pub(crate) fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.key() == key)
    }

    /// Broker placement is hidden from plain users.
    pub(crate) fn visible_for(self, role: Option<i32>) -> bool {
        !(self == TopicTab::Brokers && role == Some(CurrentUser::NORMAL_ROLE))
    }

    pub(crate) fn visible_tabs(role: Option<i32>) -> Vec<TopicTab> {
        Self::ALL
            .into_iter()
            .filter(|tab| tab.visible_for(role))
            .collect()
    }
}

/// First step of a guarded form submission.
#[derive(Debug)]
pub(crate) enum SubmitStart<T> {
    /// A previous submission has not settled yet.
    Busy,
    Rejected(FieldErrors),
    Ready(T),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for tab in TopicTab::ALL {
            assert_eq!(TopicTab::from_key(tab.key()), Some(tab));
        }
        assert_eq!(TopicTab::from_key("9"), None);
        assert_eq!(TopicTab::from_key(""), None);
    }

    #[test]
    fn normal_role_hides_broker_tab() {
        let tabs = TopicTab::visible_tabs(Some(0));
        assert_eq!(tabs.len(), 7);
        assert!(!tabs.contains(&TopicTab::Brokers));

        assert_eq!(TopicTab::visible_tabs(Some(2)).len(), 8);
        assert_eq!(TopicTab::visible_tabs(None).len(), 8);
    }
}
