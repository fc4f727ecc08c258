use std::sync::Arc;

use tokio::sync::watch;

use crate::models::topic::{AppInfo, CurrentUser, TopicBaseInfo, TopicBusiness};

/// Shared, observable slot for data that outlives a single request.
///
/// Handles are cheap to clone and all point at the same value.
#[derive(Debug)]
pub(crate) struct Store<T> {
    tx: Arc<watch::Sender<Option<T>>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }
}

impl<T: Clone> Store<T> {
    pub(crate) fn get(&self) -> Option<T> {
        self.tx.borrow().clone()
    }
}

impl<T> Store<T> {
    #[cfg(test)]
    pub(crate) fn with_value(value: T) -> Self {
        let store = Self::default();
        store.set(value);
        store
    }

    pub(crate) fn set(&self, value: T) {
        let _ = self.tx.send_replace(Some(value));
    }

    pub(crate) fn clear(&self) {
        let _ = self.tx.send_replace(None);
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        f(self.tx.borrow().as_ref())
    }

    pub(crate) fn is_set(&self) -> bool {
        self.read(|value| value.is_some())
    }

    /// Change feed for observers off the UI thread; the UI itself re-reads
    /// every frame.
    #[allow(dead_code)]
    pub(crate) fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.tx.subscribe()
    }
}

/// Every data source the topic page reads from.
#[derive(Clone, Debug, Default)]
pub(crate) struct Stores {
    pub(crate) base_info: Store<TopicBaseInfo>,
    pub(crate) business: Store<TopicBusiness>,
    pub(crate) apps: Store<Vec<AppInfo>>,
    pub(crate) user: Store<CurrentUser>,
    pub(crate) region: Store<String>,
    /// Whether the consumer group tab is showing one group's detail.
    pub(crate) consume_detail: Store<bool>,
}

impl Stores {
    pub(crate) fn role(&self) -> Option<i32> {
        self.user.read(|user| user.map(|user| user.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_value() {
        let store = Store::default();
        let other = store.clone();

        store.set(7u32);
        assert_eq!(other.get(), Some(7));

        other.clear();
        assert!(!store.is_set());
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let store = Store::with_value("cn".to_string());
        let mut rx = store.subscribe();
        assert_eq!(rx.borrow_and_update().as_deref(), Some("cn"));

        store.set("us".to_string());
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_deref(), Some("us"));
    }

    #[test]
    fn role_comes_from_current_user() {
        let stores = Stores::default();
        assert_eq!(stores.role(), None);

        stores.user.set(CurrentUser {
            username: "alice".to_string(),
            role: 0,
        });
        assert_eq!(stores.role(), Some(0));
    }
}
