use url::Url;

use crate::utils::url::raw_query_pairs;

/// The console's address bar: the current page address plus the entries
/// that `back` can return to.
#[derive(Clone, Debug)]
pub(crate) struct Location {
    current: Url,
    history: Vec<Url>,
}

impl Location {
    pub(crate) fn new(current: Url) -> Self {
        Self {
            current,
            history: Vec::new(),
        }
    }

    pub(crate) fn url(&self) -> &Url {
        &self.current
    }

    pub(crate) fn href(&self) -> &str {
        self.current.as_str()
    }

    /// Fragment without the leading `#`, empty when there is none.
    pub(crate) fn fragment(&self) -> &str {
        self.current.fragment().unwrap_or("")
    }

    pub(crate) fn has_query_param(&self, key: &str) -> bool {
        self.current
            .query()
            .is_some_and(|query| raw_query_pairs(query).contains_key(key))
    }

    /// Moves to `#fragment`; a change records a history entry.
    pub(crate) fn set_fragment(&mut self, fragment: &str) {
        if self.fragment() == fragment && self.current.fragment().is_some() {
            return;
        }
        let mut next = self.current.clone();
        next.set_fragment(Some(fragment));
        self.push_state(next);
    }

    pub(crate) fn push_state(&mut self, url: Url) {
        let previous = std::mem::replace(&mut self.current, url);
        self.history.push(previous);
    }

    /// Resolves `path` (absolute path with optional query and fragment)
    /// against the current origin.
    pub(crate) fn resolve(&self, path: &str) -> Result<Url, url::ParseError> {
        self.current.join(path)
    }

    pub(crate) fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    pub(crate) fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }
}
