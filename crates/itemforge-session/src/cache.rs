//! Per-run session cache.
//!
//! Connecting to a site is expensive, so a run reuses one session per
//! (language, family) pair. The cache is an explicit object with an
//! explicit lifecycle: create it when the run starts, drop it when the
//! run ends. There is no process-global state.

use std::collections::HashMap;
use tracing::debug;

/// Cache of session objects keyed by (language, family).
pub struct SessionCache<S> {
    factory: Box<dyn Fn(&str, &str) -> S>,
    sessions: HashMap<(String, String), S>,
}

impl<S> SessionCache<S> {
    /// Create a cache around a session factory.
    ///
    /// # Examples
    ///
    /// ```
    /// use itemforge_session::{MockSession, SessionCache};
    ///
    /// let mut cache = SessionCache::new(|_language, _family| MockSession::new());
    /// let _wikidata = cache.get_or_create("wikidata", "wikidata");
    /// let _commons = cache.get_or_create("commons", "commons");
    /// assert_eq!(cache.len(), 2);
    /// ```
    pub fn new(factory: impl Fn(&str, &str) -> S + 'static) -> Self {
        Self { factory: Box::new(factory), sessions: HashMap::new() }
    }

    /// The session for this (language, family), creating it on first use.
    pub fn get_or_create(&mut self, language: &str, family: &str) -> &mut S {
        let key = (language.to_string(), family.to_string());
        self.sessions.entry(key).or_insert_with(|| {
            debug!(language, family, "creating session");
            (self.factory)(language, family)
        })
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether any session has been created yet.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_same_key_reuses_the_session() {
        let created = Rc::new(Cell::new(0));
        let counter = Rc::clone(&created);
        let mut cache = SessionCache::new(move |_, _| {
            counter.set(counter.get() + 1);
        });

        cache.get_or_create("sv", "wikidata");
        cache.get_or_create("sv", "wikidata");
        assert_eq!(created.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_factory_sees_the_requested_key() {
        let prefix = "site".to_string();
        let mut cache =
            SessionCache::new(move |language: &str, family: &str| format!("{prefix}:{language}:{family}"));
        assert_eq!(cache.get_or_create("sv", "wikidata"), "site:sv:wikidata");
    }

    #[test]
    fn test_distinct_keys_get_distinct_sessions() {
        let mut cache = SessionCache::new(|language: &str, _family: &str| language.to_string());
        assert_eq!(cache.get_or_create("sv", "wikidata"), "sv");
        assert_eq!(cache.get_or_create("fi", "wikidata"), "fi");
        assert_eq!(cache.len(), 2);
    }
}
