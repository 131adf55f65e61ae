//! Read-only snapshots of the process environment.
//!
//! The classifiers in this crate never call [`std::env::var`] themselves.
//! They receive an [`EnvSnapshot`], which is either captured from the live
//! process or built by hand in tests.
//!
//! ## Examples
//!
//! ```
//! use termcaps::discovery::env::EnvSnapshot;
//!
//! let env = EnvSnapshot::from_pairs([("TERM", "xterm-256color"), ("CI", "")]);
//!
//! assert_eq!(env.get("TERM"), Some("xterm-256color"));
//! assert!(env.contains("CI"));
//! assert!(!env.is_set("CI"));
//! assert_eq!(env.get("COLORTERM"), None);
//! ```

use std::collections::HashMap;
use std::env;

/// An immutable view of environment variables, queried by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Captures the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn capture() -> Self {
        let vars: HashMap<String, String> = env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();

        tracing::trace!(count = vars.len(), "Captured environment snapshot");
        Self { vars }
    }

    /// An empty environment.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a snapshot from explicit key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// The value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Whether `key` is present at all, even with an empty value.
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Whether `key` is present with a non-empty value.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_empty())
    }

    /// Whether `key` is present and exactly equal to `expected`.
    pub fn is(&self, key: &str, expected: &str) -> bool {
        self.get(key) == Some(expected)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
