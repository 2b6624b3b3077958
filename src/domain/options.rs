// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read and write options and the query parameters they produce.
//!
//! Every option type renders itself into a [`QueryParams`] accumulator. The
//! client then applies that accumulator to exactly one request, so a
//! parameter can never be attached to a request other than the one sent.

use std::fmt;
use std::time::Duration;

/// An ordered collection of query parameters.
///
/// Parameters are kept in insertion order. Flag-style parameters such as
/// `consistent` carry an empty value.
///
/// # Examples
///
/// ```
/// use consulkv::domain::QueryParams;
///
/// let params = QueryParams::new()
///     .with("recurse", "true")
///     .with_if(false, "keys", "true");
///
/// assert_eq!(params.get("recurse"), Some("true"));
/// assert!(!params.contains("keys"));
/// assert_eq!(params.to_string(), "recurse=true");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Appends a parameter and returns `self` for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Appends a parameter only when `condition` holds.
    pub fn with_if(self, condition: bool, name: &str, value: impl Into<String>) -> Self {
        if condition {
            self.with(name, value)
        } else {
            self
        }
    }

    /// Appends a parameter only when `value` is `Some`.
    pub fn with_opt<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(name, v.to_string()),
            None => self,
        }
    }

    /// Appends every parameter of `other`.
    pub fn extend(mut self, other: QueryParams) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Returns the value of the first parameter named `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if a parameter named `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns `true` if no parameters were added.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        Ok(())
    }
}

/// Read consistency requested from the store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConsistencyMode {
    /// Leader-served read without an extra round of quorum checks
    #[default]
    Default,
    /// Linearizable read, confirmed by a quorum
    Consistent,
    /// Any server may answer, possibly with stale data
    Stale,
}

/// Parameters of a blocking query.
///
/// The store holds the request until the entry's index moves past `index`
/// or `wait` elapses, whichever comes first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockingWait {
    /// Index to wait past
    pub index: u64,
    /// Maximum time the store may hold the request
    pub wait: Duration,
}

impl BlockingWait {
    /// Renders the wait duration the way the store parses it.
    ///
    /// Whole seconds become `"<n>s"`, anything else `"<n>ms"`.
    pub fn wait_param(&self) -> String {
        if self.wait.subsec_nanos() == 0 {
            format!("{}s", self.wait.as_secs())
        } else {
            format!("{}ms", self.wait.as_millis())
        }
    }

    /// Returns how long a request carrying this wait may take end to end.
    ///
    /// The store holds the request for up to `wait` plus a random jitter of
    /// at most `wait / 16`; `base` covers the round trip itself.
    pub fn request_timeout(&self, base: Duration) -> Duration {
        base.saturating_add(self.wait).saturating_add(self.wait / 16)
    }
}

/// Read-time options.
///
/// `QueryOptions::default()` asks for no special behaviour and renders no
/// parameters.
///
/// # Examples
///
/// ```
/// use consulkv::domain::{ConsistencyMode, QueryOptions};
/// use std::time::Duration;
///
/// let options = QueryOptions::new()
///     .with_consistency(ConsistencyMode::Stale)
///     .with_blocking_wait(42, Duration::from_secs(30))
///     .with_datacenter("dc2");
///
/// let params = options.to_params();
/// assert_eq!(params.to_string(), "stale=&index=42&wait=30s&dc=dc2");
/// assert!(QueryOptions::default().to_params().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Consistency mode
    pub consistency: ConsistencyMode,
    /// Blocking-query parameters
    pub blocking: Option<BlockingWait>,
    /// Datacenter to query instead of the agent's own
    pub datacenter: Option<String>,
}

impl QueryOptions {
    /// Creates blank options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the consistency mode.
    pub fn with_consistency(mut self, consistency: ConsistencyMode) -> Self {
        self.consistency = consistency;
        self
    }

    /// Turns the read into a blocking query.
    pub fn with_blocking_wait(mut self, index: u64, wait: Duration) -> Self {
        self.blocking = Some(BlockingWait { index, wait });
        self
    }

    /// Targets a specific datacenter.
    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = Some(datacenter.into());
        self
    }

    /// Returns `true` if these options request nothing special.
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// Renders the options as query parameters.
    pub fn to_params(&self) -> QueryParams {
        let params = match self.consistency {
            ConsistencyMode::Default => QueryParams::new(),
            ConsistencyMode::Consistent => QueryParams::new().with("consistent", ""),
            ConsistencyMode::Stale => QueryParams::new().with("stale", ""),
        };

        let params = match &self.blocking {
            Some(blocking) => params
                .with("index", blocking.index.to_string())
                .with("wait", blocking.wait_param()),
            None => params,
        };

        params.with_opt(
            "dc",
            self.datacenter.as_deref().filter(|dc| !dc.is_empty()),
        )
    }
}

/// Write-time options.
///
/// # Examples
///
/// ```
/// use consulkv::domain::PutOptions;
///
/// let options = PutOptions::new().with_cas(17).with_acquire("session-1");
/// let params = options.to_params(0);
///
/// assert_eq!(params.to_string(), "cas=17&acquire=session-1");
/// assert_eq!(PutOptions::new().to_params(u64::MAX).get("flags"), Some("18446744073709551615"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PutOptions {
    /// Write only if the entry's modify index equals this value
    /// (`0` means "only if the key does not exist yet")
    pub cas: Option<u64>,
    /// Session that attempts to take the lock on the entry
    pub acquire: Option<String>,
    /// Session that releases its lock on the entry
    pub release: Option<String>,
}

impl PutOptions {
    /// Creates blank options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the write conditional on the current modify index.
    pub fn with_cas(mut self, index: u64) -> Self {
        self.cas = Some(index);
        self
    }

    /// Attempts to acquire the entry's lock for `session`.
    pub fn with_acquire(mut self, session: impl Into<String>) -> Self {
        self.acquire = Some(session.into());
        self
    }

    /// Releases the entry's lock held by `session`.
    pub fn with_release(mut self, session: impl Into<String>) -> Self {
        self.release = Some(session.into());
        self
    }

    /// Renders the options plus `flags` as query parameters.
    ///
    /// Each parameter appears only when it carries a non-default value.
    pub fn to_params(&self, flags: u64) -> QueryParams {
        QueryParams::new()
            .with_if(flags != 0, "flags", flags.to_string())
            .with_opt("cas", self.cas)
            .with_opt("acquire", non_empty(&self.acquire))
            .with_opt("release", non_empty(&self.release))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_query_options_render_nothing() {
        let options = QueryOptions::new();
        assert!(options.is_blank());
        assert!(options.to_params().is_empty());
    }

    #[test]
    fn test_consistent_mode() {
        let params = QueryOptions::new()
            .with_consistency(ConsistencyMode::Consistent)
            .to_params();
        assert!(params.contains("consistent"));
        assert!(!params.contains("stale"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_wait_param_formats() {
        let seconds = BlockingWait {
            index: 1,
            wait: Duration::from_secs(300),
        };
        assert_eq!(seconds.wait_param(), "300s");

        let millis = BlockingWait {
            index: 1,
            wait: Duration::from_millis(1500),
        };
        assert_eq!(millis.wait_param(), "1500ms");
    }

    #[test]
    fn test_empty_datacenter_ignored() {
        let params = QueryOptions::new().with_datacenter("").to_params();
        assert!(params.is_empty());
    }

    #[test]
    fn test_blank_put_options_render_nothing() {
        assert!(PutOptions::new().to_params(0).is_empty());
    }

    #[test]
    fn test_flags_rendered_unsigned() {
        let params = PutOptions::new().to_params(u64::MAX);
        assert_eq!(params.get("flags"), Some("18446744073709551615"));
    }

    #[test]
    fn test_all_put_params_together() {
        let params = PutOptions::new()
            .with_cas(0)
            .with_acquire("s1")
            .with_release("s2")
            .to_params(7);
        assert_eq!(params.to_string(), "flags=7&cas=0&acquire=s1&release=s2");
    }

    #[test]
    fn test_empty_session_tokens_ignored() {
        let params = PutOptions::new()
            .with_acquire("")
            .with_release("")
            .to_params(0);
        assert!(params.is_empty());
    }

    #[test]
    fn test_extend_keeps_order() {
        let params = QueryParams::new()
            .with("recurse", "true")
            .extend(QueryParams::new().with("dc", "dc1"));
        let names: Vec<&str> = params.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["recurse", "dc"]);
    }

    #[test]
    fn test_blocking_request_timeout_covers_wait_and_jitter() {
        let blocking = BlockingWait {
            index: 7,
            wait: Duration::from_secs(32),
        };
        assert_eq!(
            blocking.request_timeout(Duration::from_secs(10)),
            Duration::from_secs(44)
        );
        let forever = BlockingWait {
            index: 7,
            wait: Duration::MAX,
        };
        assert_eq!(forever.request_timeout(Duration::from_secs(1)), Duration::MAX);
    }
}
