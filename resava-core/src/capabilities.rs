use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    #[error("Places backend not ready: {0}")]
    NotReady(String),
    #[error("Place lookup failed: {0}")]
    LookupFailed(String),
    #[error("Timed out after {0:?} waiting for the places backend")]
    ReadinessTimeout(Duration),
}

/// Destination autocomplete backed by an external places service.
///
/// The widget injects this instead of reaching for an ambient global, and
/// awaits `ready` once at startup instead of polling for the script to
/// load.
#[async_trait]
pub trait PlacesLookup: Send + Sync {
    /// Resolves once the backing service has finished loading.
    async fn ready(&self) -> Result<(), CapabilityError>;

    /// Best-effort resolution of a free-text query to a place name or
    /// address.
    async fn search(&self, query: &str) -> Result<Option<String>, CapabilityError>;
}

/// Waits for the lookup to become ready, bounded by `timeout`. The single
/// cancellation path: expiry returns `ReadinessTimeout` and the caller
/// moves on without the capability.
pub async fn await_ready(
    lookup: &dyn PlacesLookup,
    timeout: Duration,
) -> Result<(), CapabilityError> {
    match tokio::time::timeout(timeout, lookup.ready()).await {
        Ok(result) => result,
        Err(_) => Err(CapabilityError::ReadinessTimeout(timeout)),
    }
}

/// Marketing/analytics event sink (the original tracked pixel events).
pub trait AnalyticsSink: Send + Sync {
    fn track(&self, event: &str, props: serde_json::Value);
}

/// Drops every event.
pub struct NoopAnalytics;

impl AnalyticsSink for NoopAnalytics {
    fn track(&self, _event: &str, _props: serde_json::Value) {}
}

/// Records events in memory; used in tests and local runs.
#[derive(Default)]
pub struct RecordingAnalytics {
    events: Mutex<Vec<(String, serde_json::Value)>>,
}

impl RecordingAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(String, serde_json::Value)> {
        self.events.lock().expect("analytics lock").clone()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn track(&self, event: &str, props: serde_json::Value) {
        self.events
            .lock()
            .expect("analytics lock")
            .push((event.to_string(), props));
    }
}

/// Places lookup over a fixed list of known places. Ready immediately;
/// search is a case-insensitive prefix match.
pub struct StaticPlacesLookup {
    places: Vec<String>,
}

impl StaticPlacesLookup {
    pub fn new(places: Vec<String>) -> Self {
        Self { places }
    }
}

#[async_trait]
impl PlacesLookup for StaticPlacesLookup {
    async fn ready(&self) -> Result<(), CapabilityError> {
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Option<String>, CapabilityError> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(None);
        }
        Ok(self
            .places
            .iter()
            .find(|place| place.to_lowercase().starts_with(&query))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverReadyLookup;

    #[async_trait]
    impl PlacesLookup for NeverReadyLookup {
        async fn ready(&self) -> Result<(), CapabilityError> {
            std::future::pending::<()>().await;
            Ok(())
        }

        async fn search(&self, _query: &str) -> Result<Option<String>, CapabilityError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_static_lookup_prefix_match() {
        let lookup = StaticPlacesLookup::new(vec![
            "Tel Aviv".to_string(),
            "Tibériade".to_string(),
        ]);
        assert_eq!(await_ready(&lookup, Duration::from_millis(50)).await.ok(), Some(()));
        assert_eq!(
            lookup.search("tel").await.unwrap(),
            Some("Tel Aviv".to_string())
        );
        assert_eq!(lookup.search("haifa").await.unwrap(), None);
        assert_eq!(lookup.search("  ").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_readiness_timeout_is_bounded() {
        let lookup = NeverReadyLookup;
        let result = await_ready(&lookup, Duration::from_millis(10)).await;
        assert!(matches!(result, Err(CapabilityError::ReadinessTimeout(_))));
    }
}
