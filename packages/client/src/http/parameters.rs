//! Side-channel key/value bag carried by requests and responses.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Number of times the request has been re-sent by the retry subscriber.
pub const RETRY_COUNT: &str = "retry_count";
/// URLs already visited by the redirect subscriber for this logical call.
pub const REDIRECT_HISTORY: &str = "redirect_history";
/// Number of redirects followed before the final response.
pub const REDIRECT_COUNT: &str = "redirect_count";
/// Final URL after following redirects.
pub const EFFECTIVE_URL: &str = "effective_url";
/// Unix timestamp (microseconds) at which the history subscriber saw the request.
pub const HISTORY_STARTED_AT: &str = "history_started_at";

/// Ordered string-keyed bag of JSON values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters(Map<String, Value>);

impl Parameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Deserializes the value stored under `key`; `None` if absent or of another shape.
    #[must_use]
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.0
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Serializes `value` under `key`. Values that do not serialize are stored as null.
    pub fn insert_serialized<T: Serialize>(&mut self, key: impl Into<String>, value: &T) {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.0.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_round_trip_through_bag() {
        let mut parameters = Parameters::new();
        parameters.insert(RETRY_COUNT, 2);
        parameters.insert_serialized(REDIRECT_HISTORY, &vec!["http://a/", "http://b/"]);

        assert_eq!(parameters.get_as::<u32>(RETRY_COUNT), Some(2));
        assert_eq!(
            parameters.get_as::<Vec<String>>(REDIRECT_HISTORY),
            Some(vec!["http://a/".to_string(), "http://b/".to_string()])
        );
        assert_eq!(parameters.get_as::<u32>(REDIRECT_HISTORY), None);
        assert_eq!(parameters.len(), 2);
    }

    #[test]
    fn missing_key_is_none() {
        let parameters = Parameters::new();
        assert!(parameters.get(EFFECTIVE_URL).is_none());
        assert!(parameters.get_as::<String>(EFFECTIVE_URL).is_none());
        assert!(parameters.is_empty());
    }
}
