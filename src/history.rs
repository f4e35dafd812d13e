//! Request history tracking for debugging and diagnostics.

use std::collections::HashMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Direction of a message in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    Request,
    Response,
}

/// A recorded message in the history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub msg_type: MessageType,
    /// HTTP method and path, e.g. `PUT /elgato/lights`.
    pub route: String,
    pub message: Value,
    /// Seconds since history creation
    pub timestamp: f64,
}

/// Tracks request/response history for debugging.
#[derive(Debug, Clone)]
pub struct MessageHistory {
    latest: HashMap<MessageType, HashMap<String, Value>>,
    last_error: Option<String>,
    start_time: Instant,
    entries: Vec<HistoryEntry>,
    max_entries: usize,
}

impl Default for MessageHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageHistory {
    pub const DEFAULT_MAX_ENTRIES: usize = 100;

    pub fn new() -> Self {
        Self {
            latest: HashMap::from([
                (MessageType::Request, HashMap::new()),
                (MessageType::Response, HashMap::new()),
            ]),
            last_error: None,
            start_time: Instant::now(),
            entries: Vec::new(),
            max_entries: Self::DEFAULT_MAX_ENTRIES,
        }
    }

    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            max_entries,
            ..Self::new()
        }
    }

    pub fn record(&mut self, msg_type: MessageType, route: &str, message: &Value) {
        if let Some(type_map) = self.latest.get_mut(&msg_type) {
            type_map.insert(route.to_string(), message.clone());
        }

        self.entries.push(HistoryEntry {
            msg_type,
            route: route.to_string(),
            message: message.clone(),
            timestamp: self.start_time.elapsed().as_secs_f64(),
        });

        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
    }

    pub fn record_error(&mut self, error: &str) {
        self.last_error = Some(error.to_string());
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Most recent message of the given direction on a route.
    pub fn latest(&self, msg_type: MessageType, route: &str) -> Option<&Value> {
        self.latest.get(&msg_type).and_then(|m| m.get(route))
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.latest.values_mut().for_each(|m| m.clear());
        self.entries.clear();
        self.last_error = None;
    }

    pub fn summary(&self) -> HistorySummary {
        let count = |t: MessageType| {
            self.entries.iter().filter(|e| e.msg_type == t).count()
        };
        HistorySummary {
            request_count: count(MessageType::Request),
            response_count: count(MessageType::Response),
            total_entries: self.entries.len(),
            last_error: self.last_error.clone(),
        }
    }
}

/// Summary of message history for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySummary {
    pub request_count: usize,
    pub response_count: usize,
    pub total_entries: usize,
    pub last_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_message() {
        let mut history = MessageHistory::new();
        history.record(
            MessageType::Request,
            "PUT /elgato/lights",
            &json!({"numberOfLights": 1, "lights": [{"on": 1}]}),
        );

        assert_eq!(history.len(), 1);
        assert_eq!(
            history.latest(MessageType::Request, "PUT /elgato/lights"),
            Some(&json!({"numberOfLights": 1, "lights": [{"on": 1}]}))
        );
        assert!(history.latest(MessageType::Response, "PUT /elgato/lights").is_none());
    }

    #[test]
    fn test_record_error() {
        let mut history = MessageHistory::new();
        history.record_error("Connection timeout");
        assert_eq!(history.last_error(), Some("Connection timeout"));
    }

    #[test]
    fn test_max_entries() {
        let mut history = MessageHistory::with_max_entries(2);
        for i in 0..5 {
            history.record(MessageType::Response, "GET /elgato/lights", &json!({"n": i}));
        }
        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[1].message, json!({"n": 4}));
    }

    #[test]
    fn test_summary_and_clear() {
        let mut history = MessageHistory::new();
        history.record(MessageType::Request, "GET /elgato/lights", &Value::Null);
        history.record(MessageType::Response, "GET /elgato/lights", &json!({"lights": []}));
        history.record_error("boom");

        let summary = history.summary();
        assert_eq!(summary.request_count, 1);
        assert_eq!(summary.response_count, 1);
        assert_eq!(summary.last_error.as_deref(), Some("boom"));

        history.clear();
        assert!(history.is_empty());
        assert!(history.last_error().is_none());
    }
}
