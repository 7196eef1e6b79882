use serde::{Deserialize, Serialize};

/// Search response passed through from the catalog.
///
/// `matches` stays as raw JSON: the provider owns its shape and the player
/// renders whatever fields it knows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub matches: Vec<serde_json::Value>,
    pub timings: Vec<Timing>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    pub operation_name: String,
    pub duration_ms: f64,
}
