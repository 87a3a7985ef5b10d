//! Response types that only the client needs.

use serde::{Deserialize, Serialize};

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `"healthy"` when the process is up.
    pub status: String,
}

/// Acknowledgment returned by mutations without an entity body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgment {
    /// Human-readable outcome.
    pub message: String,
}
