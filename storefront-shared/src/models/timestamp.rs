use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// UTC timestamp as the backend serializes it (RFC 3339).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// The current instant.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Short human form used on order cards.
    pub fn display(&self) -> String {
        self.0.format("%b %-d, %H:%M").to_string()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}
