use time::OffsetDateTime;

/// A single stored message: when it was written and what it said.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersistedString {
    timestamp: OffsetDateTime,
    payload: String,
}

impl PersistedString {
    #[must_use]
    pub fn new(timestamp: OffsetDateTime, payload: impl Into<String>) -> Self {
        Self {
            timestamp,
            payload: payload.into(),
        }
    }

    #[must_use]
    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    #[must_use]
    pub fn into_parts(self) -> (OffsetDateTime, String) {
        (self.timestamp, self.payload)
    }
}
