//! Append-only persistence of timestamped text messages to a single file.
//!
//! Each record is one line, `<UTC timestamp>: <payload>`, written by
//! [`FileStringPersistor::save`] and read back in insertion order by
//! [`FileStringPersistor::get`].
//!
//! Retrieval returns the *earliest* `count` records in the file, not the most
//! recent ones.

pub mod codec;
pub mod config;

mod error;
mod record;
mod store;

use std::path::Path;

use time::OffsetDateTime;

pub use codec::{DecodeError, EncodeError};
pub use config::PersistorConfig;
pub use error::{PersistorError, Result};
pub use record::PersistedString;
pub use store::FileStringPersistor;

/// Storage backend for timestamped messages.
pub trait StringPersistor: Send + Sync {
    /// Points subsequent calls at `path`. Performs no I/O.
    fn set_file(&self, path: &Path);

    /// Appends one record, creating the file and its parent directories as needed.
    fn save(&self, timestamp: OffsetDateTime, payload: &str) -> Result<()>;

    /// Returns up to `count` records from the start of the file, oldest first.
    /// A file that does not exist yet yields an empty list.
    fn get(&self, count: usize) -> Result<Vec<PersistedString>>;
}
