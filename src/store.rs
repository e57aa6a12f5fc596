use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use time::OffsetDateTime;
use tracing::{debug, trace, warn};

use crate::codec;
use crate::config::PersistorConfig;
use crate::error::{PersistorError, Result};
use crate::record::PersistedString;
use crate::StringPersistor;

/// Appends records to a single text file and reads them back in file order.
///
/// Every operation on one instance runs under the same lock, so appends and reads
/// through a shared instance never interleave. Separate instances or processes
/// writing the same file are not coordinated.
#[derive(Debug, Default)]
pub struct FileStringPersistor {
    target: Mutex<Option<PathBuf>>,
}

impl FileStringPersistor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            target: Mutex::new(Some(path.into())),
        }
    }

    #[must_use]
    pub fn from_config(config: &PersistorConfig) -> Self {
        Self {
            target: Mutex::new(config.file.clone()),
        }
    }

    #[must_use]
    pub fn file(&self) -> Option<PathBuf> {
        self.lock_target().clone()
    }

    /// Appends `payload` stamped with the current UTC time.
    pub fn save_now(&self, payload: &str) -> Result<()> {
        self.save(OffsetDateTime::now_utc(), payload)
    }

    fn lock_target(&self) -> MutexGuard<'_, Option<PathBuf>> {
        match self.target.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl StringPersistor for FileStringPersistor {
    fn set_file(&self, path: &Path) {
        let mut target = self.lock_target();
        debug!(path = %path.display(), "string persistor target set");
        *target = Some(path.to_path_buf());
    }

    fn save(&self, timestamp: OffsetDateTime, payload: &str) -> Result<()> {
        let target = self.lock_target();
        let path = target.as_deref().ok_or(PersistorError::NotConfigured)?;

        let line = codec::encode_line(timestamp, payload)?;
        ensure_parent_dir(path)?;
        append_line(path, &line)?;

        trace!(path = %path.display(), bytes = line.len(), "appended record");
        Ok(())
    }

    fn get(&self, count: usize) -> Result<Vec<PersistedString>> {
        let target = self.lock_target();
        let path = target.as_deref().ok_or(PersistorError::NotConfigured)?;

        let file = match File::open(path) {
            Ok(file) => file,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                trace!(path = %path.display(), "no records file yet");
                return Ok(Vec::new());
            }
            Err(source) => return Err(PersistorError::io("opening records file", path, source)),
        };

        let records = read_records(path, BufReader::new(file), count)?;
        trace!(path = %path.display(), count = records.len(), "read records");
        Ok(records)
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) else {
        return Ok(());
    };
    if parent.exists() {
        return Ok(());
    }

    fs::create_dir_all(parent)
        .map_err(|source| PersistorError::io("creating records directory", parent, source))?;
    debug!(dir = %parent.display(), "created records directory");
    Ok(())
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| PersistorError::io("opening records file for append", path, source))?;

    file.write_all(line.as_bytes())
        .map_err(|source| PersistorError::io("appending record", path, source))?;
    file.flush()
        .map_err(|source| PersistorError::io("flushing records file", path, source))
}

/// Decodes at most `count` lines from the start of `reader`. The first corrupt
/// line aborts the whole read.
fn read_records(
    path: &Path,
    reader: impl BufRead,
    count: usize,
) -> Result<Vec<PersistedString>> {
    let mut records = Vec::new();

    for (line_index, line_result) in reader.lines().take(count).enumerate() {
        let line_number = line_index + 1;
        let line = line_result
            .map_err(|source| PersistorError::io_line(path, line_number, source))?;

        let record = codec::decode_line(&line).map_err(|error| {
            warn!(path = %path.display(), line = line_number, %error, "corrupt record");
            PersistorError::decode(path, line_number, error)
        })?;
        records.push(record);
    }

    Ok(records)
}
