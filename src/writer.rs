use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};
use crate::metadata::Fixture;

/// Write `fixture` as 2-space indented JSON, creating or truncating `path`.
///
/// Non-ASCII text is written as UTF-8, not escaped. The parent directory must
/// already exist. The write is not atomic.
pub fn write_fixture(fixture: &Fixture, path: &Path) -> Result<()> {
    let body = serde_json::to_vec_pretty(fixture)?;

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;
    file.write_all(&body).map_err(|e| Error::io(path, e))?;
    file.flush().map_err(|e| Error::io(path, e))?;
    Ok(())
}
