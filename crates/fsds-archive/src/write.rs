//! Writing archives from in-memory text, mainly for fixtures and tooling.

use std::{fs::File, io::Write as _, path::Path};

use zip::{ZipWriter, write::SimpleFileOptions};

use crate::error::Result;

/// Create `archive` holding one deflated entry per `(name, content)` pair.
pub fn write_text_entries(archive: impl AsRef<Path>, entries: &[(&str, &str)]) -> Result<()> {
  let mut zip = ZipWriter::new(File::create(archive)?);
  for (name, content) in entries {
    zip.start_file(*name, SimpleFileOptions::default())?;
    zip.write_all(content.as_bytes())?;
  }
  zip.finish()?;
  Ok(())
}
