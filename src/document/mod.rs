//! Document management
//! Couples a buffer with the file it was read from and writes it back

use crate::buffer::Buffer;
use crate::constants;
use crate::error::{ErrorType, GapError, Result};
use crate::settings::BufferOptions;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

/// A buffer plus file metadata
#[derive(Debug)]
pub struct Document {
    /// Text buffer
    pub buffer: Buffer,
    /// File path (None if new/unsaved)
    file_path: Option<PathBuf>,
    /// Buffer revision at the last load or save
    last_saved_revision: u64,
}

impl Document {
    /// Create a new empty document
    #[must_use]
    pub fn new() -> Self {
        Document {
            buffer: Buffer::default(),
            file_path: None,
            last_saved_revision: 0,
        }
    }

    /// Load document from file with default options
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path, &BufferOptions::default())
    }

    /// Load document from file.
    ///
    /// Missing files, permission problems and short reads are reported as
    /// distinct [`ErrorType`]s.
    pub fn open_with_options(path: impl AsRef<Path>, options: &BufferOptions) -> Result<Self> {
        let path = path.as_ref();
        let (bytes, modified) = read_file(path).inspect_err(|err| {
            warn!(path = %path.display(), error = %err, "failed to open file");
        })?;

        let mut buffer = Buffer::from_bytes_with_options(display_name_of(path), &bytes, options);
        buffer.set_last_write_time(modified);
        debug!(path = %path.display(), bytes = bytes.len(), "opened document");

        Ok(Document {
            last_saved_revision: buffer.revision(),
            buffer,
            file_path: Some(path.to_path_buf()),
        })
    }

    /// Save document to its current path
    pub fn save(&mut self) -> Result<()> {
        let path = self.file_path.clone().ok_or_else(|| {
            GapError::new(
                ErrorType::Io,
                constants::errors::NO_PATH,
                constants::errors::MSG_NO_FILE_NAME,
            )
        })?;
        self.save_to(&path)
    }

    /// Save document to a new path and adopt it
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.save_to(path)?;
        self.file_path = Some(path.to_path_buf());
        self.buffer.set_name(display_name_of(path));
        Ok(())
    }

    fn save_to(&mut self, path: &Path) -> Result<()> {
        let bytes = self.buffer.to_bytes_apply_line_endings();
        write_file(path, &bytes).inspect_err(|err| {
            warn!(path = %path.display(), error = %err, "failed to save file");
        })?;
        self.buffer
            .set_last_write_time(fs::metadata(path).and_then(|m| m.modified()).ok());
        self.mark_saved();
        debug!(path = %path.display(), bytes = bytes.len(), "saved document");
        Ok(())
    }

    /// Treat the current buffer contents as what is on disk
    pub fn mark_saved(&mut self) {
        self.last_saved_revision = self.buffer.revision();
    }

    /// Check if document has unsaved changes
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.buffer.revision() != self.last_saved_revision
    }

    /// Check whether the file on disk was modified after it was read or
    /// last saved
    pub fn changed_on_disk(&self) -> Result<bool> {
        let Some(path) = &self.file_path else {
            return Ok(false);
        };
        let modified = fs::metadata(path)?.modified().ok();
        Ok(modified != self.buffer.last_write_time())
    }

    /// Check if document has an associated file path
    #[must_use]
    pub fn has_path(&self) -> bool {
        self.file_path.is_some()
    }

    /// Get the file path if it exists
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Get display name for UI (filename or "[No Name]")
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.buffer.name()
    }

    #[must_use]
    pub fn last_write_time(&self) -> Option<SystemTime> {
        self.buffer.last_write_time()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn display_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(constants::buffer::NO_NAME)
        .to_string()
}

/// Read the whole file, failing if fewer bytes arrive than its metadata
/// promised
fn read_file(path: &Path) -> Result<(Vec<u8>, Option<SystemTime>)> {
    let mut file = fs::File::open(path)?;
    let metadata = file.metadata()?;
    let expected = usize::try_from(metadata.len()).map_err(|_| {
        GapError::new(
            ErrorType::Io,
            constants::errors::IO_ERROR,
            format!("{} is too large to load", path.display()),
        )
    })?;

    let mut bytes = Vec::with_capacity(expected);
    file.read_to_end(&mut bytes)?;
    if bytes.len() < expected {
        return Err(GapError::new(
            ErrorType::ShortRead,
            constants::errors::SHORT_READ,
            format!(
                "read {} of {} bytes from {}",
                bytes.len(),
                expected,
                path.display()
            ),
        ));
    }
    Ok((bytes, metadata.modified().ok()))
}

/// Atomic write: temp file next to the target, then rename.
///
/// The temp file is removed again if any step fails.
fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let temp_path = temp_path_for(path);
    let result = write_temp_and_rename(&temp_path, path, bytes);
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp_and_rename(temp_path: &Path, path: &Path, bytes: &[u8]) -> io::Result<()> {
    {
        let mut file = fs::File::create(temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    fs::rename(temp_path, path)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    parent.join(format!(
        ".{}.tmp",
        path.file_name().and_then(|n| n.to_str()).unwrap_or("file")
    ))
}
