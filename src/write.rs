//! Writing rendered declarations to storage (`std` feature).

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ConvertError;
use crate::serialize::Declaration;

/// What to do when the destination already exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate and replace an existing file.
    #[default]
    Overwrite,
    /// Refuse with [`io::ErrorKind::AlreadyExists`] so the caller can pick
    /// another name.
    CreateNew,
}

impl Declaration<'_> {
    /// Render and write to an [`io::Write`] sink. Returns the bytes written.
    pub fn write_to<W: io::Write>(&self, out: &mut W) -> Result<usize, ConvertError> {
        let text = self.render()?;
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(text.len())
    }

    /// Render and write to `path`. Returns the bytes written.
    ///
    /// The text is fully rendered before the file is opened, so limit errors
    /// never leave a partial file behind. Write failures are not retried.
    pub fn write_file(
        &self,
        path: impl AsRef<Path>,
        mode: WriteMode,
    ) -> Result<usize, ConvertError> {
        let path = path.as_ref();
        let text = self.render()?;
        let mut options = OpenOptions::new();
        options.write(true);
        match mode {
            WriteMode::Overwrite => options.create(true).truncate(true),
            WriteMode::CreateNew => options.create_new(true),
        };
        let mut file = options.open(path).inspect_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                log::warn!("refusing to replace existing {}", path.display());
            }
        })?;
        io::Write::write_all(&mut file, text.as_bytes())?;
        log::info!(
            "wrote {} ({} bytes) to {}",
            self.name(),
            text.len(),
            path.display()
        );
        Ok(text.len())
    }

    /// Write to `dir/<name>.h` and return the path written.
    pub fn write_into_dir(
        &self,
        dir: impl AsRef<Path>,
        mode: WriteMode,
    ) -> Result<PathBuf, ConvertError> {
        let path = dir.as_ref().join(self.file_name());
        self.write_file(&path, mode)?;
        Ok(path)
    }
}
