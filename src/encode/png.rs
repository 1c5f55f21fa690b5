use std::path::{Path, PathBuf};

use crate::foundation::error::{CoghazError, CoghazResult};
use crate::render::canvas::Canvas;

/// Persists a finished canvas.
pub trait ImageEncoder {
    /// Write `canvas` to `path`, replacing any existing file.
    ///
    /// On failure nothing new may be left at `path`.
    fn encode(&self, canvas: &Canvas, path: &Path) -> CoghazResult<()>;
}

/// PNG encoder backed by the `image` crate.
///
/// Bytes go to a hidden sibling file first and are renamed into place once complete.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngEncoder;

impl ImageEncoder for PngEncoder {
    fn encode(&self, canvas: &Canvas, path: &Path) -> CoghazResult<()> {
        ensure_parent_dir(path)?;
        let tmp = TempSibling::new(path)?;

        image::save_buffer_with_format(
            tmp.path(),
            canvas.as_raw(),
            canvas.width(),
            canvas.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| {
            CoghazError::encoding(format!("write png '{}': {e}", tmp.path().display()))
        })?;

        tmp.commit(path)?;
        tracing::info!(
            path = %path.display(),
            width = canvas.width(),
            height = canvas.height(),
            "wrote png"
        );
        Ok(())
    }
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> CoghazResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            CoghazError::encoding(format!(
                "failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

/// Temporary file next to the destination; removed on drop unless committed.
struct TempSibling {
    path: PathBuf,
    committed: bool,
}

impl TempSibling {
    fn new(dest: &Path) -> CoghazResult<Self> {
        let name = dest.file_name().ok_or_else(|| {
            CoghazError::encoding(format!("output path '{}' has no file name", dest.display()))
        })?;
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let tmp_name = format!(
            ".{}.{}.{nanos}.tmp",
            name.to_string_lossy(),
            std::process::id()
        );
        Ok(Self {
            path: dest.with_file_name(tmp_name),
            committed: false,
        })
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn commit(mut self, dest: &Path) -> CoghazResult<()> {
        std::fs::rename(&self.path, dest).map_err(|e| {
            CoghazError::encoding(format!(
                "move '{}' into place at '{}': {e}",
                self.path.display(),
                dest.display()
            ))
        })?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for TempSibling {
    fn drop(&mut self) {
        if !self.committed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
