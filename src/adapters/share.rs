use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{assets::bitmap::Bitmap, foundation::error::MemeResult};

/// Completion reported by a share surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShareCompletion {
    /// Whether the user completed the share.
    pub succeeded: bool,
}

/// Modal share surface that consumes a flattened bitmap.
pub trait ShareGateway {
    /// Present the share surface for `image` and wait for completion.
    fn share(&mut self, image: &Bitmap) -> MemeResult<ShareCompletion>;

    /// Dismiss the share surface after a successful share.
    fn dismiss(&mut self) {}
}

/// Share gateway that writes PNG files.
///
/// An existing target without `overwrite` counts as the user declining.
#[derive(Clone, Debug)]
pub struct FileShareGateway {
    out: PathBuf,
    overwrite: bool,
    dismissed: bool,
}

impl FileShareGateway {
    /// Gateway writing to `out`.
    pub fn new(out: impl Into<PathBuf>) -> Self {
        Self {
            out: out.into(),
            overwrite: false,
            dismissed: false,
        }
    }

    /// Replace existing files.
    pub fn overwrite(mut self, yes: bool) -> Self {
        self.overwrite = yes;
        self
    }

    /// Output path.
    pub fn path(&self) -> &Path {
        &self.out
    }

    /// Whether the last successful share was dismissed.
    pub fn was_dismissed(&self) -> bool {
        self.dismissed
    }
}

impl ShareGateway for FileShareGateway {
    fn share(&mut self, image: &Bitmap) -> MemeResult<ShareCompletion> {
        self.dismissed = false;
        if self.out.exists() && !self.overwrite {
            tracing::debug!(path = %self.out.display(), "share target exists, declining");
            return Ok(ShareCompletion { succeeded: false });
        }

        ensure_parent_dir(&self.out)?;
        let png = image.encode_png()?;
        std::fs::write(&self.out, png)
            .with_context(|| format!("write png '{}'", self.out.display()))?;
        Ok(ShareCompletion { succeeded: true })
    }

    fn dismiss(&mut self) {
        self.dismissed = true;
    }
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> MemeResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/adapters/share.rs"]
mod tests;
