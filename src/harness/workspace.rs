use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, error, warn};

/// The scratch directory owned by one run. Created empty by `prepare` and
/// removed again by `finish`, or by `Drop` if the run bails out early.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    removed: bool,
}

impl Workspace {
    /// Wipe anything left at `root` by an earlier run and create it again, empty.
    /// Only the last path component is created; its parent must exist.
    pub fn prepare(root: &Path) -> io::Result<Self> {
        if root.exists() {
            debug!("Removing stale temporary directory {}", root.display());
            fs::remove_dir_all(root).map_err(|e| {
                error!("Fatal error: cannot remove {}: {}", root.display(), e);
                e
            })?;
        }
        fs::create_dir(root).map_err(|e| {
            error!("Fatal error: cannot create {}: {}", root.display(), e);
            e
        })?;
        Ok(Self {
            root: root.to_path_buf(),
            removed: false,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Remove the scratch tree, reporting failure to the caller.
    pub fn finish(mut self) -> io::Result<()> {
        self.removed = true;
        fs::remove_dir_all(&self.root).map_err(|e| {
            error!("Could not remove {}: {}", self.root.display(), e);
            e
        })
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if !self.removed {
            if let Err(e) = fs::remove_dir_all(&self.root) {
                warn!("Could not remove {}: {}", self.root.display(), e);
            }
        }
    }
}
