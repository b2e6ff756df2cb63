//! Isolated execution context for a single trial
//!
//! Every trial gets a private, writable directory that no other trial can
//! resolve to. The directory name combines a random v4 UUID with the
//! exclusive-create semantics of the temp directory builder, so two
//! concurrent acquisitions never collide.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::Builder;
use uuid::Uuid;

use crate::error::ResourceError;

/// Prefix of every workspace directory name
const CONTEXT_PREFIX: &str = "yokay-eval-";

/// Ephemeral workspace bound to one trial
#[derive(Debug)]
pub struct IsolatedContext {
    /// Workspace directory
    root: PathBuf,

    /// Set once the directory has been removed
    released: bool,
}

impl IsolatedContext {
    /// Acquire a new workspace under the system temp directory
    pub fn acquire() -> Result<Self, ResourceError> {
        Self::acquire_in(std::env::temp_dir())
    }

    /// Acquire a new workspace under `parent`
    pub fn acquire_in(parent: impl AsRef<Path>) -> Result<Self, ResourceError> {
        let parent = parent.as_ref();
        let prefix = format!("{}{}-", CONTEXT_PREFIX, Uuid::new_v4().simple());

        let root = Builder::new()
            .prefix(&prefix)
            .tempdir_in(parent)
            .map_err(|source| ResourceError::Allocate {
                root: parent.to_path_buf(),
                source,
            })?
            .keep();

        tracing::debug!(path = %root.display(), "Acquired isolated context");

        Ok(Self {
            root,
            released: false,
        })
    }

    /// Workspace directory of this context
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Whether `release` has already completed
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Remove the workspace and everything under it
    ///
    /// Idempotent: once released, further calls return `Ok(())` without
    /// touching the filesystem.
    pub fn release(&mut self) -> Result<(), ResourceError> {
        if self.released {
            return Ok(());
        }

        match std::fs::remove_dir_all(&self.root) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(ResourceError::Release {
                    path: self.root.clone(),
                    source,
                });
            }
        }

        self.released = true;
        tracing::debug!(path = %self.root.display(), "Released isolated context");
        Ok(())
    }
}

impl Drop for IsolatedContext {
    fn drop(&mut self) {
        if !self.released {
            if let Err(e) = self.release() {
                tracing::warn!("Failed to release isolated context on drop: {}", e);
            }
        }
    }
}
