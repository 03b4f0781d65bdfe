//! Materializes preview references as files under a process-owned temp
//! directory, so the user can open the selected document while reviewing.
//!
//! The state machine allocates `PreviewId`s and tells us which one to
//! release; a released preview's file is deleted immediately so stale
//! selections do not accumulate on disk.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use intake_core::{PreviewId, SelectedFile};
use intake_logging::{intake_debug, intake_warn};
use tempfile::TempDir;

pub struct PreviewStore {
    dir: TempDir,
    entries: HashMap<PreviewId, PathBuf>,
}

impl PreviewStore {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
            entries: HashMap::new(),
        })
    }

    /// Writes the preview file for `preview` if it does not exist yet.
    pub fn materialize(&mut self, preview: PreviewId, file: &SelectedFile) {
        if self.entries.contains_key(&preview) {
            return;
        }
        let path = self.dir.path().join(format!("preview-{preview}-{}", file.name));
        match fs::write(&path, &file.bytes) {
            Ok(()) => {
                intake_debug!("materialized preview {} at {:?}", preview, path);
                self.entries.insert(preview, path);
            }
            Err(err) => {
                intake_warn!("Failed to write preview {} to {:?}: {}", preview, path, err);
            }
        }
    }

    /// Invalidates a replaced preview reference and deletes its file.
    pub fn release(&mut self, preview: PreviewId) {
        let Some(path) = self.entries.remove(&preview) else {
            return;
        };
        if let Err(err) = fs::remove_file(&path) {
            intake_warn!("Failed to remove preview {:?}: {}", path, err);
        } else {
            intake_debug!("released preview {}", preview);
        }
    }

    pub fn path(&self, preview: PreviewId) -> Option<&Path> {
        self.entries.get(&preview).map(PathBuf::as_path)
    }
}
