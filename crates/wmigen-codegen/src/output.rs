use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::CodegenError;

/// Destination directory of one compile run.
///
/// Artifacts are staged as `.tmp` siblings and only renamed to their real
/// names by [`publish`](OutputDir::publish), as one batch, so a run that
/// fails after staging leaves the previous dictionaries untouched.
#[derive(Debug)]
pub struct OutputDir {
    root: PathBuf,
    staged: Vec<(PathBuf, PathBuf)>,
}

impl OutputDir {
    pub fn create(root: &Path) -> Result<Self, CodegenError> {
        create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            staged: Vec::new(),
        })
    }

    /// Write `data` under `file_name` plus a `.tmp` suffix and sync it.
    /// The artifact stays invisible under its real name until [`publish`]
    /// runs.
    ///
    /// [`publish`]: OutputDir::publish
    pub fn stage(&mut self, file_name: &str, data: &[u8]) -> Result<(), CodegenError> {
        let tmp_path = self.root.join(format!("{file_name}.tmp"));
        let mut file = File::create(&tmp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
        self.staged.push((tmp_path, self.root.join(file_name)));
        Ok(())
    }

    /// Rename every staged artifact into place, then sync the directory.
    pub fn publish(mut self) -> Result<(), CodegenError> {
        for (tmp_path, final_path) in &self.staged {
            std::fs::rename(tmp_path, final_path)?;
        }
        self.staged.clear();
        File::open(&self.root)?.sync_all()?;
        Ok(())
    }
}

impl Drop for OutputDir {
    fn drop(&mut self) {
        // anything still staged belongs to a failed run
        for (tmp_path, _) in &self.staged {
            let _ = std::fs::remove_file(tmp_path);
        }
    }
}
