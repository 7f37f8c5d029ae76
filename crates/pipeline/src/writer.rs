//! Writing artifacts under the output root

use crate::error::PipelineError;
use carron_core::GeneratedArtifact;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::info;

/// Writes artifacts below a single output directory
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    root: PathBuf,
}

impl ArtifactWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write every artifact, returning the written paths in order
    ///
    /// All relative paths are checked before the first write. A failed
    /// write stops the run; files already written are left in place.
    pub fn write_all(&self, artifacts: &[GeneratedArtifact]) -> Result<Vec<PathBuf>, PipelineError> {
        let destinations = artifacts
            .iter()
            .map(|artifact| self.destination(&artifact.relative_path))
            .collect::<Result<Vec<_>, _>>()?;

        let mut written = Vec::with_capacity(artifacts.len());
        for (artifact, path) in artifacts.iter().zip(destinations) {
            write_file(&path, &artifact.content)?;
            info!("Wrote {}", path.display());
            written.push(path);
        }

        Ok(written)
    }

    /// Path an artifact would be written to
    pub fn destination(&self, relative_path: &str) -> Result<PathBuf, PipelineError> {
        let relative = Path::new(relative_path);
        let is_contained = !relative_path.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));

        if !is_contained {
            return Err(PipelineError::InvalidArtifactPath(relative_path.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), PipelineError> {
    let to_error = |source| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, content).map_err(to_error)
}
