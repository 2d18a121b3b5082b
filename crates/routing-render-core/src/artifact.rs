// crates/routing-render-core/src/artifact.rs
// ============================================================================
// Module: Rendered Artifacts
// Description: Rendered artifact model and safe on-disk materialization.
// Purpose: Carry deterministic render output and write it under a target dir.
// Dependencies: serde, serde_json, serde_yaml, std
// ============================================================================

//! ## Overview
//! A [`RenderedArtifact`] is one template's output: a relative path, a
//! format, and the rendered text. An [`ArtifactBundle`] holds a whole job's
//! artifacts with deterministic ordering (sorted by path, duplicates
//! rejected) and writes them under a caller-chosen output directory. Every
//! artifact path is validated as a safe relative path before any write, and
//! a failed render never reaches the writer.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::RenderError;

// ============================================================================
// SECTION: Artifact Types
// ============================================================================

/// Output format of a rendered artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    /// Structured JSON document.
    Json,
    /// Structured YAML document.
    Yaml,
    /// Opaque text such as certificate or key material.
    Text,
}

/// Output of one template render.
///
/// # Invariants
/// - `path` is relative to the job's config directory and validated before
///   writes occur.
/// - `content` is byte-identical across renders with identical inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    /// Template-relative output path.
    pub path: String,
    /// Format of the rendered content.
    pub format: ArtifactFormat,
    /// Rendered text content.
    pub content: String,
}

impl RenderedArtifact {
    /// Creates a raw text artifact.
    #[must_use]
    pub fn text(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            format: ArtifactFormat::Text,
            content: content.into(),
        }
    }

    /// Creates a pretty-printed JSON artifact with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Serialization`] when encoding fails.
    pub fn json<T: Serialize>(path: impl Into<String>, document: &T) -> Result<Self, RenderError> {
        let mut content = serde_json::to_string_pretty(document)
            .map_err(|err| RenderError::Serialization(err.to_string()))?;
        content.push('\n');
        Ok(Self {
            path: path.into(),
            format: ArtifactFormat::Json,
            content,
        })
    }

    /// Creates a YAML artifact.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Serialization`] when encoding fails.
    pub fn yaml<T: Serialize>(path: impl Into<String>, document: &T) -> Result<Self, RenderError> {
        let content = serde_yaml::to_string(document)
            .map_err(|err| RenderError::Serialization(err.to_string()))?;
        Ok(Self {
            path: path.into(),
            format: ArtifactFormat::Yaml,
            content,
        })
    }
}

// ============================================================================
// SECTION: Artifact Bundle
// ============================================================================

/// A job's rendered artifacts with deterministic ordering.
///
/// # Invariants
/// - Artifacts are ordered by their relative path.
/// - Paths are unique within the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactBundle {
    /// Rendered artifacts ordered by path.
    artifacts: Vec<RenderedArtifact>,
}

impl ArtifactBundle {
    /// Builds a bundle, sorting by path and rejecting duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Invalid`] when two artifacts share a path.
    pub fn new(mut artifacts: Vec<RenderedArtifact>) -> Result<Self, RenderError> {
        artifacts.sort_by(|lhs, rhs| lhs.path.cmp(&rhs.path));
        for pair in artifacts.windows(2) {
            if let [lhs, rhs] = pair
                && lhs.path == rhs.path
            {
                return Err(RenderError::Invalid(format!("duplicate artifact path: {}", lhs.path)));
            }
        }
        Ok(Self {
            artifacts,
        })
    }

    /// Returns the artifacts ordered by path.
    #[must_use]
    pub fn artifacts(&self) -> &[RenderedArtifact] {
        &self.artifacts
    }

    /// Writes every artifact under the output directory.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Invalid`] for unsafe artifact paths and
    /// [`RenderError::Io`] on write failure.
    pub fn write_to(&self, output_dir: &Path) -> Result<(), RenderError> {
        for artifact in &self.artifacts {
            write_artifact(output_dir, artifact)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates an artifact path as a safe relative path.
///
/// # Errors
///
/// Returns [`RenderError::Invalid`] for empty, absolute, or traversing paths.
pub fn validate_relative_path(path: &str) -> Result<PathBuf, RenderError> {
    if path.trim().is_empty() {
        return Err(RenderError::Invalid("artifact path must be non-empty".to_string()));
    }
    let candidate = Path::new(path);
    let mut validated = PathBuf::new();
    for component in candidate.components() {
        match component {
            Component::Normal(segment) => validated.push(segment),
            _ => {
                return Err(RenderError::Invalid(format!(
                    "artifact path must be relative without traversal: {path}"
                )));
            }
        }
    }
    Ok(validated)
}

/// Writes one artifact under the output directory, creating parents.
fn write_artifact(output_dir: &Path, artifact: &RenderedArtifact) -> Result<(), RenderError> {
    let relative = validate_relative_path(&artifact.path)?;
    let target = output_dir.join(relative);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| RenderError::Io(format!("create {}: {err}", parent.display())))?;
    }
    fs::write(&target, artifact.content.as_bytes())
        .map_err(|err| RenderError::Io(format!("write {}: {err}", target.display())))
}
