use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Structural metadata of one exam submission
///
/// Derived once per submission by the extractor; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamMetadata {
    /// Exam title
    pub title: String,
    /// Time allotment
    pub time: String,
    /// School name; may be empty
    pub school: String,
}

impl Default for ExamMetadata {
    fn default() -> Self {
        Self {
            title: "نموذج امتحان".to_string(),
            time: "٦٠ دقيقة".to_string(),
            school: String::new(),
        }
    }
}

/// One layout block handed to the PDF renderer
///
/// The answer placeholder is part of the rendered question block; it always
/// co-occurs with its question and is never a block of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutBlock {
    /// Exam letterhead; the school line is present only when non-empty
    Heading {
        ministry: String,
        school: Option<String>,
        title: String,
        time: String,
    },
    /// One question with its fresh 1-based sequence index
    Question { index: usize, text: String },
    /// Start a new page before the next block
    PageBreak,
}

/// Rendered exam document for one request
///
/// The artifact owns its file: dropping it removes the file from disk, so
/// cleanup happens on every exit path. Call [`ExamArtifact::into_path`] to
/// keep the file instead.
#[derive(Debug)]
pub struct ExamArtifact {
    path: PathBuf,
    keep: bool,
}

impl ExamArtifact {
    pub fn new(path: PathBuf) -> Self {
        Self { path, keep: false }
    }

    /// Location of the rendered file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name of the rendered file
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "exam.pdf".to_string())
    }

    /// Give up ownership of the file; it will no longer be deleted on drop
    pub fn into_path(mut self) -> PathBuf {
        self.keep = true;
        self.path.clone()
    }
}

impl Drop for ExamArtifact {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("🗑️ removed artifact {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => debug!("failed to remove artifact {}: {}", self.path.display(), e),
        }
    }
}
