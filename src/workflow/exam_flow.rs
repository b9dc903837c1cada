//! Exam generation flow - workflow layer
//!
//! The complete pipeline for one submission:
//! 1. extract metadata + questions
//! 2. compose the layout block sequence
//! 3. render PDF bytes and write the artifact file
//!
//! Holds no transport resources; only capabilities (services and the
//! renderer). This is the sole entry point surrounding layers call.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppError, AppResult, ExtractError};
use crate::infrastructure::PdfRenderer;
use crate::models::ExamArtifact;
use crate::services::{Composer, Extractor};
use crate::utils::logging::truncate_text;
use crate::workflow::exam_ctx::ExamCtx;

/// Exam generation flow
pub struct ExamFlow {
    extractor: Extractor,
    composer: Composer,
    renderer: PdfRenderer,
    output_dir: PathBuf,
    verbose_logging: bool,
}

impl ExamFlow {
    /// Build the flow; the renderer registers its font once here
    pub fn new(config: &Config) -> Self {
        Self {
            extractor: Extractor::new(config),
            composer: Composer::new(config),
            renderer: PdfRenderer::new(config),
            output_dir: PathBuf::from(&config.output_dir),
            verbose_logging: config.verbose_logging,
        }
    }

    /// Generate one exam from raw submission text.
    ///
    /// Fails with `EmptyInput` when no body lines survive directive
    /// removal, `NoQuestionsFound` when segmentation yields nothing usable,
    /// or a render/file error. No partial artifact is left behind on any
    /// failure path.
    pub async fn generate(&self, raw_text: &str, ctx: &ExamCtx) -> AppResult<ExamArtifact> {
        let mut extraction = self.extractor.extract(raw_text);

        if extraction.body_line_count == 0 {
            return Err(ExtractError::EmptyInput.into());
        }
        if extraction.questions.is_empty() {
            return Err(ExtractError::NoQuestionsFound.into());
        }

        if let Some(school) = &ctx.school_override {
            extraction.metadata.school = school.clone();
        }

        info!(
            "[chat {}] 📋 extracted {} questions (title: {})",
            ctx.chat_id,
            extraction.questions.len(),
            extraction.metadata.title
        );
        if self.verbose_logging {
            for (i, question) in extraction.questions.iter().enumerate() {
                debug!("[chat {}] {}. {}", ctx.chat_id, i + 1, truncate_text(question, 40));
            }
        }

        let blocks = self
            .composer
            .compose(&extraction.metadata, &extraction.questions, &ctx.ministry);
        let bytes = self.renderer.render(&blocks, &extraction.metadata.title)?;

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| AppError::file_write_failed(self.output_dir.display().to_string(), e))?;

        let path = self.output_dir.join(format!("exam_{}.pdf", ctx.chat_id));
        if let Err(e) = tokio::fs::write(&path, &bytes).await {
            // never leave a partially written artifact behind
            let _ = tokio::fs::remove_file(&path).await;
            return Err(AppError::file_write_failed(path.display().to_string(), e));
        }

        info!(
            "[chat {}] ✓ exam written to {} ({} bytes)",
            ctx.chat_id,
            path.display(),
            bytes.len()
        );

        Ok(ExamArtifact::new(path))
    }
}
