//! PDF rendering - infrastructure layer
//!
//! Owns the one scarce resource of the pipeline (the registered font) and
//! exposes a single capability: turn a block sequence into PDF bytes.
//! Callers decide where the bytes go; no file is written here.

use std::io::BufWriter;

use printpdf::*;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::RenderError;
use crate::infrastructure::text_shaper::TextShaper;
use crate::models::LayoutBlock;

// A4 geometry, all in millimeters
const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN: f64 = 20.0;
const TOP_Y: f64 = 270.0;
const BOTTOM_Y: f64 = 25.0;

/// Characters per wrapped body line
const WRAP_CHARS: usize = 70;

/// Rough glyph advance as a fraction of the font size, for alignment
const GLYPH_WIDTH_FACTOR: f64 = 0.5;
const PT_TO_MM: f64 = 0.352_778;

/// Fixed-width filler rendered under every question
const ANSWER_LABEL: &str = "الإجابة: ";
const ANSWER_FILLER_WIDTH: usize = 64;

/// Where glyphs come from, decided once at process start
#[derive(Debug, Clone)]
pub enum FontSource {
    /// TTF bytes read from the configured path
    Embedded(Vec<u8>),
    /// Builtin Helvetica; Arabic will not join properly
    Builtin,
}

/// Write-once font registration
///
/// Loading happens a single time at startup; the outcome is an explicit
/// capability the renderer acts on deterministically, not a swallowed error.
#[derive(Debug, Clone)]
pub struct FontStore {
    source: FontSource,
    path: String,
}

impl FontStore {
    /// Read the configured font, falling back to the builtin capability
    pub fn initialize(font_path: &str) -> Self {
        match std::fs::read(font_path) {
            Ok(bytes) => {
                debug!("🔤 registered font {} ({} bytes)", font_path, bytes.len());
                Self {
                    source: FontSource::Embedded(bytes),
                    path: font_path.to_string(),
                }
            }
            Err(e) => {
                warn!(
                    "⚠️ font {} unavailable ({}), using builtin Helvetica",
                    font_path, e
                );
                Self {
                    source: FontSource::Builtin,
                    path: font_path.to_string(),
                }
            }
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self.source, FontSource::Embedded(_))
    }
}

/// PDF renderer
///
/// Responsibilities:
/// - lay blocks onto A4 pages with a fixed typographic scheme
/// - shape every display string exactly once, right before placement
/// - convert backend failures into typed [`RenderError`]s
pub struct PdfRenderer {
    shaper: TextShaper,
    font: FontStore,
}

impl PdfRenderer {
    pub fn new(config: &Config) -> Self {
        Self {
            shaper: TextShaper::new(),
            font: FontStore::initialize(&config.font_path),
        }
    }

    /// Build a renderer from preconstructed parts
    pub fn with_parts(shaper: TextShaper, font: FontStore) -> Self {
        Self { shaper, font }
    }

    /// Render a block sequence into PDF bytes.
    pub fn render(&self, blocks: &[LayoutBlock], doc_title: &str) -> Result<Vec<u8>, RenderError> {
        let (doc, first_page, first_layer) =
            PdfDocument::new(doc_title, Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "Layer 1");

        let font = match &self.font.source {
            FontSource::Embedded(bytes) => {
                doc.add_external_font(bytes.as_slice())
                    .map_err(|e| {
                        warn!("font embedding failed: {}", e);
                        RenderError::FontUnavailable {
                            path: self.font.path.clone(),
                        }
                    })?
            }
            FontSource::Builtin => doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| RenderError::backend(format!("builtin font: {}", e)))?,
        };

        let mut layer = doc.get_page(first_page).get_layer(first_layer);
        let mut y = TOP_Y;

        for block in blocks {
            match block {
                LayoutBlock::Heading {
                    ministry,
                    school,
                    title,
                    time,
                } => {
                    self.draw_centered(&layer, &font, ministry, 14.0, &mut y, 9.0);
                    if let Some(school) = school {
                        self.draw_centered(&layer, &font, school, 12.0, &mut y, 8.0);
                    }
                    self.draw_centered(&layer, &font, title, 16.0, &mut y, 10.0);
                    let info = format!(
                        "الوقت المخصص: {} | التاريخ: ........./........./.........",
                        time
                    );
                    self.draw_centered(&layer, &font, &info, 11.0, &mut y, 14.0);
                }
                LayoutBlock::Question { index, text } => {
                    let lines = wrap_text(text, WRAP_CHARS);
                    // positional pagination lives in the composer; this only
                    // keeps overflowing text off the bottom margin
                    let needed = 7.0 + lines.len() as f64 * 6.0 + 14.0;
                    if y - needed < BOTTOM_Y {
                        layer = new_page(&doc);
                        y = TOP_Y;
                    }

                    let label = format!("السؤال {}:", index);
                    self.draw_right_aligned(&layer, &font, &label, 12.0, &mut y, 7.0);
                    for line in &lines {
                        self.draw_right_aligned(&layer, &font, line, 11.0, &mut y, 6.0);
                    }
                    let answer = format!("{}{}", ANSWER_LABEL, ".".repeat(ANSWER_FILLER_WIDTH));
                    self.draw_right_aligned(&layer, &font, &answer, 10.0, &mut y, 14.0);
                }
                LayoutBlock::PageBreak => {
                    layer = new_page(&doc);
                    y = TOP_Y;
                }
            }
        }

        let mut buf = BufWriter::new(Vec::new());
        doc.save(&mut buf)
            .map_err(|e| RenderError::backend(format!("save: {}", e)))?;
        buf.into_inner()
            .map_err(|e| RenderError::backend(format!("buffer: {}", e)))
    }

    /// Shape and place one centered line, then advance the cursor
    fn draw_centered(
        &self,
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        text: &str,
        size: f64,
        y: &mut f64,
        advance: f64,
    ) {
        let shaped = self.shaper.shape(text);
        let width = approx_width(&shaped, size);
        let x = ((PAGE_WIDTH - width) / 2.0).max(MARGIN);
        layer.use_text(shaped, size as f32, Mm(x as f32), Mm(*y as f32), font);
        *y -= advance;
    }

    /// Shape and place one right-aligned line, then advance the cursor
    fn draw_right_aligned(
        &self,
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        text: &str,
        size: f64,
        y: &mut f64,
        advance: f64,
    ) {
        let shaped = self.shaper.shape(text);
        let width = approx_width(&shaped, size);
        let x = (PAGE_WIDTH - MARGIN - width).max(MARGIN);
        layer.use_text(shaped, size as f32, Mm(x as f32), Mm(*y as f32), font);
        *y -= advance;
    }
}

/// Start a fresh page and return its layer
fn new_page(doc: &PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "Layer 1");
    doc.get_page(page).get_layer(layer)
}

/// Estimated line width in millimeters
fn approx_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * GLYPH_WIDTH_FACTOR * PT_TO_MM
}

/// Greedy word wrap by character count
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if count > 0 && count + 1 + word_len > max_chars {
            lines.push(std::mem::take(&mut current));
            count = 0;
        }
        if count > 0 {
            current.push(' ');
            count += 1;
        }
        current.push_str(word);
        count += word_len;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExamMetadata;
    use crate::services::Composer;

    fn renderer() -> PdfRenderer {
        // point at a path that never exists so tests exercise the fallback
        let font = FontStore::initialize("does/not/exist.ttf");
        PdfRenderer::with_parts(TextShaper::new(), font)
    }

    #[test]
    fn missing_font_falls_back_to_builtin() {
        let font = FontStore::initialize("does/not/exist.ttf");
        assert!(!font.is_embedded());
    }

    #[test]
    fn renders_pdf_bytes() {
        let composer = Composer::with_questions_per_page(3);
        let questions: Vec<String> = (1..=7).map(|i| format!("question {}", i)).collect();
        let blocks = composer.compose(&ExamMetadata::default(), &questions, "Ministry");

        let bytes = renderer().render(&blocks, "exam").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn renders_arabic_blocks() {
        let composer = Composer::with_questions_per_page(3);
        let questions = vec!["سؤال أول".to_string(), "سؤال ثاني".to_string()];
        let mut metadata = ExamMetadata::default();
        metadata.title = "اختبار".to_string();
        let blocks = composer.compose(&metadata, &questions, "وزارة التربية العراقية");

        let bytes = renderer().render(&blocks, "اختبار").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn wrap_respects_character_limit() {
        let text = "one two three four five six seven eight nine ten";
        let lines = wrap_text(text, 12);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 12));
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn wrap_keeps_short_text_on_one_line() {
        assert_eq!(wrap_text("short line", 70), vec!["short line".to_string()]);
        assert!(wrap_text("", 70).is_empty());
    }
}
