//! Arabic text shaping - infrastructure layer
//!
//! PDF backends place glyphs in storage order, but Arabic is stored in
//! logical order and needs contextual letter forms. `shape` joins the
//! letters into their presentation forms and reorders the result into
//! visual order.
//!
//! Shaping must run exactly once per string, after all structural splitting
//! (segmentation, line wrapping) is done; re-splitting a shaped string
//! corrupts it.

use ar_reshaper::ArabicReshaper;
use unicode_bidi::BidiInfo;

/// Logical-to-visual text shaper
pub struct TextShaper {
    reshaper: ArabicReshaper,
}

impl TextShaper {
    pub fn new() -> Self {
        Self {
            reshaper: ArabicReshaper::default(),
        }
    }

    /// Shape one display string.
    ///
    /// Text without right-to-left content passes through unchanged.
    pub fn shape(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let reshaped = self.reshaper.reshape(text);
        let bidi = BidiInfo::new(&reshaped, None);
        let mut visual = String::with_capacity(reshaped.len());
        for paragraph in &bidi.paragraphs {
            visual.push_str(&bidi.reorder_line(paragraph, paragraph.range.clone()));
        }
        visual
    }
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}
