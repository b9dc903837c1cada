//! Metadata and question extraction - capability layer
//!
//! Turns one raw submission into exam metadata plus an ordered question
//! list. Pure over the input string: no I/O, same input same output.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::config::Config;
use crate::models::ExamMetadata;

/// A metadata directive carried by a line prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    Title,
    Time,
    School,
}

/// Literal directive prefixes, checked in order; first match wins.
/// Arabic first (the submission contract), English accepted as well.
const DIRECTIVES: &[(&str, Directive)] = &[
    ("العنوان:", Directive::Title),
    ("الوقت:", Directive::Time),
    ("المدرسة:", Directive::School),
    ("Title:", Directive::Title),
    ("Time:", Directive::Time),
    ("School:", Directive::School),
];

/// One candidate splitter in the segmentation chain
struct SplitStrategy {
    name: &'static str,
    delimiter: Regex,
}

impl SplitStrategy {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            // patterns are hard-coded; a failure here is a programming error
            delimiter: Regex::new(pattern).expect("valid segmentation pattern"),
        }
    }

    /// Split `text` at this strategy's delimiters.
    ///
    /// Returns `None` unless at least one delimiter was actually found,
    /// so the caller can fall through to the next strategy.
    fn try_split(&self, text: &str) -> Option<Vec<String>> {
        let fragments: Vec<String> = self.delimiter.split(text).map(str::to_string).collect();
        if fragments.len() > 1 {
            Some(fragments)
        } else {
            None
        }
    }
}

/// Segmentation strategies in priority order. The first strategy that finds
/// a delimiter governs the whole submission; mixed enumerator styles are
/// not reconciled.
fn strategies() -> &'static [SplitStrategy] {
    static STRATEGIES: OnceLock<Vec<SplitStrategy>> = OnceLock::new();
    STRATEGIES.get_or_init(|| {
        vec![
            // [0-9] on purpose: \d is Unicode-aware and would swallow the
            // Arabic-Indic numerals handled by their own strategy below
            SplitStrategy::new("numeric", r"(?m)^\s*[0-9]+\s*[.)]\s*"),
            SplitStrategy::new("bullet", r"(?m)^\s*[-•*]\s*"),
            SplitStrategy::new("arabic-numeral", r"(?m)^\s*[٠-٩]+\s*[.)]\s*"),
            SplitStrategy::new("lettered", r"(?m)^\s*[A-Za-zأ-ي]\s*[.)]\s*"),
        ]
    })
}

/// Result of one extraction pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Title/time/school, defaulted where the submission was silent
    pub metadata: ExamMetadata,
    /// Cleaned questions in input order
    pub questions: Vec<String>,
    /// Number of body lines that survived directive removal
    pub body_line_count: usize,
}

/// Metadata and question extractor
///
/// Responsibilities:
/// - consume directive lines into metadata
/// - segment the remaining body into questions via the strategy chain
/// - drop near-empty fragments, keep input order, keep duplicates
pub struct Extractor {
    min_question_len: usize,
}

impl Extractor {
    pub fn new(config: &Config) -> Self {
        Self {
            min_question_len: config.min_question_len,
        }
    }

    /// Build an extractor with an explicit length threshold
    pub fn with_min_len(min_question_len: usize) -> Self {
        Self { min_question_len }
    }

    /// Extract metadata and questions from one raw submission.
    ///
    /// Never fails: worst case is default metadata and an empty question
    /// list, which the caller treats as a hard failure.
    pub fn extract(&self, raw: &str) -> Extraction {
        let mut metadata = ExamMetadata::default();
        let mut body_lines: Vec<&str> = Vec::new();

        for line in raw.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match Self::match_directive(trimmed) {
                Some((Directive::Title, value)) => metadata.title = value.to_string(),
                Some((Directive::Time, value)) => metadata.time = value.to_string(),
                Some((Directive::School, value)) => metadata.school = value.to_string(),
                None => {
                    if trimmed.chars().count() > self.min_question_len {
                        body_lines.push(trimmed);
                    }
                }
            }
        }

        let body = body_lines.join("\n");
        let questions = self.segment(&body);

        Extraction {
            metadata,
            questions,
            body_line_count: body_lines.len(),
        }
    }

    /// First matching directive prefix, with the remainder of the line
    fn match_directive(line: &str) -> Option<(Directive, &str)> {
        for (prefix, directive) in DIRECTIVES {
            if let Some(rest) = line.strip_prefix(prefix) {
                return Some((*directive, rest.trim()));
            }
        }
        None
    }

    /// Segment the body text into questions.
    ///
    /// Tries each strategy in priority order and short-circuits on the
    /// first one that found a delimiter; falls back to line splitting.
    fn segment(&self, body: &str) -> Vec<String> {
        if body.trim().is_empty() {
            return Vec::new();
        }

        let fragments = strategies()
            .iter()
            .find_map(|strategy| {
                strategy.try_split(body).map(|fragments| {
                    debug!(
                        "✂️ segmented with '{}' pattern into {} fragments",
                        strategy.name,
                        fragments.len()
                    );
                    fragments
                })
            })
            .unwrap_or_else(|| body.split('\n').map(str::to_string).collect());

        fragments
            .into_iter()
            .map(|fragment| fragment.trim().to_string())
            .filter(|fragment| self.is_usable(fragment))
            .collect()
    }

    /// A fragment counts as a question unless it is segmentation noise or a
    /// directive that slipped through splitting
    fn is_usable(&self, fragment: &str) -> bool {
        fragment.chars().count() > self.min_question_len
            && Self::match_directive(fragment).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> Extractor {
        Extractor::with_min_len(2)
    }

    #[test]
    fn directive_lines_set_metadata_and_never_become_questions() {
        let raw = "Title: Midterm\nWhat is the capital of Iraq?\nTime: 45 minutes";
        let extraction = extractor().extract(raw);

        assert_eq!(extraction.metadata.title, "Midterm");
        assert_eq!(extraction.metadata.time, "45 minutes");
        assert_eq!(
            extraction.questions,
            vec!["What is the capital of Iraq?".to_string()]
        );
    }

    #[test]
    fn arabic_directives_are_recognized() {
        let raw = "العنوان: اختبار\nالوقت: 45 دقيقة\nالمدرسة: مدرسة بغداد\n1. سؤال أول";
        let extraction = extractor().extract(raw);

        assert_eq!(extraction.metadata.title, "اختبار");
        assert_eq!(extraction.metadata.time, "45 دقيقة");
        assert_eq!(extraction.metadata.school, "مدرسة بغداد");
        assert_eq!(extraction.questions, vec!["سؤال أول".to_string()]);
    }

    #[test]
    fn missing_directives_keep_defaults() {
        let extraction = extractor().extract("Largest ocean on Earth?");
        assert_eq!(extraction.metadata, ExamMetadata::default());
    }

    #[test]
    fn numeric_pattern_wins_over_bullets() {
        let raw = "1. First question\n2. Second question\n- bullet remark";
        let extraction = extractor().extract(raw);

        // the bullet line is trailing content of the second fragment,
        // not a question of its own
        assert_eq!(extraction.questions.len(), 2);
        assert_eq!(extraction.questions[0], "First question");
        assert!(extraction.questions[1].contains("Second question"));
        assert!(extraction.questions[1].contains("bullet remark"));
    }

    #[test]
    fn bullets_split_when_no_numeric_enumerators_exist() {
        let raw = "- ما عاصمة العراق؟\n- كم عدد المحافظات؟";
        let extraction = extractor().extract(raw);
        assert_eq!(
            extraction.questions,
            vec![
                "ما عاصمة العراق؟".to_string(),
                "كم عدد المحافظات؟".to_string()
            ]
        );
    }

    #[test]
    fn arabic_indic_enumerators_split() {
        let raw = "١. سؤال أول\n٢. سؤال ثاني";
        let extraction = extractor().extract(raw);
        assert_eq!(
            extraction.questions,
            vec!["سؤال أول".to_string(), "سؤال ثاني".to_string()]
        );
    }

    #[test]
    fn falls_back_to_line_split() {
        let raw = "Capital of France?\nLargest ocean?";
        let extraction = extractor().extract(raw);
        assert_eq!(
            extraction.questions,
            vec!["Capital of France?".to_string(), "Largest ocean?".to_string()]
        );
    }

    #[test]
    fn short_fragments_are_dropped() {
        let raw = "1. abc\n2. Ok\n3. .";
        let extraction = extractor().extract(raw);
        assert_eq!(extraction.questions, vec!["abc".to_string()]);
    }

    #[test]
    fn order_and_duplicates_are_preserved() {
        let raw = "1. Repeat me\n2. Another one\n3. Repeat me";
        let extraction = extractor().extract(raw);
        assert_eq!(
            extraction.questions,
            vec![
                "Repeat me".to_string(),
                "Another one".to_string(),
                "Repeat me".to_string()
            ]
        );
    }

    #[test]
    fn extraction_is_deterministic() {
        let raw = "العنوان: اختبار\n1. سؤال أول\n2. سؤال ثاني";
        let first = extractor().extract(raw);
        let second = extractor().extract(raw);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_yields_no_questions() {
        let extraction = extractor().extract("");
        assert!(extraction.questions.is_empty());
        assert_eq!(extraction.body_line_count, 0);

        let whitespace = extractor().extract("  \n\t\n");
        assert!(whitespace.questions.is_empty());
        assert_eq!(whitespace.body_line_count, 0);
    }

    #[test]
    fn directives_only_input_has_no_body_lines() {
        let extraction = extractor().extract("العنوان: اختبار\nالوقت: ساعة");
        assert!(extraction.questions.is_empty());
        assert_eq!(extraction.body_line_count, 0);
        assert_eq!(extraction.metadata.title, "اختبار");
    }
}
