//! Document composition - capability layer
//!
//! Turns extracted metadata plus a question list into the ordered block
//! sequence the PDF renderer consumes. Layout decisions only; no text
//! shaping and no I/O happen here.

use crate::config::Config;
use crate::models::{ExamMetadata, LayoutBlock};

/// Document composer
///
/// Responsibilities:
/// - letterhead first, school line only when non-empty
/// - one question block per question with a fresh 1-based index
/// - a page break after every k-th question, never after the last
pub struct Composer {
    questions_per_page: usize,
}

impl Composer {
    pub fn new(config: &Config) -> Self {
        Self {
            questions_per_page: config.questions_per_page.max(1),
        }
    }

    /// Build a composer with an explicit pagination threshold
    pub fn with_questions_per_page(questions_per_page: usize) -> Self {
        Self {
            questions_per_page: questions_per_page.max(1),
        }
    }

    /// Compose the block sequence for one exam.
    ///
    /// Pagination is purely positional (running question count); it does
    /// not consider remaining vertical space.
    pub fn compose(
        &self,
        metadata: &ExamMetadata,
        questions: &[String],
        ministry: &str,
    ) -> Vec<LayoutBlock> {
        let mut blocks = Vec::with_capacity(questions.len() + 2);

        blocks.push(LayoutBlock::Heading {
            ministry: ministry.to_string(),
            school: if metadata.school.is_empty() {
                None
            } else {
                Some(metadata.school.clone())
            },
            title: metadata.title.clone(),
            time: metadata.time.clone(),
        });

        let last = questions.len();
        for (i, question) in questions.iter().enumerate() {
            let index = i + 1;
            blocks.push(LayoutBlock::Question {
                index,
                text: question.clone(),
            });
            if index % self.questions_per_page == 0 && index != last {
                blocks.push(LayoutBlock::PageBreak);
            }
        }

        blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("question number {}", i)).collect()
    }

    fn break_positions(blocks: &[LayoutBlock]) -> Vec<usize> {
        // question index each break follows
        let mut seen = 0;
        let mut positions = Vec::new();
        for block in blocks {
            match block {
                LayoutBlock::Question { .. } => seen += 1,
                LayoutBlock::PageBreak => positions.push(seen),
                LayoutBlock::Heading { .. } => {}
            }
        }
        positions
    }

    #[test]
    fn page_breaks_fall_after_every_third_question_except_the_last() {
        let composer = Composer::with_questions_per_page(3);
        let blocks = composer.compose(&ExamMetadata::default(), &questions(7), "الوزارة");

        assert_eq!(break_positions(&blocks), vec![3, 6]);
        assert!(!matches!(blocks.last(), Some(LayoutBlock::PageBreak)));
    }

    #[test]
    fn no_break_when_question_count_is_a_multiple_of_k() {
        let composer = Composer::with_questions_per_page(3);
        let blocks = composer.compose(&ExamMetadata::default(), &questions(3), "الوزارة");
        assert!(break_positions(&blocks).is_empty());
    }

    #[test]
    fn question_indices_are_fresh_and_one_based() {
        let composer = Composer::with_questions_per_page(5);
        let blocks = composer.compose(&ExamMetadata::default(), &questions(4), "الوزارة");

        let indices: Vec<usize> = blocks
            .iter()
            .filter_map(|b| match b {
                LayoutBlock::Question { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
    }

    #[test]
    fn school_line_present_only_when_non_empty() {
        let composer = Composer::with_questions_per_page(3);

        let anonymous = composer.compose(&ExamMetadata::default(), &questions(1), "الوزارة");
        assert!(matches!(
            &anonymous[0],
            LayoutBlock::Heading { school: None, .. }
        ));

        let mut metadata = ExamMetadata::default();
        metadata.school = "مدرسة بغداد".to_string();
        let named = composer.compose(&metadata, &questions(1), "الوزارة");
        assert!(matches!(
            &named[0],
            LayoutBlock::Heading { school: Some(s), .. } if s == "مدرسة بغداد"
        ));
    }

    #[test]
    fn heading_always_leads() {
        let composer = Composer::with_questions_per_page(3);
        let blocks = composer.compose(&ExamMetadata::default(), &questions(2), "الوزارة");
        assert!(matches!(&blocks[0], LayoutBlock::Heading { ministry, .. } if ministry == "الوزارة"));
        assert_eq!(blocks.len(), 3);
    }
}
