use std::path::Path;

use exam_template_bot::api::TelegramClient;
use exam_template_bot::config::Config;
use exam_template_bot::error::{AppError, ExtractError};
use exam_template_bot::models::LayoutBlock;
use exam_template_bot::services::{Composer, Extractor};
use exam_template_bot::workflow::{ExamCtx, ExamFlow};

/// Config for pipeline tests: temp output dir, guaranteed font fallback
fn test_config(output_dir: &Path) -> Config {
    Config {
        output_dir: output_dir.to_string_lossy().into_owned(),
        font_path: "does/not/exist.ttf".to_string(),
        ..Config::default()
    }
}

#[tokio::test]
async fn generates_exam_from_arabic_submission() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let flow = ExamFlow::new(&config);

    let raw = "العنوان: اختبار\nالوقت: 45 دقيقة\n1. سؤال أول\n2. سؤال ثاني";
    let ctx = ExamCtx::new(7, &config.ministry_name);

    let artifact = flow.generate(raw, &ctx).await.expect("generation failed");

    assert_eq!(artifact.file_name(), "exam_7.pdf");
    let bytes = std::fs::read(artifact.path()).unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    // artifact cleanup runs on drop
    let path = artifact.path().to_path_buf();
    drop(artifact);
    assert!(!path.exists());
}

#[tokio::test]
async fn arabic_submission_composes_two_questions_and_no_breaks() {
    let config = test_config(Path::new("unused"));
    let extractor = Extractor::new(&config);
    let composer = Composer::new(&config);

    let raw = "العنوان: اختبار\nالوقت: 45 دقيقة\n1. سؤال أول\n2. سؤال ثاني";
    let extraction = extractor.extract(raw);

    assert_eq!(extraction.metadata.title, "اختبار");
    assert_eq!(extraction.metadata.time, "45 دقيقة");
    assert!(extraction.metadata.school.is_empty());
    assert_eq!(
        extraction.questions,
        vec!["سؤال أول".to_string(), "سؤال ثاني".to_string()]
    );

    let blocks = composer.compose(
        &extraction.metadata,
        &extraction.questions,
        &config.ministry_name,
    );
    let questions = blocks
        .iter()
        .filter(|b| matches!(b, LayoutBlock::Question { .. }))
        .count();
    let breaks = blocks
        .iter()
        .filter(|b| matches!(b, LayoutBlock::PageBreak))
        .count();
    assert_eq!(questions, 2);
    assert_eq!(breaks, 0);
}

#[tokio::test]
async fn empty_submission_fails_without_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let flow = ExamFlow::new(&config);
    let ctx = ExamCtx::new(9, &config.ministry_name);

    let result = flow.generate("", &ctx).await;
    assert!(matches!(
        result,
        Err(AppError::Extract(ExtractError::EmptyInput))
    ));

    // nothing may be written on the failure path
    let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(leftovers, 0);
}

#[tokio::test]
async fn noise_only_submission_reports_no_questions() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let flow = ExamFlow::new(&config);
    let ctx = ExamCtx::new(11, &config.ministry_name);

    // body lines survive the length filter but every fragment is noise
    let result = flow.generate("1. a\n2. b", &ctx).await;
    assert!(matches!(
        result,
        Err(AppError::Extract(ExtractError::NoQuestionsFound))
    ));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn school_override_beats_extracted_school() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let extractor = Extractor::new(&config);

    let raw = "المدرسة: مدرسة النهرين\n1. سؤال أول\n2. سؤال ثاني";
    let extraction = extractor.extract(raw);
    assert_eq!(extraction.metadata.school, "مدرسة النهرين");

    // blank overrides are discarded, real ones win
    let ctx = ExamCtx::new(13, &config.ministry_name)
        .with_school_override(Some("   ".to_string()));
    assert!(ctx.school_override.is_none());

    let ctx = ExamCtx::new(13, &config.ministry_name)
        .with_school_override(Some("مدرسة بغداد".to_string()));
    assert_eq!(ctx.school_override.as_deref(), Some("مدرسة بغداد"));

    let flow = ExamFlow::new(&config);
    let artifact = flow.generate(raw, &ctx).await.expect("generation failed");
    assert!(artifact.path().exists());
}

#[tokio::test]
async fn seven_questions_render_across_pages() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let flow = ExamFlow::new(&config);
    let ctx = ExamCtx::new(21, &config.ministry_name);

    let raw = (1..=7)
        .map(|i| format!("{}. سؤال رقم {}", i, i))
        .collect::<Vec<_>>()
        .join("\n");

    let artifact = flow.generate(&raw, &ctx).await.expect("generation failed");
    let bytes = std::fs::read(artifact.path()).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
#[ignore] // needs a real BOT_TOKEN; run manually: cargo test -- --ignored
async fn test_bot_connection() {
    let config = Config::load();
    let client = TelegramClient::new(&config);

    let result = client.get_updates(0, 1).await;
    assert!(result.is_ok(), "should be able to reach the Bot API");
}
