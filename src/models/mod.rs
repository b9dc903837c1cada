pub mod exam;
pub mod update;

pub use exam::{ExamArtifact, ExamMetadata, LayoutBlock};
pub use update::{ApiResponse, Chat, Message, Update, User};
