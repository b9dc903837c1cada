pub mod pdf_renderer;
pub mod text_shaper;

pub use pdf_renderer::{FontSource, FontStore, PdfRenderer};
pub use text_shaper::TextShaper;
