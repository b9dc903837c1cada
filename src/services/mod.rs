pub mod composer;
pub mod extractor;

pub use composer::Composer;
pub use extractor::{Extraction, Extractor};
