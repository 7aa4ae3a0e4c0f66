mod paragraph_count;
mod sentence_count;
mod shorter_than_document;

pub use paragraph_count::ParagraphCount;
pub use sentence_count::SentenceCount;
pub use shorter_than_document::ShorterThanDocument;
