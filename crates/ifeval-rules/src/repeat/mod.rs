mod repeat_document;

pub use repeat_document::RepeatDocument;
