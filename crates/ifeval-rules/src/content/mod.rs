mod include_keywords;

pub use include_keywords::IncludeKeywords;
