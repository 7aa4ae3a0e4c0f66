mod max_word_length;
mod word_count;

pub use max_word_length::MaxWordLength;
pub use word_count::WordCount;
