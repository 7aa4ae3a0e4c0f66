mod end_with_phrase;
mod no_commas;

pub use end_with_phrase::EndWithPhrase;
pub use no_commas::NoCommas;
