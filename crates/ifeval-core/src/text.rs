//! Tokenization and sentence segmentation used by the mechanical rules.

use regex::Regex;
use std::sync::OnceLock;

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"[\p{Han}\p{Hiragana}\p{Katakana}\p{Hangul}]+|[\p{Latin}\p{Greek}\p{Cyrillic}\p{N}]+(?:['’\-][\p{Latin}\p{Greek}\p{Cyrillic}\p{N}]+)*",
        )
        .expect("word regex is valid")
    })
}

fn terminator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Terminal punctuation plus trailing closers. ASCII terminators only end a
        // sentence before whitespace or end of text; CJK terminators always do.
        Regex::new(r#"(?:[.!?]+["'’”)\]]*(?:\s+|$))|(?:[。！？]+["'’”」』)]*\s*)"#)
            .expect("terminator regex is valid")
    })
}

/// Lowercase word tokens in order. Latin-script runs and CJK runs are separate
/// tokens; punctuation is dropped.
pub fn split_words(text: &str) -> Vec<String> {
    word_regex()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

pub fn count_words(text: &str) -> usize {
    word_regex().find_iter(text).count()
}

/// Sentences in order, never empty.
///
/// Two independent strategies are run (terminal punctuation, and
/// line breaks); when they disagree on the count, the one that found more
/// sentences wins.
pub fn split_sentences(text: &str) -> Vec<String> {
    let by_punctuation = split_on_terminators(text);
    let by_lines = split_on_lines(text);
    if by_lines.len() > by_punctuation.len() {
        by_lines
    } else {
        by_punctuation
    }
}

fn split_on_terminators(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut start = 0;
    for m in terminator_regex().find_iter(text) {
        push_trimmed(&mut out, &text[start..m.end()]);
        start = m.end();
    }
    push_trimmed(&mut out, &text[start..]);
    out
}

fn split_on_lines(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    for line in text.lines() {
        push_trimmed(&mut out, line);
    }
    out
}

fn push_trimmed(out: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if piece.chars().any(|c| c.is_alphanumeric()) {
        out.push(piece.to_string());
    }
}

/// Paragraphs separated by blank lines or a `***` divider line.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed == "***" {
            if !current.is_empty() {
                out.push(current.join("\n"));
                current.clear();
            }
            continue;
        }
        current.push(trimmed);
    }
    if !current.is_empty() {
        out.push(current.join("\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_are_lowercased_and_punctuation_dropped() {
        assert_eq!(
            split_words("Hello, World! It's a well-known fact."),
            vec!["hello", "world", "it's", "a", "well-known", "fact"]
        );
    }

    #[test]
    fn latin_and_cjk_runs_are_distinct_tokens() {
        assert_eq!(
            split_words("Rust编程语言is fast"),
            vec!["rust", "编程语言", "is", "fast"]
        );
        assert_eq!(count_words("こんにちは world"), 2);
    }

    #[test]
    fn sentences_split_on_terminal_punctuation() {
        assert_eq!(
            split_sentences("First one. Second one! Third?"),
            vec!["First one.", "Second one!", "Third?"]
        );
        assert_eq!(
            split_sentences("今天很好。明天也好！"),
            vec!["今天很好。", "明天也好！"]
        );
    }

    #[test]
    fn decimals_do_not_split() {
        assert_eq!(split_sentences("Pi is 3.14 roughly."), vec!["Pi is 3.14 roughly."]);
    }

    #[test]
    fn line_strategy_wins_when_it_finds_more() {
        let text = "- first bullet\n- second bullet\n- third bullet";
        assert_eq!(split_sentences(text).len(), 3);
    }

    #[test]
    fn never_yields_empty_sentences() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("...   !!!").is_empty());
        assert!(split_sentences("Hi.\n\n\nBye.").iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn paragraphs_split_on_blank_lines_and_dividers() {
        let text = "One\nstill one\n\nTwo\n***\nThree\n\n\n";
        assert_eq!(split_paragraphs(text), vec!["One\nstill one", "Two", "Three"]);
    }
}
