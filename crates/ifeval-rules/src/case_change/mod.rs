mod all_lowercase;
mod all_uppercase;

pub use all_lowercase::AllLowercase;
pub use all_uppercase::AllUppercase;

/// Distinct characters that have the wrong case, in order of appearance.
fn offending(value: &str, wrong: impl Fn(char) -> bool) -> Vec<char> {
    let mut seen = Vec::new();
    for c in value.chars().filter(|c| wrong(*c)) {
        if !seen.contains(&c) {
            seen.push(c);
        }
    }
    seen
}

fn preview(chars: &[char]) -> String {
    const SHOWN: usize = 10;
    let mut out: String = chars.iter().take(SHOWN).collect();
    if chars.len() > SHOWN {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offending_is_distinct_and_ordered() {
        assert_eq!(offending("aBcBD", char::is_uppercase), vec!['B', 'D']);
        assert_eq!(preview(&['A'; 3]), "AAA");
        assert_eq!(preview(&('a'..='l').collect::<Vec<_>>()), "abcdefghij...");
    }
}
