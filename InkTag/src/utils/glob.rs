//! File name pattern matching

/// Simple glob pattern matching (supports * and ?), ASCII case-insensitive
pub fn matches_glob(pattern: &str, text: &str) -> bool {
    let pattern_chars: Vec<char> = pattern.chars().collect();
    let text_chars: Vec<char> = text.chars().collect();
    matches_glob_recursive(&pattern_chars, &text_chars, 0, 0)
}

fn matches_glob_recursive(pattern: &[char], text: &[char], pi: usize, ti: usize) -> bool {
    if pi == pattern.len() {
        return ti == text.len();
    }

    match pattern[pi] {
        '*' => (ti..=text.len()).any(|i| matches_glob_recursive(pattern, text, pi + 1, i)),
        '?' => ti < text.len() && matches_glob_recursive(pattern, text, pi + 1, ti + 1),
        c => {
            ti < text.len()
                && text[ti].eq_ignore_ascii_case(&c)
                && matches_glob_recursive(pattern, text, pi + 1, ti + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_pattern() {
        assert!(matches_glob("*.ink", "chapter1.ink"));
        assert!(matches_glob("*.ink", "CHAPTER1.INK"));
        assert!(!matches_glob("*.ink", "chapter1.ink.txt"));
    }

    #[test]
    fn test_prefix_and_single_char() {
        assert!(matches_glob("start-*.ink", "start-intro.ink"));
        assert!(!matches_glob("start-*.ink", "intro.ink"));
        assert!(matches_glob("ch?.ink", "ch1.ink"));
        assert!(!matches_glob("ch?.ink", "ch10.ink"));
    }
}
