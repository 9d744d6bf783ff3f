//! Name filters for `list`.

use glob::{MatchOptions, Pattern};

/// How a user-supplied list pattern is interpreted
#[derive(Debug, Clone)]
pub enum NamePattern {
    /// SQL `LIKE` pattern, used as-is (`My%`)
    Like(String),

    /// Shell glob (`*drum*`, `take-?`)
    Glob(Pattern),

    /// Plain text matched anywhere in the name
    Substring(String),
}

impl NamePattern {
    /// Classify a pattern: `%` means LIKE, `*`/`?`/`[` mean glob, anything
    /// else is a substring. A malformed glob falls back to substring.
    pub fn parse(pattern: &str) -> Self {
        if pattern.contains('%') {
            return Self::Like(pattern.to_string());
        }

        if pattern.contains(['*', '?', '[']) {
            if let Ok(glob) = Pattern::new(pattern) {
                return Self::Glob(glob);
            }
        }

        Self::Substring(pattern.to_string())
    }

    /// `LIKE` operand (with `\` as escape character), if filtering in SQL
    pub fn like_operand(&self) -> Option<String> {
        match self {
            Self::Like(pattern) => Some(pattern.clone()),
            Self::Substring(text) => Some(contains_operand(text)),
            Self::Glob(_) => None,
        }
    }

    /// Final in-process check (only globs need one)
    pub fn accepts(&self, name: &str) -> bool {
        match self {
            Self::Glob(glob) => glob.matches_with(
                name,
                MatchOptions {
                    case_sensitive: false,
                    require_literal_separator: false,
                    require_literal_leading_dot: false,
                },
            ),
            Self::Like(_) | Self::Substring(_) => true,
        }
    }
}

/// Escape `LIKE` metacharacters so `text` matches literally
pub fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `LIKE` operand matching `text` anywhere
pub fn contains_operand(text: &str) -> String {
    format!("%{}%", escape_like(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(matches!(NamePattern::parse("My%"), NamePattern::Like(_)));
        assert!(matches!(NamePattern::parse("*drum*"), NamePattern::Glob(_)));
        assert!(matches!(NamePattern::parse("kick"), NamePattern::Substring(_)));
        // unterminated class is not a valid glob
        assert!(matches!(NamePattern::parse("[abc"), NamePattern::Substring(_)));
    }

    #[test]
    fn test_like_operands() {
        assert_eq!(NamePattern::parse("My%").like_operand().unwrap(), "My%");
        assert_eq!(
            NamePattern::parse("100_ok").like_operand().unwrap(),
            "%100\\_ok%"
        );
        assert!(NamePattern::parse("*x").like_operand().is_none());
    }

    #[test]
    fn test_glob_is_case_insensitive() {
        let pattern = NamePattern::parse("*DRUM*");
        assert!(pattern.accepts("Big drum loop"));
        assert!(!pattern.accepts("Snare"));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like(r"50%\_"), r"50\%\\\_");
    }
}
