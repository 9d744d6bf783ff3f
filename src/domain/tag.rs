//! Free-form tags attached to sounds.

/// A tag. Names are deduplicated on lookup-or-create, not by the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Surrogate key
    pub id: i64,

    /// Tag text, matched exactly by search
    pub name: String,
}

/// Split user input into tag names, dropping blanks and surrounding whitespace
pub fn normalize_tag_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|n| n.as_ref().trim().to_string())
        .filter(|n| !n.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tag_names() {
        let names = normalize_tag_names(["  drums ", "", "field recording", "   "]);
        assert_eq!(names, vec!["drums", "field recording"]);
    }
}
