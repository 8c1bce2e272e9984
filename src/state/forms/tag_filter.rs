//! Recommended tag dictionary and substring filtering

/// Tags offered as suggestions when the config does not supply its own list
pub const RECOMMENDED_TAGS: &[&str] = &[
    "Business",
    "Contract",
    "Cover Letter",
    "Email",
    "Event",
    "Finance",
    "Greeting",
    "HR",
    "Invitation",
    "Invoice",
    "Leave Request",
    "Marketing",
    "Meeting Minutes",
    "Notice",
    "Personal",
    "Proposal",
    "Receipt",
    "Report",
    "Resignation",
    "Resume",
    "School",
    "Thank You",
];

/// The built-in dictionary as owned strings
pub fn default_dictionary() -> Vec<String> {
    RECOMMENDED_TAGS.iter().map(|t| t.to_string()).collect()
}

/// Dictionary entries containing `input` as a case-insensitive substring,
/// in dictionary order. Empty input suggests nothing.
pub fn filter_tags(dictionary: &[String], input: &str) -> Vec<String> {
    if input.is_empty() {
        return Vec::new();
    }
    let needle = input.to_lowercase();
    dictionary
        .iter()
        .filter(|tag| tag.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dict(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(filter_tags(&default_dictionary(), "").is_empty());
        assert!(filter_tags(&dict(&["a", "b"]), "").is_empty());
    }

    #[test]
    fn test_case_insensitive_substring() {
        let d = dict(&["Resume", "Resignation", "Invoice"]);
        assert_eq!(filter_tags(&d, "RES"), vec!["Resume", "Resignation"]);
        assert_eq!(filter_tags(&d, "voi"), vec!["Invoice"]);
    }

    #[test]
    fn test_keeps_dictionary_order() {
        let d = dict(&["zeta", "alpha", "beta"]);
        assert_eq!(filter_tags(&d, "a"), vec!["zeta", "alpha", "beta"]);
    }

    #[test]
    fn test_no_match() {
        assert!(filter_tags(&default_dictionary(), "xyzzy").is_empty());
    }

    #[test]
    fn test_whitespace_is_matched_literally() {
        let d = dict(&["Cover Letter", "Resume"]);
        assert_eq!(filter_tags(&d, " "), vec!["Cover Letter"]);
    }

    #[test]
    fn test_default_dictionary_matches_constant() {
        assert_eq!(default_dictionary().len(), RECOMMENDED_TAGS.len());
    }
}
