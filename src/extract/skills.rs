//! Skill vocabulary matching.

use crate::model::SkillSet;

/// Match `text` against a skill vocabulary.
///
/// Matching is a case-insensitive substring test. Results follow vocabulary
/// order and contain each skill once, even if the vocabulary lists it twice
/// with different casing.
pub fn extract_skills<S: AsRef<str>>(text: &str, vocabulary: &[S]) -> SkillSet {
    let haystack = text.to_lowercase();
    let mut matches: Vec<String> = Vec::new();

    for skill in vocabulary {
        let skill = skill.as_ref().trim();
        if skill.is_empty() {
            continue;
        }
        let needle = skill.to_lowercase();
        if haystack.contains(&needle) && !matches.iter().any(|m| m.to_lowercase() == needle) {
            matches.push(skill.to_string());
        }
    }

    SkillSet { matches }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_order() {
        let vocab = ["Python", "Docker", "AWS", "React.js"];
        let skills = extract_skills("react.js, aws and DOCKER; python", &vocab);
        assert_eq!(skills.matches, vec!["Python", "Docker", "AWS", "React.js"]);
    }

    #[test]
    fn test_deduplicates() {
        let vocab = ["SQL", "sql", "Rust"];
        let skills = extract_skills("SQL and more SQL", &vocab);
        assert_eq!(skills.matches, vec!["SQL"]);
    }

    #[test]
    fn test_no_matches() {
        let skills = extract_skills("Gardening", &["Python"]);
        assert!(skills.is_empty());
        assert!(extract_skills("", &["Python"]).is_empty());
    }

    #[test]
    fn test_substring_semantics() {
        // "Java" is a substring of "JavaScript"
        let skills = extract_skills("JavaScript", &["Java", "JavaScript"]);
        assert_eq!(skills.len(), 2);
    }
}
