//! Keyword vocabularies used for header detection and skill matching.
//!
//! Both lists are plain data so callers can replace or extend them, e.g. for
//! non-English resumes. A [`Vocabulary`] can be loaded from JSON:
//!
//! ```
//! use cvlayout::Vocabulary;
//!
//! let extra = Vocabulary::from_json(r#"{"skills": ["Elixir"]}"#).unwrap();
//! let mut vocab = Vocabulary::default();
//! vocab.extend(extra);
//! assert!(vocab.skills.iter().any(|s| s == "Elixir"));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Resume section keywords; a line containing one of these is a header.
pub const DEFAULT_HEADER_KEYWORDS: &[&str] = &[
    "PROFESSIONAL SUMMARY",
    "TECHNICAL SKILLS",
    "CORE COMPETENCIES",
    "PROFESSIONAL EXPERIENCE",
    "WORK EXPERIENCE",
    "EDUCATION",
    "KEY PROJECTS",
    "CERTIFICATIONS",
    "AWARDS",
    "RECOGNITION",
    "CONTACT INFORMATION",
    "PERSONAL DETAILS",
    "OBJECTIVE",
    "SUMMARY",
    "EXPERIENCE",
    "SKILLS",
    "PROJECTS",
];

/// Known skills matched inside a skills section.
///
/// Matching is by case-insensitive substring, so very short names ("C",
/// "R", "Go") are left out on purpose.
pub const DEFAULT_SKILLS: &[&str] = &[
    "SQL",
    "MySQL",
    "PostgreSQL",
    "MongoDB",
    "Redis",
    "Python",
    "Java",
    "JavaScript",
    "TypeScript",
    "C++",
    "C#",
    "Rust",
    "Ruby",
    "PHP",
    "Swift",
    "Kotlin",
    "Scala",
    "HTML",
    "CSS",
    "React.js",
    "Next.js",
    "Angular",
    "Vue.js",
    "Node.js",
    "Express",
    "Django",
    "Flask",
    "Spring Boot",
    "GraphQL",
    "REST",
    "Docker",
    "Kubernetes",
    "AWS",
    "Azure",
    "GCP",
    "Firebase",
    "Terraform",
    "Jenkins",
    "Git",
    "Linux",
    "TensorFlow",
    "PyTorch",
    "Pandas",
    "NumPy",
    "Machine Learning",
    "Tableau",
    "Power BI",
    "Excel",
    "Figma",
    "Agile",
    "Scrum",
    "Jira",
];

/// Header keywords and skill names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Section header keywords (matched case-insensitively)
    pub header_keywords: Vec<String>,
    /// Known skills (matched case-insensitively)
    pub skills: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            header_keywords: to_owned_list(DEFAULT_HEADER_KEYWORDS),
            skills: to_owned_list(DEFAULT_SKILLS),
        }
    }
}

impl Vocabulary {
    /// A vocabulary with no entries.
    pub fn empty() -> Self {
        Self {
            header_keywords: Vec::new(),
            skills: Vec::new(),
        }
    }

    /// Parse a vocabulary from JSON. Missing lists are empty.
    pub fn from_json(json: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct Partial {
            #[serde(default)]
            header_keywords: Vec<String>,
            #[serde(default)]
            skills: Vec<String>,
        }

        let partial: Partial = serde_json::from_str(json)?;
        Ok(Self {
            header_keywords: partial.header_keywords,
            skills: partial.skills,
        })
    }

    /// Append entries from `other` that are not already present.
    pub fn extend(&mut self, other: Vocabulary) {
        merge_unique(&mut self.header_keywords, other.header_keywords);
        merge_unique(&mut self.skills, other.skills);
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn merge_unique(target: &mut Vec<String>, extra: Vec<String>) {
    for item in extra {
        let item = item.trim().to_string();
        if item.is_empty() {
            continue;
        }
        if !target.iter().any(|t| t.eq_ignore_ascii_case(&item)) {
            target.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary() {
        let vocab = Vocabulary::default();
        assert!(vocab.header_keywords.iter().any(|k| k == "EDUCATION"));
        assert!(vocab.skills.iter().any(|s| s == "Docker"));
    }

    #[test]
    fn test_from_json_partial() {
        let vocab = Vocabulary::from_json(r#"{"header_keywords": ["FORMATION"]}"#).unwrap();
        assert_eq!(vocab.header_keywords, vec!["FORMATION".to_string()]);
        assert!(vocab.skills.is_empty());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(Vocabulary::from_json("not json").is_err());
    }

    #[test]
    fn test_extend_skips_duplicates() {
        let mut vocab = Vocabulary::empty();
        vocab.skills.push("Python".into());
        vocab.extend(Vocabulary {
            header_keywords: vec!["  ".into()],
            skills: vec!["python".into(), "Elixir".into()],
        });
        assert_eq!(vocab.skills, vec!["Python".to_string(), "Elixir".to_string()]);
        assert!(vocab.header_keywords.is_empty());
    }
}
