//! Derived profile data: contact details and matched skills.

use serde::{Deserialize, Serialize};

/// Contact details found in a block sequence. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

impl ContactInfo {
    /// Check if no field was found.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.location.is_none()
    }

    /// Non-empty email, phone and location in that order.
    pub fn details(&self) -> Vec<&str> {
        [&self.email, &self.phone, &self.location]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .filter(|s| !s.trim().is_empty())
            .collect()
    }

    /// The details joined with `separator`, or `None` if there are none.
    pub fn contact_line(&self, separator: &str) -> Option<String> {
        let details = self.details();
        if details.is_empty() {
            None
        } else {
            Some(details.join(separator))
        }
    }
}

/// Skills matched against a known vocabulary, in vocabulary order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSet {
    pub matches: Vec<String>,
}

impl SkillSet {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }
}
