use serde::{Deserialize, Serialize};

/// Catalog entry as served by the books API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Server-assigned identifier; never generated on this side.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Loan availability, canonical spelling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    /// One API revision misspells the attribute. Tolerated when
    /// reading, never written back.
    #[serde(default, rename = "availabe", skip_serializing)]
    pub availabe: Option<bool>,
    pub created_at: String,
    pub updated_at: String,
}

impl Book {
    /// Whether the book can be loaned, whichever spelling the server used.
    pub fn is_available(&self) -> bool {
        self.available == Some(true) || self.availabe == Some(true)
    }
}

/// User-editable subset of a [`Book`], sent on create and update.
///
/// Identity and timestamps are server-owned and never round-tripped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookForm {
    pub title: String,
    pub description: String,
    pub available: bool,
}

impl BookForm {
    /// Field-level validation mirroring what the form screens enforce.
    ///
    /// Returns human-readable messages in field order; an empty list
    /// means the form can be submitted. No I/O happens here.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.title.is_empty() {
            errors.push("Title is required.".to_string());
        }
        if self.description.is_empty() {
            errors.push("Description is required.".to_string());
        }
        errors
    }
}
