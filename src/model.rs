use serde_derive::{Deserialize, Serialize};

/// Tracker label. Labels with equal names are the same label; the
/// description is not part of the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
}

/// Closed issue attached to the requested milestone. Identity is the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub url: String,
    pub title: String,
    pub user: User,
    #[serde(default)]
    pub labels: Vec<Label>,
}

/// Milestone record as returned by the tracker. The resolver matches the
/// title against the requested version; `state` is informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub title: String,
    pub number: u64,
    pub state: String,
}

/// The two rendered dialects for one repository, or for the combined
/// multi-repository result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedDescription {
    pub chat: String,
    pub document: String,
}

impl RenderedDescription {
    pub fn is_empty(&self) -> bool {
        self.chat.is_empty() && self.document.is_empty()
    }
}
