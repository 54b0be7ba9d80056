//! Manifest and document descriptor models.

use serde::{Deserialize, Serialize};

/// A document the manifest offers for editing. Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDescriptor {
    /// Repository-relative path of the document file
    pub path: String,
    /// Human description shown alongside the document
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

impl DocumentDescriptor {
    /// Label shown in pickers: the display name when present, else the path.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.path)
    }
}

/// Shape of the manifest file stored in the repository.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub documents: Vec<DocumentDescriptor>,
}

/// Resolved repository configuration returned by `getConfig`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoConfig {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub documents: Vec<DocumentDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_documents_default_to_empty() {
        let manifest: Manifest = serde_json::from_str("{}").unwrap();
        assert!(manifest.documents.is_empty());
    }

    #[test]
    fn test_descriptor_label_prefers_display_name() {
        let manifest: Manifest = serde_json::from_str(
            r#"{"documents":[
                {"path":"notes/todo.txt","description":"Running notes","name":"Todo"},
                {"path":"docs/plan.md","description":"Project plan"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(manifest.documents[0].label(), "Todo");
        assert_eq!(manifest.documents[1].label(), "docs/plan.md");
    }
}
