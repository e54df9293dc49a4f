//! Code repository models

use serde::{Deserialize, Serialize};

use super::common::{ResourceId, lenient};

/// Code repository connected to Aikido
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// Repository ID
    #[serde(
        default,
        deserialize_with = "lenient::resource_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ResourceId>,

    /// Repository name
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,

    /// Provider-side identifier (e.g. `org/repo`)
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub external_repo_id: Option<String>,

    /// Git provider (github, gitlab, bitbucket, ...)
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// Remaining provider fields, passed through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Repository {
    /// Case-insensitive substring match on name or external id.
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .external_repo_id
                .as_deref()
                .is_some_and(|ext| ext.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, external: Option<&str>) -> Repository {
        Repository {
            id: None,
            name: name.to_string(),
            external_repo_id: external.map(|s| s.to_string()),
            provider: None,
            extra: Default::default(),
        }
    }

    #[test]
    fn test_matches_name_case_insensitively() {
        assert!(repo("API-Service", None).matches("api"));
        assert!(!repo("frontend", None).matches("api"));
    }

    #[test]
    fn test_matches_external_id() {
        assert!(repo("gateway", Some("org/API-gateway")).matches("api"));
        assert!(!repo("gateway", Some("org/web")).matches("api"));
    }

    #[test]
    fn test_opaque_fields_survive_round_trip() {
        let json = r#"{
            "id": 12,
            "name": "backend",
            "external_repo_id": "acme/backend",
            "provider": "github",
            "active": true,
            "url": "https://github.com/acme/backend"
        }"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.id, Some(ResourceId::Number(12)));
        assert_eq!(repo.extra["active"], true);

        let value = serde_json::to_value(&repo).unwrap();
        assert_eq!(value["url"], "https://github.com/acme/backend");
        assert_eq!(value["provider"], "github");
    }

    #[test]
    fn test_null_name_still_decodes_and_matches_external_id() {
        let repo: Repository = serde_json::from_str(
            r#"{"id": 3, "name": null, "external_repo_id": "acme/api-gateway", "provider": null}"#,
        )
        .unwrap();
        assert_eq!(repo.name, "");
        assert!(repo.provider.is_none());
        assert!(repo.matches("api"));
    }
}
