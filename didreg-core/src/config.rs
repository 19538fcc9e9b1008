use serde::{Deserialize, Serialize};

use didreg_providers::did_url::DidGrammar;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistryConfig {
    /// Method every registered DID must use.
    pub did_method: String,
    /// Accepted DID namespaces. `None` accepts only the chain id of the
    /// transaction being processed.
    pub allowed_namespaces: Option<Vec<String>>,
    /// Hasher deriving version ids from transaction bytes.
    pub hasher: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            did_method: "cheqd".to_string(),
            allowed_namespaces: None,
            hasher: "sha-256".to_string(),
        }
    }
}

impl RegistryConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn grammar(&self, chain_id: &str) -> DidGrammar {
        let namespaces = self
            .allowed_namespaces
            .clone()
            .unwrap_or_else(|| vec![chain_id.to_owned()]);

        DidGrammar::new(self.did_method.to_owned(), namespaces)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.did_method, "cheqd");
        assert_eq!(config.hasher, "sha-256");
        assert_eq!(
            config.grammar("testnet").allowed_namespaces,
            vec!["testnet".to_owned()]
        );
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config =
            RegistryConfig::from_json(r#"{"allowedNamespaces": ["mainnet", "testnet"]}"#).unwrap();

        assert_eq!(config.did_method, "cheqd");
        assert_eq!(
            config.grammar("devnet").allowed_namespaces,
            vec!["mainnet".to_owned(), "testnet".to_owned()]
        );
    }

    #[test]
    fn test_from_json_rejects_wrong_types() {
        assert!(RegistryConfig::from_json(r#"{"didMethod": 5}"#).is_err());
    }
}
