use serde::{Deserialize, Serialize};

use crate::common_models::macros::{impl_display, impl_from, impl_into};

/// A plain DID, e.g. `did:cheqd:testnet:alice`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct DidValue(String);
impl_display!(DidValue);
impl_from!(DidValue; String);
impl_into!(DidValue; String);

impl From<&str> for DidValue {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl DidValue {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
