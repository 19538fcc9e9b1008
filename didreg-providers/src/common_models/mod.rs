use serde::{Deserialize, Serialize};

pub mod did;
pub(crate) mod macros;

/// Structured public key representation carried by a verification method.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kty")]
pub enum PublicKeyJwk {
    #[serde(rename = "EC")]
    Ec(PublicKeyJwkEllipticData),
    #[serde(rename = "OKP")]
    Okp(PublicKeyJwkEllipticData),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyJwkEllipticData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#use: Option<String>,
    pub crv: String,
    pub x: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
}
