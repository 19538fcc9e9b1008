use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use time::OffsetDateTime;

use didreg_providers::{
    common_models::did::DidValue, did::model::DidDocument,
    key_algorithm::model::MethodKeyAlgorithm, verification::SignInfo,
};

#[derive(Debug, Copy, Clone, Display, EnumString, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyAlgorithmType {
    #[strum(serialize = "EDDSA")]
    Eddsa,
    #[strum(serialize = "ES256")]
    Es256,
}

#[derive(Debug, Copy, Clone, Display, EnumString, EnumIter, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerificationMethodType {
    Ed25519VerificationKey2020,
    Ed25519VerificationKey2018,
    EcdsaSecp256r1VerificationKey2019,
    JsonWebKey2020,
}

impl VerificationMethodType {
    pub fn key_algorithm(&self) -> MethodKeyAlgorithm {
        match self {
            Self::Ed25519VerificationKey2020 | Self::Ed25519VerificationKey2018 => {
                MethodKeyAlgorithm::Fixed(KeyAlgorithmType::Eddsa.to_string())
            }
            Self::EcdsaSecp256r1VerificationKey2019 => {
                MethodKeyAlgorithm::Fixed(KeyAlgorithmType::Es256.to_string())
            }
            Self::JsonWebKey2020 => MethodKeyAlgorithm::FromJwk,
        }
    }
}

/// Ledger context of the transaction being processed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxContext {
    pub block_time: OffsetDateTime,
    pub chain_id: String,
    pub tx_bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCreateDid {
    #[serde(flatten)]
    pub document: DidDocument,
}

impl MsgCreateDid {
    pub fn signing_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&SigningPayload::CreateDid(self))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsgUpdateDid {
    #[serde(flatten)]
    pub document: DidDocument,
    pub version_id: String,
}

impl MsgUpdateDid {
    pub fn signing_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&SigningPayload::UpdateDid(self))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteRequestPayload {
    CreateDid(MsgCreateDid),
    UpdateDid(MsgUpdateDid),
}

impl WriteRequestPayload {
    /// Bytes every signature of the request is made over.
    pub fn signing_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            Self::CreateDid(msg) => msg.signing_bytes(),
            Self::UpdateDid(msg) => msg.signing_bytes(),
        }
    }
}

/// Borrowed mirror of [`WriteRequestPayload`], serialized identically.
#[derive(Serialize)]
enum SigningPayload<'a> {
    CreateDid(&'a MsgCreateDid),
    UpdateDid(&'a MsgUpdateDid),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteRequest {
    pub data: WriteRequestPayload,
    pub signatures: Vec<SignInfo>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCreateDidResponse {
    pub id: DidValue,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUpdateDidResponse {
    pub id: DidValue,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteResponse {
    CreateDid(MsgCreateDidResponse),
    UpdateDid(MsgUpdateDidResponse),
}
