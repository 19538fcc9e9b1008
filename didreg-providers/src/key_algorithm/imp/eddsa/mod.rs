use ct_codecs::{Base64UrlSafeNoPadding, Decoder, Encoder};
use ed25519_compact::{KeyPair, PublicKey};
use serde::Deserialize;

use didreg_crypto::SignerError;

use crate::{
    common_models::{PublicKeyJwk, PublicKeyJwkEllipticData},
    key_algorithm::{decode_multibase, error::KeyAlgorithmError, model::GeneratedKey, KeyAlgorithm},
};

const ED25519_CODEC: [u8; 2] = [0xed, 0x01];
const ED25519_KEY_LENGTH: usize = 32;

pub struct Eddsa;


#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EddsaParams {
    pub algorithm: Algorithm,
}

#[derive(Deserialize)]
pub enum Algorithm {
    #[serde(rename = "Ed25519")]
    Ed25519,
}

impl Eddsa {
    pub fn new(params: EddsaParams) -> Self {
        _ = params.algorithm;
        Self
    }

    fn check_key(bytes: Vec<u8>) -> Result<Vec<u8>, KeyAlgorithmError> {
        PublicKey::from_slice(&bytes)
            .map_err(|e| KeyAlgorithmError::Failed(format!("invalid Ed25519 key: {e}")))?;
        Ok(bytes)
    }
}

impl KeyAlgorithm for Eddsa {
    fn get_signer_algorithm_id(&self) -> String {
        "Ed25519".to_string()
    }

    fn get_multibase(&self, public_key: &[u8]) -> Result<String, KeyAlgorithmError> {
        let key = PublicKey::from_slice(public_key).map_err(|_| SignerError::MissingKey)?;
        let data = [ED25519_CODEC.as_slice(), key.as_slice()].concat();
        Ok(format!("z{}", bs58::encode(data).into_string()))
    }

    fn multibase_to_bytes(&self, multibase: &str) -> Result<Vec<u8>, KeyAlgorithmError> {
        Self::check_key(decode_multibase(multibase, &ED25519_CODEC, &[ED25519_KEY_LENGTH])?)
    }

    fn generate_key_pair(&self) -> GeneratedKey {
        let key_pair = KeyPair::generate();

        GeneratedKey {
            public: key_pair.pk.to_vec(),
            private: key_pair.sk.to_vec(),
        }
    }

    fn bytes_to_jwk(
        &self,
        bytes: &[u8],
        r#use: Option<String>,
    ) -> Result<PublicKeyJwk, KeyAlgorithmError> {
        Ok(PublicKeyJwk::Okp(PublicKeyJwkEllipticData {
            r#use,
            crv: "Ed25519".to_string(),
            x: Base64UrlSafeNoPadding::encode_to_string(bytes)
                .map_err(|e| KeyAlgorithmError::Failed(e.to_string()))?,
            y: None,
        }))
    }

    fn jwk_to_bytes(&self, jwk: &PublicKeyJwk) -> Result<Vec<u8>, KeyAlgorithmError> {
        match jwk {
            PublicKeyJwk::Okp(data) if data.crv == "Ed25519" => {
                let x = Base64UrlSafeNoPadding::decode_to_vec(&data.x, None)
                    .map_err(|e| KeyAlgorithmError::Failed(e.to_string()))?;

                Self::check_key(x)
            }
            _ => Err(KeyAlgorithmError::Failed("invalid kty".to_string())),
        }
    }
}
