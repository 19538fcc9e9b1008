use ct_codecs::{Base64UrlSafeNoPadding, Decoder, Encoder};
use p256::elliptic_curve::{
    generic_array::GenericArray,
    sec1::{EncodedPoint, ToEncodedPoint},
};
use serde::Deserialize;

use didreg_crypto::imp::signer::es256::ES256Signer;

use crate::{
    common_models::{PublicKeyJwk, PublicKeyJwkEllipticData},
    key_algorithm::{decode_multibase, error::KeyAlgorithmError, model::GeneratedKey, KeyAlgorithm},
};

const P256_CODEC: [u8; 2] = [0x80, 0x24];
const COORDINATE_LENGTH: usize = 32;
const COMPRESSED_KEY_LENGTH: usize = 33;
const UNCOMPRESSED_KEY_LENGTH: usize = 65;

pub struct Es256;


#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Es256Params {
    pub algorithm: Algorithm,
}

#[derive(Deserialize)]
pub enum Algorithm {
    #[serde(rename = "ES256")]
    Es256,
}

impl Es256 {
    pub fn new(params: Es256Params) -> Self {
        _ = params.algorithm;
        Self
    }

    fn decode_coordinate(value: &str) -> Result<Vec<u8>, KeyAlgorithmError> {
        let bytes = Base64UrlSafeNoPadding::decode_to_vec(value, None)
            .map_err(|e| KeyAlgorithmError::Failed(e.to_string()))?;
        if bytes.len() != COORDINATE_LENGTH {
            return Err(KeyAlgorithmError::Failed(format!(
                "coordinate must be {COORDINATE_LENGTH} bytes, got {}",
                bytes.len()
            )));
        }
        Ok(bytes)
    }
}

impl KeyAlgorithm for Es256 {
    fn get_signer_algorithm_id(&self) -> String {
        "ES256".to_string()
    }

    fn get_multibase(&self, public_key: &[u8]) -> Result<String, KeyAlgorithmError> {
        let key = ES256Signer::to_bytes(public_key)?;
        let data = [P256_CODEC.as_slice(), key.as_slice()].concat();
        Ok(format!("z{}", bs58::encode(data).into_string()))
    }

    fn multibase_to_bytes(&self, multibase: &str) -> Result<Vec<u8>, KeyAlgorithmError> {
        let bytes = decode_multibase(
            multibase,
            &P256_CODEC,
            &[COMPRESSED_KEY_LENGTH, UNCOMPRESSED_KEY_LENGTH],
        )?;
        Ok(ES256Signer::to_bytes(&bytes)?)
    }

    fn generate_key_pair(&self) -> GeneratedKey {
        let (private, public) = ES256Signer::random();

        GeneratedKey { public, private }
    }

    fn bytes_to_jwk(
        &self,
        bytes: &[u8],
        r#use: Option<String>,
    ) -> Result<PublicKeyJwk, KeyAlgorithmError> {
        let pk = p256::PublicKey::from_sec1_bytes(bytes)
            .map_err(|e| KeyAlgorithmError::Failed(e.to_string()))?;
        let encoded_point = pk.to_encoded_point(false);
        let x = encoded_point
            .x()
            .ok_or(KeyAlgorithmError::Failed("X is missing".to_string()))?;
        let y = encoded_point
            .y()
            .ok_or(KeyAlgorithmError::Failed("Y is missing".to_string()))?;
        Ok(PublicKeyJwk::Ec(PublicKeyJwkEllipticData {
            r#use,
            crv: "P-256".to_string(),
            x: Base64UrlSafeNoPadding::encode_to_string(x)
                .map_err(|e| KeyAlgorithmError::Failed(e.to_string()))?,
            y: Some(
                Base64UrlSafeNoPadding::encode_to_string(y)
                    .map_err(|e| KeyAlgorithmError::Failed(e.to_string()))?,
            ),
        }))
    }

    fn jwk_to_bytes(&self, jwk: &PublicKeyJwk) -> Result<Vec<u8>, KeyAlgorithmError> {
        match jwk {
            PublicKeyJwk::Ec(data) if data.crv == "P-256" => {
                let x = Self::decode_coordinate(&data.x)?;
                let y = Self::decode_coordinate(
                    data.y
                        .as_ref()
                        .ok_or(KeyAlgorithmError::Failed("Y is missing".to_string()))?,
                )?;

                let encoded_point = EncodedPoint::<p256::NistP256>::from_affine_coordinates(
                    GenericArray::from_slice(&x),
                    GenericArray::from_slice(&y),
                    true,
                );

                Ok(ES256Signer::to_bytes(encoded_point.as_bytes())?)
            }
            _ => Err(KeyAlgorithmError::Failed("invalid kty".to_string())),
        }
    }
}
