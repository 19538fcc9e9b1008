use std::{collections::HashMap, sync::Arc};

use didreg_crypto::{
    imp::{
        signer::{eddsa::EDDSASigner, es256::ES256Signer},
        CryptoProviderImpl,
    },
    Signer,
};
use maplit::hashmap;
use mockall::predicate::eq;
use time::macros::datetime;

use super::{SignInfo, SignatureVerification, SignatureVerifier, VerificationError};
use crate::{
    common_models::did::DidValue,
    did::model::{DidDocument, Metadata, StoredDid, VerificationMethod},
    key_algorithm::{
        imp::{
            eddsa::{self, Eddsa, EddsaParams},
            es256::{self, Es256, Es256Params},
            provider::KeyAlgorithmProviderImpl,
        },
        model::MethodKeyAlgorithm,
        KeyAlgorithm,
    },
    signers::{resolver::required_signers_for_create, RequiredSigners},
    storage::{MockDidStorage, StorageError},
};

const ALICE: &str = "did:cheqd:testnet:alice";
const BOB: &str = "did:cheqd:testnet:bob";
const PAYLOAD: &[u8] = b"payload";

struct TestKey {
    public: Vec<u8>,
    private: Vec<u8>,
}

impl TestKey {
    fn generate() -> Self {
        let (private, public) = EDDSASigner::random();
        Self { public, private }
    }

    fn method(&self, id: &str, controller: &str) -> VerificationMethod {
        let eddsa = Eddsa::new(EddsaParams {
            algorithm: eddsa::Algorithm::Ed25519,
        });
        VerificationMethod {
            id: id.to_owned(),
            r#type: "Ed25519VerificationKey2020".to_owned(),
            controller: controller.into(),
            public_key_jwk: None,
            public_key_multibase: Some(eddsa.get_multibase(&self.public).unwrap()),
        }
    }

    fn sign(&self, method_id: &str, payload: &[u8]) -> SignInfo {
        SignInfo {
            verification_method_id: method_id.to_owned(),
            signature: EDDSASigner {}
                .sign(payload, &self.public, &self.private)
                .unwrap(),
        }
    }
}

fn key_algorithm_provider() -> Arc<KeyAlgorithmProviderImpl> {
    let crypto = CryptoProviderImpl::new(
        HashMap::new(),
        hashmap! {
            "Ed25519".to_owned() => Arc::new(EDDSASigner {}) as Arc<dyn Signer>,
            "ES256".to_owned() => Arc::new(ES256Signer {}) as Arc<dyn Signer>,
        },
    );

    Arc::new(KeyAlgorithmProviderImpl::new(
        hashmap! {
            "EDDSA".to_owned() => Arc::new(Eddsa::new(EddsaParams {
                algorithm: eddsa::Algorithm::Ed25519,
            })) as Arc<dyn KeyAlgorithm>,
            "ES256".to_owned() => Arc::new(Es256::new(Es256Params {
                algorithm: es256::Algorithm::Es256,
            })) as Arc<dyn KeyAlgorithm>,
        },
        hashmap! {
            "Ed25519VerificationKey2020".to_owned() => MethodKeyAlgorithm::Fixed("EDDSA".to_owned()),
        },
        Arc::new(crypto),
    ))
}

fn verifier(storage: MockDidStorage) -> SignatureVerifier {
    SignatureVerifier::new(key_algorithm_provider(), Arc::new(storage))
}

fn document(id: &str, key: &TestKey) -> DidDocument {
    let key_id = format!("{id}#key-1");
    let mut document = DidDocument::new(id.into());
    document.verification_method = vec![key.method(&key_id, id)];
    document.authentication = vec![key_id];
    document
}

fn stored(document: DidDocument) -> StoredDid {
    StoredDid {
        did: document,
        metadata: Metadata::new(datetime!(2024-01-01 0:00 UTC), "v1".to_owned()),
    }
}

#[test]
fn test_self_signed_uses_attached_keys_only() {
    let key = TestKey::generate();
    let signers = required_signers_for_create(&document(ALICE, &key));

    let mut storage = MockDidStorage::default();
    storage.expect_get().never();

    let result = verifier(storage).verify(
        &signers,
        PAYLOAD,
        &[key.sign("did:cheqd:testnet:alice#key-1", PAYLOAD)],
    );
    assert_eq!(result, Ok(()));
}

#[test]
fn test_missing_signature() {
    let key = TestKey::generate();
    let signers = required_signers_for_create(&document(ALICE, &key));

    let result = verifier(MockDidStorage::default()).verify(&signers, PAYLOAD, &[]);
    assert_eq!(
        result,
        Err(VerificationError::MissingSignature(ALICE.into()))
    );
    assert_eq!(
        result.unwrap_err().to_string(),
        "signer: did:cheqd:testnet:alice: signature is required but not found"
    );
}

#[test]
fn test_external_controller_signs_with_stored_authentication_key() {
    let alice_key = TestKey::generate();
    let bob_key = TestKey::generate();
    let bob = document(BOB, &bob_key);

    let mut alice = document(ALICE, &alice_key);
    alice.controller = vec![BOB.into()];
    let signers = required_signers_for_create(&alice);

    let mut storage = MockDidStorage::default();
    storage
        .expect_get()
        .with(eq(DidValue::from(BOB)))
        .once()
        .returning(move |_| Ok(Some(stored(bob.clone()))));

    let result = verifier(storage).verify(
        &signers,
        PAYLOAD,
        &[bob_key.sign("did:cheqd:testnet:bob#key-1", PAYLOAD)],
    );
    assert_eq!(result, Ok(()));
}

#[test]
fn test_external_controller_not_found() {
    let key = TestKey::generate();
    let mut alice = document(ALICE, &key);
    alice.controller = vec![BOB.into()];
    let signers = required_signers_for_create(&alice);

    let mut storage = MockDidStorage::default();
    storage.expect_get().once().returning(|_| Ok(None));

    let result = verifier(storage).verify(
        &signers,
        PAYLOAD,
        &[key.sign("did:cheqd:testnet:bob#key-1", PAYLOAD)],
    );
    assert_eq!(result, Err(VerificationError::DocumentNotFound(BOB.into())));
}

#[test]
fn test_storage_error_is_propagated() {
    let key = TestKey::generate();
    let mut alice = document(ALICE, &key);
    alice.controller = vec![BOB.into()];
    let signers = required_signers_for_create(&alice);

    let mut storage = MockDidStorage::default();
    storage
        .expect_get()
        .once()
        .returning(|_| Err(StorageError::GetByKey("unavailable".to_owned())));

    let result = verifier(storage).verify(&signers, PAYLOAD, &[]);
    assert!(matches!(result, Err(VerificationError::Storage(_))));
}

#[test]
fn test_stored_key_outside_authentication_is_unknown() {
    let bob_key = TestKey::generate();
    let mut bob = document(BOB, &bob_key);
    bob.authentication = vec![];

    let mut alice = document(ALICE, &TestKey::generate());
    alice.controller = vec![BOB.into()];
    let signers = required_signers_for_create(&alice);

    let mut storage = MockDidStorage::default();
    storage
        .expect_get()
        .once()
        .returning(move |_| Ok(Some(stored(bob.clone()))));

    let result = verifier(storage).verify(
        &signers,
        PAYLOAD,
        &[bob_key.sign("did:cheqd:testnet:bob#key-1", PAYLOAD)],
    );
    assert_eq!(
        result,
        Err(VerificationError::UnknownVerificationMethod(
            "did:cheqd:testnet:bob#key-1".to_owned()
        ))
    );
}

#[test]
fn test_unknown_verification_method() {
    let key = TestKey::generate();
    let signers = required_signers_for_create(&document(ALICE, &key));

    let result = verifier(MockDidStorage::default()).verify(
        &signers,
        PAYLOAD,
        &[key.sign("did:cheqd:testnet:alice#key-9", PAYLOAD)],
    );
    assert_eq!(
        result.unwrap_err().to_string(),
        "did:cheqd:testnet:alice#key-9: verification method not found"
    );
}

#[test]
fn test_invalid_signature() {
    let key = TestKey::generate();
    let signers = required_signers_for_create(&document(ALICE, &key));

    let result = verifier(MockDidStorage::default()).verify(
        &signers,
        PAYLOAD,
        &[key.sign("did:cheqd:testnet:alice#key-1", b"other payload")],
    );
    assert_eq!(
        result,
        Err(VerificationError::InvalidSignature(
            "did:cheqd:testnet:alice#key-1".to_owned()
        ))
    );
    assert_eq!(
        result.unwrap_err().to_string(),
        "method id: did:cheqd:testnet:alice#key-1: invalid signature detected"
    );
}

#[test]
fn test_every_attributed_signature_must_verify() {
    let key = TestKey::generate();
    let signers = required_signers_for_create(&document(ALICE, &key));

    let mut forged = key.sign("did:cheqd:testnet:alice#key-1", PAYLOAD);
    forged.signature[0] ^= 0xff;

    let result = verifier(MockDidStorage::default()).verify(
        &signers,
        PAYLOAD,
        &[key.sign("did:cheqd:testnet:alice#key-1", PAYLOAD), forged],
    );
    assert!(matches!(
        result,
        Err(VerificationError::InvalidSignature(_))
    ));
}

#[test]
fn test_unsupported_key_encoding() {
    let key = TestKey::generate();
    let mut alice = document(ALICE, &key);
    alice.verification_method[0].public_key_multibase = Some("z0OIl".to_owned());
    let signers = required_signers_for_create(&alice);

    let result = verifier(MockDidStorage::default()).verify(
        &signers,
        PAYLOAD,
        &[key.sign("did:cheqd:testnet:alice#key-1", PAYLOAD)],
    );
    assert!(matches!(
        result,
        Err(VerificationError::UnsupportedKeyEncoding { id, .. }) if id == "did:cheqd:testnet:alice#key-1"
    ));
}

#[test]
fn test_unsupported_method_type() {
    let key = TestKey::generate();
    let mut alice = document(ALICE, &key);
    alice.verification_method[0].r#type = "RsaVerificationKey2018".to_owned();
    let signers = required_signers_for_create(&alice);

    let result = verifier(MockDidStorage::default()).verify(
        &signers,
        PAYLOAD,
        &[key.sign("did:cheqd:testnet:alice#key-1", PAYLOAD)],
    );
    assert!(matches!(
        result,
        Err(VerificationError::UnsupportedKeyEncoding { .. })
    ));
}

#[test]
fn test_first_failing_principal_in_order_is_reported() {
    let mut signers = RequiredSigners::new(ALICE.into(), vec![]);
    signers.add(&BOB.into());
    signers.add(&ALICE.into());

    let result = verifier(MockDidStorage::default()).verify(&signers, PAYLOAD, &[]);
    assert_eq!(
        result,
        Err(VerificationError::MissingSignature(ALICE.into()))
    );
}
