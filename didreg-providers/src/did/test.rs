use super::{
    error::DidValidationError,
    model::{DidDocument, Metadata, Service, VerificationMethod},
    validation::validate_document,
};
use crate::{
    common_models::{PublicKeyJwk, PublicKeyJwkEllipticData},
    did_url::{DidGrammar, DidUrlError},
};

const ALICE: &str = "did:cheqd:testnet:alice";
const BOB: &str = "did:cheqd:testnet:bob";

fn grammar() -> DidGrammar {
    DidGrammar::new("cheqd", vec!["testnet".to_owned()])
}

fn method(id: &str, controller: &str) -> VerificationMethod {
    VerificationMethod {
        id: id.to_owned(),
        r#type: "Ed25519VerificationKey2020".to_owned(),
        controller: controller.into(),
        public_key_jwk: None,
        public_key_multibase: Some("z6MkszZtxCmA2Ce4vUV132PCuLQmwnaDD5mw2L23fGNnsiX3".to_owned()),
    }
}

fn document() -> DidDocument {
    let mut document = DidDocument::new(ALICE.into());
    document.verification_method = vec![method("did:cheqd:testnet:alice#key-1", ALICE)];
    document.authentication = vec!["did:cheqd:testnet:alice#key-1".to_owned()];
    document
}

#[test]
fn test_controllers_default_to_self() {
    let mut document = document();
    assert_eq!(document.controllers(), vec![ALICE.into()]);

    document.controller = vec![BOB.into(), ALICE.into()];
    assert_eq!(document.controllers(), vec![BOB.into(), ALICE.into()]);
}

#[test]
fn test_find_verification_method() {
    let document = document();
    assert!(document
        .find_verification_method("did:cheqd:testnet:alice#key-1")
        .is_some());
    assert!(document
        .find_verification_method("did:cheqd:testnet:alice#key-2")
        .is_none());
}

#[test]
fn test_authentication_methods_skip_external_and_unreferenced() {
    let mut document = document();
    document
        .verification_method
        .push(method("did:cheqd:testnet:alice#key-2", ALICE));
    document
        .authentication
        .push("did:cheqd:testnet:bob#key-1".to_owned());

    let methods = document.authentication_methods();
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].id, "did:cheqd:testnet:alice#key-1");
}

#[test]
fn test_same_as() {
    let original = method("did:cheqd:testnet:alice#key-1", ALICE);

    assert!(original.same_as(&original.clone()));

    let mut changed_key = original.clone();
    changed_key.public_key_multibase = Some("z6Mkother".to_owned());
    assert!(!original.same_as(&changed_key));

    let mut changed_controller = original.clone();
    changed_controller.controller = BOB.into();
    assert!(!original.same_as(&changed_controller));

    let mut empty = original.clone();
    empty.public_key_multibase = Some(String::new());
    let mut absent = original;
    absent.public_key_multibase = None;
    assert!(empty.same_as(&absent));
}

#[test]
fn test_method_did_part() {
    assert_eq!(method("did:cheqd:testnet:bob#key-1", BOB).did(), BOB);
}

#[test]
fn test_serialization_uses_camel_case_and_skips_empty() {
    let json = serde_json::to_value(document()).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "id": ALICE,
            "verificationMethod": [{
                "id": "did:cheqd:testnet:alice#key-1",
                "type": "Ed25519VerificationKey2020",
                "controller": ALICE,
                "publicKeyMultibase": "z6MkszZtxCmA2Ce4vUV132PCuLQmwnaDD5mw2L23fGNnsiX3",
            }],
            "authentication": ["did:cheqd:testnet:alice#key-1"],
        })
    );

    let parsed: DidDocument = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, document());
}

#[test]
fn test_metadata_update_keeps_created() {
    let created = time::macros::datetime!(2024-01-01 0:00 UTC);
    let updated = time::macros::datetime!(2024-02-01 0:00 UTC);

    let metadata = Metadata::new(created, "v1".to_owned());
    assert_eq!(metadata.updated, created);

    let next = metadata.updated(updated, "v2".to_owned());
    assert_eq!(next.created, created);
    assert_eq!(next.updated, updated);
    assert_eq!(next.version_id, "v2");
    assert!(!next.deactivated);
}

#[test]
fn test_validate_document_success() {
    let mut document = document();
    document.controller = vec![ALICE.into(), BOB.into()];
    document.service = vec![Service {
        id: "did:cheqd:testnet:alice#linked-domain".to_owned(),
        r#type: "LinkedDomains".to_owned(),
        service_endpoint: "https://example.com".to_owned(),
    }];
    document
        .assertion_method
        .push("did:cheqd:testnet:bob#key-1".to_owned());

    assert!(validate_document(&document, &grammar()).is_ok());
}

#[test]
fn test_validate_document_malformed_id() {
    let mut document = document();
    document.id = "did:cheqd:mainnet:alice".into();

    assert!(matches!(
        validate_document(&document, &grammar()),
        Err(DidValidationError::MalformedIdentifier {
            source: DidUrlError::NamespaceNotAllowed { .. },
            ..
        })
    ));
}

#[test]
fn test_validate_document_malformed_controller() {
    let mut document = document();
    document.controller = vec!["bob".into()];

    let result = validate_document(&document, &grammar());
    assert_eq!(
        result,
        Err(DidValidationError::MalformedIdentifier {
            value: "bob".to_owned(),
            source: DidUrlError::InvalidScheme,
        })
    );
    assert_eq!(
        result.unwrap_err().to_string(),
        "bob: malformed identifier: DID must start with `did:`"
    );
}

#[test]
fn test_validate_document_duplicate_controller() {
    let mut document = document();
    document.controller = vec![BOB.into(), BOB.into()];

    assert!(matches!(
        validate_document(&document, &grammar()),
        Err(DidValidationError::InvalidDocument(_))
    ));
}

#[test]
fn test_validate_document_method_without_fragment() {
    let mut document = document();
    document.verification_method = vec![method(ALICE, ALICE)];

    assert!(matches!(
        validate_document(&document, &grammar()),
        Err(DidValidationError::MalformedIdentifier {
            source: DidUrlError::MissingFragment,
            ..
        })
    ));
}

#[test]
fn test_validate_document_key_representation() {
    let mut both = document();
    both.verification_method[0].public_key_jwk =
        Some(PublicKeyJwk::Okp(PublicKeyJwkEllipticData {
            r#use: None,
            crv: "Ed25519".to_owned(),
            x: "m7AE5UQdjLuCOnZHB1gCFfo2uvhM6W_4xFmpJK02r7s".to_owned(),
            y: None,
        }));
    let result = validate_document(&both, &grammar());
    assert!(matches!(result, Err(DidValidationError::InvalidDocument(_))));
    assert!(result
        .unwrap_err()
        .to_string()
        .starts_with("invalid DID Doc: "));

    let mut neither = document();
    neither.verification_method[0].public_key_multibase = None;
    assert!(matches!(
        validate_document(&neither, &grammar()),
        Err(DidValidationError::InvalidDocument(_))
    ));
}

#[test]
fn test_validate_document_duplicate_method_id() {
    let mut document = document();
    document
        .verification_method
        .push(method("did:cheqd:testnet:alice#key-1", ALICE));

    assert!(matches!(
        validate_document(&document, &grammar()),
        Err(DidValidationError::InvalidDocument(_))
    ));
}

#[test]
fn test_validate_document_missing_type() {
    let mut document = document();
    document.verification_method[0].r#type = String::new();

    assert!(matches!(
        validate_document(&document, &grammar()),
        Err(DidValidationError::InvalidDocument(_))
    ));
}

#[test]
fn test_validate_document_bad_relationship_reference() {
    let mut document = document();
    document.key_agreement = vec!["did:cheqd:testnet:alice".to_owned()];

    assert!(matches!(
        validate_document(&document, &grammar()),
        Err(DidValidationError::MalformedIdentifier {
            source: DidUrlError::MissingFragment,
            ..
        })
    ));
}

#[test]
fn test_validate_document_service_rules() {
    let service = Service {
        id: "did:cheqd:testnet:alice#linked-domain".to_owned(),
        r#type: "LinkedDomains".to_owned(),
        service_endpoint: "https://example.com".to_owned(),
    };

    let mut duplicated = document();
    duplicated.service = vec![service.clone(), service.clone()];
    assert!(matches!(
        validate_document(&duplicated, &grammar()),
        Err(DidValidationError::InvalidDocument(_))
    ));

    let mut no_endpoint = document();
    no_endpoint.service = vec![Service {
        service_endpoint: String::new(),
        ..service
    }];
    assert!(matches!(
        validate_document(&no_endpoint, &grammar()),
        Err(DidValidationError::InvalidDocument(_))
    ));
}
