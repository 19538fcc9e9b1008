use std::collections::HashSet;

use super::{error::DidValidationError, model::DidDocument};
use crate::did_url::{DidGrammar, DidUrlError};

fn malformed(value: &str) -> impl FnOnce(DidUrlError) -> DidValidationError + '_ {
    move |source| DidValidationError::MalformedIdentifier {
        value: value.to_owned(),
        source,
    }
}

/// Checks the identifier grammar and the structural rules of a candidate
/// document. Performs no lookups.
pub fn validate_document(
    document: &DidDocument,
    grammar: &DidGrammar,
) -> Result<(), DidValidationError> {
    let id = document.id.as_str();
    grammar.validate_did(id).map_err(malformed(id))?;

    let mut controllers = HashSet::new();
    for controller in &document.controller {
        grammar
            .validate_did(controller.as_str())
            .map_err(malformed(controller.as_str()))?;
        if !controllers.insert(controller) {
            return Err(DidValidationError::InvalidDocument(format!(
                "controller {controller} is listed more than once"
            )));
        }
    }

    let mut method_ids = HashSet::new();
    for method in &document.verification_method {
        grammar
            .validate_fragment_reference(&method.id)
            .map_err(malformed(&method.id))?;
        grammar
            .validate_did(method.controller.as_str())
            .map_err(malformed(method.controller.as_str()))?;

        if method.r#type.is_empty() {
            return Err(DidValidationError::InvalidDocument(format!(
                "verification method {} has no type",
                method.id
            )));
        }

        let has_multibase = method
            .public_key_multibase
            .as_deref()
            .is_some_and(|key| !key.is_empty());
        if has_multibase == method.public_key_jwk.is_some() {
            return Err(DidValidationError::InvalidDocument(format!(
                "verification method {} must contain exactly one of publicKeyMultibase or publicKeyJwk",
                method.id
            )));
        }

        if !method_ids.insert(method.id.as_str()) {
            return Err(DidValidationError::InvalidDocument(format!(
                "verification method {} is listed more than once",
                method.id
            )));
        }
    }

    for reference in document.verification_relationships() {
        grammar
            .validate_fragment_reference(reference)
            .map_err(malformed(reference))?;
    }

    let mut service_ids = HashSet::new();
    for service in &document.service {
        grammar
            .validate_fragment_reference(&service.id)
            .map_err(malformed(&service.id))?;

        if service.r#type.is_empty() || service.service_endpoint.is_empty() {
            return Err(DidValidationError::InvalidDocument(format!(
                "service {} must have a type and an endpoint",
                service.id
            )));
        }
        if !service_ids.insert(service.id.as_str()) {
            return Err(DidValidationError::InvalidDocument(format!(
                "service {} is listed more than once",
                service.id
            )));
        }
    }

    Ok(())
}
