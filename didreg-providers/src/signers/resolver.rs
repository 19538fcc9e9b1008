use std::collections::BTreeSet;

use super::RequiredSigners;
use crate::did::model::DidDocument;

/// Signers of a create: every controller, the document itself by default.
pub fn required_signers_for_create(new: &DidDocument) -> RequiredSigners {
    let mut signers = RequiredSigners::new(new.id.clone(), new.authentication_methods());

    for controller in new.controllers() {
        signers.add(&controller);
    }

    signers
}

/// Signers of an update from `old` to `new`.
///
/// Starts from the create requirements of `new`. Controllers dropped from the
/// document must sign, and so must the controllers of every verification
/// method that is removed or changed. A method moved to another controller
/// needs both the old and the new one.
pub fn required_signers_for_update(old: &DidDocument, new: &DidDocument) -> RequiredSigners {
    let mut signers = required_signers_for_create(new);

    let new_controllers: BTreeSet<_> = new.controllers().into_iter().collect();
    for controller in old.controllers() {
        if !new_controllers.contains(&controller) {
            signers.add(&controller);
        }
    }

    for old_method in &old.verification_method {
        match new.find_verification_method(&old_method.id) {
            None => signers.add(&old_method.controller),
            Some(new_method) => {
                if !old_method.same_as(new_method) {
                    signers.add(&new_method.controller);
                }
                if old_method.controller != new_method.controller {
                    signers.add(&old_method.controller);
                }
            }
        }
    }

    signers
}
