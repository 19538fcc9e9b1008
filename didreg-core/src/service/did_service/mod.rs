//! Create, update and query of DID Documents.
//!
//! A write is applied only after the candidate document passed structural
//! validation and every required signer was verified. The document and its
//! metadata are then persisted with a single store call, so a rejected write
//! leaves the registry untouched.

use std::sync::Arc;

use ct_codecs::{Base64, Encoder};
use didreg_crypto::{CryptoProvider, HasherError};
use didreg_providers::{
    common_models::did::DidValue,
    did::{
        model::{Metadata, StoredDid},
        validation::validate_document,
    },
    signers::{
        resolver::{required_signers_for_create, required_signers_for_update},
        RequiredSigners,
    },
    storage::DidStorage,
    verification::{SignInfo, SignatureVerification},
};
use tracing::{debug, info, warn};

use super::error::DidServiceError;
use crate::{
    config::RegistryConfig,
    model::{
        MsgCreateDid, MsgCreateDidResponse, MsgUpdateDid, MsgUpdateDidResponse, TxContext,
        WriteRequest, WriteRequestPayload, WriteResponse,
    },
};


pub struct DidService {
    pub storage: Arc<dyn DidStorage>,
    pub verifier: Arc<dyn SignatureVerification>,
    pub crypto: Arc<dyn CryptoProvider>,
    pub config: RegistryConfig,
}

impl DidService {
    pub fn new(
        storage: Arc<dyn DidStorage>,
        verifier: Arc<dyn SignatureVerification>,
        crypto: Arc<dyn CryptoProvider>,
        config: RegistryConfig,
    ) -> Self {
        Self {
            storage,
            verifier,
            crypto,
            config,
        }
    }

    /// Dispatches a signed write request to create or update.
    pub fn handle_write_request(
        &self,
        ctx: &TxContext,
        request: WriteRequest,
    ) -> Result<WriteResponse, DidServiceError> {
        match request.data {
            WriteRequestPayload::CreateDid(msg) => self
                .create_did(ctx, msg, &request.signatures)
                .map(WriteResponse::CreateDid),
            WriteRequestPayload::UpdateDid(msg) => self
                .update_did(ctx, msg, &request.signatures)
                .map(WriteResponse::UpdateDid),
        }
    }

    #[tracing::instrument(skip_all, fields(did = %msg.document.id))]
    pub fn create_did(
        &self,
        ctx: &TxContext,
        msg: MsgCreateDid,
        signatures: &[SignInfo],
    ) -> Result<MsgCreateDidResponse, DidServiceError> {
        self.create(ctx, msg, signatures)
            .inspect_err(|error| warn!(%error, "DID Doc create rejected"))
    }

    #[tracing::instrument(skip_all, fields(did = %msg.document.id))]
    pub fn update_did(
        &self,
        ctx: &TxContext,
        msg: MsgUpdateDid,
        signatures: &[SignInfo],
    ) -> Result<MsgUpdateDidResponse, DidServiceError> {
        self.update(ctx, msg, signatures)
            .inspect_err(|error| warn!(%error, "DID Doc update rejected"))
    }

    pub fn get_did(&self, id: &DidValue) -> Result<StoredDid, DidServiceError> {
        self.storage
            .get(id)?
            .ok_or_else(|| DidServiceError::DocumentNotFound(id.clone()))
    }

    fn create(
        &self,
        ctx: &TxContext,
        msg: MsgCreateDid,
        signatures: &[SignInfo],
    ) -> Result<MsgCreateDidResponse, DidServiceError> {
        let payload = msg.signing_bytes()?;
        let document = msg.document;

        validate_document(&document, &self.config.grammar(&ctx.chain_id))?;

        if self.storage.has(&document.id)? {
            return Err(DidServiceError::DuplicateDocument(document.id));
        }

        let signers = required_signers_for_create(&document);
        self.verify(&signers, &payload, signatures)?;

        let id = document.id.clone();
        let metadata = Metadata::new(ctx.block_time, self.version_id(ctx)?);
        let version_id = metadata.version_id.clone();
        self.storage.put(&id, document, metadata)?;

        info!(%version_id, "DID Doc created");
        Ok(MsgCreateDidResponse { id })
    }

    fn update(
        &self,
        ctx: &TxContext,
        msg: MsgUpdateDid,
        signatures: &[SignInfo],
    ) -> Result<MsgUpdateDidResponse, DidServiceError> {
        let payload = msg.signing_bytes()?;
        let MsgUpdateDid {
            document,
            version_id,
        } = msg;

        validate_document(&document, &self.config.grammar(&ctx.chain_id))?;

        let StoredDid {
            did: old,
            metadata: old_metadata,
        } = self.get_did(&document.id)?;

        if old_metadata.deactivated {
            return Err(DidServiceError::Deactivated(document.id));
        }

        if old_metadata.version_id != version_id {
            return Err(DidServiceError::VersionConflict {
                id: document.id,
                stored: old_metadata.version_id,
                requested: version_id,
            });
        }

        let signers = required_signers_for_update(&old, &document);
        self.verify(&signers, &payload, signatures)?;

        let id = document.id.clone();
        let metadata = old_metadata.updated(ctx.block_time, self.version_id(ctx)?);
        let version_id = metadata.version_id.clone();
        self.storage.put(&id, document, metadata)?;

        info!(%version_id, "DID Doc updated");
        Ok(MsgUpdateDidResponse { id })
    }

    fn verify(
        &self,
        signers: &RequiredSigners,
        payload: &[u8],
        signatures: &[SignInfo],
    ) -> Result<(), DidServiceError> {
        debug!(
            signers = ?signers.principals().map(DidValue::as_str).collect::<Vec<_>>(),
            "required signers"
        );

        Ok(self.verifier.verify(signers, payload, signatures)?)
    }

    /// Standard base64 of the transaction hash.
    fn version_id(&self, ctx: &TxContext) -> Result<String, DidServiceError> {
        let hasher = self
            .crypto
            .get_hasher(&self.config.hasher)
            .map_err(HasherError::from)?;
        let hash = hasher.hash(&ctx.tx_bytes)?;

        Ok(Base64::encode_to_string(hash).map_err(|_| HasherError::CouldNotHash)?)
    }
}
