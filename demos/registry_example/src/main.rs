use std::sync::Arc;

use color_eyre::{eyre::WrapErr, Result};
use didreg_core::{
    model::{
        KeyAlgorithmType, MsgCreateDid, MsgUpdateDid, TxContext, WriteRequest,
        WriteRequestPayload,
    },
    DidRegistry,
};
use didreg_providers::{
    common_models::did::DidValue,
    did::model::{DidDocument, Service},
    key_algorithm::model::GeneratedKey,
    storage::in_memory::InMemoryDidStorage,
};
use time::OffsetDateTime;
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};
use zeroize::Zeroizing;

const CHAIN_ID: &str = "testnet";

fn tx(tx_bytes: &[u8]) -> TxContext {
    TxContext {
        block_time: OffsetDateTime::now_utc(),
        chain_id: CHAIN_ID.to_string(),
        tx_bytes: tx_bytes.to_vec(),
    }
}

fn document(
    registry: &DidRegistry,
    id: &DidValue,
    key_id: &str,
    key: &GeneratedKey,
) -> Result<DidDocument> {
    let mut document = DidDocument::new(id.clone());
    document.context = vec!["https://www.w3.org/ns/did/v1".to_string()];
    document.verification_method = vec![registry.signature_service.verification_method(
        &KeyAlgorithmType::Eddsa,
        key_id,
        id,
        &key.public,
    )?];
    document.authentication = vec![key_id.to_string()];
    Ok(document)
}

fn signed(
    registry: &DidRegistry,
    payload: WriteRequestPayload,
    key_id: &str,
    key: &GeneratedKey,
) -> Result<WriteRequest> {
    let signature = registry.signature_service.sign_payload(
        &KeyAlgorithmType::Eddsa,
        key_id,
        &key.public,
        Zeroizing::new(key.private.clone()),
        &payload,
    )?;

    Ok(WriteRequest {
        data: payload,
        signatures: vec![signature],
    })
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .with_env_filter(env_filter)
        .init();

    let registry = DidRegistry::new(None, Arc::new(InMemoryDidStorage::default()));

    let did: DidValue = format!("did:cheqd:{CHAIN_ID}:zF7rhDBfUt9d1gJPjx7s1J").into();
    let key_id = format!("{did}#key-1");

    // create
    let key = registry
        .signature_service
        .get_key_pair(&KeyAlgorithmType::Eddsa)?;
    let mut initial = document(&registry, &did, &key_id, &key)?;
    initial.service = vec![Service {
        id: format!("{did}#linked-domain"),
        r#type: "LinkedDomains".to_string(),
        service_endpoint: "https://example.com".to_string(),
    }];

    let request = signed(
        &registry,
        WriteRequestPayload::CreateDid(MsgCreateDid { document: initial }),
        &key_id,
        &key,
    )?;
    registry
        .did_service
        .handle_write_request(&tx(b"create"), request)
        .wrap_err("failed to create DID Doc")?;
    info!(%did, "created");

    // rotate the authentication key, signed with the new key only
    let version_id = registry.did_service.get_did(&did)?.metadata.version_id;
    let rotated_key = registry
        .signature_service
        .get_key_pair(&KeyAlgorithmType::Eddsa)?;
    let rotated = document(&registry, &did, &key_id, &rotated_key)?;

    let request = signed(
        &registry,
        WriteRequestPayload::UpdateDid(MsgUpdateDid {
            document: rotated,
            version_id,
        }),
        &key_id,
        &rotated_key,
    )?;
    registry
        .did_service
        .handle_write_request(&tx(b"rotate"), request)
        .wrap_err("failed to rotate key")?;
    info!(%did, "key rotated");

    let stored = registry.did_service.get_did(&did)?;
    println!("{}", serde_json::to_string_pretty(&stored)?);

    Ok(())
}
