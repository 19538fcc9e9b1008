use thiserror::Error;

use crate::did_url::DidUrlError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DidValidationError {
    #[error("{value}: malformed identifier: {source}")]
    MalformedIdentifier { value: String, source: DidUrlError },
    #[error("invalid DID Doc: {0}")]
    InvalidDocument(String),
}
