//! DID and DID URL grammar.
//!
//! A DID URL is split into its DID, path, query and fragment parts. Each part
//! is validated against its own character classes. The DID itself follows
//! `did:<method>:[<namespace>:]<unique-id>`, scoped by a configured method and
//! an optional list of allowed namespaces.

use thiserror::Error;


#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DidUrlError {
    #[error("DID must start with `did:`")]
    InvalidScheme,
    #[error("DID method is missing")]
    MissingMethod,
    #[error("DID method `{0}` contains invalid characters")]
    InvalidMethod(String),
    #[error("DID method must be `{expected}`, got `{found}`")]
    UnexpectedMethod { expected: String, found: String },
    #[error("DID namespace `{0}` contains invalid characters")]
    InvalidNamespace(String),
    #[error("DID namespace is missing, expected one of {0:?}")]
    MissingNamespace(Vec<String>),
    #[error("DID namespace `{found}` is not one of {allowed:?}")]
    NamespaceNotAllowed { found: String, allowed: Vec<String> },
    #[error("DID unique id is missing")]
    MissingUniqueId,
    #[error("DID unique id `{0}` contains invalid characters")]
    InvalidUniqueId(String),
    #[error("DID URL path `{0}` contains invalid characters")]
    InvalidPath(String),
    #[error("DID URL query `{0}` contains invalid characters")]
    InvalidQuery(String),
    #[error("DID URL fragment `{0}` contains invalid characters")]
    InvalidFragment(String),
    #[error("DID URL must not contain a path")]
    UnexpectedPath,
    #[error("DID URL must not contain a query")]
    UnexpectedQuery,
    #[error("DID URL must contain a fragment")]
    MissingFragment,
}

/// Parts of a DID URL. Absent parts are empty strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DidUrlParts<'a> {
    pub did: &'a str,
    /// Includes the leading `/`.
    pub path: &'a str,
    pub query: &'a str,
    pub fragment: &'a str,
}

/// Splits a DID URL. Never fails, validation is a separate step.
pub fn split_did_url(input: &str) -> DidUrlParts<'_> {
    let (rest, fragment) = input.split_once('#').unwrap_or((input, ""));
    let (rest, query) = rest.split_once('?').unwrap_or((rest, ""));
    let (did, path) = match rest.find('/') {
        Some(index) => rest.split_at(index),
        None => (rest, ""),
    };

    DidUrlParts {
        did,
        path,
        query,
        fragment,
    }
}

/// Method and namespace scope applied to every DID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DidGrammar {
    pub method: Option<String>,
    pub allowed_namespaces: Vec<String>,
}

impl DidGrammar {
    pub fn new(method: impl Into<String>, allowed_namespaces: Vec<String>) -> Self {
        Self {
            method: Some(method.into()),
            allowed_namespaces,
        }
    }

    pub fn validate_did(&self, did: &str) -> Result<(), DidUrlError> {
        validate_did(did, self.method.as_deref(), &self.allowed_namespaces)
    }

    pub fn validate_did_url<'a>(&self, url: &'a str) -> Result<DidUrlParts<'a>, DidUrlError> {
        validate_did_url(url, self.method.as_deref(), &self.allowed_namespaces)
    }

    pub fn validate_fragment_reference<'a>(
        &self,
        url: &'a str,
    ) -> Result<DidUrlParts<'a>, DidUrlError> {
        validate_fragment_reference(url, self.method.as_deref(), &self.allowed_namespaces)
    }
}

/// Validates a plain DID against the method and namespace scope.
///
/// `method` of `None` accepts any syntactically valid method. An empty
/// `allowed_namespaces` accepts DIDs with or without a namespace.
pub fn validate_did(
    did: &str,
    method: Option<&str>,
    allowed_namespaces: &[String],
) -> Result<(), DidUrlError> {
    let rest = did.strip_prefix("did:").ok_or(DidUrlError::InvalidScheme)?;

    let (found_method, rest) = rest.split_once(':').unwrap_or((rest, ""));
    if found_method.is_empty() {
        return Err(DidUrlError::MissingMethod);
    }
    if !found_method
        .bytes()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return Err(DidUrlError::InvalidMethod(found_method.to_owned()));
    }
    if let Some(expected) = method {
        if expected != found_method {
            return Err(DidUrlError::UnexpectedMethod {
                expected: expected.to_owned(),
                found: found_method.to_owned(),
            });
        }
    }

    let (namespace, unique_id) = match rest.split_once(':') {
        Some((namespace, unique_id)) => (Some(namespace), unique_id),
        None => (None, rest),
    };

    if let Some(namespace) = namespace {
        if namespace.is_empty() || !namespace.bytes().all(is_namespace_char) {
            return Err(DidUrlError::InvalidNamespace(namespace.to_owned()));
        }
    }

    if !allowed_namespaces.is_empty() {
        match namespace {
            None => return Err(DidUrlError::MissingNamespace(allowed_namespaces.to_vec())),
            Some(namespace) if !allowed_namespaces.iter().any(|n| n == namespace) => {
                return Err(DidUrlError::NamespaceNotAllowed {
                    found: namespace.to_owned(),
                    allowed: allowed_namespaces.to_vec(),
                })
            }
            Some(_) => {}
        }
    }

    if unique_id.is_empty() {
        return Err(DidUrlError::MissingUniqueId);
    }
    if !matches_class(unique_id, is_id_char) {
        return Err(DidUrlError::InvalidUniqueId(unique_id.to_owned()));
    }

    Ok(())
}

pub fn validate_path(path: &str) -> Result<(), DidUrlError> {
    if matches_class(path, is_path_char) {
        Ok(())
    } else {
        Err(DidUrlError::InvalidPath(path.to_owned()))
    }
}

pub fn validate_query(query: &str) -> Result<(), DidUrlError> {
    if matches_class(query, is_query_char) {
        Ok(())
    } else {
        Err(DidUrlError::InvalidQuery(query.to_owned()))
    }
}

pub fn validate_fragment(fragment: &str) -> Result<(), DidUrlError> {
    if matches_class(fragment, is_query_char) {
        Ok(())
    } else {
        Err(DidUrlError::InvalidFragment(fragment.to_owned()))
    }
}

/// Splits and validates every part of a DID URL.
pub fn validate_did_url<'a>(
    url: &'a str,
    method: Option<&str>,
    allowed_namespaces: &[String],
) -> Result<DidUrlParts<'a>, DidUrlError> {
    let parts = split_did_url(url);

    validate_did(parts.did, method, allowed_namespaces)?;
    validate_path(parts.path)?;
    validate_query(parts.query)?;
    validate_fragment(parts.fragment)?;

    Ok(parts)
}

pub fn is_valid_did_url(url: &str, method: Option<&str>, allowed_namespaces: &[String]) -> bool {
    validate_did_url(url, method, allowed_namespaces).is_ok()
}

/// Validates a reference of the form `<did>#<fragment>`, as used for
/// verification method and service ids.
pub fn validate_fragment_reference<'a>(
    url: &'a str,
    method: Option<&str>,
    allowed_namespaces: &[String],
) -> Result<DidUrlParts<'a>, DidUrlError> {
    let parts = validate_did_url(url, method, allowed_namespaces)?;

    if !parts.path.is_empty() {
        return Err(DidUrlError::UnexpectedPath);
    }
    if !parts.query.is_empty() {
        return Err(DidUrlError::UnexpectedQuery);
    }
    if parts.fragment.is_empty() {
        return Err(DidUrlError::MissingFragment);
    }

    Ok(parts)
}

fn is_namespace_char(c: u8) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == b'-' || c == b'_'
}

fn is_id_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'.' | b'-' | b'_')
}

fn is_unreserved(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'-' | b'.' | b'_' | b'~')
}

fn is_sub_delim(c: u8) -> bool {
    matches!(
        c,
        b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'='
    )
}

fn is_path_char(c: u8) -> bool {
    is_unreserved(c) || is_sub_delim(c) || matches!(c, b'/' | b':' | b'@')
}

fn is_query_char(c: u8) -> bool {
    is_path_char(c) || c == b'?'
}

/// Every byte is either in `class` or part of a `%XX` escape.
fn matches_class(segment: &str, class: fn(u8) -> bool) -> bool {
    let bytes = segment.as_bytes();
    let mut index = 0;

    while index < bytes.len() {
        if bytes[index] == b'%' {
            let escaped = bytes.get(index + 1..index + 3);
            match escaped {
                Some(hex) if hex.iter().all(u8::is_ascii_hexdigit) => index += 3,
                _ => return false,
            }
        } else if class(bytes[index]) {
            index += 1;
        } else {
            return false;
        }
    }

    true
}
