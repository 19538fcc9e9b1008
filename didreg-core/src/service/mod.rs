pub mod did_service;
pub mod error;
pub mod signature_service;
