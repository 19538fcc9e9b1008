//! DID Document model and structural validation.

pub mod error;
pub mod model;
pub mod validation;

#[cfg(test)]
mod test;
