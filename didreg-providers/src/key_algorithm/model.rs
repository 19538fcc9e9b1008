#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedPublicKey {
    pub public_key_bytes: Vec<u8>,
    /// Key algorithm that accepted the key, as registered in the provider.
    pub key_algorithm: String,
    pub signer_algorithm_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedKey {
    pub public: Vec<u8>,
    pub private: Vec<u8>,
}

/// How the key algorithm of a verification method type is chosen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MethodKeyAlgorithm {
    /// The type names a single key algorithm.
    Fixed(String),
    /// The algorithm follows from the `publicKeyJwk` curve.
    FromJwk,
}
