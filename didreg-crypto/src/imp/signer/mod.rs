pub mod eddsa;
pub mod es256;
