pub mod algorithm;
pub mod base58;
pub mod decode;
pub mod digest;
pub mod error;
pub mod hex_codec;
pub mod multihash;
pub mod select;
pub mod varint;

pub use algorithm::{lookup, Algorithm, AlgorithmId};
pub use decode::{decode, Source};
pub use digest::{Content, DigestProvider, DigestProviders, HashDigest};
pub use error::{Error, Result};
pub use multihash::{DigestInput, Limits, Metadata, Multihash};
pub use select::Selection;
