use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid algorithm: {0}")]
    InvalidAlgorithm(String),

    #[error("Invalid digest: {0}")]
    InvalidDigest(String),

    #[error("Malformed multihash encoding: {0}")]
    MalformedEncoding(String),

    #[error("Invalid base58 character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("No digest provider registered for algorithm {0}")]
    UnsupportedAlgorithm(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
