//! Algorithm table
//!
//! Maps algorithm names to their multihash codes. Codes below 0x10 are reserved for
//! application-specific use and are named on the fly (`app-<code>`), they never appear in the table.

use std::{borrow::Cow, fmt};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Algorithm {
    pub code: u64,
    pub name: Cow<'static, str>,
}

impl Algorithm {
    const fn known(name: &'static str, code: u64) -> Self {
        Algorithm { code, name: Cow::Borrowed(name) }
    }

    fn app_specific(code: u64) -> Self {
        Algorithm { code, name: Cow::Owned(format!("app-{}", code)) }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn code(&self) -> u64 { self.code }
    pub fn is_app_specific(&self) -> bool { is_app_specific(self.code) }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:x})", self.name, self.code)
    }
}

pub const SHA1: u64 = 0x11;
pub const SHA2_256: u64 = 0x12;
pub const SHA2_512: u64 = 0x13;

// See https://github.com/multiformats/multicodec/blob/master/table.csv
pub const ALGORITHMS: &[Algorithm] = &[
    Algorithm::known("md5", 0xd5),
    Algorithm::known("sha1", SHA1),
    Algorithm::known("sha2-256", SHA2_256),
    Algorithm::known("sha2-512", SHA2_512),
    Algorithm::known("sha3-512", 0x14),
    Algorithm::known("sha3-384", 0x15),
    Algorithm::known("sha3-256", 0x16),
    Algorithm::known("sha3-224", 0x17),
    Algorithm::known("shake-128", 0x18),
    Algorithm::known("shake-256", 0x19),
    Algorithm::known("keccak-224", 0x1a),
    Algorithm::known("keccak-256", 0x1b),
    Algorithm::known("keccak-384", 0x1c),
    Algorithm::known("keccak-512", 0x1d),
    Algorithm::known("blake3", 0x1e),
    Algorithm::known("sha2-384", 0x20),
    Algorithm::known("murmur3-128", 0x22),
    Algorithm::known("dbl-sha2-256", 0x56),
    Algorithm::known("sha2-224", 0x1013),
    Algorithm::known("sha2-512-224", 0x1014),
    Algorithm::known("sha2-512-256", 0x1015),
    Algorithm::known("x11", 0x1100),
    Algorithm::known("blake2b-256", 0xb220),
    Algorithm::known("blake2b-512", 0xb240),
    Algorithm::known("blake2s-128", 0xb250),
    Algorithm::known("blake2s-256", 0xb260),
];

const APP_SPECIFIC_END: u64 = 0x10;

/// Either side of an algorithm entry, used as a lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmId<'a> {
    Code(u64),
    Name(&'a str),
}

impl From<u64> for AlgorithmId<'_> {
    fn from(code: u64) -> Self { AlgorithmId::Code(code) }
}

impl<'a> From<&'a str> for AlgorithmId<'a> {
    fn from(name: &'a str) -> Self { AlgorithmId::Name(name) }
}

impl<'a> From<&'a String> for AlgorithmId<'a> {
    fn from(name: &'a String) -> Self { AlgorithmId::Name(name) }
}

impl<'a> From<&'a Algorithm> for AlgorithmId<'a> {
    fn from(algorithm: &'a Algorithm) -> Self { AlgorithmId::Code(algorithm.code) }
}

impl fmt::Display for AlgorithmId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmId::Code(code) => write!(f, "0x{:x}", code),
            AlgorithmId::Name(name) => write!(f, "{}", name),
        }
    }
}

fn is_app_specific(code: u64) -> bool { code > 0 && code < APP_SPECIFIC_END }

/// `None` when the id is a name: the question only applies to codes.
pub fn is_app_specific_code<'a>(id: impl Into<AlgorithmId<'a>>) -> Option<bool> {
    match id.into() {
        AlgorithmId::Code(code) => Some(is_app_specific(code)),
        AlgorithmId::Name(_) => None,
    }
}

pub fn lookup_name(name: &str) -> Option<Algorithm> {
    ALGORITHMS.iter().find(|a| a.name == name).cloned()
}

pub fn lookup_code(code: u64) -> Option<Algorithm> {
    if is_app_specific(code) {
        return Some(Algorithm::app_specific(code));
    }
    ALGORITHMS.iter().find(|a| a.code == code).cloned()
}

pub fn lookup<'a>(id: impl Into<AlgorithmId<'a>>) -> Option<Algorithm> {
    match id.into() {
        AlgorithmId::Code(code) => lookup_code(code),
        AlgorithmId::Name(name) => lookup_name(name),
    }
}
