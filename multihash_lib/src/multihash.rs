//! Multihash type
//!
//! A multihash is a digest tagged with the algorithm that produced it. The binary form is
//! `varint(code) || varint(length) || digest`, and the hex and base58 forms are text encodings of
//! that whole binary form, not of the bare digest.
//!
//! Values are immutable. Callers may attach a metadata map, which is carried along but ignored by
//! equality, ordering and hashing.

use std::{
    cmp::Ordering,
    collections::BTreeMap,
    fmt,
    hash::{Hash, Hasher},
    io,
    str::FromStr,
    sync::Arc,
};

use ciborium::Value;
use siphasher::sip::SipHasher;

use crate::{
    algorithm::{self, Algorithm, AlgorithmId},
    base58,
    decode::{self, Source},
    error::{Error, Result},
    hex_codec, varint,
};

pub const DEFAULT_MAX_DIGEST_LEN: usize = 4096;

/// One code byte, one length byte, one digest byte.
pub const MIN_ENCODED_LEN: usize = 3;

const READ_CHUNK: usize = 8 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_digest_len: usize,
}

impl Limits {
    pub fn unbounded() -> Self { Limits { max_digest_len: usize::MAX } }
}

impl Default for Limits {
    fn default() -> Self { Limits { max_digest_len: DEFAULT_MAX_DIGEST_LEN } }
}

pub type Metadata = BTreeMap<String, Value>;

/// Digest argument for [`Multihash::create`]: raw bytes, or hex text of either case.
#[derive(Debug, Clone, Copy)]
pub enum DigestInput<'a> {
    Bytes(&'a [u8]),
    Hex(&'a str),
}

impl<'a> From<&'a [u8]> for DigestInput<'a> {
    fn from(bytes: &'a [u8]) -> Self { DigestInput::Bytes(bytes) }
}

impl<'a, const N: usize> From<&'a [u8; N]> for DigestInput<'a> {
    fn from(bytes: &'a [u8; N]) -> Self { DigestInput::Bytes(bytes) }
}

impl<'a> From<&'a Vec<u8>> for DigestInput<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self { DigestInput::Bytes(bytes) }
}

impl<'a> From<&'a str> for DigestInput<'a> {
    fn from(hex: &'a str) -> Self { DigestInput::Hex(hex) }
}

impl<'a> From<&'a String> for DigestInput<'a> {
    fn from(hex: &'a String) -> Self { DigestInput::Hex(hex) }
}

#[derive(Clone)]
pub struct Multihash {
    algorithm: Algorithm,
    digest: Arc<[u8]>,
    metadata: Arc<Metadata>,
}

fn check_digest_len(len: usize, limits: &Limits) -> Result<()> {
    if len == 0 {
        return Err(Error::InvalidDigest("digest is empty".to_string()));
    }
    if len > limits.max_digest_len {
        return Err(Error::InvalidDigest(format!(
            "digest of {} bytes exceeds the maximum of {} bytes",
            len, limits.max_digest_len
        )));
    }
    Ok(())
}

impl Multihash {
    pub fn create<'a, 'b>(
        algorithm: impl Into<AlgorithmId<'a>>,
        digest: impl Into<DigestInput<'b>>,
    ) -> Result<Multihash> {
        Self::create_with_limits(algorithm, digest, &Limits::default())
    }

    pub fn create_with_limits<'a, 'b>(
        algorithm: impl Into<AlgorithmId<'a>>,
        digest: impl Into<DigestInput<'b>>,
        limits: &Limits,
    ) -> Result<Multihash> {
        let id = algorithm.into();
        let algorithm =
            algorithm::lookup(id).ok_or_else(|| Error::InvalidAlgorithm(id.to_string()))?;
        let digest: Arc<[u8]> = match digest.into() {
            DigestInput::Bytes(bytes) => Arc::from(bytes),
            DigestInput::Hex(hex) => {
                hex_codec::validate(hex, limits)?;
                Arc::from(hex_codec::decode(hex)?)
            }
        };
        check_digest_len(digest.len(), limits)?;
        Ok(Multihash { algorithm, digest, metadata: Arc::default() })
    }

    pub fn code(&self) -> u64 { self.algorithm.code }
    pub fn algorithm(&self) -> &Algorithm { &self.algorithm }
    pub fn algorithm_name(&self) -> &str { self.algorithm.name() }
    pub fn digest(&self) -> &[u8] { &self.digest }
    pub fn length(&self) -> usize { self.digest.len() }
    pub fn hex_digest(&self) -> String { hex_codec::encode(&self.digest) }
    pub fn metadata(&self) -> &Metadata { &self.metadata }

    /// Returns a copy carrying `metadata`. The digest bytes are shared, not copied.
    pub fn with_metadata(&self, metadata: Metadata) -> Multihash {
        Multihash {
            algorithm: self.algorithm.clone(),
            digest: Arc::clone(&self.digest),
            metadata: Arc::new(metadata),
        }
    }

    pub fn encoded_len(&self) -> usize {
        varint::encoded_len(self.code()) + varint::encoded_len(self.length() as u64) + self.length()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        varint::encode_into(self.code(), &mut out);
        varint::encode_into(self.length() as u64, &mut out);
        out.extend_from_slice(&self.digest);
        out
    }

    pub fn write_to<W: io::Write + ?Sized>(&self, write: &mut W) -> io::Result<()> {
        write.write_all(&self.to_bytes())
    }

    pub fn to_hex(&self) -> String { hex_codec::encode(&self.to_bytes()) }
    pub fn to_base58(&self) -> String { base58::encode(&self.to_bytes()) }

    /// Hash of the binary form under fixed SipHash keys. Unlike [`Hash`], the result is the same
    /// on every platform and across runs, so it can be persisted.
    pub fn stable_hash(&self) -> u64 {
        let hasher = SipHasher::new_with_keys(0, 0);
        hasher.hash(&self.to_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Multihash> {
        Self::from_bytes_with_limits(bytes, &Limits::default())
    }

    /// Decodes the frame at the front of `bytes`. Anything after the frame is ignored.
    pub fn from_bytes_with_limits(bytes: &[u8], limits: &Limits) -> Result<Multihash> {
        Self::decode_prefix_with_limits(bytes, limits).map(|(mhash, _)| mhash)
    }

    /// Like [`Multihash::from_bytes`], also returning how many bytes the frame occupied.
    pub fn decode_prefix(bytes: &[u8]) -> Result<(Multihash, usize)> {
        Self::decode_prefix_with_limits(bytes, &Limits::default())
    }

    pub fn decode_prefix_with_limits(bytes: &[u8], limits: &Limits) -> Result<(Multihash, usize)> {
        if bytes.len() < MIN_ENCODED_LEN {
            return Err(Error::MalformedEncoding(format!(
                "expected at least {} bytes, got {}",
                MIN_ENCODED_LEN,
                bytes.len()
            )));
        }
        let (code, rest) = varint::decode(bytes)?;
        let (length, rest) = varint::decode(rest)?;
        if length == 0 {
            return Err(Error::MalformedEncoding("digest length is zero".to_string()));
        }
        if length > rest.len() as u64 {
            return Err(Error::MalformedEncoding(format!(
                "digest length is {} but only {} bytes follow",
                length,
                rest.len()
            )));
        }
        let length = length as usize;
        let consumed = bytes.len() - rest.len() + length;
        log::trace!("decoded frame: code 0x{:x}, {} digest bytes", code, length);

        let mhash = Self::create_with_limits(code, &rest[..length], limits)?;
        Ok((mhash, consumed))
    }

    pub fn read_from<R: io::Read + ?Sized>(read: &mut R) -> Result<Multihash> {
        Self::read_from_with_limits(read, &Limits::default())
    }

    /// Reads one frame off `read`, leaving it positioned just past the digest.
    ///
    /// A length above `limits.max_digest_len` is rejected before any digest byte is read.
    pub fn read_from_with_limits<R: io::Read + ?Sized>(
        read: &mut R,
        limits: &Limits,
    ) -> Result<Multihash> {
        let code = varint::read(read)?;
        let length = varint::read(read)?;
        log::debug!("reading frame: code 0x{:x}, {} digest bytes", code, length);
        if length == 0 {
            return Err(Error::MalformedEncoding("digest length is zero".to_string()));
        }
        let length = usize::try_from(length)
            .ok()
            .filter(|&len| len <= limits.max_digest_len)
            .ok_or_else(|| {
                Error::InvalidDigest(format!(
                    "digest of {} bytes exceeds the maximum of {} bytes",
                    length, limits.max_digest_len
                ))
            })?;

        let mut digest = Vec::with_capacity(length.min(READ_CHUNK));
        let mut chunk = [0u8; READ_CHUNK];
        while digest.len() < length {
            let wanted = (length - digest.len()).min(READ_CHUNK);
            match read.read(&mut chunk[..wanted]) {
                Ok(0) => {
                    return Err(Error::MalformedEncoding(format!(
                        "stream ended after {} of {} digest bytes",
                        digest.len(),
                        length
                    )))
                }
                Ok(n) => digest.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }

        Self::create_with_limits(code, &digest, limits)
    }

    pub fn from_hex(s: &str) -> Result<Multihash> { Self::from_bytes(&hex_codec::decode(s)?) }
    pub fn from_base58(s: &str) -> Result<Multihash> { Self::from_bytes(&base58::decode(s)?) }
}

impl PartialEq for Multihash {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code() && self.digest == other.digest
    }
}

impl Eq for Multihash {}

impl Ord for Multihash {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code().cmp(&other.code()).then_with(|| self.digest.cmp(&other.digest))
    }
}

impl PartialOrd for Multihash {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

// Metadata must stay out of the hash, so no derive
impl Hash for Multihash {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
        self.digest.hash(state);
    }
}

impl fmt::Display for Multihash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hash:{}:{}", self.algorithm.name(), self.hex_digest())
    }
}

impl fmt::Debug for Multihash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut t = f.debug_tuple("Multihash");
        t.field(&format_args!("{}", self));
        if !self.metadata.is_empty() {
            t.field(&self.metadata);
        }
        t.finish()
    }
}

impl FromStr for Multihash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> { decode::decode(Source::Text(s)) }
}
