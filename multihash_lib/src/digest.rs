//! Digest providers
//!
//! The crate does not compute digests itself. A [`DigestProviders`] registry maps algorithms to
//! providers. It is filled once at startup and then shared by reference.

use std::{collections::HashMap, fmt, io, marker::PhantomData};

use sha2::Digest;

use crate::{
    algorithm::{self, AlgorithmId},
    error::{Error, Result},
    multihash::Multihash,
};

const READ_CHUNK: usize = 8 * 1024;

pub enum Content<'a> {
    Bytes(&'a [u8]),
    Text(&'a str),
    Stream(&'a mut dyn io::Read),
}

impl<'a> From<&'a [u8]> for Content<'a> {
    fn from(bytes: &'a [u8]) -> Self { Content::Bytes(bytes) }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Content<'a> {
    fn from(bytes: &'a [u8; N]) -> Self { Content::Bytes(bytes) }
}

impl<'a> From<&'a Vec<u8>> for Content<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self { Content::Bytes(bytes) }
}

impl<'a> From<&'a str> for Content<'a> {
    fn from(text: &'a str) -> Self { Content::Text(text) }
}

impl<'a> From<&'a String> for Content<'a> {
    fn from(text: &'a String) -> Self { Content::Text(text) }
}

impl<'a, R: io::Read> From<&'a mut R> for Content<'a> {
    fn from(stream: &'a mut R) -> Self { Content::Stream(stream) }
}

pub trait DigestProvider: Send + Sync {
    fn digest(&self, content: Content<'_>) -> io::Result<Vec<u8>>;
}

impl<F> DigestProvider for F
where
    F: Fn(Content<'_>) -> io::Result<Vec<u8>> + Send + Sync,
{
    fn digest(&self, content: Content<'_>) -> io::Result<Vec<u8>> { self(content) }
}

/// Provider backed by any RustCrypto hasher, e.g. `HashDigest::<sha2::Sha256>::new()`.
pub struct HashDigest<D> {
    phantom: PhantomData<fn() -> D>,
}

impl<D> HashDigest<D> {
    pub fn new() -> Self { HashDigest { phantom: PhantomData } }
}

impl<D> Default for HashDigest<D> {
    fn default() -> Self { Self::new() }
}

impl<D: Digest> DigestProvider for HashDigest<D> {
    fn digest(&self, content: Content<'_>) -> io::Result<Vec<u8>> {
        let mut hasher = D::new();
        match content {
            Content::Bytes(bytes) => hasher.update(bytes),
            Content::Text(text) => hasher.update(text.as_bytes()),
            Content::Stream(stream) => {
                let mut buf = [0u8; READ_CHUNK];
                loop {
                    match stream.read(&mut buf) {
                        Ok(0) => break,
                        Ok(n) => hasher.update(&buf[..n]),
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                        Err(e) => return Err(e),
                    }
                }
            }
        }
        Ok(hasher.finalize().to_vec())
    }
}

#[derive(Default)]
pub struct DigestProviders {
    providers: HashMap<u64, Box<dyn DigestProvider>>,
}

// Providers are opaque, so only list what is registered
impl fmt::Debug for DigestProviders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut codes: Vec<_> = self.providers.keys().collect();
        codes.sort();
        f.debug_struct("DigestProviders").field("codes", &codes).finish()
    }
}

impl DigestProviders {
    pub fn new() -> Self { Self::default() }

    /// Registry with `sha1`, `sha2-256` and `sha2-512`.
    pub fn with_defaults() -> Self {
        let mut providers = Self::new();
        providers.insert(algorithm::SHA1, HashDigest::<sha1::Sha1>::new());
        providers.insert(algorithm::SHA2_256, HashDigest::<sha2::Sha256>::new());
        providers.insert(algorithm::SHA2_512, HashDigest::<sha2::Sha512>::new());
        providers
    }

    fn insert(&mut self, code: u64, provider: impl DigestProvider + 'static) {
        self.providers.insert(code, Box::new(provider));
    }

    /// Registers `provider` for `algorithm`, replacing any earlier one.
    pub fn register<'a>(
        &mut self,
        algorithm: impl Into<AlgorithmId<'a>>,
        provider: impl DigestProvider + 'static,
    ) -> Result<()> {
        let id = algorithm.into();
        let algorithm =
            algorithm::lookup(id).ok_or_else(|| Error::InvalidAlgorithm(id.to_string()))?;
        log::debug!("registering digest provider for {}", algorithm);
        self.insert(algorithm.code, provider);
        Ok(())
    }

    pub fn get<'a>(&self, algorithm: impl Into<AlgorithmId<'a>>) -> Option<&dyn DigestProvider> {
        let algorithm = algorithm::lookup(algorithm)?;
        self.providers.get(&algorithm.code).map(|p| p.as_ref())
    }

    pub fn supports<'a>(&self, algorithm: impl Into<AlgorithmId<'a>>) -> bool {
        self.get(algorithm).is_some()
    }

    /// Digests `content` and wraps the result.
    pub fn hash<'a, 'b>(
        &self,
        algorithm: impl Into<AlgorithmId<'a>>,
        content: impl Into<Content<'b>>,
    ) -> Result<Multihash> {
        let id = algorithm.into();
        let algorithm =
            algorithm::lookup(id).ok_or_else(|| Error::InvalidAlgorithm(id.to_string()))?;
        let provider = self
            .providers
            .get(&algorithm.code)
            .ok_or_else(|| Error::UnsupportedAlgorithm(algorithm.name().to_string()))?;
        let digest = provider.digest(content.into())?;
        Multihash::create(algorithm.code, &digest)
    }

    /// Recomputes the digest of `content` with the algorithm of `mhash` and compares.
    pub fn verify<'b>(&self, mhash: &Multihash, content: impl Into<Content<'b>>) -> Result<bool> {
        let actual = self.hash(mhash.code(), content)?;
        Ok(actual == *mhash)
    }

    /// [`DigestProviders::verify`] over optional arguments: `Ok(None)` when either one is missing.
    pub fn test(&self, mhash: Option<&Multihash>, content: Option<Content<'_>>) -> Result<Option<bool>> {
        match (mhash, content) {
            (Some(mhash), Some(content)) => self.verify(mhash, content).map(Some),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const FOO_SHA1: &str = "0beec7b5ea3f0fdbc95d0dd47f3c5bc275da8a33";
    const FOO_SHA256: &str = "2c26b46b68ffc68ff99b453c1d30413413422d706483bfa0f98a5e886266e7ae";

    #[test]
    fn test_default_providers() {
        let providers = DigestProviders::with_defaults();
        assert!(providers.supports("sha1"));
        assert!(providers.supports("sha2-256"));
        assert!(providers.supports(0x13u64));
        assert!(!providers.supports("md5"));
        assert!(!providers.supports("nope"));

        let sha1 = providers.hash("sha1", "foo").unwrap();
        assert_eq!(sha1, Multihash::create("sha1", FOO_SHA1).unwrap());
        let sha256 = providers.hash("sha2-256", b"foo").unwrap();
        assert_eq!(sha256, Multihash::create("sha2-256", FOO_SHA256).unwrap());
        assert_eq!(providers.hash("sha2-512", "foo").unwrap().length(), 64);
    }

    #[test]
    fn test_hash_all_content_shapes() {
        let providers = DigestProviders::with_defaults();
        let expected = Multihash::create("sha1", FOO_SHA1).unwrap();
        assert_eq!(providers.hash("sha1", Content::Text("foo")).unwrap(), expected);
        assert_eq!(providers.hash("sha1", &b"foo".to_vec()).unwrap(), expected);
        let mut stream = Cursor::new(b"foo".to_vec());
        assert_eq!(providers.hash("sha1", &mut stream).unwrap(), expected);

        let big = vec![0x61u8; 3 * READ_CHUNK + 17];
        let mut stream = Cursor::new(big.clone());
        assert_eq!(
            providers.hash("sha2-256", &mut stream).unwrap(),
            providers.hash("sha2-256", &big).unwrap()
        );
    }

    #[test]
    fn test_hash_errors() {
        let providers = DigestProviders::with_defaults();
        assert!(matches!(providers.hash("md5", "foo"), Err(Error::UnsupportedAlgorithm(_))));
        assert!(matches!(providers.hash("nope", "foo"), Err(Error::InvalidAlgorithm(_))));
    }

    #[test]
    fn test_register_custom_provider() {
        let mut providers = DigestProviders::new();
        assert!(!providers.supports("sha1"));
        providers
            .register(0x07u64, |content: Content<'_>| -> io::Result<Vec<u8>> {
                match content {
                    Content::Text(text) => Ok(text.bytes().rev().collect()),
                    _ => Err(io::Error::new(io::ErrorKind::Other, "text only")),
                }
            })
            .unwrap();

        let mhash = providers.hash(0x07u64, "abc").unwrap();
        assert_eq!(mhash.algorithm_name(), "app-7");
        assert_eq!(mhash.digest(), b"cba");
        assert!(matches!(providers.hash(0x07u64, b"abc"), Err(Error::Io(_))));

        let nothing = |_: Content<'_>| -> io::Result<Vec<u8>> { Ok(Vec::new()) };
        assert!(matches!(providers.register("sha4", nothing), Err(Error::InvalidAlgorithm(_))));
        providers.register("md5", nothing).unwrap();
        assert!(matches!(providers.hash("md5", "x"), Err(Error::InvalidDigest(_))));
    }

    #[test]
    fn test_verify() {
        let providers = DigestProviders::with_defaults();
        let mhash = Multihash::create("sha1", FOO_SHA1).unwrap();

        assert_eq!(providers.test(None, None).unwrap(), None);
        assert_eq!(providers.test(Some(&mhash), None).unwrap(), None);
        assert_eq!(providers.test(None, Some(Content::Text("foo"))).unwrap(), None);

        assert_eq!(providers.test(Some(&mhash), Some(Content::Text("foo"))).unwrap(), Some(true));
        assert_eq!(providers.test(Some(&mhash), Some(Content::Text("bar"))).unwrap(), Some(false));
        assert!(providers.verify(&mhash, "foo").unwrap());
        assert!(!providers.verify(&mhash, "bar").unwrap());

        let unsupported = Multihash::create("md5", "d3b07384d113edec49eaa6238ad5ff00").unwrap();
        assert!(matches!(
            providers.test(Some(&unsupported), Some(Content::Text("foo"))),
            Err(Error::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_providers_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DigestProviders>();

        let providers = DigestProviders::with_defaults();
        let expected = Multihash::create("sha1", FOO_SHA1).unwrap();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| assert_eq!(providers.hash("sha1", "foo").unwrap(), expected));
            }
        });
    }
}
