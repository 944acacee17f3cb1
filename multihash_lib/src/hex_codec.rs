use crate::{
    error::{Error, Result},
    multihash::Limits,
};

pub fn encode(bytes: &[u8]) -> String { hex::encode(bytes) }

/// Decodes a hex string of either case. Every pair of characters yields exactly one byte,
/// so leading zero bytes survive.
pub fn decode(s: &str) -> Result<Vec<u8>> {
    hex::decode(s).map_err(|e| match e {
        hex::FromHexError::OddLength => {
            Error::InvalidDigest(format!("hex string {:?} has odd length {}", s, s.len()))
        }
        hex::FromHexError::InvalidHexCharacter { c, index } => Error::InvalidDigest(format!(
            "hex string {:?} has invalid character {:?} at position {}",
            s, c, index
        )),
        other => Error::InvalidDigest(other.to_string()),
    })
}

/// Checks that `s` is usable as hex input for `limits.max_digest_len` bytes. This does not decode.
pub fn validate(s: &str, limits: &Limits) -> Result<()> {
    if let Some((index, c)) = s.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
        return Err(Error::InvalidDigest(format!(
            "hex string {:?} has invalid character {:?} at position {}",
            s, c, index
        )));
    }
    if s.len() < 2 {
        return Err(Error::InvalidDigest(format!(
            "hex string {:?} is shorter than one byte",
            s
        )));
    }
    if s.len() / 2 > limits.max_digest_len {
        return Err(Error::InvalidDigest(format!(
            "hex string of {} characters exceeds the maximum of {} bytes",
            s.len(),
            limits.max_digest_len
        )));
    }
    if s.len() % 2 != 0 {
        return Err(Error::InvalidDigest(format!(
            "hex string {:?} has odd length {}",
            s,
            s.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};

    #[test]
    fn test_encode() {
        assert_eq!(encode(&[]), "");
        assert_eq!(encode(&[0x00]), "00");
        assert_eq!(encode(&[0x01, 0xab, 0xff]), "01abff");
        assert_eq!(encode(&[0x00, 0x00, 0x0f]), "00000f");
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
        assert_eq!(decode("00").unwrap(), vec![0x00]);
        assert_eq!(decode("0000ff").unwrap(), vec![0x00, 0x00, 0xff]);
        assert_eq!(decode("DEADbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(decode("abc"), Err(Error::InvalidDigest(_))));
        assert!(matches!(decode("0g"), Err(Error::InvalidDigest(_))));
        assert!(matches!(decode("zz"), Err(Error::InvalidDigest(_))));
    }

    #[test]
    fn test_random_roundtrip() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for len in 0..64 {
            let mut buf = vec![0u8; len];
            rng.fill_bytes(&mut buf);
            if len > 2 {
                buf[0] = 0;
            }
            let s = encode(&buf);
            assert_eq!(s.len(), 2 * len);
            assert_eq!(decode(&s).unwrap(), buf);
        }
    }

    #[test]
    fn test_validate() {
        let limits = Limits::default();
        assert!(validate("00", &limits).is_ok());
        assert!(validate("0beec7b5ea3f0fdbc95d0dd47f3c5bc275da8a33", &limits).is_ok());
        assert!(validate("ABCDEF", &limits).is_ok());

        assert!(matches!(validate("", &limits), Err(Error::InvalidDigest(_))));
        assert!(matches!(validate("0", &limits), Err(Error::InvalidDigest(_))));
        assert!(matches!(validate("012", &limits), Err(Error::InvalidDigest(_))));
        assert!(matches!(validate("0x12", &limits), Err(Error::InvalidDigest(_))));
        assert!(matches!(validate("Qm", &limits), Err(Error::InvalidDigest(_))));

        let small = Limits { max_digest_len: 2 };
        assert!(validate("abcd", &small).is_ok());
        assert!(matches!(validate("abcdef", &small), Err(Error::InvalidDigest(_))));
    }
}
