//! Base58 codec (Bitcoin alphabet)
//!
//! The input bytes are read as one big-endian unsigned integer and written out in base 58.
//! Leading zero bytes carry no numeric value, so each of them is written as a leading `'1'`
//! (the zero digit) and restored one-for-one when decoding.

use crate::error::{Error, Result};

/// Upper bound on the encoded length of `len` bytes: log(256) / log(58) is just under 1.366.
pub fn max_encoded_len(len: usize) -> usize { len.saturating_mul(1366) / 1000 + 1 }

pub fn encode(bytes: &[u8]) -> String {
    bs58::encode(bytes).with_alphabet(bs58::Alphabet::BITCOIN).into_string()
}

pub fn decode(s: &str) -> Result<Vec<u8>> {
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| match e {
            bs58::decode::Error::InvalidCharacter { character, index } => {
                Error::InvalidCharacter { character, position: index }
            }
            // Everything before the first non-ascii byte is ascii, so the byte index is also the
            // character index.
            bs58::decode::Error::NonAsciiCharacter { index } => match s[index..].chars().next() {
                Some(character) => Error::InvalidCharacter { character, position: index },
                None => Error::MalformedEncoding(format!("bad base58: {}", e)),
            },
            e => Error::MalformedEncoding(format!("bad base58: {}", e)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, RngCore, SeedableRng};

    #[test]
    fn test_known_vectors() {
        assert_eq!(encode(b"hello"), "Cn8eVZg");
        assert_eq!(decode("Cn8eVZg").unwrap(), b"hello");
        assert_eq!(encode(&[0x3a]), "21");
        assert_eq!(encode(&[0xff]), "5Q");
        assert_eq!(decode("5Q").unwrap(), vec![0xff]);
    }

    #[test]
    fn test_empty() {
        assert_eq!(encode(&[]), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_leading_zero_bytes() {
        assert_eq!(encode(&[0x00]), "1");
        assert_eq!(encode(&[0x00, 0x00, 0x00]), "111");
        assert_eq!(encode(&[0x00, 0x00, 0x01]), "112");
        assert_eq!(decode("112").unwrap(), vec![0x00, 0x00, 0x01]);
        assert_eq!(decode("1").unwrap(), vec![0x00]);
        assert_eq!(decode("1111").unwrap(), vec![0x00; 4]);

        let bytes = [0x00, 0xff, 0x00, 0x01];
        assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn test_high_bit_values_have_no_sign_byte() {
        // A two's-complement big integer would grow an extra 0x00 for these.
        for bytes in [vec![0x80], vec![0xff, 0xff], vec![0x80, 0x00, 0x00, 0x00], vec![0x00, 0x9c]] {
            let decoded = decode(&encode(&bytes)).unwrap();
            assert_eq!(decoded, bytes);
        }
        assert_eq!(decode("LUv").unwrap(), vec![0xff, 0xff]);
    }

    #[test]
    fn test_invalid_characters() {
        for (s, character, position) in
            [("0", '0', 0), ("1O", 'O', 1), ("11I", 'I', 2), ("abl", 'l', 2), ("2é", 'é', 1), ("1 ", ' ', 1)]
        {
            match decode(s) {
                Err(Error::InvalidCharacter { character: c, position: p }) => {
                    assert_eq!((c, p), (character, position), "input {:?}", s)
                }
                other => panic!("expected InvalidCharacter for {:?}, got {:?}", s, other),
            }
        }
    }

    #[test]
    fn test_max_encoded_len() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(58);
        for len in [0usize, 1, 2, 10, 34, 100, 1000] {
            let mut buf = vec![0u8; len];
            rng.fill_bytes(&mut buf);
            assert!(encode(&buf).len() <= max_encoded_len(len), "len {}", len);
            assert!(encode(&vec![0xffu8; len]).len() <= max_encoded_len(len), "len {}", len);
        }
    }

    #[test]
    fn test_random_roundtrip() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(58);
        for _ in 0..200 {
            let len = rng.gen_range(0..80);
            let mut buf = vec![0u8; len];
            rng.fill_bytes(&mut buf);
            let zeros = rng.gen_range(0..4).min(len);
            buf[..zeros].fill(0);

            let s = encode(&buf);
            assert!(s.starts_with(&"1".repeat(zeros)));
            assert_eq!(decode(&s).unwrap(), buf);
        }
    }
}
