//! Decoding from the supported input shapes.
//!
//! Strings carry no marker for their encoding. A string that validates as hex is decoded as hex,
//! everything else is handed to the base58 decoder. Hex wins even when the same text would also be
//! valid base58.

use std::io;

use log::debug;

use crate::{
    base58,
    error::{Error, Result},
    hex_codec,
    multihash::{Limits, Multihash},
    varint,
};

pub enum Source<'a> {
    Bytes(&'a [u8]),
    Text(&'a str),
    Stream(&'a mut dyn io::Read),
}

impl<'a> From<&'a [u8]> for Source<'a> {
    fn from(bytes: &'a [u8]) -> Self { Source::Bytes(bytes) }
}

impl<'a> From<&'a Vec<u8>> for Source<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self { Source::Bytes(bytes) }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self { Source::Text(text) }
}

impl<'a> From<&'a String> for Source<'a> {
    fn from(text: &'a String) -> Self { Source::Text(text) }
}

impl<'a, R: io::Read> From<&'a mut R> for Source<'a> {
    fn from(stream: &'a mut R) -> Self { Source::Stream(stream) }
}

pub fn decode<'a>(source: impl Into<Source<'a>>) -> Result<Multihash> {
    decode_with_limits(source, &Limits::default())
}

pub fn decode_with_limits<'a>(source: impl Into<Source<'a>>, limits: &Limits) -> Result<Multihash> {
    match source.into() {
        Source::Bytes(bytes) => Multihash::from_bytes_with_limits(bytes, limits),
        Source::Text(text) => decode_text(text, limits),
        Source::Stream(stream) => Multihash::read_from_with_limits(stream, limits),
    }
}

fn decode_text(text: &str, limits: &Limits) -> Result<Multihash> {
    // The hex covers the whole frame, so allow room for the two varints on top of the digest.
    let frame_limits = Limits {
        max_digest_len: limits.max_digest_len.saturating_add(2 * varint::MAX_LEN),
    };
    let bytes = if hex_codec::validate(text, &frame_limits).is_ok() {
        debug!("decoding {:?} as hex", text);
        hex_codec::decode(text)?
    } else {
        let max_chars = base58::max_encoded_len(frame_limits.max_digest_len);
        if text.len() > max_chars {
            return Err(Error::MalformedEncoding(format!(
                "base58 text of {} characters is longer than the maximum of {}",
                text.len(),
                max_chars
            )));
        }
        debug!("decoding {:?} as base58", text);
        base58::decode(text)?
    };
    Multihash::from_bytes_with_limits(&bytes, limits)
}
