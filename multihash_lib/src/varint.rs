//! Unsigned LEB128 varints, as used by the multiformats family.
//!
//! Buffer encoding and decoding go through `unsigned_varint`. Reading from a stream is done here
//! byte by byte, so nothing past the varint is consumed.

use std::io;

use byteorder::ReadBytesExt;

use crate::error::{Error, Result};

/// Longest possible encoding of a u64.
pub const MAX_LEN: usize = 10;

pub fn encode(value: u64) -> Vec<u8> {
    let mut buf = unsigned_varint::encode::u64_buffer();
    unsigned_varint::encode::u64(value, &mut buf).to_vec()
}

pub fn encode_into(value: u64, out: &mut Vec<u8>) {
    let mut buf = unsigned_varint::encode::u64_buffer();
    out.extend_from_slice(unsigned_varint::encode::u64(value, &mut buf));
}

pub fn encoded_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.max(1).div_ceil(7)
}

/// Decodes a varint from the front of `bytes`, returning it with the unread remainder.
pub fn decode(bytes: &[u8]) -> Result<(u64, &[u8])> {
    unsigned_varint::decode::u64(bytes)
        .map_err(|e| Error::MalformedEncoding(format!("bad varint: {}", e)))
}

/// Reads exactly one varint off `read`.
///
/// End of stream before the final byte is a `MalformedEncoding`, as is a varint that does not
/// fit in a u64.
pub fn read<R: io::Read + ?Sized>(read: &mut R) -> Result<u64> {
    let mut buf = [0u8; MAX_LEN];
    for i in 0..MAX_LEN {
        buf[i] = read.read_u8().map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => {
                Error::MalformedEncoding("stream ended inside a varint".to_string())
            }
            _ => Error::Io(e),
        })?;
        if unsigned_varint::decode::is_last(buf[i]) {
            return decode(&buf[..=i]).map(|(value, _)| value);
        }
    }
    Err(Error::MalformedEncoding(format!(
        "varint longer than {} bytes",
        MAX_LEN
    )))
}
