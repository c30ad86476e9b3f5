//! zlib compression stage.
//!
//! zlib checksums its two-byte header and carries an Adler-32 of the
//! uncompressed bytes in its trailer, and has no free-form header
//! fields, so a damaged stream is reported as `CorruptPayload`.

use std::io::{Read, Write};

use flate2::bufread::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::errors::{BlobError, Result};

/// Highest (slowest, smallest) compression level.
pub const MAX_LEVEL: u32 = 9;

/// Compress `data` at `level` (0..=9).
pub fn compress(data: &[u8], level: u32) -> Result<Vec<u8>> {
    if level > MAX_LEVEL {
        return Err(BlobError::InvalidInput(format!(
            "compression level must be 0..={MAX_LEVEL}, got {level}"
        )));
    }

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Reverse `compress`.
///
/// Bad magic, a broken deflate stream, a checksum or length mismatch,
/// and bytes after the zlib trailer are all `CorruptPayload`.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(BlobError::CorruptPayload("empty compressed stream".into()));
    }

    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| BlobError::CorruptPayload(format!("zlib: {e}")))?;

    let rest = decoder.into_inner();
    if !rest.is_empty() {
        return Err(BlobError::CorruptPayload(format!(
            "{} trailing bytes after compressed stream",
            rest.len()
        )));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_is_identity() {
        let data = b"the force will be with you... always".repeat(50);
        for level in [0, 1, 6, MAX_LEVEL] {
            let packed = compress(&data, level).unwrap();
            assert_eq!(decompress(&packed).unwrap(), data, "level {level}");
        }
    }

    #[test]
    fn repetitive_data_shrinks() {
        let data = vec![b'a'; 10_000];
        assert!(compress(&data, MAX_LEVEL).unwrap().len() < 200);
    }

    #[test]
    fn empty_input_roundtrips() {
        let packed = compress(b"", MAX_LEVEL).unwrap();
        assert!(decompress(&packed).unwrap().is_empty());
    }

    #[test]
    fn rejects_bad_level() {
        assert!(matches!(
            compress(b"x", 10),
            Err(BlobError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            decompress(b"definitely not zlib"),
            Err(BlobError::CorruptPayload(_))
        ));
        assert!(matches!(decompress(b""), Err(BlobError::CorruptPayload(_))));
    }

    #[test]
    fn rejects_checksum_mismatch() {
        let mut packed = compress(b"some payload bytes here", MAX_LEVEL).unwrap();
        // Adler-32 is the 4-byte trailer.
        let sum_at = packed.len() - 4;
        packed[sum_at] ^= 0xFF;
        assert!(matches!(
            decompress(&packed),
            Err(BlobError::CorruptPayload(_))
        ));
    }

    #[test]
    fn rejects_damaged_header() {
        let packed = compress(b"abc", MAX_LEVEL).unwrap();
        for i in 0..2 {
            let mut bad = packed.clone();
            bad[i] ^= 0x01;
            assert!(
                matches!(decompress(&bad), Err(BlobError::CorruptPayload(_))),
                "header byte {i}"
            );
        }
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut packed = compress(b"abc", MAX_LEVEL).unwrap();
        packed.push(0);
        assert!(matches!(
            decompress(&packed),
            Err(BlobError::CorruptPayload(_))
        ));
    }
}
