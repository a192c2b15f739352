//
// Copyright 2020 VIM Format Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.
//

//! BFAST — Binary Format for Array Streaming and Transmission.
//!
//! A BFAST blob is a 32-byte header, an offset table of `(begin, end)` pairs,
//! and a payload region of 64-byte-aligned named byte arrays. The first array
//! is always a NUL-terminated names buffer; pairing the remaining arrays with
//! the parsed names yields the container's public `buffers` view.

mod error;
mod parser;

pub use error::Error;

use std::fs;
use std::io::Write;
use std::path::Path;

/// Magic number identifying a same-endian BFAST blob.
pub const MAGIC: u64 = 0xBFA5;

/// The magic number a same-endian reader observes if the blob was written
/// on a machine of the opposite endianness.
pub const SWAPPED_MAGIC: u64 = 0xA5BF_0000_0000_0000;

/// Size, in bytes, of the fixed header.
pub const HEADER_SIZE: usize = 32;

/// Size, in bytes, of a single `(begin, end)` offset table entry.
pub const ARRAY_OFFSET_SIZE: usize = 16;

/// Offset, relative to the start of the blob, at which the offset table begins.
pub const ARRAY_OFFSETS_START: usize = 32;

/// All array payloads begin on a multiple of this many bytes.
pub const ALIGNMENT: usize = 64;

/// Returns whether `n` is a multiple of [`ALIGNMENT`].
pub const fn is_aligned(n: usize) -> bool {
    n % ALIGNMENT == 0
}

/// Rounds `n` up to the next multiple of [`ALIGNMENT`].
pub const fn aligned_value(n: usize) -> usize {
    if is_aligned(n) {
        n
    } else {
        n + ALIGNMENT - (n % ALIGNMENT)
    }
}

/// A parsed BFAST container: an ordered list of named byte buffers.
///
/// Generic over the storage `B` so the same type serves both the borrowing
/// entry point ([`unpack`], `B = &[u8]`) and the owning one ([`unpack_owned`],
/// `B = Vec<u8>`). Either way, buffer slices are recomputed on demand from
/// `B` and so never outlive the container that holds it.
#[derive(Debug, Clone)]
pub struct Bfast<B: AsRef<[u8]>> {
    data: B,
    names: Vec<String>,
    ranges: Vec<(usize, usize)>,
}

impl<B: AsRef<[u8]>> Bfast<B> {
    /// The number of named buffers (excluding the internal name buffer).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether this container has no buffers.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the buffer at `index`, if any, as `(name, bytes)`.
    pub fn buffer(&self, index: usize) -> Option<(&str, &[u8])> {
        let (begin, end) = *self.ranges.get(index)?;
        Some((self.names[index].as_str(), &self.data.as_ref()[begin..end]))
    }

    /// Returns the bytes of the first buffer named `name`, if present.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        let index = self.names.iter().position(|n| n == name)?;
        let (begin, end) = self.ranges[index];
        Some(&self.data.as_ref()[begin..end])
    }

    /// Iterates over all buffers in declaration order.
    pub fn buffers(&self) -> impl Iterator<Item = (&str, &[u8])> {
        let data = self.data.as_ref();
        self.names
            .iter()
            .zip(self.ranges.iter())
            .map(move |(name, &(begin, end))| (name.as_str(), &data[begin..end]))
    }
}

/// Parses `data` into a BFAST container that borrows from it.
///
/// Zero-copy: every returned buffer is a slice into `data`.
pub fn unpack(data: &[u8]) -> Result<Bfast<&[u8]>, Error> {
    let (names, ranges) = unpack_raw(data)?;
    Ok(Bfast { data, names, ranges })
}

/// Parses `data` into a BFAST container that owns it.
///
/// Use this when the caller cannot guarantee the input byte buffer outlives
/// the parsed container.
pub fn unpack_owned(data: Vec<u8>) -> Result<Bfast<Vec<u8>>, Error> {
    let (names, ranges) = unpack_raw(&data)?;
    Ok(Bfast { data, names, ranges })
}

/// Shared unpack logic: validates the header and offset table, splits the
/// name buffer, and returns the parsed names paired with the remaining
/// buffers' byte ranges.
fn unpack_raw(data: &[u8]) -> Result<(Vec<String>, Vec<(usize, usize)>), Error> {
    if data.len() < HEADER_SIZE {
        return Err(Error::Truncated);
    }

    let (_, raw_header) = parser::header(data).map_err(|_| Error::Truncated)?;
    if raw_header.magic != MAGIC {
        if raw_header.magic == SWAPPED_MAGIC {
            return Err(Error::DifferentEndian);
        }
        return Err(Error::BadMagic);
    }

    let blob_size = data.len() as u64;
    if raw_header.data_end < raw_header.data_start || raw_header.data_end > blob_size {
        return Err(Error::OffsetOutOfRange {
            index: None,
            begin: raw_header.data_start,
            end: raw_header.data_end,
            blob_size,
        });
    }

    let num_arrays = raw_header.num_arrays as usize;
    if num_arrays == 0 {
        return Ok((Vec::new(), Vec::new()));
    }

    let offset_table_bytes = &data[ARRAY_OFFSETS_START..];
    let (_, offsets) = parser::offset_table(num_arrays)(offset_table_bytes)
        .map_err(|_| Error::Truncated)?;

    let mut ranges = Vec::with_capacity(num_arrays);
    let mut previous_end: u64 = 0;
    for (index, &(begin, end)) in offsets.iter().enumerate() {
        if begin > end || end > blob_size {
            return Err(Error::OffsetOutOfRange { index: Some(index), begin, end, blob_size });
        }
        if index > 0 && begin < previous_end {
            return Err(Error::OffsetOrder { index });
        }
        ranges.push((begin as usize, end as usize));
        previous_end = end;
    }

    let (name_begin, name_end) = ranges[0];
    let names = split_names(&data[name_begin..name_end]);
    if names.len() != ranges.len() - 1 {
        return Err(Error::NameCountMismatch { expected: ranges.len() - 1, found: names.len() });
    }

    Ok((names, ranges[1..].to_vec()))
}

/// Splits a buffer of NUL-terminated strings into a `Vec<String>`.
fn split_names(data: &[u8]) -> Vec<String> {
    if data.is_empty() {
        return Vec::new();
    }
    // Every name is NUL-terminated, so the final byte is a terminator rather
    // than the start of another name; drop it before splitting.
    let trimmed = if data.last() == Some(&0) { &data[..data.len() - 1] } else { data };
    trimmed
        .split(|&b| b == 0)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect()
}

/// Packs an ordered list of named buffers into a single BFAST blob. An
/// empty buffer list produces the degenerate 64-byte blob with
/// `num_arrays = 0` (no name buffer is emitted in that case).
pub fn pack(buffers: &[(&str, &[u8])]) -> Vec<u8> {
    if buffers.is_empty() {
        let mut out = vec![0u8; aligned_value(HEADER_SIZE)];
        out[0..8].copy_from_slice(&MAGIC.to_le_bytes());
        return out;
    }

    let mut name_data = Vec::new();
    for (name, _) in buffers {
        name_data.extend_from_slice(name.as_bytes());
        name_data.push(0);
    }

    let n_arrays = 1 + buffers.len();
    let mut sizes = Vec::with_capacity(n_arrays);
    sizes.push(name_data.len());
    sizes.extend(buffers.iter().map(|(_, data)| data.len()));

    let mut offsets = Vec::with_capacity(n_arrays);
    let mut cursor = aligned_value(HEADER_SIZE + ARRAY_OFFSET_SIZE * n_arrays);
    for &size in &sizes {
        let begin = cursor;
        let end = begin + size;
        offsets.push((begin, end));
        cursor = aligned_value(end);
    }

    let total_size = aligned_value(offsets.last().unwrap().1);
    let mut out = vec![0u8; total_size];

    let data_start = offsets.first().unwrap().0 as u64;
    let data_end = offsets.last().unwrap().1 as u64;
    out[0..8].copy_from_slice(&MAGIC.to_le_bytes());
    out[8..16].copy_from_slice(&data_start.to_le_bytes());
    out[16..24].copy_from_slice(&data_end.to_le_bytes());
    out[24..32].copy_from_slice(&(n_arrays as u64).to_le_bytes());

    for (index, &(begin, end)) in offsets.iter().enumerate() {
        let entry_at = ARRAY_OFFSETS_START + index * ARRAY_OFFSET_SIZE;
        out[entry_at..entry_at + 8].copy_from_slice(&(begin as u64).to_le_bytes());
        out[entry_at + 8..entry_at + 16].copy_from_slice(&(end as u64).to_le_bytes());
    }

    out[offsets[0].0..offsets[0].1].copy_from_slice(&name_data);
    for (i, (_, data)) in buffers.iter().enumerate() {
        let (begin, end) = offsets[i + 1];
        out[begin..end].copy_from_slice(data);
    }

    out
}

/// An append-style builder for assembling a blob incrementally. Buffers
/// are written in the order added.
#[derive(Debug, Default)]
pub struct Builder<'a> {
    buffers: Vec<(&'a str, &'a [u8])>,
}

impl<'a> Builder<'a> {
    pub fn new() -> Self {
        Builder::default()
    }

    /// Appends a named buffer. Returns `self` to allow chaining.
    pub fn add(&mut self, name: &'a str, data: &'a [u8]) -> &mut Self {
        self.buffers.push((name, data));
        self
    }

    /// Consumes the builder, producing the packed blob.
    pub fn pack(&self) -> Vec<u8> {
        pack(&self.buffers)
    }
}

/// Reads and parses a BFAST blob from `path`, owning the file's bytes.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Bfast<Vec<u8>>, Error> {
    let data = fs::read(path)?;
    unpack_owned(data)
}

/// Packs `buffers` and writes the result to `path`, fsyncing before
/// returning so the write is durable on success.
pub fn write_file<P: AsRef<Path>>(path: P, buffers: &[(&str, &[u8])]) -> Result<(), Error> {
    let data = pack(buffers);
    let mut file = fs::File::create(path)?;
    file.write_all(&data)?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryInto;

    #[test]
    fn test_pack_empty() {
        let blob = pack(&[]);
        assert_eq!(blob.len(), 64);
        assert_eq!(&blob[0..8], &MAGIC.to_le_bytes());
        assert_eq!(&blob[8..32], &[0u8; 24]);
        assert_eq!(&blob[32..64], &[0u8; 32]);
    }

    #[test]
    fn test_unpack_empty() {
        let blob = pack(&[]);
        let bfast = unpack(&blob).unwrap();
        assert_eq!(bfast.len(), 0);
        assert!(bfast.is_empty());
    }

    #[test]
    fn test_pack_single_buffer() {
        let blob = pack(&[("hello", b"world")]);
        // header: magic, data_start=64, data_end=133, num_arrays=2
        assert_eq!(&blob[0..8], &MAGIC.to_le_bytes());
        assert_eq!(u64::from_le_bytes(blob[8..16].try_into().unwrap()), 64);
        assert_eq!(u64::from_le_bytes(blob[16..24].try_into().unwrap()), 133);
        assert_eq!(u64::from_le_bytes(blob[24..32].try_into().unwrap()), 2);
        // offset table: (64, 70) for the name buffer, (128, 133) for "world"
        assert_eq!(u64::from_le_bytes(blob[32..40].try_into().unwrap()), 64);
        assert_eq!(u64::from_le_bytes(blob[40..48].try_into().unwrap()), 70);
        assert_eq!(u64::from_le_bytes(blob[48..56].try_into().unwrap()), 128);
        assert_eq!(u64::from_le_bytes(blob[56..64].try_into().unwrap()), 133);
    }

    #[test]
    fn test_roundtrip_single_buffer() {
        let blob = pack(&[("hello", b"world")]);
        let bfast = unpack(&blob).unwrap();
        assert_eq!(bfast.len(), 1);
        assert_eq!(bfast.buffer(0), Some(("hello", &b"world"[..])));
        assert_eq!(bfast.get("hello"), Some(&b"world"[..]));
    }

    #[test]
    fn test_roundtrip_preserves_order_and_names() {
        let buffers: Vec<(&str, &[u8])> =
            vec![("a", b"1"), ("bb", b"22"), ("ccc", b"333")];
        let blob = pack(&buffers);
        let bfast = unpack(&blob).unwrap();
        let collected: Vec<(&str, &[u8])> = bfast.buffers().collect();
        assert_eq!(collected, buffers);
    }

    #[test]
    fn test_every_offset_is_aligned() {
        let buffers: Vec<(&str, &[u8])> =
            vec![("one", b"x"), ("two", b"yz"), ("three", &[7u8; 200])];
        let blob = pack(&buffers);
        let num_arrays = u64::from_le_bytes(blob[24..32].try_into().unwrap()) as usize;
        for index in 0..num_arrays {
            let entry_at = ARRAY_OFFSETS_START + index * ARRAY_OFFSET_SIZE;
            let begin = u64::from_le_bytes(blob[entry_at..entry_at + 8].try_into().unwrap());
            let end = u64::from_le_bytes(blob[entry_at + 8..entry_at + 16].try_into().unwrap());
            assert!(is_aligned(begin as usize), "offset {} begin {} not aligned", index, begin);
            assert!(end >= begin);
        }
        assert!(is_aligned(blob.len()));
    }

    #[test]
    fn test_idempotent_unpack() {
        let buffers: Vec<(&str, &[u8])> = vec![("x", b"abc"), ("y", b"defgh")];
        let blob1 = pack(&buffers);
        let unpacked1_bfast = unpack(&blob1).unwrap();
        let unpacked1: Vec<(&str, &[u8])> = unpacked1_bfast.buffers().collect();
        let repacked: Vec<(&str, &[u8])> = unpacked1.clone();
        let blob2 = pack(&repacked);
        assert_eq!(blob1, blob2);
        let unpacked2_bfast = unpack(&blob2).unwrap();
        let unpacked2: Vec<(&str, &[u8])> = unpacked2_bfast.buffers().collect();
        assert_eq!(unpacked1, unpacked2);
    }

    #[test]
    fn test_owned_unpack() {
        let blob = pack(&[("k", b"v")]);
        let bfast = unpack_owned(blob).unwrap();
        assert_eq!(bfast.get("k"), Some(&b"v"[..]));
    }

    #[test]
    fn test_truncated() {
        let short = [0u8; 10];
        assert!(matches!(unpack(&short), Err(Error::Truncated)));
    }

    #[test]
    fn test_bad_magic() {
        let mut blob = pack(&[]);
        blob[0..8].copy_from_slice(&0xDEAD_BEEFu64.to_le_bytes());
        assert!(matches!(unpack(&blob), Err(Error::BadMagic)));
    }

    #[test]
    fn test_different_endian() {
        let mut blob = pack(&[]);
        blob[0..8].copy_from_slice(&SWAPPED_MAGIC.to_le_bytes());
        assert!(matches!(unpack(&blob), Err(Error::DifferentEndian)));
    }

    #[test]
    fn test_offset_order_violation() {
        let mut blob = pack(&[("a", b"1"), ("b", b"2")]);
        // corrupt the third offset entry's begin to precede the second's end.
        let entry_at = ARRAY_OFFSETS_START + 2 * ARRAY_OFFSET_SIZE;
        blob[entry_at..entry_at + 8].copy_from_slice(&0u64.to_le_bytes());
        assert!(matches!(unpack(&blob), Err(Error::OffsetOrder { index: 2 })));
    }
}
