//
// Copyright 2020 VIM Format Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.
//

use thiserror::Error;

/// Failure modes for `bfast` packing and unpacking.
///
/// Every variant corresponds to a single structural invariant of the
/// container: the blob is rejected at the first violation encountered,
/// never partially accepted. `index: None` marks a violation of the
/// header-level `data_start`/`data_end` bounds rather than a specific
/// array's offset entry.
#[derive(Error, Debug)]
pub enum Error {
    /// Fewer than 32 bytes were supplied; there is no room for a header.
    #[error("truncated: blob is smaller than the 32-byte header")]
    Truncated,

    /// The header's magic number did not match `MAGIC` or its byte-swapped form.
    #[error("bad magic number: not a BFAST blob")]
    BadMagic,

    /// The header's magic number is `MAGIC` byte-swapped, indicating the
    /// blob was produced on a machine with the opposite endianness.
    #[error("magic number is byte-swapped: blob was written with different endianness")]
    DifferentEndian,

    /// An offset is malformed (`begin > end`) or points outside of the blob.
    /// `index = None` means the violation is in the header's `data_start`/
    /// `data_end` fields rather than a specific array offset.
    #[error("offset {index:?}: ({begin}, {end}) is out of range of blob size {blob_size}")]
    OffsetOutOfRange {
        index: Option<usize>,
        begin: u64,
        end: u64,
        blob_size: u64,
    },

    /// An offset table entry overlaps with, or precedes, the previous one.
    #[error("array {index}: offset begins before the end of the previous array")]
    OffsetOrder { index: usize },

    /// The count of NUL-terminated names in buffer 0 did not equal `num_arrays - 1`.
    #[error("name buffer contains {found} names, expected {expected}")]
    NameCountMismatch { expected: usize, found: usize },

    /// An I/O failure occurred while reading or writing a BFAST file.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
