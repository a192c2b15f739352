//
// Copyright 2020 VIM Format Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.
//

//! Low-level byte-level parsers for the fixed-layout parts of a BFAST blob:
//! the 32-byte header and the `num_arrays`-entry offset table that follows it.
//!
//! All integers are little-endian; unlike a tagged, variable-width format,
//! these fields are always exactly 8 bytes, so no variable-width helpers
//! are needed.

use nom::{
    combinator::map,
    multi::count,
    number::complete::le_u64,
    sequence::tuple,
    IResult,
};

/// The raw contents of the 32-byte BFAST header, before magic validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHeader {
    pub magic: u64,
    pub data_start: u64,
    pub data_end: u64,
    pub num_arrays: u64,
}

/// Parses the fixed 32-byte header: four little-endian `u64` fields.
pub fn header(input: &[u8]) -> IResult<&[u8], RawHeader> {
    map(
        tuple((le_u64, le_u64, le_u64, le_u64)),
        |(magic, data_start, data_end, num_arrays)| RawHeader {
            magic,
            data_start,
            data_end,
            num_arrays,
        },
    )(input)
}

/// Returns a parser for `n` offset table entries, each a `(begin, end)` pair
/// of little-endian `u64` values, relative to the start of the blob.
pub fn offset_table(n: usize) -> impl Fn(&[u8]) -> IResult<&[u8], Vec<(u64, u64)>> {
    move |input: &[u8]| count(map(tuple((le_u64, le_u64)), |(b, e)| (b, e)), n)(input)
}
