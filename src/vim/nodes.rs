//
// Copyright 2020 VIM Format Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.
//

//! VIM node records: a flat array of 76-byte POD structures.

use nom::multi::count;
use nom::number::complete::{le_f32, le_i32};
use nom::sequence::tuple;
use nom::IResult;

/// Size, in bytes, of a single node record: 3 × i32 + 16 × f32.
pub const NODE_RECORD_SIZE: usize = 3 * 4 + 16 * 4;

/// A scene graph node: its parent, the geometry/instance it references,
/// and its column-major 4x4 transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub parent: i32,
    pub geometry: i32,
    pub instance: i32,
    pub transform: [f32; 16],
}

fn node(input: &[u8]) -> IResult<&[u8], Node> {
    let (input, (parent, geometry, instance)) = tuple((le_i32, le_i32, le_i32))(input)?;
    let (input, values) = count(le_f32, 16)(input)?;
    let mut transform = [0.0f32; 16];
    transform.copy_from_slice(&values);
    Ok((input, Node { parent, geometry, instance, transform }))
}

/// Reinterprets a `nodes` buffer as a contiguous array of [`Node`] records.
pub fn parse_nodes(data: &[u8]) -> Option<Vec<Node>> {
    if data.len() % NODE_RECORD_SIZE != 0 {
        return None;
    }
    let (_, nodes) = count(node, data.len() / NODE_RECORD_SIZE)(data).ok()?;
    Some(nodes)
}
