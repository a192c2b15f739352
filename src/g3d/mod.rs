//
// Copyright 2020 VIM Format Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.
//

//! G3D — a geometry-attribute format layered on [`crate::bfast`]. A G3D is
//! a BFAST whose first buffer is a free-form metadata string and whose
//! remaining buffers are typed numeric attributes, each named by a
//! descriptor string.

mod descriptor;
pub mod descriptors;
mod error;

pub use descriptor::{Association, AttributeDescriptor, DataType};
pub use error::Error;

use std::fs;
use std::path::Path;

use crate::bfast;

/// A single typed attribute: its descriptor plus raw payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub descriptor: AttributeDescriptor,
    pub data: Vec<u8>,
}

impl Attribute {
    /// The number of elements in the payload (`byte_size / element_size`).
    ///
    /// # Panics
    ///
    /// Panics if the payload is not a whole number of elements; construct
    /// attributes through [`G3d::from_bfast`] or with payloads already
    /// validated against [`AttributeDescriptor::element_size`].
    pub fn num_elements(&self) -> usize {
        self.data.len() / self.descriptor.element_size()
    }
}

/// A decoded G3D: metadata text plus an ordered list of attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct G3d {
    pub metadata: String,
    pub attributes: Vec<Attribute>,
}

impl G3d {
    pub fn new(metadata: impl Into<String>) -> Self {
        G3d { metadata: metadata.into(), attributes: Vec::new() }
    }

    /// Appends an attribute, returning `self` to allow chaining.
    pub fn add_attribute(&mut self, descriptor: AttributeDescriptor, data: Vec<u8>) -> &mut Self {
        self.attributes.push(Attribute { descriptor, data });
        self
    }

    /// Decodes a G3D from an already-unpacked BFAST container.
    pub fn from_bfast<B: AsRef<[u8]>>(bfast: &bfast::Bfast<B>) -> Result<Self, Error> {
        if bfast.is_empty() {
            return Ok(G3d::default());
        }

        let (_, meta_bytes) = bfast.buffer(0).expect("checked non-empty above");
        let metadata = String::from_utf8_lossy(meta_bytes).into_owned();

        let mut attributes = Vec::with_capacity(bfast.len().saturating_sub(1));
        for index in 1..bfast.len() {
            let (name, data) = bfast.buffer(index).expect("index within bounds");
            let descriptor = AttributeDescriptor::parse(name)?;
            let element_size = descriptor.element_size();
            if data.len() % element_size != 0 {
                return Err(Error::BadElementAlignment { byte_size: data.len(), element_size });
            }
            attributes.push(Attribute { descriptor, data: data.to_vec() });
        }

        Ok(G3d { metadata, attributes })
    }

    /// Encodes this G3D as a BFAST blob: buffer 0 is `("meta", metadata)`,
    /// followed by one buffer per attribute named by its descriptor string.
    pub fn pack(&self) -> Vec<u8> {
        let descriptors: Vec<String> =
            self.attributes.iter().map(|a| a.descriptor.to_string()).collect();
        let mut buffers: Vec<(&str, &[u8])> = Vec::with_capacity(1 + self.attributes.len());
        buffers.push(("meta", self.metadata.as_bytes()));
        for (descriptor, attribute) in descriptors.iter().zip(self.attributes.iter()) {
            buffers.push((descriptor.as_str(), attribute.data.as_slice()));
        }
        bfast::pack(&buffers)
    }

    /// Reads a file and decodes it as a G3D.
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let data = fs::read(path).map_err(bfast::Error::from)?;
        let raw = bfast::unpack_owned(data)?;
        G3d::from_bfast(&raw)
    }

    /// Encodes and writes this G3D to a file.
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let descriptors: Vec<String> =
            self.attributes.iter().map(|a| a.descriptor.to_string()).collect();
        let mut buffers: Vec<(&str, &[u8])> = Vec::with_capacity(1 + self.attributes.len());
        buffers.push(("meta", self.metadata.as_bytes()));
        for (descriptor, attribute) in descriptors.iter().zip(self.attributes.iter()) {
            buffers.push((descriptor.as_str(), attribute.data.as_slice()));
        }
        bfast::write_file(path, &buffers)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position_descriptor() -> AttributeDescriptor {
        AttributeDescriptor::new(Association::Vertex, "position", 0, DataType::Float32, 3)
    }

    #[test]
    fn test_roundtrip_through_bfast() {
        let mut g3d = G3d::new("{\"version\":\"1.0\"}");
        let positions: Vec<u8> = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]
            .iter()
            .flat_map(|f| f.to_le_bytes())
            .collect();
        g3d.add_attribute(position_descriptor(), positions.clone());

        let packed = g3d.pack();
        let raw = bfast::unpack(&packed).unwrap();
        let decoded = G3d::from_bfast(&raw).unwrap();

        assert_eq!(decoded.metadata, g3d.metadata);
        assert_eq!(decoded.attributes.len(), 1);
        assert_eq!(decoded.attributes[0].descriptor, position_descriptor());
        assert_eq!(decoded.attributes[0].data, positions);
        assert_eq!(decoded.attributes[0].num_elements(), 2);
    }

    #[test]
    fn test_preserves_attribute_order() {
        let mut g3d = G3d::new("meta");
        g3d.add_attribute(
            AttributeDescriptor::new(Association::Vertex, "position", 0, DataType::Float32, 3),
            vec![0u8; 12],
        );
        g3d.add_attribute(
            AttributeDescriptor::new(Association::Corner, "index", 0, DataType::Int32, 1),
            vec![0u8; 4],
        );
        g3d.add_attribute(
            AttributeDescriptor::new(Association::Vertex, "uv", 1, DataType::Float32, 2),
            vec![0u8; 8],
        );

        let packed = g3d.pack();
        let decoded = G3d::from_bfast(&bfast::unpack(&packed).unwrap()).unwrap();
        let semantics: Vec<&str> =
            decoded.attributes.iter().map(|a| a.descriptor.semantic.as_str()).collect();
        assert_eq!(semantics, vec!["position", "index", "uv"]);
    }

    #[test]
    fn test_bad_element_alignment() {
        // 20 bytes is not a multiple of 12 (float32 * arity 3).
        let buffers: Vec<(&str, &[u8])> =
            vec![("meta", b""), ("g3d:vertex:position:0:float32:3", &[0u8; 20])];
        let packed = bfast::pack(&buffers);
        let raw = bfast::unpack(&packed).unwrap();
        let err = G3d::from_bfast(&raw).unwrap_err();
        assert!(matches!(err, Error::BadElementAlignment { byte_size: 20, element_size: 12 }));
    }

    #[test]
    fn test_empty_g3d() {
        let packed = bfast::pack(&[]);
        let raw = bfast::unpack(&packed).unwrap();
        let g3d = G3d::from_bfast(&raw).unwrap();
        assert_eq!(g3d, G3d::default());
    }

    #[test]
    fn test_descriptor_constants_parse() {
        for s in [
            descriptors::VERTEX_POSITION,
            descriptors::VERTEX_NORMAL,
            descriptors::VERTEX_UV0,
            descriptors::VERTEX_UV1,
            descriptors::VERTEX_COLOR,
            descriptors::VERTEX_TANGENT,
            descriptors::VERTEX_BITANGENT,
            descriptors::VERTEX_WEIGHT,
            descriptors::CORNER_INDEX,
            descriptors::FACE_SIZE,
            descriptors::FACE_MATERIAL_ID,
            descriptors::FACE_OBJECT_ID,
            descriptors::FACE_GROUP_ID,
            descriptors::GROUP_INDEX_OFFSET,
            descriptors::POINT_VELOCITY,
            descriptors::POINT_DENSITY,
        ] {
            let parsed = AttributeDescriptor::parse(s).unwrap();
            assert_eq!(parsed.to_string(), s);
        }
    }
}
