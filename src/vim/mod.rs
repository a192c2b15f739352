//
// Copyright 2020 VIM Format Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.
//

//! VIM — a scene format layered on [`crate::bfast`]: a header, a node
//! table, a string pool, and nested BFAST containers for geometry (a G3D),
//! assets, and entity tables.

mod entities;
mod error;
mod header;
mod nodes;

pub use entities::{EntityTable, Property};
pub use error::VimError;
pub use header::Header;
pub use nodes::Node;

use std::fs;
use std::path::Path;

use crate::bfast;
use crate::g3d::G3d;

/// A decoded VIM scene. Fields default to empty/absent when their section
/// is missing from the file; unrecognized top-level buffer names are
/// ignored rather than treated as errors.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub header: Header,
    pub nodes: Vec<Node>,
    pub strings: Vec<String>,
    pub geometry: Option<G3d>,
    pub assets: Option<bfast::Bfast<Vec<u8>>>,
    pub entities: Vec<(String, EntityTable)>,
    /// `Success` unless the header carried no `vim` key, in which case this
    /// is `NoVersionInfo` and every other field above is still populated
    /// from whatever sections were present.
    pub status: VimError,
}

impl Scene {
    /// Reads and decodes a `.vim` file.
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Scene, VimError> {
        let data = fs::read(path).map_err(|_| VimError::FileNotRecognized)?;
        Scene::from_bytes(&data)
    }

    /// Decodes a VIM scene from an already-read top-level blob.
    pub fn from_bytes(data: &[u8]) -> Result<Scene, VimError> {
        let top = bfast::unpack(data).map_err(|_| VimError::FileNotRecognized)?;

        let mut scene = Scene::default();

        for (name, bytes) in top.buffers() {
            match name {
                "header" => {
                    scene.header = header::parse(bytes);
                    if !scene.header.has_version {
                        log::debug!("header has no 'vim' key; continuing without version info");
                        scene.status = VimError::NoVersionInfo;
                    }
                }
                "nodes" => {
                    scene.nodes =
                        nodes::parse_nodes(bytes).ok_or(VimError::Failed)?;
                }
                "strings" => {
                    scene.strings = split_strings(bytes);
                }
                "geometry" => {
                    let inner = bfast::unpack(bytes)
                        .map_err(|_| VimError::GeometryLoadingException)?;
                    scene.geometry = Some(
                        G3d::from_bfast(&inner).map_err(|_| VimError::GeometryLoadingException)?,
                    );
                }
                "assets" => {
                    scene.assets = Some(
                        bfast::unpack_owned(bytes.to_vec())
                            .map_err(|_| VimError::AssetLoadingException)?,
                    );
                }
                "entities" => {
                    scene.entities = entities::parse_entities(bytes)?;
                }
                other => {
                    log::debug!("ignoring unrecognized VIM top-level buffer {:?}", other);
                }
            }
        }

        Ok(scene)
    }
}

/// Splits a NUL-terminated string pool buffer into owned strings.
fn split_strings(data: &[u8]) -> Vec<String> {
    let data = if data.last() == Some(&0) { &data[..data.len() - 1] } else { data };
    if data.is_empty() {
        return Vec::new();
    }
    data.split(|&b| b == 0).map(|chunk| String::from_utf8_lossy(chunk).into_owned()).collect()
}
