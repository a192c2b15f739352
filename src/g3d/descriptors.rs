//
// Copyright 2020 VIM Format Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.
//

//! Well-known attribute descriptor string constants for the common
//! geometric attributes: positions, normals, uvs, colors, tangents,
//! indices, and per-face/per-group identifiers. These are opaque string
//! literals consumed as BFAST buffer names; there is no runtime registry.

/// `g3d:vertex:position:0:float32:3` — vertex positions, xyz.
pub const VERTEX_POSITION: &str = "g3d:vertex:position:0:float32:3";

/// `g3d:vertex:normal:0:float32:3` — per-vertex normals.
pub const VERTEX_NORMAL: &str = "g3d:vertex:normal:0:float32:3";

/// `g3d:vertex:uv:0:float32:2` — the first UV channel.
pub const VERTEX_UV0: &str = "g3d:vertex:uv:0:float32:2";

/// `g3d:vertex:uv:1:float32:2` — the second UV channel.
pub const VERTEX_UV1: &str = "g3d:vertex:uv:1:float32:2";

/// `g3d:vertex:color:0:float32:4` — per-vertex rgba color.
pub const VERTEX_COLOR: &str = "g3d:vertex:color:0:float32:4";

/// `g3d:vertex:tangent:0:float32:3` — per-vertex tangent.
pub const VERTEX_TANGENT: &str = "g3d:vertex:tangent:0:float32:3";

/// `g3d:vertex:bitangent:0:float32:3` — per-vertex bitangent.
pub const VERTEX_BITANGENT: &str = "g3d:vertex:bitangent:0:float32:3";

/// `g3d:vertex:weight:0:float32:1` — per-vertex skin weight.
pub const VERTEX_WEIGHT: &str = "g3d:vertex:weight:0:float32:1";

/// `g3d:corner:index:0:int32:1` — the corner-to-vertex index buffer.
pub const CORNER_INDEX: &str = "g3d:corner:index:0:int32:1";

/// `g3d:face:facesize:0:int32:1` — the number of corners per face.
pub const FACE_SIZE: &str = "g3d:face:facesize:0:int32:1";

/// `g3d:face:materialid:0:int32:1` — per-face material id.
pub const FACE_MATERIAL_ID: &str = "g3d:face:materialid:0:int32:1";

/// `g3d:face:objectid:0:int32:1` — per-face object id.
pub const FACE_OBJECT_ID: &str = "g3d:face:objectid:0:int32:1";

/// `g3d:face:groupid:0:int32:1` — per-face group id.
pub const FACE_GROUP_ID: &str = "g3d:face:groupid:0:int32:1";

/// `g3d:group:indexoffset:0:int32:1` — per-group offset into the corner index buffer.
pub const GROUP_INDEX_OFFSET: &str = "g3d:group:indexoffset:0:int32:1";

/// `g3d:all:velocity:0:float32:3` — per-point velocity, for particle data.
pub const POINT_VELOCITY: &str = "g3d:all:velocity:0:float32:3";

/// `g3d:all:density:0:float32:1` — per-point density, for particle data.
pub const POINT_DENSITY: &str = "g3d:all:density:0:float32:1";
