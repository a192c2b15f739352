//
// Copyright 2020 VIM Format Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.
//

//! A three-layer binary container stack for 3D geometric data:
//!
//! - [`bfast`] — a generic named-byte-array container with 64-byte
//!   alignment and zero-copy reads.
//! - [`g3d`] — a BFAST-layered geometry attribute format.
//! - [`vim`] — a BFAST-layered scene format built on top of both.

pub mod bfast;
pub mod g3d;
pub mod vim;

pub use bfast::Bfast;
pub use g3d::G3d;
pub use vim::Scene;
