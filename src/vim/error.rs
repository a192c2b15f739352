//
// Copyright 2020 VIM Format Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.
//

use std::fmt;

/// The non-throwing outcome of [`crate::vim::Scene::read_file`].
///
/// Unlike [`crate::bfast::Error`] and [`crate::g3d::Error`], VIM reports
/// failures as one of these coarse, section-attributed codes rather than a
/// structured error chain: nested BFAST/G3D failures are translated into
/// the enclosing section's "loading failed" variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VimError {
    Success,
    Failed,
    NoVersionInfo,
    FileNotRecognized,
    GeometryLoadingException,
    AssetLoadingException,
    EntityLoadingException,
}

impl Default for VimError {
    fn default() -> Self {
        VimError::Success
    }
}

impl fmt::Display for VimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VimError::Success => "success",
            VimError::Failed => "failed",
            VimError::NoVersionInfo => "no version info in header",
            VimError::FileNotRecognized => "file not recognized as a BFAST container",
            VimError::GeometryLoadingException => "geometry section failed to load",
            VimError::AssetLoadingException => "assets section failed to load",
            VimError::EntityLoadingException => "entities section failed to load",
        };
        f.write_str(s)
    }
}

impl std::error::Error for VimError {}
