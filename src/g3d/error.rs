//
// Copyright 2020 VIM Format Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.
//

use thiserror::Error;

/// Failure modes for parsing a G3D attribute descriptor string or its
/// underlying BFAST container.
#[derive(Error, Debug)]
pub enum Error {
    /// The underlying BFAST container could not be unpacked.
    #[error(transparent)]
    Bfast(#[from] crate::bfast::Error),

    /// The descriptor string had fewer than six colon-delimited tokens.
    #[error("descriptor has too few tokens: {0:?}")]
    InsufficientTokens(String),

    /// The descriptor string did not begin with the literal `g3d` token.
    #[error("descriptor does not start with 'g3d': {0:?}")]
    ExpectedG3dPrefix(String),

    /// The association token did not match any recognized association.
    #[error("unknown association: {0:?}")]
    UnknownAssociation(String),

    /// The data type token did not match any recognized numeric type.
    #[error("unknown data type: {0:?}")]
    UnknownDataType(String),

    /// The `index` or `data_arity` token did not parse as an integer.
    #[error("malformed integer in descriptor: {0}")]
    MalformedInteger(#[from] std::num::ParseIntError),

    /// The descriptor string had more than six colon-delimited tokens.
    #[error("descriptor has too many tokens: {0:?}")]
    TooManyTokens(String),

    /// The `data_arity` token parsed to zero, which cannot describe any
    /// payload element.
    #[error("descriptor has zero data arity: {0:?}")]
    ZeroArity(String),

    /// An attribute's payload size was not a multiple of its element size.
    #[error("attribute payload of {byte_size} bytes is not a multiple of its element size {element_size}")]
    BadElementAlignment { byte_size: usize, element_size: usize },
}
