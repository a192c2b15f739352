//
// Copyright 2020 VIM Format Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.
//

//! VIM header parsing: the tagged (`VIM1` + `key=value`) and legacy
//! (`key:value:key:value...`) forms, and the version-number extraction
//! rules that differ between them.
//!
//! A missing `vim` key does not abort parsing, since the rest of the scene
//! (geometry, nodes, strings, ...) is usually still usable; [`parse`]
//! always returns a `Header`, with `has_version = false` and sentinel
//! version fields (`0xffffffff`) when the key is absent.

use std::collections::BTreeMap;

const TAG: &[u8] = b"VIM1";

/// Sentinel used for each version component when no `vim` key was found.
pub const NO_VERSION: u32 = u32::MAX;

/// The parsed header: the raw key/value map plus the extracted version
/// triple, if a `vim` key was present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub fields: BTreeMap<String, String>,
    pub has_version: bool,
    pub version_major: u32,
    pub version_minor: u32,
    pub version_patch: u32,
}

impl Default for Header {
    fn default() -> Self {
        Header {
            fields: BTreeMap::new(),
            has_version: false,
            version_major: NO_VERSION,
            version_minor: NO_VERSION,
            version_patch: NO_VERSION,
        }
    }
}

/// Parses a `header` buffer. Always succeeds; callers that need the
/// `NoVersionInfo` outcome check [`Header::has_version`].
pub fn parse(data: &[u8]) -> Header {
    let tagged = data.starts_with(TAG);
    let fields =
        if tagged { parse_tagged(&data[TAG.len()..]) } else { parse_legacy(data) };

    let vim_value = match fields.get("vim") {
        Some(v) => v,
        None => return Header { fields, ..Header::default() },
    };

    let (major, minor, patch) = if tagged {
        tagged_version(vim_value)
    } else {
        legacy_version(vim_value, fields.get("objectmodel").map(String::as_str))
    };

    Header { fields, has_version: true, version_major: major, version_minor: minor, version_patch: patch }
}

fn parse_tagged(rest: &[u8]) -> BTreeMap<String, String> {
    let text = String::from_utf8_lossy(rest);
    let mut fields = BTreeMap::new();
    for line in text.split('\n') {
        if let Some(eq) = line.find('=') {
            fields.insert(line[..eq].to_string(), line[eq + 1..].to_string());
        }
    }
    fields
}

fn parse_legacy(data: &[u8]) -> BTreeMap<String, String> {
    let text = String::from_utf8_lossy(data);
    let tokens: Vec<&str> = text.split(':').collect();
    let mut fields = BTreeMap::new();
    for pair in tokens.chunks(2) {
        if let [key, value] = pair {
            fields.insert(key.to_string(), value.to_string());
        }
    }
    fields
}

/// Tagged form: the `vim` value is a dotted major.minor.patch triple.
fn tagged_version(vim_value: &str) -> (u32, u32, u32) {
    let parts: Vec<&str> = vim_value.split('.').collect();
    let part = |i: usize| parts.get(i).and_then(|s| s.parse().ok()).unwrap_or(0);
    (part(0), part(1), part(2))
}

/// Legacy form: major is always 0; minor is the first dotted part of the
/// `vim` value; patch is the decimal concatenation of `objectmodel`'s
/// dotted parts, padded with zeros to three parts.
fn legacy_version(vim_value: &str, object_model: Option<&str>) -> (u32, u32, u32) {
    let minor = vim_value.split('.').next().and_then(|s| s.parse().ok()).unwrap_or(0);

    let mut parts: Vec<&str> = object_model.map(|s| s.split('.').collect()).unwrap_or_default();
    while parts.len() < 3 {
        parts.push("0");
    }
    let patch: u32 = parts.concat().parse().unwrap_or(0);

    (0, minor, patch)
}
