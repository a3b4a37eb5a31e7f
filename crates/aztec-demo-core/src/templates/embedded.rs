//! Compile-time embedded templates.
//!
//! Paths are relative to this file (`crates/aztec-demo-core/src/templates/embedded.rs`).
//! Do NOT move a template file without updating its `include_str!` path here.

// -------------------------------------------------------
// Encoder bridge
// -------------------------------------------------------

/// Node.js bridge around aztec.js, copied verbatim.
pub const ENCODER_SCRIPT: &str = include_str!("../../../../templates/encoder/aztec-encoder.js");

pub const ENCODER_PACKAGE_JSON: &str =
    include_str!("../../../../templates/encoder/package.json.tmpl");

// -------------------------------------------------------
// Project files
// -------------------------------------------------------

pub const PROJECT_README: &str = include_str!("../../../../templates/config/README.md.tmpl");

/// aztec.js release the bridge script is written against.
pub const AZTEC_JS_VERSION: &str = "0.10.0";
