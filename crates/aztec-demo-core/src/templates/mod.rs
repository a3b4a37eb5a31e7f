//! Templates written by `aztec-demo init`.
//!
//! Files are embedded at compile time in [`embedded`] and rendered with
//! Handlebars through [`renderer::TemplateRenderer`].
//!
//! ## Template variables
//!
//! - `{{project_name}}`: project directory name
//! - `{{network}}`: network preset (`besu`, `pantheon`, `ganache`)
//! - `{{node_url}}`: JSON-RPC endpoint from the preset
//! - `{{aztec_version}}`: npm version of the aztec.js packages
//!
//! Template files under `templates/` and the constants in [`embedded`] must
//! stay in sync; the `include_str!` paths are checked at compile time.

pub mod embedded;
pub mod renderer;
