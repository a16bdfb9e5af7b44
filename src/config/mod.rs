//! Manifest loading and parsing for commando.
//!
//! This module handles the `commando.yml` manifest:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Conversion to command declarations in [`declarations`]
//!
//! # Example
//!
//! ```
//! use commando::config::parse_manifest;
//! use std::path::Path;
//!
//! let yaml = r#"
//! commands:
//!   - name: heal|h
//!     permission: perm.heal
//!     params:
//!       - { name: amount, type: integer, optional: true, default: 20 }
//!     reply: "Healed for {amount}"
//! "#;
//! let manifest = parse_manifest(yaml, Path::new("commando.yml")).unwrap();
//! assert_eq!(manifest.commands[0].params[0].default.as_deref(), Some("20"));
//! assert_eq!(manifest.declarations().len(), 2);
//! ```

pub mod declarations;
pub mod loader;
pub mod schema;

pub use loader::{default_path, load_config, load_manifest, parse_manifest, DEFAULT_MANIFEST};
pub use schema::{CommandConfig, IdentityConfig, Manifest, ParamConfig, Settings};
