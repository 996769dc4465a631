//! benchkit configuration patching
//!
//! Rewrites benchmark network configuration from flat parameter lists
//! before a run.
//!
//! # Core Operations
//!
//! - **Tree patch**: overwrite every mapping key named by a parameter,
//!   keeping numeric types where the replacement parses ([`patch`])
//! - **Environment patch**: rewrite `KEY=VALUE` entries in Compose service
//!   environment lists, fanning out to every service ([`patch_env_list`])
//!
//! # Architecture
//!
//! ```text
//! params.txt → PendingUpdates ─┐
//!                              ├→ patch / patch_env_list → Document' → YAML file
//! YAML file  → Document ───────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use benchkit_config::{patch, CommentPolicy, Document, PendingUpdates};
//!
//! let mut doc = Document::from_yaml_str("Orderer:\n  MaxMessageCount: 10\n").unwrap();
//! let mut pending = PendingUpdates::parse("MaxMessageCount 500\n", CommentPolicy::Literal);
//!
//! assert_eq!(patch(&mut doc, &mut pending), 1);
//! assert!(pending.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod document;
pub mod env_list;
pub mod error;
pub mod params;
pub mod patcher;
pub mod pipeline;
pub mod store;

pub use document::{Document, Key, Mapping, Scalar, TaggedDocument};
pub use env_list::{patch_compose, patch_env_list, EnvModification, EnvPatchReport};
pub use error::{ConfigError, ConfigResult, DocumentError, ParamError};
pub use params::{CommentPolicy, PendingUpdates};
pub use patcher::{coerce, patch};
pub use pipeline::{patch_compose_file, patch_config_file, PatchOutcome};
pub use store::{load_document, save_document};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
