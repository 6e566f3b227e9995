//! Hierarchical configuration resolution keyed on ancestry.
//!
//! A unit under test (a member on a type lineage) is configured by folding
//! fragments contributed along its ancestry chain: global defaults, every
//! package prefix, each type from the most-base to the leaf, and finally the
//! member itself. Each configuration kind is produced by its own
//! [`Extractor`]; a [`Resolver`] runs them all and memoizes the folded
//! prefixes of each chain in a shared [`FragmentCache`], so sibling units
//! only pay for the nodes they do not share.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use ancestry_config::declared::{DeclaredExtractor, RuntimeOptions, SdkSelection};
//! use ancestry_config::metadata::StaticMetadata;
//! use ancestry_config::{FragmentCache, MemberRef, Resolver, TestUnitRef, TypeRef};
//! use serde_json::json;
//!
//! let metadata = Arc::new(
//!     StaticMetadata::new()
//!         .with_type("org.example.Base", json!({"sdk": [28], "qualifiers": "en"}))
//!         .with_member("org.example.Base", "runs", json!({"qualifiers": "+land"})),
//! );
//! let resolver = Resolver::builder(Arc::new(FragmentCache::new()))
//!     .register(DeclaredExtractor::<SdkSelection>::new(metadata.clone()))?
//!     .register(DeclaredExtractor::<RuntimeOptions>::new(metadata))?
//!     .build();
//!
//! let unit = TestUnitRef::new(
//!     vec![TypeRef::new("org.example.Base"), TypeRef::new("org.example.Leaf")],
//!     MemberRef::new("org.example.Base", "runs"),
//! );
//! let config = resolver.resolve(&unit)?;
//! assert_eq!(config.get::<SdkSelection>()?.sdk, [28]);
//! assert_eq!(config.get::<RuntimeOptions>()?.qualifiers.as_deref(), Some("en +land"));
//! # Ok::<(), std::sync::Arc<ancestry_config::ConfigError>>(())
//! ```

use std::sync::Arc;

pub mod ancestry;
mod cache;
mod configuration;
pub mod declared;
mod error;
mod extractor;
pub mod metadata;
pub mod properties;
mod resolver;
mod result_ext;
mod settings;
mod unit;

pub use cache::{CacheKey, CacheStats, FragmentCache, NodeKey};
pub use configuration::Configuration;
pub use error::{ConfigError, PropertyError};
pub use extractor::{Extractor, ExtractorId, FragmentKind};
pub use resolver::{Resolver, ResolverBuilder};
pub use result_ext::{ConfigResultExt, IntoFigmentError, MalformedExt, ResultIntoFigment};
pub use settings::{ENV_PREFIX, ResolverSettings, SETTINGS_FILE};
pub use unit::{MemberRef, TestUnitRef, TypeRef};

/// Result alias used throughout the crate.
///
/// Errors are shared so that a failure captured for one kind can be handed
/// out repeatedly from a [`Configuration`].
pub type ConfigResult<T> = Result<T, Arc<ConfigError>>;
