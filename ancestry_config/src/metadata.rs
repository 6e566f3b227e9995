//! Declarative metadata attached to types and members.
//!
//! Metadata blobs are opaque [`serde_json::Value`] objects. Each declared
//! configuration kind deserialises the keys it owns and ignores the rest, so
//! one blob can feed several kinds. A missing blob means "no contribution".

use std::borrow::Cow;
use std::collections::HashMap;

use serde_json::Value;

use crate::{MemberRef, TypeRef};

/// Supplies zero or one metadata blob per type and per member.
pub trait MetadataSource: Send + Sync {
    /// Metadata declared directly on `ty`, ignoring its base types.
    fn type_metadata(&self, ty: &TypeRef) -> Option<Cow<'_, Value>>;

    /// Metadata declared directly on `member`.
    fn member_metadata(&self, member: &MemberRef) -> Option<Cow<'_, Value>>;
}

/// In-memory metadata registry keyed by type and member names.
///
/// # Examples
///
/// ```
/// use ancestry_config::metadata::{MetadataSource, StaticMetadata};
/// use ancestry_config::{MemberRef, TypeRef};
/// use serde_json::json;
///
/// let metadata = StaticMetadata::new()
///     .with_type("org.example.Base", json!({"sdk": [1]}))
///     .with_member("org.example.Base", "runs", json!({"sdk": [9]}));
///
/// assert!(metadata.type_metadata(&TypeRef::new("org.example.Base")).is_some());
/// assert!(metadata.type_metadata(&TypeRef::new("org.example.Leaf")).is_none());
/// assert!(metadata
///     .member_metadata(&MemberRef::new("org.example.Base", "runs"))
///     .is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct StaticMetadata {
    types: HashMap<String, Value>,
    members: HashMap<(String, String), Value>,
}

impl StaticMetadata {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `value` on the type named `name`.
    #[must_use]
    pub fn with_type(mut self, name: impl Into<String>, value: Value) -> Self {
        self.insert_type(name, value);
        self
    }

    /// Declare `value` on member `name` of `declaring_type`.
    #[must_use]
    pub fn with_member(
        mut self,
        declaring_type: impl Into<String>,
        name: impl Into<String>,
        value: Value,
    ) -> Self {
        self.insert_member(declaring_type, name, value);
        self
    }

    /// Declare `value` on the type named `name`, replacing earlier metadata.
    pub fn insert_type(&mut self, name: impl Into<String>, value: Value) {
        self.types.insert(name.into(), value);
    }

    /// Declare `value` on a member, replacing earlier metadata.
    pub fn insert_member(
        &mut self,
        declaring_type: impl Into<String>,
        name: impl Into<String>,
        value: Value,
    ) {
        self.members
            .insert((declaring_type.into(), name.into()), value);
    }
}

impl MetadataSource for StaticMetadata {
    fn type_metadata(&self, ty: &TypeRef) -> Option<Cow<'_, Value>> {
        self.types.get(ty.name()).map(Cow::Borrowed)
    }

    fn member_metadata(&self, member: &MemberRef) -> Option<Cow<'_, Value>> {
        self.members
            .get(&(member.declaring_type().to_owned(), member.name().to_owned()))
            .map(Cow::Borrowed)
    }
}
