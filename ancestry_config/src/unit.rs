//! Identities of the units being resolved.

use std::fmt;

/// A type taking part in a unit's inheritance chain.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TypeRef {
    name: String,
    package: String,
}

impl TypeRef {
    /// Describe a type by its fully qualified, dot-separated name.
    ///
    /// The package is everything before the last dot; a name without dots
    /// lives in the top-level package.
    ///
    /// # Examples
    ///
    /// ```
    /// use ancestry_config::TypeRef;
    ///
    /// let ty = TypeRef::new("org.example.pkg.CheckoutTest");
    /// assert_eq!(ty.package(), "org.example.pkg");
    /// assert_eq!(TypeRef::new("Bare").package(), "");
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let package = name
            .rsplit_once('.')
            .map(|(package, _)| package.to_owned())
            .unwrap_or_default();
        Self { name, package }
    }

    /// Describe a type whose package cannot be derived from its name.
    #[must_use]
    pub fn with_package(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
        }
    }

    /// Fully qualified type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared package, empty for the top level.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A member (test method) and the type that declares it.
///
/// An inherited member is declared on a base type but resolved against a
/// derived leaf; its own metadata is looked up on the declaring type.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct MemberRef {
    declaring_type: String,
    name: String,
}

impl MemberRef {
    /// Reference `name` as declared on `declaring_type`.
    #[must_use]
    pub fn new(declaring_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            name: name.into(),
        }
    }

    /// Name of the type declaring the member.
    #[must_use]
    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    /// Member name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for MemberRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.declaring_type, self.name)
    }
}

/// Identifies one resolution target: an inheritance lineage and a member.
///
/// The lineage runs from the most-base type to the most-derived one.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TestUnitRef {
    lineage: Vec<TypeRef>,
    member: MemberRef,
}

impl TestUnitRef {
    /// Build a unit from an explicit lineage and member.
    #[must_use]
    pub const fn new(lineage: Vec<TypeRef>, member: MemberRef) -> Self {
        Self { lineage, member }
    }

    /// Build a unit whose member is declared on the leaf of `lineage`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ancestry_config::{TestUnitRef, TypeRef};
    ///
    /// let unit = TestUnitRef::leaf_member(
    ///     vec![TypeRef::new("org.example.Base"), TypeRef::new("org.example.Leaf")],
    ///     "runs",
    /// );
    /// assert_eq!(unit.member().declaring_type(), "org.example.Leaf");
    /// assert_eq!(unit.to_string(), "org.example.Leaf#runs");
    /// ```
    #[must_use]
    pub fn leaf_member(lineage: Vec<TypeRef>, name: impl Into<String>) -> Self {
        let declaring = lineage.last().map(TypeRef::name).unwrap_or_default();
        let member = MemberRef::new(declaring, name);
        Self { lineage, member }
    }

    /// Types from most-base to most-derived.
    #[must_use]
    pub fn lineage(&self) -> &[TypeRef] {
        &self.lineage
    }

    /// The most-derived type, if the lineage is not empty.
    #[must_use]
    pub fn leaf(&self) -> Option<&TypeRef> {
        self.lineage.last()
    }

    /// The member being resolved.
    #[must_use]
    pub const fn member(&self) -> &MemberRef {
        &self.member
    }
}

impl fmt::Display for TestUnitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.leaf() {
            Some(leaf) => write!(f, "{leaf}#{}", self.member.name()),
            None => write!(f, "<no type>#{}", self.member.name()),
        }
    }
}
