//! Derivation of ancestry chains from unit identities.

use std::collections::HashSet;

use crate::{ConfigError, ConfigResult, TestUnitRef, TypeRef};

use super::{AncestryChain, AncestryNode};

/// Builds [`AncestryChain`] values for units.
///
/// The walker is pure: the same unit always yields the same chain. An
/// optional platform root names the implicit base of every lineage (the
/// type nothing can be declared on); when it heads a lineage it is dropped.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AncestryWalker {
    platform_root: Option<String>,
}

impl AncestryWalker {
    /// Create a walker without a platform root.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            platform_root: None,
        }
    }

    /// Drop `name` when it is the most-base type of a lineage.
    #[must_use]
    pub fn with_platform_root(mut self, name: impl Into<String>) -> Self {
        self.platform_root = Some(name.into());
        self
    }

    /// The configured platform root, if any.
    #[must_use]
    pub fn platform_root(&self) -> Option<&str> {
        self.platform_root.as_deref()
    }

    /// Derive the ancestry chain for `unit`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ancestry_config::ancestry::{AncestryWalker, NodeKind};
    /// use ancestry_config::{TestUnitRef, TypeRef};
    ///
    /// let unit = TestUnitRef::leaf_member(vec![TypeRef::new("a.b.Leaf")], "runs");
    /// let chain = AncestryWalker::new().build_chain(&unit)?;
    /// let packages: Vec<_> = chain.packages().collect();
    /// assert_eq!(packages, ["", "a", "a.b"]);
    /// assert_eq!(chain.nodes().first().map(|n| n.kind()), Some(NodeKind::Default));
    /// # Ok::<(), std::sync::Arc<ancestry_config::ConfigError>>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AmbiguousHierarchy`] when the lineage is empty,
    /// lists a type twice, places the platform root anywhere but first, or
    /// does not contain the type declaring the member.
    pub fn build_chain(&self, unit: &TestUnitRef) -> ConfigResult<AncestryChain> {
        let types = self.configurable_types(unit)?;
        let Some(leaf) = types.last() else {
            return Err(ConfigError::ambiguous(unit, "no configurable type in lineage"));
        };
        let member = unit.member();
        if !types.iter().any(|ty| ty.name() == member.declaring_type()) {
            return Err(ConfigError::ambiguous(
                unit,
                format!(
                    "member is declared on '{}', which is not part of the lineage",
                    member.declaring_type()
                ),
            ));
        }

        let package = leaf.package().to_owned();
        let prefixes = package_prefixes(&package);
        let mut nodes = Vec::with_capacity(prefixes.len() + types.len() + 2);
        nodes.push(AncestryNode::Default);
        nodes.extend(prefixes.into_iter().map(AncestryNode::Package));
        nodes.extend(types.iter().map(|ty| AncestryNode::Type((*ty).clone())));
        nodes.push(AncestryNode::Member(member.clone()));
        Ok(AncestryChain::new(unit.to_string(), package, nodes))
    }

    fn configurable_types<'a>(&self, unit: &'a TestUnitRef) -> ConfigResult<Vec<&'a TypeRef>> {
        let lineage = unit.lineage();
        if lineage.is_empty() {
            return Err(ConfigError::ambiguous(unit, "empty lineage"));
        }

        let mut seen = HashSet::with_capacity(lineage.len());
        let mut types = Vec::with_capacity(lineage.len());
        for (position, ty) in lineage.iter().enumerate() {
            if !seen.insert(ty.name()) {
                return Err(ConfigError::ambiguous(
                    unit,
                    format!("type '{ty}' appears more than once"),
                ));
            }
            if self.platform_root() == Some(ty.name()) {
                if position != 0 {
                    return Err(ConfigError::ambiguous(
                        unit,
                        format!("platform root '{ty}' must be the most-base type"),
                    ));
                }
                continue;
            }
            types.push(ty);
        }
        Ok(types)
    }
}

/// Split `package` into its prefixes, starting with the top level.
///
/// `a.b.c` yields `""`, `"a"`, `"a.b"` and `"a.b.c"`.
pub(crate) fn package_prefixes(package: &str) -> Vec<String> {
    let mut prefixes = vec![String::new()];
    if package.is_empty() {
        return prefixes;
    }
    let mut current = String::with_capacity(package.len());
    for segment in package.split('.') {
        if !current.is_empty() {
            current.push('.');
        }
        current.push_str(segment);
        prefixes.push(current.clone());
    }
    prefixes
}
