//! Ancestry chains: the ordered path used to resolve one unit.
//!
//! A chain always reads `DEFAULT`, then one `PACKAGE` node per package prefix
//! from the top level down to the leaf's package, then one `TYPE` node per
//! type from the most-base to the most-derived, and finally the `MEMBER`.
//! Merges are applied in that order, so later nodes override earlier ones.

mod walker;

use std::fmt;

use crate::{MemberRef, TypeRef};

pub use walker::AncestryWalker;

/// Position of a node within an ancestry chain.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NodeKind {
    /// Global defaults.
    Default,
    /// One package prefix.
    Package,
    /// One type of the inheritance chain.
    Type,
    /// The member being resolved.
    Member,
}

/// A single step of an ancestry chain.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AncestryNode {
    /// Global defaults.
    Default,
    /// A package prefix; the top-level package is the empty string.
    Package(String),
    /// A type of the inheritance chain.
    Type(TypeRef),
    /// The member being resolved.
    Member(MemberRef),
}

impl AncestryNode {
    /// Which part of the chain this node belongs to.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Default => NodeKind::Default,
            Self::Package(_) => NodeKind::Package,
            Self::Type(_) => NodeKind::Type,
            Self::Member(_) => NodeKind::Member,
        }
    }
}

impl fmt::Display for AncestryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Package(name) if name.is_empty() => f.write_str("(top)"),
            Self::Package(name) => f.write_str(name),
            Self::Type(ty) => write!(f, "{ty}"),
            Self::Member(member) => write!(f, "{member}"),
        }
    }
}

/// Ordered, immutable sequence of nodes for one resolution request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AncestryChain {
    unit: String,
    package: String,
    nodes: Vec<AncestryNode>,
}

impl AncestryChain {
    pub(crate) const fn new(unit: String, package: String, nodes: Vec<AncestryNode>) -> Self {
        Self {
            unit,
            package,
            nodes,
        }
    }

    /// Display form of the unit this chain was built for.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Package whose prefixes make up the `PACKAGE` nodes.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// All nodes, root first.
    #[must_use]
    pub fn nodes(&self) -> &[AncestryNode] {
        &self.nodes
    }

    /// Number of nodes in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false` for chains built by [`AncestryWalker`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Package prefixes, top level first.
    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|node| match node {
            AncestryNode::Package(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Types, most-base first.
    pub fn types(&self) -> impl Iterator<Item = &TypeRef> {
        self.nodes.iter().filter_map(|node| match node {
            AncestryNode::Type(ty) => Some(ty),
            _ => None,
        })
    }

    /// The trailing member node.
    #[must_use]
    pub fn member(&self) -> Option<&MemberRef> {
        self.nodes.iter().rev().find_map(|node| match node {
            AncestryNode::Member(member) => Some(member),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a AncestryChain {
    type Item = &'a AncestryNode;
    type IntoIter = std::slice::Iter<'a, AncestryNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests;
