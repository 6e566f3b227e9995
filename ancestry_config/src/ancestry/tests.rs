//! Unit tests for chain derivation.

use rstest::{fixture, rstest};

use super::walker::package_prefixes;
use super::{AncestryNode, AncestryWalker, NodeKind};
use crate::{ConfigError, MemberRef, TestUnitRef, TypeRef};

#[fixture]
fn walker() -> AncestryWalker {
    AncestryWalker::new().with_platform_root("Object")
}

fn kinds(unit: &TestUnitRef, walker: &AncestryWalker) -> Vec<NodeKind> {
    walker
        .build_chain(unit)
        .map(|chain| chain.nodes().iter().map(AncestryNode::kind).collect())
        .unwrap_or_default()
}

#[rstest]
#[case("", &[""])]
#[case("org", &["", "org"])]
#[case("org.example.pkg", &["", "org", "org.example", "org.example.pkg"])]
fn package_prefixes_run_from_the_top_level(#[case] package: &str, #[case] expected: &[&str]) {
    assert_eq!(package_prefixes(package), expected);
}

#[rstest]
fn chain_orders_default_packages_types_member(walker: AncestryWalker) {
    let unit = TestUnitRef::new(
        vec![
            TypeRef::new("Object"),
            TypeRef::new("org.example.Base"),
            TypeRef::new("org.example.Leaf"),
        ],
        MemberRef::new("org.example.Base", "runs"),
    );
    let chain = match walker.build_chain(&unit) {
        Ok(chain) => chain,
        Err(err) => panic!("chain should build: {err}"),
    };
    let rendered: Vec<String> = chain.nodes().iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        [
            "default",
            "(top)",
            "org",
            "org.example",
            "org.example.Base",
            "org.example.Leaf",
            "org.example.Base#runs",
        ]
    );
    assert_eq!(chain.package(), "org.example");
    assert_eq!(chain.unit(), "org.example.Leaf#runs");
    assert_eq!(chain.types().count(), 2);
    assert_eq!(chain.member().map(MemberRef::name), Some("runs"));
}

#[rstest]
fn type_without_package_yields_only_top_level(walker: AncestryWalker) {
    let unit = TestUnitRef::leaf_member(vec![TypeRef::new("Bare")], "runs");
    assert_eq!(
        kinds(&unit, &walker),
        [
            NodeKind::Default,
            NodeKind::Package,
            NodeKind::Type,
            NodeKind::Member
        ]
    );
}

#[rstest]
fn package_chain_follows_the_leaf_type(walker: AncestryWalker) {
    let unit = TestUnitRef::leaf_member(
        vec![TypeRef::new("lib.Base"), TypeRef::new("app.ui.Leaf")],
        "runs",
    );
    let packages: Vec<String> = walker
        .build_chain(&unit)
        .map(|chain| chain.packages().map(str::to_owned).collect())
        .unwrap_or_default();
    assert_eq!(packages, ["", "app", "app.ui"]);
}

#[rstest]
fn explicit_package_overrides_name_derivation(walker: AncestryWalker) {
    let unit = TestUnitRef::leaf_member(vec![TypeRef::with_package("Outer$Inner", "x.y")], "t");
    let packages: Vec<String> = walker
        .build_chain(&unit)
        .map(|chain| chain.packages().map(str::to_owned).collect())
        .unwrap_or_default();
    assert_eq!(packages, ["", "x", "x.y"]);
}

#[rstest]
#[case::empty_lineage(TestUnitRef::leaf_member(Vec::new(), "runs"))]
#[case::repeated_type(TestUnitRef::leaf_member(
    vec![TypeRef::new("a.Base"), TypeRef::new("a.Leaf"), TypeRef::new("a.Base")],
    "runs",
))]
#[case::misplaced_root(TestUnitRef::leaf_member(
    vec![TypeRef::new("a.Base"), TypeRef::new("Object"), TypeRef::new("a.Leaf")],
    "runs",
))]
#[case::only_root(TestUnitRef::leaf_member(vec![TypeRef::new("Object")], "runs"))]
#[case::foreign_member(TestUnitRef::new(
    vec![TypeRef::new("a.Leaf")],
    MemberRef::new("b.Elsewhere", "runs"),
))]
fn invalid_lineages_are_ambiguous(walker: AncestryWalker, #[case] unit: TestUnitRef) {
    match walker.build_chain(&unit) {
        Err(err) => assert!(
            matches!(&*err, ConfigError::AmbiguousHierarchy { .. }),
            "unexpected error: {err}"
        ),
        Ok(chain) => panic!("expected rejection, got {chain:?}"),
    }
}

#[rstest]
fn root_is_kept_without_a_configured_platform_root() {
    let unit = TestUnitRef::leaf_member(vec![TypeRef::new("Object"), TypeRef::new("a.Leaf")], "t");
    let types: Vec<String> = AncestryWalker::new()
        .build_chain(&unit)
        .map(|chain| chain.types().map(|ty| ty.name().to_owned()).collect())
        .unwrap_or_default();
    assert_eq!(types, ["Object", "a.Leaf"]);
}
