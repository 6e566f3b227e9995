//! Unit tests for the resolution engine.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rstest::{fixture, rstest};

use super::Resolver;
use crate::ancestry::AncestryWalker;
use crate::{
    ConfigError, ConfigResult, Extractor, FragmentCache, FragmentKind, MemberRef, TestUnitRef,
    TypeRef,
};

/// Joins every node's name; type nodes are the only ones that contribute.
struct Path;

impl Extractor for Path {
    type Fragment = String;

    fn default_fragment(&self) -> String {
        "default".to_owned()
    }

    fn fragment_for_package(&self, _: &str) -> ConfigResult<Option<String>> {
        Ok(None)
    }

    fn fragment_for_type(&self, ty: &TypeRef) -> ConfigResult<Option<String>> {
        Ok(Some(ty.name().to_owned()))
    }

    fn fragment_for_member(&self, member: &MemberRef) -> ConfigResult<Option<String>> {
        Ok(Some(member.name().to_owned()))
    }

    fn merge(&self, parent: &String, child: &String) -> String {
        format!("{parent}:{child}")
    }
}

/// Counts declared levels; fails at the type level until `healed` is set.
#[derive(Default)]
struct Level {
    healed: Arc<AtomicBool>,
    type_calls: Arc<AtomicUsize>,
}

impl Extractor for Level {
    type Fragment = u32;

    fn default_fragment(&self) -> u32 {
        0
    }

    fn fragment_for_package(&self, _: &str) -> ConfigResult<Option<u32>> {
        Ok(Some(1))
    }

    fn fragment_for_type(&self, ty: &TypeRef) -> ConfigResult<Option<u32>> {
        self.type_calls.fetch_add(1, Ordering::SeqCst);
        if self.healed.load(Ordering::SeqCst) {
            Ok(Some(10))
        } else {
            Err(ConfigError::malformed(
                FragmentKind::of::<u32>(),
                ty,
                "unparseable level",
            ))
        }
    }

    fn fragment_for_member(&self, _: &MemberRef) -> ConfigResult<Option<u32>> {
        Ok(None)
    }

    fn merge(&self, parent: &u32, child: &u32) -> u32 {
        parent + child
    }
}

#[fixture]
fn unit() -> TestUnitRef {
    TestUnitRef::leaf_member(
        vec![TypeRef::new("org.example.Base"), TypeRef::new("org.example.Leaf")],
        "runs",
    )
}

fn resolver_with(level: Level) -> ConfigResult<Resolver> {
    Ok(Resolver::builder(Arc::new(FragmentCache::new()))
        .register(Path)?
        .register(level)?
        .build())
}

#[rstest]
fn folds_types_then_member(unit: TestUnitRef) -> ConfigResult<()> {
    let resolver = Resolver::builder(Arc::new(FragmentCache::new()))
        .register(Path)?
        .build();
    let config = resolver.resolve(&unit)?;
    assert_eq!(
        config.get::<String>()?,
        "default:org.example.Base:org.example.Leaf:runs"
    );
    Ok(())
}

#[rstest]
fn malformed_kind_does_not_abort_siblings(unit: TestUnitRef) -> ConfigResult<()> {
    let resolver = resolver_with(Level::default())?;
    let config = resolver.resolve(&unit)?;
    assert!(config.get::<String>().is_ok());
    let err = config.get::<u32>().err();
    assert!(err.is_some_and(|err| err.is_malformed()));
    Ok(())
}

#[rstest]
fn failures_are_retried_on_the_next_resolution(unit: TestUnitRef) -> ConfigResult<()> {
    let level = Level::default();
    let healed = Arc::clone(&level.healed);
    let type_calls = Arc::clone(&level.type_calls);
    let resolver = resolver_with(level)?;

    assert!(resolver.resolve(&unit)?.get::<u32>().is_err());
    let failed_calls = type_calls.load(Ordering::SeqCst);

    healed.store(true, Ordering::SeqCst);
    let config = resolver.resolve(&unit)?;
    // three package levels plus two types
    assert_eq!(config.get::<u32>()?, &23);
    assert!(type_calls.load(Ordering::SeqCst) > failed_calls);
    Ok(())
}

#[rstest]
fn ambiguous_lineage_aborts_the_whole_call() -> ConfigResult<()> {
    let resolver = resolver_with(Level::default())?;
    let unit = TestUnitRef::leaf_member(Vec::new(), "runs");
    let err = resolver.resolve(&unit).err();
    assert!(err.is_some_and(|err| matches!(&*err, ConfigError::AmbiguousHierarchy { .. })));
    Ok(())
}

#[rstest]
fn registering_a_kind_twice_is_rejected() {
    let outcome = Resolver::builder(Arc::new(FragmentCache::new()))
        .register(Path)
        .and_then(|builder| builder.register(Path));
    let err = outcome.err();
    assert!(err.is_some_and(|err| matches!(&*err, ConfigError::DuplicateKind { .. })));
}

#[rstest]
fn kinds_follow_registration_order() -> ConfigResult<()> {
    let resolver = resolver_with(Level::default())?;
    let kinds: Vec<_> = resolver.kinds().collect();
    assert_eq!(kinds, [FragmentKind::of::<String>(), FragmentKind::of::<u32>()]);
    Ok(())
}

#[rstest]
fn platform_root_is_skipped() -> ConfigResult<()> {
    let resolver = Resolver::builder(Arc::new(FragmentCache::new()))
        .walker(AncestryWalker::new().with_platform_root("Object"))
        .register(Path)?
        .build();
    let unit = TestUnitRef::leaf_member(vec![TypeRef::new("Object"), TypeRef::new("Leaf")], "t");
    assert_eq!(resolver.resolve(&unit)?.get::<String>()?, "default:Leaf:t");
    Ok(())
}
