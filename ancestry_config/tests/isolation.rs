//! Failure handling: per-kind isolation, structural errors and file-backed
//! property resources.

use std::sync::Arc;

use ancestry_config::declared::{DeclaredExtractor, ResourcePaths, RuntimeOptions, SdkSelection};
use ancestry_config::metadata::StaticMetadata;
use ancestry_config::properties::{DirResources, PackageProperties};
use ancestry_config::{ConfigError, FragmentCache, Resolver, TestUnitRef, TypeRef};
use anyhow::{Context, Result, ensure};
use camino::Utf8Path;
use rstest::{fixture, rstest};
use serde_json::json;
use tempfile::TempDir;
use test_helpers::spy::Trail;

#[fixture]
fn resolver() -> Resolver {
    let metadata = Arc::new(
        StaticMetadata::new()
            .with_type("org.example.Broken", json!({"sdk": "nine", "qualifiers": "kept"}))
            .with_type("org.example.Fine", json!({"sdk": [30]})),
    );
    Resolver::builder(Arc::new(FragmentCache::new()))
        .register(DeclaredExtractor::<SdkSelection>::new(metadata.clone()))
        .and_then(|builder| builder.register(DeclaredExtractor::<RuntimeOptions>::new(metadata)))
        .map(ancestry_config::ResolverBuilder::build)
        .unwrap_or_else(|err| panic!("registration failed: {err}"))
}

#[rstest]
fn malformed_kind_does_not_affect_siblings(resolver: Resolver) -> Result<()> {
    let unit = TestUnitRef::leaf_member(vec![TypeRef::new("org.example.Broken")], "runs");
    let config = resolver.resolve(&unit)?;

    let runtime = config.get::<RuntimeOptions>()?;
    ensure!(runtime.qualifiers.as_deref() == Some("kept"));
    let err = config.get::<SdkSelection>().err().context("sdk should fail")?;
    ensure!(err.is_malformed(), "unexpected error: {err}");
    ensure!(!config.is_complete());
    ensure!(config.failures().count() == 1);
    Ok(())
}

#[rstest]
fn failures_stay_with_the_unit_that_hit_them(resolver: Resolver) -> Result<()> {
    let broken = TestUnitRef::leaf_member(vec![TypeRef::new("org.example.Broken")], "runs");
    let fine = TestUnitRef::leaf_member(vec![TypeRef::new("org.example.Fine")], "runs");
    ensure!(!resolver.resolve(&broken)?.is_complete());
    let config = resolver.resolve(&fine)?;
    ensure!(config.get::<SdkSelection>()?.sdk == [30]);
    Ok(())
}

#[rstest]
fn unregistered_kinds_are_reported(resolver: Resolver) -> Result<()> {
    let unit = TestUnitRef::leaf_member(vec![TypeRef::new("org.example.Fine")], "runs");
    let config = resolver.resolve(&unit)?;
    let err = config.get::<ResourcePaths>().err().context("kind is not registered")?;
    ensure!(matches!(*err, ConfigError::NoSuchKind { .. }));
    ensure!(config.get::<Trail>().is_err());
    Ok(())
}

#[rstest]
#[case::empty(TestUnitRef::leaf_member(Vec::new(), "runs"))]
#[case::repeated(TestUnitRef::leaf_member(
    vec![TypeRef::new("a.Base"), TypeRef::new("a.Base")],
    "runs",
))]
fn invalid_lineages_abort_resolution(resolver: Resolver, #[case] unit: TestUnitRef) {
    let err = resolver.resolve(&unit).err();
    assert!(
        err.as_deref()
            .is_some_and(|err| matches!(err, ConfigError::AmbiguousHierarchy { .. }))
    );
}

#[rstest]
fn properties_are_read_from_a_directory() -> Result<()> {
    let dir = TempDir::new()?;
    let root = Utf8Path::from_path(dir.path()).context("temp dir is not UTF-8")?;
    std::fs::create_dir_all(root.join("org/example"))?;
    std::fs::write(root.join("config.properties"), "sdk: 28\nqualifiers: top\n")?;
    std::fs::write(root.join("org/example/config.properties"), "qualifiers: +night\n")?;

    let properties = PackageProperties::new(DirResources::open(root)?);
    let metadata = Arc::new(StaticMetadata::new());
    let resolver = Resolver::builder(Arc::new(FragmentCache::new()))
        .register(
            DeclaredExtractor::<SdkSelection>::new(metadata.clone())
                .with_properties(properties.clone()),
        )?
        .register(DeclaredExtractor::<RuntimeOptions>::new(metadata).with_properties(properties))?
        .build();

    let unit = TestUnitRef::leaf_member(vec![TypeRef::new("org.example.Leaf")], "runs");
    let config = resolver.resolve(&unit)?;
    ensure!(config.get::<SdkSelection>()?.sdk == [28]);
    ensure!(config.get::<RuntimeOptions>()?.qualifiers.as_deref() == Some("top +night"));
    Ok(())
}
