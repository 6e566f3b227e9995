//! A fixture hierarchy declaring the reference kinds.
//!
//! All types live in [`PACKAGE`]:
//!
//! - `Test1` declares every field; its `withOverrideAnnotation` overrides them.
//! - `Test2` declares nothing; its `withOverrideAnnotation` declares everything.
//! - `Test1A` and `Test2A` only override `qualifiers`.
//! - `Test1B` overrides all three members of `Test1`.
//! - `Test1C` extends `Test1B` and adds class-level shadows.
//!
//! Every type inherits `withoutAnnotation`, `withDefaultsAnnotation` (declared
//! with an empty blob) and `withOverrideAnnotation`.

use std::sync::Arc;

use ancestry_config::declared::{DeclaredExtractor, ResourcePaths, RuntimeOptions, SdkSelection};
use ancestry_config::metadata::StaticMetadata;
use ancestry_config::properties::InMemoryResources;
use ancestry_config::{
    ConfigResult, FragmentCache, MemberRef, Resolver, ResolverSettings, TestUnitRef, TypeRef,
};
use serde_json::json;

/// Package of every fixture type.
pub const PACKAGE: &str = "org.example.plugins";

/// Application used when nothing declares one.
pub const DEFAULT_APPLICATION: &str = "org.example.DefaultApplication";

/// Manifest used when nothing declares one.
pub const DEFAULT_MANIFEST: &str = "AndroidManifest.xml";

/// Property file name the fixture resources are stored under.
pub const PROPERTIES_FILE: &str = "robolectric.properties";

/// Fully qualified name of the fixture type `simple`.
#[must_use]
pub fn qualified(simple: &str) -> String {
    format!("{PACKAGE}.{simple}")
}

/// Lineage of a fixture type, from the most-base type to `simple` itself.
#[must_use]
pub fn lineage(simple: &str) -> Vec<TypeRef> {
    let names: &[&str] = match simple {
        "Test1A" => &["Test1", "Test1A"],
        "Test2A" => &["Test2", "Test2A"],
        "Test1B" => &["Test1", "Test1B"],
        "Test1C" => &["Test1", "Test1B", "Test1C"],
        _ => &[simple],
    };
    names.iter().map(|name| TypeRef::new(qualified(name))).collect()
}

/// Unit running `member` on the fixture type `simple`.
///
/// The member is attributed to the most-derived type of the lineage that
/// overrides it.
#[must_use]
pub fn unit(simple: &str, member: &str) -> TestUnitRef {
    let types = lineage(simple);
    let declaring = types
        .iter()
        .rev()
        .map(TypeRef::name)
        .find(|name| overrides(name))
        .or_else(|| types.first().map(TypeRef::name))
        .unwrap_or_default()
        .to_owned();
    TestUnitRef::new(types, MemberRef::new(declaring, member))
}

fn overrides(type_name: &str) -> bool {
    ["Test1", "Test2", "Test1B"]
        .iter()
        .any(|simple| qualified(simple) == type_name)
}

/// Declared metadata of every fixture type and member.
#[must_use]
pub fn metadata() -> StaticMetadata {
    let mut metadata = StaticMetadata::new()
        .with_type(
            qualified("Test1"),
            json!({
                "sdk": [1],
                "manifest": "foo",
                "application": "org.example.TestFakeApp",
                "shadows": [qualified("Test1")],
                "instrumentedPackages": ["com.example.test1"],
                "qualifiers": "from-test",
            }),
        )
        .with_type(qualified("Test1A"), json!({"qualifiers": "from-subclass"}))
        .with_type(qualified("Test2A"), json!({"qualifiers": "from-subclass"}))
        .with_type(
            qualified("Test1C"),
            json!({
                "qualifiers": "from-class6",
                "shadows": [qualified("Test1C")],
                "instrumentedPackages": ["com.example.test6"],
            }),
        )
        .with_member(
            qualified("Test1"),
            "withOverrideAnnotation",
            json!({
                "sdk": [9],
                "manifest": "furf",
                "application": "org.example.TestApplication",
                "shadows": [qualified("Test2")],
                "instrumentedPackages": ["com.example.method1"],
                "qualifiers": "from-method",
            }),
        )
        .with_member(
            qualified("Test2"),
            "withOverrideAnnotation",
            json!({
                "sdk": [9],
                "manifest": "furf",
                "application": "org.example.TestFakeApp",
                "shadows": [qualified("Test1")],
                "instrumentedPackages": ["com.example.method2"],
                "qualifiers": "from-method",
            }),
        )
        .with_member(
            qualified("Test1B"),
            "withOverrideAnnotation",
            json!({
                "sdk": [14],
                "shadows": [qualified("Test1B")],
                "instrumentedPackages": ["com.example.method5"],
                "qualifiers": "from-method5",
            }),
        );
    for simple in ["Test1", "Test2", "Test1B"] {
        metadata.insert_member(qualified(simple), "withDefaultsAnnotation", json!({}));
    }
    metadata
}

/// Global defaults of the resource-path kind.
#[must_use]
pub fn default_paths() -> ResourcePaths {
    ResourcePaths {
        manifest: Some(DEFAULT_MANIFEST.to_owned()),
        ..ResourcePaths::default()
    }
}

/// Global defaults of the runtime kind.
#[must_use]
pub fn default_runtime() -> RuntimeOptions {
    RuntimeOptions {
        application: Some(DEFAULT_APPLICATION.to_owned()),
        ..RuntimeOptions::default()
    }
}

/// Resolver over the fixture metadata and the given property resources,
/// registering [`SdkSelection`], [`ResourcePaths`] and [`RuntimeOptions`].
///
/// # Errors
///
/// Returns an error when an extractor cannot be registered.
pub fn resolver(resources: InMemoryResources) -> ConfigResult<Resolver> {
    resolver_with(resources, default_paths(), default_runtime())
}

/// Like [`resolver`] with explicit global defaults.
///
/// # Errors
///
/// Returns an error when an extractor cannot be registered.
pub fn resolver_with(
    resources: InMemoryResources,
    paths: ResourcePaths,
    runtime: RuntimeOptions,
) -> ConfigResult<Resolver> {
    let settings = ResolverSettings {
        properties_file: PROPERTIES_FILE.to_owned(),
        platform_root: None,
    };
    let metadata = Arc::new(metadata());
    let properties = settings.package_properties(Arc::new(resources));
    Ok(Resolver::builder(Arc::new(FragmentCache::new()))
        .settings(&settings)
        .register(
            DeclaredExtractor::<SdkSelection>::new(metadata.clone())
                .with_properties(properties.clone()),
        )?
        .register(
            DeclaredExtractor::with_defaults(metadata.clone(), paths)
                .with_properties(properties.clone()),
        )?
        .register(DeclaredExtractor::with_defaults(metadata, runtime).with_properties(properties))?
        .build())
}
