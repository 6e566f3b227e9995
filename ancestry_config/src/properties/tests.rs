//! Unit tests for property parsing and package resource lookup.

use std::io::Write as _;

use anyhow::{Context, Result, anyhow, ensure};
use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};
use rstest::rstest;
use tempfile::TempDir;

use super::{DirResources, InMemoryResources, PackageProperties, PropertySet};
use crate::PropertyError;

#[rstest]
#[case("sdk: 21", "21")]
#[case("sdk=21", "21")]
#[case("sdk 21", "21")]
#[case("  sdk  =  21  ", "21")]
#[case("sdk :21", "21")]
fn separators_are_interchangeable(#[case] text: &str, #[case] expected: &str) {
    assert_eq!(PropertySet::parse(text).get("sdk"), Some(expected));
}

#[rstest]
fn comments_and_blank_lines_are_ignored() {
    let props = PropertySet::parse("# leading comment\n\n! bang comment\nmanifest: --none\n");
    assert_eq!(props.len(), 1);
    assert_eq!(props.get("manifest"), Some("--none"));
}

#[rstest]
fn backslash_continues_a_line() {
    let props = PropertySet::parse("shadows: a.One, \\\n    a.Two\nsdk: 9");
    assert_eq!(
        props.list("shadows"),
        Some(vec!["a.One".to_owned(), "a.Two".to_owned()])
    );
    assert_eq!(props.get("sdk"), Some("9"));
}

#[rstest]
fn escaped_separators_stay_in_the_key() {
    let props = PropertySet::parse("odd\\:key = value");
    assert_eq!(props.get("odd:key"), Some("value"));
}

#[rstest]
fn later_declarations_win() {
    let props = PropertySet::parse("qualifiers: first\nqualifiers: second");
    assert_eq!(props.string("qualifiers").as_deref(), Some("second"));
}

#[rstest]
fn declared_empty_list_differs_from_undeclared() {
    let props = PropertySet::parse("shadows:");
    assert!(props.contains_key("shadows"));
    assert_eq!(props.list("shadows"), Some(Vec::new()));
    assert_eq!(props.string("shadows"), None);
    assert_eq!(props.list("libraries"), None);
}

#[rstest]
fn typed_values_report_the_offending_key() {
    let props = PropertySet::parse("sdk: 21, nine");
    match props.parse_list::<u32>("sdk") {
        Err(PropertyError::InvalidValue { key, value, .. }) => {
            assert_eq!(key, "sdk");
            assert_eq!(value, "nine");
        }
        other => panic!("expected invalid value, got {other:?}"),
    }
    assert!(matches!(props.parse_value::<u32>("minSdk"), Ok(None)));
}

#[rstest]
#[case("", "robolectric.properties")]
#[case("org", "org/robolectric.properties")]
#[case("org.robolectric", "org/robolectric/robolectric.properties")]
fn resource_paths_mirror_packages(#[case] package: &str, #[case] expected: &str) {
    let properties =
        PackageProperties::new(InMemoryResources::new()).with_file_name("robolectric.properties");
    assert_eq!(properties.resource_path(package), expected);
}

#[rstest]
fn missing_resources_are_not_errors() -> Result<()> {
    let properties = PackageProperties::new(
        InMemoryResources::new().with_resource("org/config.properties", "sdk: 9"),
    );
    let top = properties.load("").map_err(|err| anyhow!(err.to_string()))?;
    ensure!(top.is_none(), "top level has no resource");
    let org = properties
        .load("org")
        .map_err(|err| anyhow!(err.to_string()))?
        .context("org resource should load")?;
    ensure!(org.get("sdk") == Some("9"), "unexpected org contents: {org:?}");
    Ok(())
}

fn write_resource(dir: &Dir, path: &str, contents: &str) -> Result<()> {
    if let Some(parent) = Utf8Path::new(path).parent().filter(|p| !p.as_str().is_empty()) {
        dir.create_dir_all(parent)
            .with_context(|| format!("create {parent}"))?;
    }
    let mut file = dir.create(path).with_context(|| format!("create {path}"))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("write {path}"))?;
    Ok(())
}

#[rstest]
fn directory_resources_are_read_beneath_the_root() -> Result<()> {
    let temp = TempDir::new().context("create temporary directory")?;
    let root = Utf8Path::from_path(temp.path())
        .ok_or_else(|| anyhow!("temporary directory path is not valid UTF-8"))?;
    let dir = Dir::open_ambient_dir(root, ambient_authority()).context("open temp dir")?;
    write_resource(&dir, "org/example/config.properties", "qualifiers: from-dir\n")?;

    let resources = DirResources::open(root).map_err(|err| anyhow!(err.to_string()))?;
    let properties = PackageProperties::new(resources);
    let loaded = properties
        .load("org.example")
        .map_err(|err| anyhow!(err.to_string()))?
        .context("package resource should load")?;
    ensure!(loaded.get("qualifiers") == Some("from-dir"));
    let absent = properties
        .load("org")
        .map_err(|err| anyhow!(err.to_string()))?;
    ensure!(absent.is_none(), "org has no resource");
    Ok(())
}
