use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn demo_crate() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    write(
        root,
        "Cargo.toml",
        "[package]\nname = \"demo\"\nversion = \"0.1.0\"\nedition = \"2021\"\n",
    );
    write(root, "src/lib.rs", "pub mod demo;\n");
    write(root, "src/demo/mod.rs", "pub mod asm;\npub mod domain;\npub mod dto;\n");
    write(
        root,
        "src/demo/domain.rs",
        "pub struct User {\n    pub name: String,\n    pub age: String,\n}\n",
    );
    write(
        root,
        "src/demo/dto.rs",
        "pub struct UserAddDto {\n    pub name: String,\n    pub age: String,\n}\n",
    );
    write(
        root,
        "src/demo/asm.rs",
        r#"
use crate::demo::domain;
use crate::demo::dto;

// mapmap:assembler
pub trait UserAssembler {
    // mapmap:source:name,target:age
    // mapmap:source:age,target:name
    fn to_add_dto(&self, user: domain::User) -> dto::UserAddDto;
}
"#,
    );
    // Build output must never be scanned
    write(root, "target/debug/stale.rs", "// mapmap:assembler\npub trait Stale {}\n");

    temp
}

fn mapmap() -> Command {
    Command::cargo_bin("mapmap").unwrap()
}

#[test]
fn test_generate_from_file() {
    let temp = demo_crate();
    let out = temp.path().join("out");

    mapmap()
        .current_dir(temp.path())
        .args(["generate", "-f", "src/demo/asm.rs", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 generated, 0 failed"));

    let generated = fs::read_to_string(out.join("userassemblerimpl.rs")).unwrap();
    assert!(generated.starts_with("// Code generated by mapmap. DO NOT EDIT."));
    assert!(generated.contains("use crate::demo::asm::UserAssembler;"));
    assert!(generated.contains("target.name = user.age;"));
    assert!(generated.contains("target.age = user.name;"));
}

#[test]
fn test_generate_from_dir_skips_target() {
    let temp = demo_crate();
    let out = temp.path().join("out");

    mapmap()
        .current_dir(temp.path())
        .args(["generate", "-d", "."])
        .arg("-o")
        .arg(&out)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("userassemblerimpl.rs"))
        .stdout(predicate::str::contains("\"failures\": []"));

    assert!(!out.join("staleimpl.rs").exists());
}

#[test]
fn test_output_dir_from_config() {
    let temp = demo_crate();
    write(
        temp.path(),
        ".mapmap.json",
        r#"{ "output_dir": "gen", "impl_suffix": "Mapper" }"#,
    );

    mapmap()
        .current_dir(temp.path())
        .args(["generate", "-f", "src/demo/asm.rs"])
        .assert()
        .success();

    let generated = fs::read_to_string(temp.path().join("gen/userassemblermapper.rs")).unwrap();
    assert!(generated.contains("impl UserAssembler for UserAssemblerMapper {"));
}

#[test]
fn test_failed_interface_is_reported_without_failing_the_run() {
    let temp = demo_crate();
    write(
        temp.path(),
        "src/demo/asm.rs",
        r#"
use crate::demo::domain;
use crate::demo::dto;

// mapmap:assembler
pub trait BrokenAssembler {
    fn to_missing(&self, user: domain::User) -> dto::Missing;
}
"#,
    );

    mapmap()
        .current_dir(temp.path())
        .args(["generate", "-f", "src/demo/asm.rs", "-o", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("❌ BrokenAssembler"))
        .stdout(predicate::str::contains("0 generated, 1 failed"));
}

#[test]
fn test_missing_output_is_a_usage_error() {
    let temp = demo_crate();

    mapmap()
        .current_dir(temp.path())
        .args(["generate", "-f", "src/demo/asm.rs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No output directory"));
}

#[test]
fn test_file_and_dir_conflict() {
    mapmap()
        .args(["generate", "-f", "a.rs", "-d", "src", "-o", "out"])
        .assert()
        .failure();
}

#[test]
fn test_init_writes_config() {
    let temp = TempDir::new().unwrap();

    mapmap()
        .args(["init", "--cwd"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config"));

    let contents = fs::read_to_string(temp.path().join(".mapmap.json")).unwrap();
    assert!(contents.contains("\"impl_suffix\": \"Impl\""));

    mapmap()
        .args(["init", "--cwd"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
