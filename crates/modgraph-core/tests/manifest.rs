use std::fs;

use modgraph_core::{
    BuildModel, Category, Dependency, ErrorKind, Module, RelationKind, classify, load_manifest,
};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

const TOML_MANIFEST: &str = r#"
[[module]]
name = "launcher"
category = "STARTUP"

[[module.dependency]]
kind = "runtime"
project = "core"

[[module]]
name = "core"
category = "CORE"

[[module.dependency]]
kind = "api"
external = "com.google.guava:guava:27.1-android"

[[module.dependency]]
kind = "compileOnly"
project = "annotations"

[[module]]
name = "annotations"
"#;

const JSON_MANIFEST: &str = r#"{
  "modules": [
    {
      "name": "launcher",
      "category": "STARTUP",
      "dependencies": [{ "kind": "runtime", "project": "core" }]
    },
    {
      "name": "core",
      "category": "CORE",
      "dependencies": [
        { "kind": "api", "external": "com.google.guava:guava:27.1-android" },
        { "kind": "compileOnly", "project": "annotations" }
      ]
    },
    { "name": "annotations" }
  ]
}"#;

fn expected_model() -> BuildModel {
    BuildModel::new(vec![
        Module::new("launcher")
            .with_category(Category::Startup)
            .depends_on(RelationKind::Runtime, "core"),
        Module::new("core")
            .with_category(Category::Core)
            .with_dependency(Dependency::external(
                RelationKind::Api,
                "com.google.guava:guava:27.1-android",
            ))
            .depends_on(RelationKind::CompileOnly, "annotations"),
        Module::new("annotations"),
    ])
    .unwrap()
}

#[test]
fn toml_and_json_manifests_load_the_same_model() {
    let dir = tempdir().expect("tempdir");
    let toml_path = dir.path().join("modules.toml");
    let json_path = dir.path().join("modules.json");
    fs::write(&toml_path, TOML_MANIFEST).expect("write toml");
    fs::write(&json_path, JSON_MANIFEST).expect("write json");

    let from_toml = load_manifest(&toml_path).expect("load toml");
    let from_json = load_manifest(&json_path).expect("load json");

    assert_eq!(from_toml, expected_model());
    assert_eq!(from_json, expected_model());
}

#[test]
fn manifest_without_category_classifies_as_internal() {
    let model = expected_model();
    let annotations = model.module("annotations").unwrap();
    assert_eq!(classify(annotations), Category::Internal);
}

#[test]
fn missing_manifest_reports_file_not_found() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("absent.toml");

    let err = load_manifest(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileNotFound);
    assert_eq!(err.operation(), "manifest::load");
    assert_eq!(err.context_value("path"), Some(path.display().to_string().as_str()));
}

#[test]
fn duplicate_modules_in_manifest_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("dup.toml");
    fs::write(
        &path,
        "[[module]]\nname = \"core\"\n\n[[module]]\nname = \"core\"\n",
    )
    .expect("write manifest");

    let err = load_manifest(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
}

#[test]
fn java_9_compiler_category_is_accepted() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("modules.toml");
    fs::write(
        &path,
        "[[module]]\nname = \"process-services\"\ncategory = \"REQUIRES_JAVA_9_COMPILER\"\n",
    )
    .expect("write manifest");

    let model = load_manifest(&path).expect("load manifest");
    let module = model.module("process-services").unwrap();
    assert_eq!(classify(module), Category::RequiresJava9Compiler);
}

#[test]
fn module_named_like_a_category_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("clash.toml");
    fs::write(&path, "[[module]]\nname = \"WORKER\"\ncategory = \"WORKER\"\n")
        .expect("write manifest");

    let err = load_manifest(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    assert_eq!(err.context_value("module"), Some("WORKER"));
}
