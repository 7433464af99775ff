use dockergen_core::{EntryPoint, Error, PathFilter, discover};
use std::path::Path;
use tempfile::TempDir;

const NONE: [&str; 0] = [];

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn default_filter() -> PathFilter {
    PathFilter::new(
        ["test/test_images.*", "cmd.*"],
        [r".*k8s\.io.*", ".*knative.dev/pkg/codegen.*"],
    )
    .unwrap()
}

fn paths(entry_points: &std::collections::BTreeSet<EntryPoint>) -> Vec<&str> {
    entry_points.iter().map(EntryPoint::path).collect()
}

/// A small Go repository resembling a Knative component.
fn init_go_tree(root: &Path) {
    write(root, "go.mod", "module knative.dev/serving\n\ngo 1.22.3\n");
    write(root, "cmd/controller/main.go", "package main\n\nfunc main() {}\n");
    write(
        root,
        "cmd/webhook/main.go",
        "/*\nCopyright 2024 The Knative Authors\n*/\n\npackage main\n",
    );
    write(root, "cmd/webhook/flags.go", "package main\n\nvar port = 8443\n");
    write(root, "cmd/internal/shared.go", "package internal\n");
    write(
        root,
        "test/test_images/helloworld/helloworld.go",
        "//go:build e2e\n\npackage main\n",
    );
    write(root, "pkg/reconciler/reconciler.go", "package reconciler\n");
    write(root, "pkg/tool/main.go", "package main\n");
    write(
        root,
        "vendor/k8s.io/code-generator/cmd/client-gen/main.go",
        "package main\n",
    );
    write(
        root,
        "vendor/knative.dev/pkg/cmd/schema/main.go",
        "package main\n",
    );
    write(root, "cmd/controller/README.md", "not go\n");
}

#[test]
fn discovers_sorted_deduplicated_entry_points() {
    let tmp = TempDir::new().unwrap();
    init_go_tree(tmp.path());

    let found = discover(tmp.path(), &default_filter()).unwrap();

    assert_eq!(
        paths(&found),
        vec![
            "cmd/controller",
            "cmd/webhook",
            "test/test_images/helloworld",
            "vendor/knative.dev/pkg/cmd/schema",
        ]
    );
}

#[test]
fn empty_includes_scan_everything_not_excluded() {
    let tmp = TempDir::new().unwrap();
    init_go_tree(tmp.path());

    let filter = PathFilter::new(NONE, ["vendor/"]).unwrap();
    let found = discover(tmp.path(), &filter).unwrap();

    assert_eq!(
        paths(&found),
        vec![
            "cmd/controller",
            "cmd/webhook",
            "pkg/tool",
            "test/test_images/helloworld",
        ]
    );
}

#[test]
fn root_main_package_is_dot() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "main.go", "package main\n");

    let filter = PathFilter::new(NONE, NONE).unwrap();
    let found = discover(tmp.path(), &filter).unwrap();

    assert_eq!(paths(&found), vec!["."]);
    let names = found.first().unwrap().names();
    assert_eq!(names.binary_filename, "main");
}

#[test]
fn unparseable_file_aborts_discovery() {
    let tmp = TempDir::new().unwrap();
    init_go_tree(tmp.path());
    write(tmp.path(), "cmd/broken/main.go", "func main() {}\n");

    let err = discover(tmp.path(), &default_filter()).unwrap_err();
    match err {
        Error::ParsePackage { path, .. } => assert!(path.ends_with("cmd/broken/main.go")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unparseable_file_outside_filter_is_never_read() {
    let tmp = TempDir::new().unwrap();
    init_go_tree(tmp.path());
    write(tmp.path(), "pkg/broken/broken.go", "not go at all");

    let found = discover(tmp.path(), &default_filter()).unwrap();
    assert_eq!(found.len(), 4);
}

#[test]
fn missing_root_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let err = discover(&tmp.path().join("nope"), &default_filter()).unwrap_err();
    assert!(matches!(err, Error::Walk { .. }));
}

#[test]
fn repeated_discovery_is_identical() {
    let tmp = TempDir::new().unwrap();
    init_go_tree(tmp.path());

    let first = discover(tmp.path(), &default_filter()).unwrap();
    let second = discover(tmp.path(), &default_filter()).unwrap();
    assert_eq!(first, second);
}
