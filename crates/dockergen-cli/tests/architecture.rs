use arch_lint::rules::{NoErrorSwallowing, NoSilentResultDrop};
use arch_lint::{Analyzer, Severity};
use std::path::{Path, PathBuf};

/// Crates whose library and binary sources must propagate every error.
const CRATES: [&str; 4] = [
    "dockergen-core",
    "dockergen-build",
    "dockergen-registry",
    "dockergen-cli",
];

fn crates_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("crates directory")
        .to_path_buf()
}

/// AL003 (no-error-swallowing) and AL013 (no-silent-result-drop) over the
/// `src/` tree of every dockergen crate. Integration tests and the embedded
/// Dockerfile templates are not Rust sources and are left out.
#[test]
fn dockergen_sources_propagate_errors() {
    let mut reports = Vec::new();

    for name in CRATES {
        let src = crates_dir().join(name).join("src");
        assert!(src.is_dir(), "missing sources for {name}");

        let analyzer = Analyzer::builder()
            .root(src.as_path())
            .exclude("**/target/**")
            .rule(NoErrorSwallowing::new())
            .rule(NoSilentResultDrop::new())
            .build()
            .expect("build analyzer");

        let result = analyzer.analyze().expect("analyze");
        if result.has_violations_at(Severity::Warning) {
            reports.push(format!(
                "{name}:\n{}",
                result.format_test_report(Severity::Warning)
            ));
        }
    }

    assert!(reports.is_empty(), "{}", reports.join("\n"));
}
