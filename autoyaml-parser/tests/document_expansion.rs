//! Expansion of `autoyaml` directives against the fixtures in `tests/fixtures`.

use autoyaml_parser::autoyaml::directive::normalize_path;
use autoyaml_parser::autoyaml::{
    expand_document, BuildEnvironment, DirectiveError, LineKind, MarkerSet, SourceLoader,
};
use std::fs;
use std::path::PathBuf;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

#[test]
fn extracts_service_fixture() {
    let buffer = SourceLoader::default()
        .load(fixtures().join("service.yaml"))
        .unwrap();

    let docs: Vec<(&str, usize)> = buffer
        .iter()
        .filter(|line| !line.is_separator())
        .map(|line| (line.text.as_str(), line.line))
        .collect();
    assert_eq!(
        docs,
        vec![
            ("Service configuration", 1),
            ("Settings read by the service at startup.", 2),
            ("", 3),
            ("Every key can be overridden from the environment.", 4),
            ("Database", 7),
            ("Connection to the primary database.", 8),
            (" host: server to connect to", 9),
            (" port: TCP port, defaults to 5432", 10),
        ]
    );
    assert_eq!(buffer.len(), 19);
    assert_eq!(buffer.lines()[15].kind, LineKind::ParameterContinuation);
}

#[test]
fn expands_directive_in_place() {
    let docs = fixtures().join("docs");
    let document = docs.join("index.rst");
    let source = fs::read_to_string(&document).unwrap();
    let mut env = BuildEnvironment::new(&docs, "..", MarkerSet::default());

    let expanded = expand_document(&mut env, &document, &source).unwrap();

    let expected = [
        "Inventory",
        "=========",
        "",
        "Reference",
        "---------",
        "",
        "Service configuration",
        "",
        "Settings read by the service at startup.",
        "",
        "",
        "",
        "Every key can be overridden from the environment.",
        "",
        "",
        "Database",
        "",
        "Connection to the primary database.",
        "",
        " host: server to connect to",
        "",
        " port: TCP port, defaults to 5432",
        "",
        "",
        "",
        "",
        "End of reference.",
    ]
    .join("\n")
        + "\n";
    assert_eq!(expanded, expected);

    let deps: Vec<PathBuf> = env.dependencies().iter().cloned().collect();
    assert_eq!(deps, vec![normalize_path(&fixtures().join("service.yaml"))]);
}

#[test]
fn indented_directive_indents_extracted_text() {
    let docs = fixtures().join("docs");
    let mut env = BuildEnvironment::new(&docs, "..", MarkerSet::default());
    let source = ".. note::\n\n   .. autoyaml:: service.yaml\n";

    let expanded = expand_document(&mut env, "notes.rst", source).unwrap();
    let mut lines = expanded.lines();
    assert_eq!(lines.next(), Some(".. note::"));
    assert_eq!(lines.next(), Some(""));
    assert_eq!(lines.next(), Some("   Service configuration"));
    assert!(expanded.lines().all(|line| line.trim_end() == line));
}

#[test]
fn documents_without_directives_pass_through() {
    let mut env = BuildEnvironment::new(fixtures(), "..", MarkerSet::default());
    let source = "Title\n=====\n\nText with .. autoyaml:: inline mention.";
    assert_eq!(expand_document(&mut env, "plain.rst", source).unwrap(), source);
    assert!(env.dependencies().is_empty());
}

#[test]
fn same_file_twice_is_one_dependency() {
    let docs = fixtures().join("docs");
    let mut env = BuildEnvironment::new(&docs, "..", MarkerSet::default());
    let source = ".. autoyaml:: service.yaml\n\n.. autoyaml:: ./service.yaml\n";
    expand_document(&mut env, "twice.rst", source).unwrap();
    assert_eq!(env.dependencies().len(), 1);
}

#[test]
fn custom_root_and_markers() {
    let dir = tempfile::tempdir().unwrap();
    let yaml_dir = dir.path().join("yaml");
    fs::create_dir(&yaml_dir).unwrap();
    fs::write(
        yaml_dir.join("app.yaml"),
        "//! Application\n// Top level keys.\n//- debug: verbose logging\ndebug: false\n",
    )
    .unwrap();

    let markers = MarkerSet::new("//!", "//-", "//").unwrap();
    let mut env = BuildEnvironment::new(dir.path(), "yaml", markers);
    let expanded = expand_document(&mut env, "index.rst", ".. autoyaml:: app.yaml").unwrap();

    assert_eq!(
        expanded,
        "Application\n\nTop level keys.\n\n- debug: verbose logging\n"
    );
}

#[test]
fn missing_yaml_aborts_expansion() {
    let docs = fixtures().join("docs");
    let mut env = BuildEnvironment::new(&docs, "..", MarkerSet::default());
    let source = "Intro\n\n.. autoyaml:: service.yaml\n\n.. autoyaml:: absent.yaml\n";

    let err = expand_document(&mut env, "index.rst", source).unwrap_err();
    assert!(matches!(err, DirectiveError::NotAFile { line: 5, .. }));
    assert!(err.to_string().starts_with("index.rst:5: location \""));
    assert!(err.to_string().ends_with("absent.yaml\" is not a file."));
}

#[test]
fn relative_srcdir_records_absolute_dependency() {
    // cargo runs integration tests from the package directory
    let mut env = BuildEnvironment::new("tests/fixtures/docs", "..", MarkerSet::default());
    expand_document(&mut env, "index.rst", ".. autoyaml:: service.yaml\n").unwrap();

    let deps: Vec<&PathBuf> = env.dependencies().iter().collect();
    assert_eq!(deps.len(), 1);
    assert!(deps[0].is_absolute());
    assert!(deps[0].ends_with("tests/fixtures/service.yaml"));
    assert!(deps[0].is_file());
}

#[test]
fn usage_examples_in_literal_blocks_are_not_expanded() {
    let docs = fixtures().join("docs");
    let mut env = BuildEnvironment::new(&docs, "..", MarkerSet::default());
    let source = "Usage::\n\n   .. autoyaml:: missing.yaml\n\n\
                  .. code-block:: rst\n\n   .. autoyaml:: missing.yaml\n\n\
                  .. autoyaml:: service.yaml\n";

    let expanded = expand_document(&mut env, "usage.rst", source).unwrap();
    assert_eq!(expanded.matches(".. autoyaml:: missing.yaml").count(), 2);
    assert!(expanded.contains("Service configuration"));
    assert!(!expanded.contains(".. autoyaml:: service.yaml"));
}
