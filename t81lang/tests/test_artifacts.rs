use std::fs;
use t81lang::{
    artifact::{module_name, write_artifacts},
    compile_str,
    config::CompileOptions,
    cweb::ModuleDescriptor,
    parsing::Program,
};

const ANNOTATED: &str = include_str!("annotated.t81");

#[test]
fn test_write_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");

    let options = CompileOptions::default();
    let compilation = compile_str(ANNOTATED, &options).unwrap();
    let written = write_artifacts(&out, "annotated", &compilation, &options, false).unwrap();

    let names: Vec<_> = written
        .iter()
        .filter_map(|path| path.file_name()?.to_str())
        .collect();
    assert_eq!(
        names,
        [
            "annotated.ast.json",
            "annotated.tisc",
            "annotated.entropy.json",
        ]
    );
    assert!(!out.join("annotated.cweb").exists());

    let tisc = fs::read_to_string(out.join("annotated.tisc")).unwrap();
    assert_eq!(tisc, compilation.ir);

    // Syntax tree reads back into the same program.
    let ast = fs::read_to_string(out.join("annotated.ast.json")).unwrap();
    let program: Program = serde_json::from_str(&ast).unwrap();
    assert_eq!(program, compilation.program);

    // Two space indentation.
    let entropy = fs::read_to_string(out.join("annotated.entropy.json")).unwrap();
    assert!(entropy.starts_with("[\n  {\n    \"symbol\": \"x\""));
}

#[test]
fn test_write_descriptor() {
    let dir = tempfile::tempdir().unwrap();

    let options = CompileOptions {
        module_version: "1.4.0".to_owned(),
        ..Default::default()
    };
    let compilation = compile_str(ANNOTATED, &options).unwrap();
    let written = write_artifacts(dir.path(), "seed", &compilation, &options, true).unwrap();
    assert_eq!(written.len(), 4);

    let text = fs::read_to_string(dir.path().join("seed.cweb")).unwrap();
    let descriptor: ModuleDescriptor = serde_json::from_str(&text).unwrap();

    assert_eq!(descriptor.name, "seed");
    assert_eq!(descriptor.version, "1.4.0");
    assert_eq!(descriptor.source.path, "./seed/");
    assert_eq!(descriptor.symbols, compilation.annotations);
}

#[test]
fn test_module_name_from_input_path() {
    assert_eq!(module_name("programs/annotated.t81").unwrap(), "annotated");
}
