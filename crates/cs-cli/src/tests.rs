use super::*;
use crate::cli_test_support::*;

use std::fs;

use cs_dialect::{parse_dialect_definitions, DialectDefinition};
use cs_serial::{Encoding, ScriptSerializer};

fn run_args(args: &[&str]) -> i32 {
    let mut full = vec!["cmdscript"];
    full.extend_from_slice(args);
    run_cli_from_args(full)
}

#[test]
fn dialects_and_describe_succeed_for_builtins() {
    assert_eq!(run_args(&["dialects"]), 0);
    assert_eq!(run_args(&["describe", "--dialect", "c2"]), 0);
    assert_eq!(run_args(&["describe", "--dialect", "c9"]), 1);
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    assert_eq!(run_args(&["frobnicate"]), 2);
}

#[test]
fn inspect_reads_both_encodings() {
    for (name, encoding) in [("inspect.cosb", Encoding::Binary), ("inspect.json", Encoding::Json)] {
        let path = write_c1_script(name, encoding);
        assert_eq!(
            run_args(&["inspect", "--in", path.to_string_lossy().as_ref()]),
            0
        );
    }
}

#[test]
fn inspect_reports_missing_input() {
    let missing = temp_path("missing.cosb");
    assert_eq!(
        run_args(&["inspect", "--in", missing.to_string_lossy().as_ref()]),
        1
    );
}

#[test]
fn convert_rewrites_encoding() {
    let input = write_c1_script("convert-in.cosb", Encoding::Binary);
    let output = temp_path("convert-out.json");
    let code = run_args(&[
        "convert",
        "--in",
        input.to_string_lossy().as_ref(),
        "--out",
        output.to_string_lossy().as_ref(),
        "--format",
        "json",
    ]);
    assert_eq!(code, 0);

    let bytes = fs::read(&output).expect("converted file");
    assert_eq!(Encoding::detect(&bytes), Encoding::Json);
    let serializer = ScriptSerializer::new(cs_api::default_registry());
    let loaded = serializer.load_detected(&bytes).expect("load converted");
    assert_eq!(loaded, c1_script(serializer.registry()));
}

#[test]
fn retarget_moves_script_to_another_dialect() {
    let input = write_c1_script("retarget-in.cosb", Encoding::Binary);
    let output = temp_path("retarget-out.cosb");
    let code = run_args(&[
        "retarget",
        "--in",
        input.to_string_lossy().as_ref(),
        "--dialect",
        "c2",
        "--out",
        output.to_string_lossy().as_ref(),
    ]);
    assert_eq!(code, 0);

    let serializer = ScriptSerializer::new(cs_api::default_registry());
    let moved = serializer.load_from_path(&output).expect("load retargeted");
    let c2 = serializer.registry().get("c2").expect("c2");
    assert_eq!(moved.dialect().name(), "c2");
    assert_eq!(moved.command_names(c2), vec!["cmd snde", "cmd next"]);
}

#[test]
fn retarget_fails_closed_when_command_is_missing() {
    let input = write_c1_script("retarget-missing.cosb", Encoding::Binary);
    let output = temp_path("retarget-missing-out.cosb");
    let code = run_args(&[
        "retarget",
        "--in",
        input.to_string_lossy().as_ref(),
        "--dialect",
        "c3",
        "--out",
        output.to_string_lossy().as_ref(),
    ]);
    assert_eq!(code, 1);
    assert!(!output.exists());
}

#[test]
fn dialect_files_extend_the_registry() {
    let definition = temp_path("test1.dialect.json");
    write_file(&definition, TEST1_DEFINITION);
    let definition_arg = definition.to_string_lossy().to_string();

    assert_eq!(
        run_args(&["--dialects", &definition_arg, "describe", "--dialect", "Test1"]),
        0
    );
    assert_eq!(
        run_args(&["describe", "--dialect", "Test1", "--dialects", &definition_arg]),
        0
    );
}

#[test]
fn invalid_dialect_file_is_reported() {
    let definition = temp_path("broken.dialect.json");
    write_file(&definition, "{ not json");
    assert_eq!(
        run_args(&[
            "--dialects",
            definition.to_string_lossy().as_ref(),
            "dialects"
        ]),
        1
    );
}

#[test]
fn export_dialect_writes_a_loadable_definition() {
    let out = temp_path("export").join("c3.dialect.json");
    let code = run_args(&[
        "export-dialect",
        "--dialect",
        "c3",
        "--out",
        out.to_string_lossy().as_ref(),
    ]);
    assert_eq!(code, 0);

    let raw = fs::read_to_string(&out).expect("exported file");
    let definitions = parse_dialect_definitions(&raw).expect("parse export");
    let registry = cs_api::default_registry();
    let c3 = registry.get("c3").expect("c3");
    assert_eq!(definitions, vec![DialectDefinition::from(c3)]);
    let rebuilt = definitions
        .into_iter()
        .next()
        .expect("one definition")
        .into_dialect()
        .expect("rebuild");
    assert_eq!(rebuilt.commands(), c3.commands());
}
