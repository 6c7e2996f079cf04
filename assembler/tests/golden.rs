use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;

use tempfile;

use assembler::{assemble_file, AssemblerFailure, ErrorKind, OutputOptions};

fn get_test_input_file_name(relative_to_manifest: &str) -> PathBuf {
    let mut location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    location.push(relative_to_manifest);
    if location.exists() {
        location
    } else {
        panic!(
            "Cannot find input {relative_to_manifest}: {} does not exist",
            location.display()
        );
    }
}

fn get_temp_output_file_name() -> tempfile::TempPath {
    tempfile::Builder::new()
        .suffix(".out")
        .tempfile()
        .expect("should be able to create a temporary file")
        .into_temp_path()
}

fn files_are_identical(expected: &OsStr, got: &OsStr) -> Result<(), String> {
    fn must_read(name: &OsStr) -> String {
        fs::read_to_string(name).expect(&format!("should be able to read test file {name:?}"))
    }

    let expected_text = must_read(expected);
    let got_text = must_read(got);
    for (index, (expected_line, got_line)) in expected_text.lines().zip(got_text.lines()).enumerate()
    {
        if expected_line != got_line {
            return Err(format!(
                "difference at word {index}: expected {expected_line} but got {got_line}"
            ));
        }
    }
    let expected_len = expected_text.lines().count();
    let got_len = got_text.lines().count();
    if expected_len != got_len {
        return Err(format!(
            "wrong output length: expected {expected_len} words but got {got_len}"
        ));
    }
    Ok(())
}

fn assembler_golden_output_test(
    input_relative_path: &str,
    catalog_relative_path: &str,
    golden_output_relative_path: &str,
) -> Result<(), String> {
    let input = get_test_input_file_name(input_relative_path);
    let catalog = get_test_input_file_name(catalog_relative_path);
    let golden = get_test_input_file_name(golden_output_relative_path);
    let actual_output = get_temp_output_file_name();

    match assemble_file(
        input.as_os_str(),
        catalog.as_os_str(),
        &actual_output,
        OutputOptions::default(),
    ) {
        Ok(()) => match files_are_identical(golden.as_os_str(), actual_output.as_os_str()) {
            Ok(()) => Ok(()),
            Err(e) => Err(format!(
                "{} and {} are not identical: {}",
                golden.display(),
                actual_output.display(),
                e
            )),
        },
        Err(e) => Err(format!("failed to assemble {input_relative_path}: {e}")),
    }
}

#[test]
fn golden_output_assembling_countdown_program() {
    assembler_golden_output_test(
        "testdata/countdown.asm",
        "testdata/crash.cat",
        "testdata/countdown.expected",
    )
    .expect("actual and golden outputs should have been identical");
}

#[test]
fn missing_input_file_is_reported() {
    let catalog = get_test_input_file_name("testdata/crash.cat");
    let output = get_temp_output_file_name();
    let result = assemble_file(
        OsStr::new("testdata/does-not-exist.asm"),
        catalog.as_os_str(),
        &output,
        OutputOptions::default(),
    );
    match result {
        Err(e @ AssemblerFailure::Io(_)) => assert_eq!(e.kind(), ErrorKind::Io),
        other => panic!("expected a read failure, got {other:?}"),
    }
}

#[test]
fn bad_catalog_is_reported() {
    let input = get_test_input_file_name("testdata/countdown.asm");
    let catalog = get_test_input_file_name("testdata/countdown.expected");
    let output = get_temp_output_file_name();
    match assemble_file(
        input.as_os_str(),
        catalog.as_os_str(),
        &output,
        OutputOptions::default(),
    ) {
        Err(e) => assert_eq!(e.kind(), ErrorKind::BadCatalog),
        Ok(()) => panic!("a file of numbers should not be accepted as a catalog"),
    }
}
