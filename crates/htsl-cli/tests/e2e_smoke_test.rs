use std::fs;

use tempfile::tempdir;

use htsl_cli::{Args, run};

fn args_for(input: &str) -> Args {
    Args {
        input: input.to_string(),
        check: false,
        output: None,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn check_accepts_a_valid_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("kills.htsl");
    fs::write(
        &input,
        "goto function \"reward\"\nstat kills += 1\nif and (stat kills >= 10) {\n    kill\n}\n",
    )
    .unwrap();

    let mut args = args_for(&input.to_string_lossy());
    args.check = true;

    run(&args).expect("valid file should pass --check");
    // Check mode must not rewrite the input.
    assert!(fs::read_to_string(&input).unwrap().contains("stat kills"));
}

#[test]
fn formatting_normalizes_spacing() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("messy.htsl");
    let output = temp_dir.path().join("clean.htsl");
    fs::write(&input, "stat    kills   +=   1\nkill\n").unwrap();

    let mut args = args_for(&input.to_string_lossy());
    args.output = Some(output.to_string_lossy().to_string());

    run(&args).expect("formatting should succeed");

    let formatted = fs::read_to_string(&output).unwrap();
    assert_eq!(formatted, "stat kills += 1\nkill\n");
    // The input is untouched when an explicit output is given.
    assert_eq!(fs::read_to_string(&input).unwrap(), "stat    kills   +=   1\nkill\n");
}

#[test]
fn formatting_defaults_to_in_place() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("inplace.htsl");
    fs::write(&input, "chat   \"hello\"\n").unwrap();

    run(&args_for(&input.to_string_lossy())).expect("formatting should succeed");

    assert_eq!(fs::read_to_string(&input).unwrap(), "chat \"hello\"\n");
}

#[test]
fn errors_fail_the_run() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("broken.htsl");
    fs::write(&input, "notAnAction \"x\"\n").unwrap();

    let mut args = args_for(&input.to_string_lossy());
    args.check = true;

    assert!(run(&args).is_err());
    // A failed check never touches the file.
    assert_eq!(fs::read_to_string(&input).unwrap(), "notAnAction \"x\"\n");
}

#[test]
fn style_config_controls_indentation() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("indent.htsl");
    let config = temp_dir.path().join("style.toml");
    fs::write(&input, "if and () {\nkill\n}\n").unwrap();
    fs::write(&config, "indent = \"  \"\n").unwrap();

    let mut args = args_for(&input.to_string_lossy());
    args.config = Some(config.to_string_lossy().to_string());

    run(&args).expect("formatting should succeed");

    assert_eq!(
        fs::read_to_string(&input).unwrap(),
        "if () {\n  kill\n}\n"
    );
}

#[test]
fn missing_input_is_an_io_error() {
    let args = args_for("/definitely/not/here.htsl");
    assert!(run(&args).is_err());
}
