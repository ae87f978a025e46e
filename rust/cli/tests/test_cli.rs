use fourline_cli::run;

fn run_args(args: &[&str]) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(args.iter().copied(), &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
fn help_goes_to_stdout() {
    let (code, out, err) = run_args(&["fourline", "--help"]);
    assert_eq!(code, 0);
    assert!(out.contains("eval"));
    assert!(out.contains("cfg"));
    assert!(err.is_empty());
}

#[test]
fn version_goes_to_stdout() {
    let (code, out, _) = run_args(&["fourline", "--version"]);
    assert_eq!(code, 0);
    assert!(out.contains("fourline"));
}

#[test]
fn missing_command_lists_commands() {
    let (code, out, err) = run_args(&["fourline"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("Usage: fourline <command> [options]"));
    assert!(err.contains("  eval"));
    assert!(err.contains("  cfg"));
}

#[test]
fn unknown_command_is_an_error() {
    let (code, _, err) = run_args(&["fourline", "serve"]);
    assert_eq!(code, 2);
    assert!(err.contains("serve"));
}
