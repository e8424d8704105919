//! End-to-end runs through `Session`, checking output and exit codes.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use garnet::{exit_code, RunError, Session, EXIT_COMPILE_ERROR, EXIT_OK, EXIT_RUNTIME_ERROR};
use garnet_diagnostic::DiagnosticConfig;
use garnet_eval::{buffer_handler, SharedPrintHandler};
use pretty_assertions::assert_eq;

fn session() -> (Session, SharedPrintHandler) {
    let handler = buffer_handler();
    (Session::with_print_handler(handler.clone()), handler)
}

/// Run a whole program; returns (stdout, exit code, stderr text).
fn run(source: &str) -> (String, i32, String) {
    let (mut session, handler) = session();
    let result = session.run(source);
    let stderr = result.as_ref().err().map(ToString::to_string).unwrap_or_default();
    (handler.get_output(), exit_code(&result), stderr)
}

#[test]
fn add_program_prints_five() {
    let source = "def add(a, b)\nreturn a + b\nend\nputs add(2, 3)\n";
    assert_eq!(run(source), ("5\n".to_owned(), EXIT_OK, String::new()));
}

#[test]
fn undefined_variable_exits_70() {
    let (out, code, err) = run("puts x");
    assert_eq!(out, "");
    assert_eq!(code, EXIT_RUNTIME_ERROR);
    assert_eq!(err, "Undefined variable 'x'.\n[line 1]");
}

#[test]
fn compile_errors_exit_65_and_run_nothing() {
    let (out, code, err) = run("puts 1\nputs (1 +\n");
    assert_eq!(out, "");
    assert_eq!(code, EXIT_COMPILE_ERROR);
    assert!(err.starts_with("[line 2] Error"), "{err}");
}

#[test]
fn lex_errors_are_reported_with_parse_errors() {
    let (mut session, _) = session();
    let err = session.run("x = @\ny = (\n").unwrap_err();
    let RunError::Compile(errors) = &err else {
        panic!("expected compile errors, got {err}");
    };
    assert_eq!(
        errors.diagnostics[0].to_string(),
        "[line 1] Error: Unexpected character '@'."
    );
    assert!(errors.diagnostics.len() >= 2);
    assert_eq!(err.exit_code(), EXIT_COMPILE_ERROR);
}

#[test]
fn error_limit_truncates_the_report() {
    let handler = buffer_handler();
    let mut session = Session::with_print_handler(handler).diagnostic_config(DiagnosticConfig {
        error_limit: 2,
        deduplicate: true,
    });
    let err = session.run("@\n@\n@\n@\n").unwrap_err();
    let RunError::Compile(errors) = err else {
        panic!("expected compile errors");
    };
    assert_eq!(errors.diagnostics.len(), 2);
    assert_eq!(errors.dropped, 2);
    assert!(errors.to_string().ends_with("... and 2 more error(s)"));
}

#[test]
fn swap_promotion_and_ranges() {
    let source = "\
a, b = 1, 2
a, b = b, a
puts a, b
puts 1 + 2.0
puts \"ab\" * 3
puts (1..3)
puts (1...3)
";
    let (out, code, _) = run(source);
    assert_eq!(code, EXIT_OK);
    assert_eq!(out, "2\n1\n3.0\nababab\n[1, 2, 3]\n[1, 2]\n");
}

#[test]
fn comments_are_ignored() {
    let source = "\
# leading comment
=begin
puts \"hidden\"
=end
puts \"shown\" # trailing
";
    assert_eq!(run(source).0, "shown\n");
}

#[test]
fn closures_across_calls() {
    let source = "\
def make_greeter(greeting)
  def greet(name)
    return greeting + \", \" + name
  end
  return greet
end
hi = make_greeter(\"hi\")
yo = make_greeter(\"yo\")
puts hi(\"ann\")
puts yo(\"bob\")
";
    assert_eq!(run(source).0, "hi, ann\nyo, bob\n");
}

#[test]
fn nested_control_flow() {
    let source = "\
def first_even_square(limit)
  for i in 1..limit
    if i % 2 == 1 then next end
    j = 0
    while true
      j += 1
      if j == 3 then break end
    end
    return i * i + j
  end
  return nil
end
puts first_even_square(5)
puts first_even_square(1)
";
    assert_eq!(run(source).0, "7\nnil\n");
}

#[test]
fn runtime_error_keeps_earlier_output() {
    let (out, code, err) = run("puts \"before\"\nputs 1 / 0\nputs \"after\"");
    assert_eq!(out, "before\n");
    assert_eq!(code, EXIT_RUNTIME_ERROR);
    assert_eq!(err, "divided by 0\n[line 2]");
}

#[test]
fn session_persists_between_runs() {
    let (mut session, handler) = session();
    session.run("count = 1\n").unwrap();
    session.run("def bump(n)\n  return n + 1\nend\n").unwrap();
    assert!(session.run("puts nope\n").is_err());
    session.run("puts bump(count)\n").unwrap();
    assert_eq!(handler.get_output(), "2\n");
}

#[test]
fn empty_program_succeeds() {
    assert_eq!(run(""), (String::new(), EXIT_OK, String::new()));
    assert_eq!(run("\n\n# nothing\n").1, EXIT_OK);
}

#[test]
fn oversized_allocations_are_runtime_errors() {
    let (_, code, err) = run("for i in 0..9223372036854775807\n  puts i\nend\n");
    assert_eq!(code, EXIT_RUNTIME_ERROR);
    assert_eq!(err, "failed to allocate memory\n[line 1]");

    let (_, code, err) = run("puts \"before\"\ns = \"ab\" * 4611686018427387904\n");
    assert_eq!(code, EXIT_RUNTIME_ERROR);
    assert_eq!(err, "failed to allocate memory\n[line 2]");
}

#[test]
fn bare_name_sequence_is_a_statement() {
    let (out, code, _) = run("a = 1\nb = 2\na, b\nputs a, b\n");
    assert_eq!(code, EXIT_OK);
    assert_eq!(out, "1\n2\n");
}
