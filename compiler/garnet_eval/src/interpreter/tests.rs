#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::buffer_handler;

fn run_on(interp: &mut Interpreter, source: &str) -> Result<(), EvalError> {
    let lexed = garnet_lexer::lex(source);
    assert!(lexed.errors.is_empty(), "lex errors: {:?}", lexed.errors);
    let parsed = garnet_parse::parse(&lexed.tokens);
    let messages: Vec<String> = parsed.errors.iter().map(ToString::to_string).collect();
    assert!(messages.is_empty(), "parse errors: {messages:?}");
    interp.interpret(&parsed.statements)
}

/// Run `source` on a fresh interpreter, returning captured output.
fn run(source: &str) -> (String, Result<(), EvalError>) {
    let handler = buffer_handler();
    let mut interp = InterpreterBuilder::new()
        .print_handler(handler.clone())
        .build();
    let result = run_on(&mut interp, source);
    (handler.get_output(), result)
}

fn output(source: &str) -> String {
    let (out, result) = run(source);
    if let Err(err) = result {
        panic!("runtime error: {err}\noutput so far: {out:?}");
    }
    out
}

fn runtime_error(source: &str) -> (String, EvalError) {
    let (out, result) = run(source);
    (out, result.expect_err("expected a runtime error"))
}

#[test]
fn function_call_returns_value() {
    let source = "def add(a, b)\nreturn a + b\nend\nputs add(2, 3)\n";
    assert_eq!(output(source), "5\n");
}

#[test]
fn undefined_variable_aborts_without_output() {
    let (out, err) = runtime_error("puts x");
    assert_eq!(out, "");
    assert_eq!(err.kind, EvalErrorKind::UndefinedVariable("x".to_owned()));
    assert_eq!(err.to_string(), "Undefined variable 'x'.\n[line 1]");
}

#[test]
fn parallel_assignment_swaps() {
    let source = "a, b = 1, 2\na, b = b, a\nputs a\nputs b";
    assert_eq!(output(source), "2\n1\n");
}

#[test]
fn numeric_promotion_and_string_replication() {
    let source = "puts 1 + 2.0\nputs 1 + 2\nputs \"ab\" * 3\nputs 7 / 2\nputs 7.0 / 2";
    assert_eq!(output(source), "3.0\n3\nababab\n3\n3.5\n");
}

#[test]
fn ranges_materialize_to_lists() {
    assert_eq!(output("puts (1..3)\nputs (1...3)"), "[1, 2, 3]\n[1, 2]\n");
    assert_eq!(output("puts (1.5..3)"), "nil\n");
}

#[test]
fn power_with_negative_exponent_is_a_string() {
    assert_eq!(output("puts 2 ** 3 ** 2\nputs 2 ** -2"), "512\n1/4\n");
}

#[test]
fn print_keeps_line_open_and_puts_ends_it() {
    assert_eq!(output("print \"a\", \"b\"\nputs\nputs nil, 1"), "ab\nnil\n1\n");
}

#[test]
fn loop_body_variables_do_not_escape() {
    let source = "i = 0\nwhile i < 2\n  inner = i\n  i += 1\nend\nputs i\nputs inner";
    let (out, err) = runtime_error(source);
    assert_eq!(out, "2\n");
    assert_eq!(err.to_string(), "Undefined variable 'inner'.\n[line 7]");
}

#[test]
fn begin_block_has_its_own_scope() {
    let (_, err) = runtime_error("begin\n  t = 1\nend\nputs t");
    assert_eq!(err.line, 4);
}

#[test]
fn if_branches_share_the_enclosing_scope() {
    assert_eq!(output("if true then v = 1 end\nputs v"), "1\n");
    assert_eq!(output("unless false then w = 2 end\nputs w"), "2\n");
}

#[test]
fn assignment_in_nested_scope_shadows() {
    let source = "x = 1\nbegin\n  x = 2\n  puts x\nend\nputs x";
    assert_eq!(output(source), "2\n1\n");
}

#[test]
fn compound_assignment_updates_outer_binding() {
    let source = "total = 0\nfor n in 1..4\n  total += n\nend\nputs total";
    assert_eq!(output(source), "10\n");
}

#[test]
fn compound_assignment_needs_existing_binding() {
    let (_, err) = runtime_error("y += 1");
    assert_eq!(err.to_string(), "Undefined variable 'y'.\n[line 1]");
}

#[test]
fn constants_cannot_be_rebound() {
    let (_, err) = runtime_error("Max = 1\nMax = 2");
    assert_eq!(err.kind, EvalErrorKind::ConstantReassignment("Max".to_owned()));
    assert_eq!(err.line, 2);

    let (_, err) = runtime_error("def f()\n  X = 1\nend\nf()");
    assert_eq!(err.to_string(), "dynamic constant assignment\n[line 2]");
}

#[test]
fn global_variables_are_visible_everywhere() {
    let source = "def set_global()\n  $g = 5\nend\nset_global()\nputs $g\nputs $unset";
    assert_eq!(output(source), "5\nnil\n");
}

#[test]
fn closures_keep_their_own_environment() {
    let source = "\
def make_adder(n)
  def add(x)
    return x + n
  end
  return add
end
a = make_adder(1)
b = make_adder(10)
puts a(5)
puts b(5)
";
    assert_eq!(output(source), "6\n15\n");
}

#[test]
fn closures_share_mutable_state_per_instance() {
    let source = "\
def counter()
  count = 0
  def inc()
    count += 1
    return count
  end
  return inc
end
c = counter()
c()
puts c()
d = counter()
puts d()
";
    assert_eq!(output(source), "2\n1\n");
}

#[test]
fn break_exits_only_the_innermost_loop() {
    let source = "\
for i in 1..3
  for j in 1..3
    if j == 2 then break end
    puts i * 10 + j
  end
end
";
    assert_eq!(output(source), "11\n21\n31\n");
}

#[test]
fn next_skips_the_rest_of_the_iteration() {
    let source = "\
i = 0
until i == 4
  i += 1
  if i % 2 == 0 then next end
  puts i
end
";
    assert_eq!(output(source), "1\n3\n");
}

#[test]
fn loop_keeps_one_scope_across_iterations() {
    let source = "\
n = 0
loop do
  n += 1
  seen = n
  if n == 3 then break end
end
puts n
";
    assert_eq!(output(source), "3\n");
}

#[test]
fn return_from_deep_inside_loops() {
    let source = "\
def find()
  loop do
    for x in 1..10
      if x == 3 then return x * 100 end
    end
  end
end
puts find()
";
    assert_eq!(output(source), "300\n");
}

#[test]
fn function_without_return_yields_nil() {
    assert_eq!(output("def f()\n  1 + 1\nend\nputs f()"), "nil\n");
}

#[test]
fn recursion() {
    let source = "\
def fib(n)
  if n < 2 then return n end
  return fib(n - 1) + fib(n - 2)
end
puts fib(15)
";
    assert_eq!(output(source), "610\n");
}

#[test]
fn runaway_recursion_is_a_runtime_error() {
    let handler = buffer_handler();
    let mut interp = InterpreterBuilder::new()
        .print_handler(handler)
        .max_call_depth(50)
        .build();
    let err = run_on(&mut interp, "def f(n)\n  return f(n + 1)\nend\nf(0)").unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::StackTooDeep);
    assert_eq!(err.line, 2);
    assert_eq!(interp.call_depth, 0);
}

#[test]
fn case_matches_by_value_then_printed_form() {
    let source = "\
n = 2
case n
when 1 then puts \"one\"
when \"2\" then puts \"string two\"
else
  puts \"other\"
end
case 3.0
when 3 then puts \"three\"
end
case 9
when 1 then puts \"one\"
else
  puts \"other\"
end
";
    assert_eq!(output(source), "string two\nthree\nother\n");
}

#[test]
fn logical_operators_short_circuit() {
    let source = "puts nil or \"default\"\nputs false and missing()\nputs 1 && 2\nputs not nil";
    assert_eq!(output(source), "default\nfalse\n2\ntrue\n");
}

#[test]
fn callables_display() {
    assert_eq!(
        output("def f()\nend\nputs f\nputs clock"),
        "<fn f>\n<native fn clock>\n"
    );
    assert_eq!(output("puts clock() > 0"), "true\n");
}

#[test]
fn call_errors() {
    let (_, err) = runtime_error("def f(a)\nend\nf(1, 2)");
    assert_eq!(err.to_string(), "Expected 1 arguments but got 2.\n[line 3]");

    let (_, err) = runtime_error("x = 1\nx()");
    assert_eq!(err.to_string(), "Can only call functions.\n[line 2]");

    let (_, err) = runtime_error("clock(1)");
    assert_eq!(err.kind, EvalErrorKind::ArityMismatch { expected: 0, got: 1 });
}

#[test]
fn for_requires_a_list() {
    let (_, err) = runtime_error("for i in 5\nend");
    assert_eq!(err.kind, EvalErrorKind::NotIterable("integer"));
    assert_eq!(err.line, 1);
}

#[test]
fn stray_control_flow_is_an_error() {
    let (_, err) = runtime_error("break");
    assert_eq!(err.to_string(), "invalid break\n[line 1]");

    let (_, err) = runtime_error("def f()\n  next\nend\nf()");
    assert_eq!(err.to_string(), "invalid next\n[line 2]");
}

#[test]
fn top_level_return_stops_quietly() {
    assert_eq!(output("puts 1\nreturn\nputs 2"), "1\n");
}

#[test]
fn runtime_error_stops_remaining_statements() {
    let (out, err) = runtime_error("puts 1\nputs 1 + nil\nputs 2");
    assert_eq!(out, "1\n");
    assert_eq!(
        err.to_string(),
        "Unsupported operands for '+': 1 and nil.\n[line 2]"
    );
}

#[test]
fn definitions_persist_across_programs() {
    let handler = buffer_handler();
    let mut interp = InterpreterBuilder::new()
        .print_handler(handler.clone())
        .build();
    run_on(&mut interp, "def double(n)\n  return n * 2\nend\n").unwrap();
    run_on(&mut interp, "base = 21\n").unwrap();
    run_on(&mut interp, "puts double(base)\n").unwrap();
    assert_eq!(handler.get_output(), "42\n");
}

#[test]
fn scopes_are_restored_after_an_error() {
    let handler = buffer_handler();
    let mut interp = InterpreterBuilder::new()
        .print_handler(handler.clone())
        .build();
    let source = "def f()\n  while true\n    missing\n  end\nend\nf()";
    assert!(run_on(&mut interp, source).is_err());
    assert_eq!(interp.env.depth(), 1);

    run_on(&mut interp, "after = 1").unwrap();
    assert_eq!(interp.global("after"), Some(Value::Int(1)));
}

#[test]
fn builder_seeds_globals() {
    let mut interp = InterpreterBuilder::new()
        .without_builtins()
        .global("answer", Value::Int(42))
        .print_handler(buffer_handler())
        .build();
    assert_eq!(interp.global("clock"), None);
    assert_eq!(interp.global("answer"), Some(Value::Int(42)));
    run_on(&mut interp, "puts answer").unwrap();
    assert_eq!(interp.print_handler().get_output(), "42\n");
}
