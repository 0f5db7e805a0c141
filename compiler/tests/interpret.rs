//! Interpreter integration tests
//!
//! Tests the full pipeline: source → lex → parse → interpret

use aaa::interp::{SharedSymbolTable, SymbolTable, Value};
use aaa::{Error, ErrorKind};

/// Helper to interpret source code against a fresh table
fn interpret(source: &str) -> Result<Value, Error> {
    aaa::run("<test>", source, &SymbolTable::new().shared())
}

/// Helper to check the result is an integer
fn assert_result_int(source: &str, expected: i64) {
    match interpret(source) {
        Ok(Value::Int(n)) => assert_eq!(n, expected, "Expected {}, got {}", expected, n),
        Ok(v) => panic!("Expected Int({}), got {:?}", expected, v),
        Err(e) => panic!("Interpretation failed: {}", e),
    }
}

/// Helper to check the result is a float
fn assert_result_float(source: &str, expected: f64) {
    match interpret(source) {
        Ok(Value::Float(f)) => assert!(
            (f - expected).abs() < 1e-12,
            "Expected {}, got {}",
            expected,
            f
        ),
        Ok(v) => panic!("Expected Float({}), got {:?}", expected, v),
        Err(e) => panic!("Interpretation failed: {}", e),
    }
}

fn runtime_error(source: &str) -> Error {
    match interpret(source) {
        Err(e) if e.kind() == ErrorKind::Runtime => e,
        Err(e) => panic!("Expected runtime error, got {}", e),
        Ok(v) => panic!("Expected runtime error, got {}", v),
    }
}

// ==================== Basic Expression Tests ====================

#[test]
fn test_interpret_literal_int() {
    assert_result_int("42", 42);
}

#[test]
fn test_interpret_literal_float() {
    assert_result_float("3.25", 3.25);
    assert_result_float("7.", 7.0);
}

#[test]
fn test_interpret_precedence() {
    assert_result_int("1 + 2 * 3", 7);
    assert_result_int("(1 + 2) * 3", 9);
    assert_result_int("10 - 4 - 3", 3);
}

#[test]
fn test_interpret_power_right_associative() {
    assert_result_int("2 ^ 3 ^ 2", 512);
    assert_result_int("(2 ^ 3) ^ 2", 64);
}

#[test]
fn test_interpret_unary() {
    assert_result_int("--5", 5);
    assert_result_int("-5", -5);
    assert_result_int("+5", 5);
    assert_result_int("-5 ^ 2", -25);
    assert_result_int("(-5) ^ 2", 25);
    assert_result_int("3 - -2", 5);
}

#[test]
fn test_interpret_negative_exponent() {
    assert_result_float("2 ^ -1", 0.5);
    assert_result_float("2 ^ 0.5 ^ 2", 2f64.powf(0.25));
}

#[test]
fn test_interpret_float_promotion() {
    assert_result_float("1 + 0.5", 1.5);
    assert_result_float("2.0 * 3", 6.0);
    assert_result_float("1.5 - 1", 0.5);
}

#[test]
fn test_interpret_division_is_float() {
    assert_result_float("7 / 2", 3.5);
    assert_result_float("6 / 3", 2.0);
}

#[test]
fn test_interpret_multiline_source() {
    assert_result_int("1 +\n  2 *\n  3", 7);
}

// ==================== Variable Tests ====================

#[test]
fn test_interpret_assignment_value() {
    assert_result_int("set x = 5", 5);
    assert_result_int("(set x = 2) * x", 4);
    assert_result_int("set a = set b = 3", 3);
}

#[test]
fn test_interpret_variables_persist() {
    let globals: SharedSymbolTable = SymbolTable::new().shared();
    aaa::run("<test>", "set x = 5", &globals).unwrap();
    assert_eq!(aaa::run("<test>", "x + 1", &globals).unwrap(), Value::Int(6));

    aaa::run("<test>", "set x = x * 2.5", &globals).unwrap();
    assert_eq!(globals.borrow().get("x"), Some(Value::Float(12.5)));
}

#[test]
fn test_interpret_parent_table_lookup() {
    let mut outer = SymbolTable::new();
    outer.set("g", Value::Int(10));
    let inner = SymbolTable::with_parent(outer.shared()).shared();

    assert_eq!(aaa::run("<test>", "g * 2", &inner).unwrap(), Value::Int(20));
    aaa::run("<test>", "set g = 1", &inner).unwrap();
    assert_eq!(aaa::run("<test>", "g", &inner).unwrap(), Value::Int(1));
}

#[test]
fn test_interpret_undefined_variable() {
    let err = runtime_error("y + 1");
    assert_eq!(err.details(), "'y' is not defined");
    assert_eq!(err.location().start.index, 0);
    assert_eq!(err.location().end.index, 1);
    assert_eq!(err.to_string(), "Runtime Error: 'y' is not defined");
}

#[test]
fn test_interpret_failed_assignment_not_stored() {
    let globals = SymbolTable::new().shared();
    assert!(aaa::run("<test>", "set x = 1 / 0", &globals).is_err());
    assert!(globals.borrow().get("x").is_none());
}

// ==================== Runtime Error Tests ====================

#[test]
fn test_interpret_division_by_zero() {
    let err = runtime_error("1 / 0");
    assert_eq!(err.details(), "Division by zero");
    assert_eq!(err.location().start.index, 4);
    assert_eq!(err.location().end.index, 5);
}

#[test]
fn test_interpret_division_by_zero_expression() {
    let err = runtime_error("10 / (2 - 2)");
    assert_eq!(err.details(), "Division by zero");
    assert_eq!(err.location().start.index, 6);
    assert_eq!(err.location().end.index, 11);

    let err = runtime_error("1 / 0.0");
    assert_eq!(err.details(), "Division by zero");
}

#[test]
fn test_interpret_first_error_wins() {
    // The left operand fails first; the right one is never evaluated
    let err = runtime_error("a + 1 / 0");
    assert_eq!(err.details(), "'a' is not defined");
}

#[test]
fn test_interpret_runtime_error_traceback() {
    let err = runtime_error("1 +\n  missing");
    let traceback = err.traceback().unwrap();
    assert_eq!(traceback.frames.len(), 1);
    assert_eq!(traceback.frames[0].file, "<test>");
    assert_eq!(traceback.frames[0].line, 2);
    assert_eq!(traceback.frames[0].context, aaa::PROGRAM_CONTEXT);
}

#[test]
fn test_interpret_integer_overflow() {
    assert_eq!(runtime_error("9223372036854775807 + 1").details(), "Integer overflow");
    assert_eq!(runtime_error("2 ^ 63").details(), "Integer overflow");
    assert_result_int("2 ^ 62", 1 << 62);
}

#[test]
fn test_interpret_min_int() {
    assert_result_int("-9223372036854775807 - 1", i64::MIN);
    assert_eq!(
        interpret("-9223372036854775808").unwrap_err().kind(),
        ErrorKind::InvalidSyntax
    );
}

#[test]
fn test_interpret_pow_errors() {
    assert_eq!(runtime_error("0 ^ -1").details(), "Division by zero");
    assert_eq!(runtime_error("(-8) ^ 0.5").details(), "Result is not a real number");
}

// ==================== Other Error Stages ====================

#[test]
fn test_interpret_syntax_error() {
    let err = interpret("1 +").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidSyntax);
}

#[test]
fn test_interpret_illegal_character() {
    let err = interpret("2 % 3").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalCharacter);
    assert!(err.traceback().is_none());
}

// ==================== Nesting Limit ====================

#[test]
fn test_interpret_chains_at_limit() {
    let depth = aaa::parser::MAX_DEPTH;
    assert_result_int(&format!("0{}", "+1".repeat(depth)), depth as i64);
    assert_result_int(&format!("{}5", "-".repeat(depth)), 5);
    assert_result_int(&format!("2{}", "^1".repeat(depth)), 2);
    assert_result_int(&format!("{}7{}", "(".repeat(depth), ")".repeat(depth)), 7);
}

#[test]
fn test_interpret_long_chain_is_an_error() {
    let err = interpret(&format!("0{}", "+1".repeat(20_000))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidSyntax);
    assert_eq!(err.details(), "Expression nested too deeply");
}
