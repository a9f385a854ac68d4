#[cfg(test)]
mod tests {
	use std::{io::{self, Write}, path::PathBuf};

	use num_bigint::BigInt;
	use plcer::{Analyzer, Interpreter, InterpreterError, LexErrorType, ParseErrorType, PlcError, Plcer, RcCell, Type, TypeError, Value};

	#[derive(Clone, Default)]
	struct Capture(RcCell<Vec<u8>>);

	impl Write for Capture {
		fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
			self.0.borrow_mut().extend_from_slice(buf);
			Ok(buf.len())
		}

		fn flush(&mut self) -> io::Result<()> { Ok(()) }
	}

	fn fixture() -> PathBuf { PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("test.plc") }

	fn run_captured(source: &str) -> (Result<Value, PlcError>, String) {
		let capture = Capture::default();
		let interpreter = Interpreter::with_output(RcCell::new(Box::new(capture.clone())));
		let result = Plcer.run_with(source, Analyzer::new(), interpreter);
		let output = String::from_utf8(capture.0.borrow().clone()).unwrap();
		(result, output)
	}

	#[test]
	fn test_plc_file() {
		let result = Plcer.run_file(fixture());
		assert_eq!(result.unwrap(), Value::Integer(BigInt::from(177)));
	}

	#[test]
	fn test_plc_file_output() {
		let source = Plcer.read(fixture()).unwrap();
		let (result, output) = run_captured(&source);
		assert_eq!(result.unwrap(), Value::Integer(BigInt::from(177)));
		assert_eq!(output, "Hello, World!\n28\none\nmany\n2.5\n1024\n[55, 3, 5, 7, 11]\n");
	}

	#[test]
	fn test_check_plc_file() {
		let source = Plcer.read(fixture()).unwrap();
		let (program, analysis) = Plcer.check(&source).unwrap();
		assert_eq!(program.globals.len(), 3);
		assert_eq!(program.functions.len(), 3);
		let fibonacci = analysis.function(program.functions[0].id).unwrap();
		assert_eq!(fibonacci.parameter_types, vec![Type::Integer]);
		assert_eq!(fibonacci.return_type, Type::Integer);
		assert_eq!(analysis.variable(program.globals[2].id).unwrap().ty, Type::String);
	}

	#[test]
	fn test_missing_file() {
		let result = Plcer.run_file(fixture().with_extension("missing"));
		assert!(matches!(result, Err(PlcError::InternalError(_))));
	}

	#[test]
	fn test_errors_are_staged() {
		assert!(matches!(
			Plcer.run("FUN main(): Integer DO RETURN 01; END"),
			Err(PlcError::Lex(e)) if e.r#type() == &LexErrorType::LeadingZero
		));
		assert!(matches!(
			Plcer.run("FUN main(): Integer DO RETURN 1 END"),
			Err(PlcError::Parse(e)) if matches!(e.r#type(), ParseErrorType::Expected { expected: ";", .. })
		));
		assert!(matches!(Plcer.run("FUN main() DO END"), Err(PlcError::Type(TypeError::MainReturnType(Type::Nil)))));
		assert!(matches!(
			Plcer.run("FUN main(): Integer DO RETURN 1 / 0; END"),
			Err(PlcError::Runtime(InterpreterError::DivideByZero))
		));
	}

	#[test]
	fn test_analysis_runs_before_any_output() {
		let (result, output) = run_captured("FUN main(): Integer DO print(1); RETURN 1.0; END");
		assert!(matches!(result, Err(PlcError::Type(TypeError::NotAssignable { .. }))));
		assert_eq!(output, "");
	}

	#[test]
	fn test_host_functions() {
		let mut analyzer = Analyzer::new();
		analyzer.define_function("twice", "Host.twice", vec![Type::Integer], Type::Integer);
		let mut interpreter = Interpreter::new();
		interpreter.define_native("twice", 1, |arguments| Ok(Value::Integer(arguments[0].as_integer()? * 2)));
		let result = Plcer.run_with("FUN main(): Integer DO RETURN twice(21); END", analyzer, interpreter);
		assert_eq!(result.unwrap(), Value::Integer(BigInt::from(42)));
	}

	#[test]
	fn test_render_against_source() {
		let source = "FUN main(): Integer DO\n  RETURN 'ab';\nEND";
		let error = Plcer.run(source).unwrap_err();
		assert_eq!(error.offset(), Some(34));
		assert!(error.render(source).starts_with("2:12: "));
	}

	#[test]
	fn test_tokens() {
		let tokens = Plcer.tokens("LET x = 1;").unwrap();
		let rendered: Vec<String> = tokens.iter().map(ToString::to_string).collect();
		assert_eq!(rendered, ["Identifier LET @0", "Identifier x @4", "Operator = @6", "Integer 1 @8", "Operator ; @9"]);
	}
}
