use std::{fs::read_to_string, path::Path};

use anyhow::Context;
use tracing::debug;

use crate::{PlcError, analyzer::{Analysis, Analyzer}, interpreter::{Interpreter, Value}, parser::Parser, scanner::{Scanner, Token}, statement::Source};

/// Plcer drives source text through every stage.
pub struct Plcer;

impl Plcer {
	/// Read a source file.
	pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<String, PlcError> {
		let path = path.as_ref();
		Ok(read_to_string(path).with_context(|| format!("Failed open source file {}", path.display()))?)
	}

	/// Run a source file, returning the value of its `main`.
	pub fn run_file<P: AsRef<Path>>(&self, path: P) -> Result<Value, PlcError> {
		let source = self.read(path)?;
		self.run(&source)
	}

	/// Run source text against the default analyzer and an interpreter that
	/// prints to stdout.
	pub fn run(&self, source: &str) -> Result<Value, PlcError> {
		self.run_with(source, Analyzer::new(), Interpreter::new())
	}

	/// Run source text with a host-configured analyzer and interpreter. Any
	/// native function the program calls must be declared on both.
	pub fn run_with(&self, source: &str, analyzer: Analyzer, mut interpreter: Interpreter) -> Result<Value, PlcError> {
		let program = self.parse(source)?;
		analyzer.analyze(&program)?;
		Ok(interpreter.run(&program)?)
	}

	/// Scan, parse and analyze without running.
	pub fn check(&self, source: &str) -> Result<(Source, Analysis), PlcError> {
		let program = self.parse(source)?;
		let analysis = Analyzer::new().analyze(&program)?;
		Ok((program, analysis))
	}

	pub fn tokens<'a>(&self, source: &'a str) -> Result<Vec<Token<'a>>, PlcError> {
		Ok(Scanner::new(source).scan_tokens()?)
	}

	fn parse(&self, source: &str) -> Result<Source, PlcError> {
		let tokens = self.tokens(source)?;
		let program = Parser::new(tokens).parse_source()?;
		debug!(globals = program.globals.len(), functions = program.functions.len(), "parsed");
		Ok(program)
	}
}
