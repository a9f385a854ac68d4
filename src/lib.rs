//! # From source text to a running program
//!
//! User's source code: `VAL average = (min + max) / 2;`

//! ## Scanning
//!
//! The [`Scanner`] turns characters into tokens: identifiers (keywords are
//! identifiers too), integers, decimals, characters, strings and operators.
//! Whitespace is skipped. Every token remembers the byte offset it started
//! at, so later errors can point back into the source.
//!
//! The tokens here are
//! `["VAL", "average", "=", "(", "min", "+", "max", ")", "/", "2", ";"]`.

//! ## Parsing
//!
//! The [`Parser`] builds a tree out of the tokens: globals first, then
//! functions, each function a list of statements over expressions.
//!
//! ``` markdown
//! average (Global)
//! └── / (Binary)
//!     ├── (group) (Group)
//!     │   └── + (Binary)
//!     │       ├── min (Access)
//!     │       └── max (Access)
//!     └── 2 (Literal)
//! ```
//!
//! Every expression gets a [`NodeId`](parser::expression::NodeId).

//! ## Analysis
//!
//! The [`Analyzer`] resolves every name to its declaration and gives every
//! expression a static [`Type`]. It leaves the tree alone and records what it
//! learned in an [`Analysis`] keyed by node id. Programs that fail here never
//! run.

//! ## Interpretation
//!
//! The [`Interpreter`] walks the tree directly: globals are evaluated in
//! order, functions are bound, and `main()` is invoked. Its return value is
//! the result of the program.
//!
//! Integers and decimals are arbitrary precision at runtime, even though the
//! analyzer only accepts integer literals that fit in 32 bits.

//! ## Driving it
//!
//! [`Plcer`] strings the stages together and every stage error converts into
//! [`PlcError`], which knows how to render itself against the source.

pub mod analyzer;
pub mod cli;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
mod plcer;
pub mod scanner;
pub mod statement;
mod utils;

pub use analyzer::{Analysis, Analyzer};
pub use environment::Type;
pub use error::{PlcError, analyzer::TypeError, interpreter::{InterpreterError, RuntimeError}, parser::{ParseError, ParseErrorType}, scanner::{LexError, LexErrorType}};
pub use interpreter::{Interpreter, Value};
pub use parser::Parser;
pub use plcer::Plcer;
pub use scanner::Scanner;
pub use utils::RcCell;
