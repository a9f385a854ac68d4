use std::process::exit;

use clap::Parser;
use num_traits::{Signed, ToPrimitive};
use plcer::{Plcer, Value, cli::*};
use tracing_subscriber::EnvFilter;

fn main() {
	let cli = Cli::parse();
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

	let plcer = Plcer;
	let (Mode::Run { path } | Mode::Check { path } | Mode::Tokens { path }) = &cli.mode;
	let source = match plcer.read(path) {
		Ok(source) => source,
		Err(e) => {
			eprintln!("Failed run file: {e}");
			exit(1);
		}
	};

	let result = match &cli.mode {
		Mode::Run { .. } => plcer.run(&source).map(|value| status(&value)),
		Mode::Check { .. } => plcer.check(&source).map(|_| 0),
		Mode::Tokens { .. } => plcer.tokens(&source).map(|tokens| {
			tokens.iter().for_each(|token| println!("{token}"));
			0
		}),
	};
	match result {
		Ok(status) => exit(status),
		Err(e) => {
			eprintln!("{}: {}", path.display(), e.render(&source));
			exit(1);
		}
	}
}

/// The process status for the value `main` returned, clamped to `i32`.
fn status(value: &Value) -> i32 {
	match value {
		Value::Integer(n) => n.to_i32().unwrap_or(if n.is_negative() { i32::MIN } else { i32::MAX }),
		_ => 0,
	}
}
