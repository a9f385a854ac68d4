use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "plcer", after_long_help = "A scanner, parser, analyzer and interpreter for PLC programs.")]
pub struct Cli {
	/// Log stage boundaries (overridden by RUST_LOG)
	#[arg(short, long, global = true)]
	pub verbose: bool,
	#[command(subcommand)]
	pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
	/// Run a program; the exit status is the value of its main
	Run { path: PathBuf },
	/// Scan, parse and analyze a program without running it
	Check { path: PathBuf },
	/// Print the tokens of a program
	Tokens { path: PathBuf },
}
