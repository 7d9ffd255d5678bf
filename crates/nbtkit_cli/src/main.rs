#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "nbtkit", about = "NBT document inspection tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Summarize compression, root, and tag statistics.
	Info(cmd::info::Args),
	/// Print a truncated tag tree.
	Print(cmd::print::Args),
	/// Print or emit one subtree selected by tag path.
	Show(cmd::show::Args),
	/// Decode and re-encode, checking the result.
	Rewrite(cmd::rewrite::Args),
}

fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> nbtkit::nbt::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Print(args) => cmd::print::run(args),
		Commands::Show(args) => cmd::show::run(args),
		Commands::Rewrite(args) => cmd::rewrite::run(args),
	}
}
