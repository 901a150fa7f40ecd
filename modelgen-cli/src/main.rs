use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod config;
mod database;
mod error;
mod generate;

use config::GenerateOptions;
use database::MySqlIntrospector;
use error::Result;

/// Generates Rust model structs from a MySQL schema.
#[derive(Parser)]
#[command(name = "modelgen")]
#[command(about = "Generate Rust model files from database tables", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Generate model files for one or more tables
	Model {
		/// Table names, comma separated
		#[arg(short, long, value_name = "TABLES")]
		table: String,
		/// Directory the model files are written to
		#[arg(short, long, value_name = "DIR", default_value = "./app/models")]
		dir: PathBuf,
		/// Path to the application config file (TOML)
		#[arg(short, long, value_name = "CONFIG", default_value = "./conf/app.toml")]
		config: PathBuf,
	},
	/// Print the version
	Version,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
		.format_timestamp(None)
		.format_target(false)
		.init();

	let cli = Cli::parse();
	match cli.command {
		Commands::Version => {
			println!("Version: v{}", env!("CARGO_PKG_VERSION"));
			ExitCode::SUCCESS
		}
		Commands::Model { table, dir, config } => match model(&table, dir, &config).await {
			Ok(()) => ExitCode::SUCCESS,
			Err(err) => {
				log::error!("{err}");
				eprintln!("See \"modelgen help model\" for usage.");
				ExitCode::FAILURE
			}
		},
	}
}

async fn model(table: &str, dir: PathBuf, config_path: &Path) -> Result<()> {
	let options = GenerateOptions::new(table, dir)?;
	let mysql = config::load(config_path)?;
	let db = MySqlIntrospector::connect(&mysql).await?;
	generate::run(&db, &options).await?;
	Ok(())
}
