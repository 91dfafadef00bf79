use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use blst_wrap::commands;
use blst_wrap::config::{DriverConfig, Overrides};
use blst_wrap::DriverResult;

#[derive(Parser)]
#[command(name = "blst-wrap")]
#[command(about = "Generate the blst SWIG binding for Node.js, reusing a prebuilt wrapper when present", long_about = None)]
#[command(version)]
#[command(subcommand_negates_reqs = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// SWIG interface file (e.g. ../blst.swg)
    #[arg(required = true)]
    source: Option<PathBuf>,

    /// Output C++ wrapper (e.g. <(INTERMEDIATE_DIR)/blst_wrap.cpp)
    #[arg(required = true)]
    target: Option<PathBuf>,

    #[command(flatten)]
    options: Options,
}

#[derive(Args)]
struct Options {
    /// Prebuild cache file, overrides PREBUILD_BLST_WRAP_PATH (default: blst_wrap.cpp)
    #[arg(long, global = true, value_name = "PATH")]
    prebuild_path: Option<PathBuf>,

    /// Never read or write the prebuild cache
    #[arg(long, global = true, conflicts_with = "prebuild_path")]
    no_prebuild: bool,

    /// Fail instead of running SWIG when no prebuild exists, same as setting SWIG_SKIP_RUN
    #[arg(long, global = true)]
    skip_run: bool,

    /// SWIG binary
    #[arg(long, global = true, value_name = "BIN")]
    swig: Option<PathBuf>,

    /// Node.js binary
    #[arg(long, global = true, value_name = "BIN")]
    node: Option<PathBuf>,

    /// Don't query the Node.js version after generating
    #[arg(long, global = true)]
    skip_node_check: bool,

    /// Config file (defaults to blst-wrap.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Options {
    fn overrides(&self) -> Overrides {
        Overrides {
            prebuild_path: self.prebuild_path.clone(),
            no_prebuild: self.no_prebuild,
            skip_run: self.skip_run,
            swig: self.swig.clone(),
            node: self.node.clone(),
            skip_node_check: self.skip_node_check,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check SWIG, Node.js and the prebuild cache
    Doctor,
    /// Fail unless a supported SWIG version is installed
    CheckSwig,
}

fn main() {
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            e.exit_code()
        }
    };

    std::process::exit(code);
}

fn run(cli: Cli) -> DriverResult<i32> {
    let config = DriverConfig::load(cli.options.config.as_deref(), &cli.options.overrides())?;

    match cli.command {
        Some(Commands::Doctor) => {
            let healthy = commands::doctor::execute(&config)?;
            Ok(if healthy { 0 } else { 1 })
        }
        Some(Commands::CheckSwig) => {
            commands::check::execute(&config)?;
            Ok(0)
        }
        None => {
            let (Some(source), Some(target)) = (cli.source, cli.target) else {
                Cli::command()
                    .error(
                        ErrorKind::MissingRequiredArgument,
                        "<SOURCE> and <TARGET> are required",
                    )
                    .exit();
            };
            commands::generate::execute(&source, &target, &config)?;
            Ok(0)
        }
    }
}
