//! npucam_launch CLI

use clap::{Parser, Subcommand, ValueEnum};
use npucam_launch::{
    generate_launch_description, generate_launch_record, package::AmentIndexResolver,
};
use std::{collections::HashMap, path::PathBuf, process};

#[derive(Parser)]
#[command(name = "npucam_launch")]
#[command(about = "Launch description for the npu_camera image nodes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the launch description
    Describe {
        /// Launch arguments (key:=value)
        #[arg(value_parser = parse_launch_arg)]
        args: Vec<(String, String)>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Write the node record file for the launcher
    Record {
        /// Launch arguments (key:=value)
        #[arg(value_parser = parse_launch_arg)]
        args: Vec<(String, String)>,

        /// Output file path (default: record.json)
        #[arg(short, long, default_value = "record.json")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

fn parse_launch_arg(s: &str) -> Result<(String, String), String> {
    match s.split_once(":=") {
        Some((key, value)) if !key.is_empty() && !value.contains(":=") => {
            Ok((key.to_string(), value.to_string()))
        }
        _ => Err(format!("Invalid launch argument format: {}", s)),
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    let resolver = AmentIndexResolver::from_env();

    match command {
        Commands::Describe { args, format } => {
            let launch_args: HashMap<String, String> = args.into_iter().collect();
            let description = generate_launch_description(&resolver, &launch_args)?;
            let text = match format {
                Format::Json => description.to_json()?,
                Format::Yaml => description.to_yaml()?,
            };
            println!("{}", text);
        }
        Commands::Record { args, output } => {
            let launch_args: HashMap<String, String> = args.into_iter().collect();
            let record = generate_launch_record(&resolver, &launch_args)?;
            std::fs::write(&output, record.to_json()?)?;
            log::info!("Generated record.json: {}", output.display());
        }
    }

    Ok(())
}
