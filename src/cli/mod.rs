pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use commands::{
    compile::CompileArgs, fetch::FetchArgs, query::QueryArgs, routes::RoutesArgs, targets::TargetsArgs,
    validate::ValidateArgs,
};

#[derive(Parser)]
#[command(name = "admin-nav")]
#[command(about = "Resolve, validate and inspect admin console navigation")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Compile a menu configuration against a route table for one principal")]
    Compile(CompileArgs),

    #[command(about = "Validate a menu configuration and produce a repaired copy")]
    Validate(ValidateArgs),

    #[command(about = "Resolve top menu, sidebar, breadcrumbs and active ids for a route")]
    Query(QueryArgs),

    #[command(about = "Show the routes a principal may register")]
    Routes(RoutesArgs),

    #[command(about = "List the menus a hidden menu may bind to")]
    Targets(TargetsArgs),

    #[command(about = "Load navigation from the configured backend")]
    Fetch(FetchArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Compile(args) => commands::compile::handle(args, output_format),
        Commands::Validate(args) => commands::validate::handle(args, output_format),
        Commands::Query(args) => commands::query::handle(args, output_format),
        Commands::Routes(args) => commands::routes::handle(args, output_format),
        Commands::Targets(args) => commands::targets::handle(args, output_format),
        Commands::Fetch(args) => commands::fetch::handle(args, output_format).await,
    }
}
