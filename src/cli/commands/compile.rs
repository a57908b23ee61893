use std::path::PathBuf;

use clap::Args;
use serde_json::json;

use super::PrincipalArgs;
use crate::cli::utils::{output_json, print_diagnostics, print_menu_tree};
use crate::cli::OutputFormat;
use crate::menu::load_menu_configuration;

#[derive(Args, Debug)]
pub struct CompileArgs {
    #[command(flatten)]
    pub session: PrincipalArgs,

    #[arg(long, help = "Menu configuration file (JSON or YAML)")]
    pub menus: PathBuf,
}

pub fn handle(args: CompileArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let engine = args.session.engine()?;
    let principal = args.session.principal()?;
    let menus = load_menu_configuration(&args.menus)?;

    let snapshot = engine.compile(1, principal, &menus);
    let query = snapshot.query();

    match output_format {
        OutputFormat::Json => output_json(&json!({
            "menus": snapshot.tree.to_views(),
            "stats": query.stats(),
            "diagnostics": snapshot.diagnostics,
        })),
        OutputFormat::Text => {
            print_menu_tree(&snapshot.tree);
            let stats = query.stats();
            println!(
                "{} menus, {} routed, {} bindings",
                stats.total_menus, stats.route_name_mappings, stats.bindings
            );
            print_diagnostics(&snapshot.diagnostics);
            Ok(())
        }
    }
}
