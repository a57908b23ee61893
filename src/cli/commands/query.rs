use std::path::PathBuf;

use clap::Args;

use super::PrincipalArgs;
use crate::cli::utils::output_json;
use crate::cli::OutputFormat;
use crate::menu::{load_menu_configuration, MenuView};

#[derive(Args, Debug)]
pub struct QueryArgs {
    #[command(flatten)]
    pub session: PrincipalArgs,

    #[arg(long, help = "Menu configuration file (JSON or YAML)")]
    pub menus: PathBuf,

    #[arg(long = "route", help = "Route name to resolve")]
    pub route_name: String,
}

pub fn handle(args: QueryArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let engine = args.session.engine()?;
    let menus = load_menu_configuration(&args.menus)?;
    let snapshot = engine.compile(1, args.session.principal()?, &menus);
    let state = snapshot.query().navigation_state(&args.route_name);

    if output_format == OutputFormat::Json {
        return output_json(&state);
    }

    match &state.active_top_menu {
        Some(top) => println!("Top menu: {}", top),
        None => {
            println!("Route '{}' has no menu entry", state.route_name);
            return Ok(());
        }
    }
    println!("Active ids: {}", state.active_menu_ids.join(" > "));
    let trail: Vec<&str> = state.breadcrumbs.iter().map(|b| b.title.as_str()).collect();
    println!("Breadcrumbs: {}", trail.join(" / "));
    println!("Sidebar:");
    print_views(&state.sidebar_menus, 1);
    Ok(())
}

fn print_views(views: &[MenuView], depth: usize) {
    for view in views {
        match &view.path {
            Some(path) => println!("{}{} -> {}", "  ".repeat(depth), view.title, path),
            None => println!("{}{}", "  ".repeat(depth), view.title),
        }
        print_views(&view.children, depth + 1);
    }
}
