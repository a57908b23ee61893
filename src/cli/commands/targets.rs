use std::path::PathBuf;

use clap::Args;

use crate::cli::utils::output_json;
use crate::cli::OutputFormat;
use crate::menu::{bind_target_options, load_menu_configuration, BindTargetOption};

#[derive(Args, Debug)]
pub struct TargetsArgs {
    #[arg(long, help = "Menu configuration file (JSON or YAML)")]
    pub menus: PathBuf,

    #[arg(long, help = "Id of the menu being edited; its subtree is excluded")]
    pub current: Option<String>,
}

pub fn handle(args: TargetsArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let menus = load_menu_configuration(&args.menus)?;
    let options = bind_target_options(&menus, args.current.as_deref());

    match output_format {
        OutputFormat::Json => output_json(&options),
        OutputFormat::Text => {
            print_options(&options, 0);
            Ok(())
        }
    }
}

fn print_options(options: &[BindTargetOption], depth: usize) {
    for option in options {
        let marker = if option.disabled { " (no route)" } else { "" };
        println!("{}{} [{}]{}", "  ".repeat(depth), option.label, option.value, marker);
        print_options(&option.children, depth + 1);
    }
}
