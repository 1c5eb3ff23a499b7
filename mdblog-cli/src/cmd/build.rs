use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use mdblog_core::SiteBuilder;
use tracing::{debug, info};

use crate::config::load_build_config;

pub fn add_build_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("root")
                .short('r')
                .long("root")
                .value_name("DIR")
                .help("Project root holding markdown/, template/ and the generated index")
                .default_value("."),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file, relative to the root [default: mdblog.toml if present]"),
        )
        .arg(
            Arg::new("markdown")
                .short('m')
                .long("markdown")
                .value_name("DIR")
                .help("Directory containing markdown posts"),
        )
        .arg(
            Arg::new("template")
                .short('t')
                .long("template")
                .value_name("DIR")
                .help("Directory containing layout.html and style.css"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Output directory for generated pages"),
        )
        .arg(
            Arg::new("index")
                .short('i')
                .long("index")
                .value_name("FILE")
                .help("Where to write the index page"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log every step")
                .action(ArgAction::SetTrue),
        )
}

pub fn make_command() -> Command {
    add_build_args(Command::new("mdblog"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile a folder of markdown posts into HTML pages and an index")
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    // Load cascading configuration
    let settings = load_build_config(args)?;
    debug!(root = %settings.root.display(), config = ?settings.config, "resolved configuration");

    let site = SiteBuilder::from_config(&settings.root, &settings.config)
        .build()
        .context("Failed to prepare site")?;

    let report = site.generate().context("Build failed")?;

    info!(
        "Markdown compiled successfully with syntax highlighting: {} pages in {}, index at {}",
        report.links.len(),
        site.output_dir().display(),
        report.index_path.display()
    );

    Ok(())
}
