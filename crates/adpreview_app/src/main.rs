mod platform;

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use platform::config::{load_config, CONFIG_FILENAME};
use platform::logging::{self, LogDestination};
use platform::{run_app, RunOptions};

#[derive(Parser)]
#[command(name = "adpreview")]
#[command(about = "Preview ZIP-packaged HTML ads in a browser page")]
#[command(version)]
struct Cli {
    #[arg(help = "Files to preview; only ZIP archives produce a preview")]
    files: Vec<PathBuf>,

    #[arg(long, help = "Read selections from stdin, one line of paths per selection")]
    stdin: bool,

    #[arg(short, long, help = "Directory for preview.html (overrides the config file)")]
    out: Option<PathBuf>,

    #[arg(long, help = "Config file [default: adpreview.ron]")]
    config: Option<PathBuf>,

    #[arg(long, help = "Frame width in pixels (overrides the config file)")]
    width: Option<u32>,

    #[arg(long, help = "Frame height in pixels (overrides the config file)")]
    height: Option<u32>,

    #[arg(long, help = "Print the effective configuration and exit")]
    print_config: bool,

    #[arg(long, help = "Also write logs to ./adpreview.log")]
    log_file: bool,

    #[arg(short, long, help = "Verbose output")]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let destination = if cli.log_file {
        LogDestination::Both
    } else {
        LogDestination::Terminal
    };
    logging::initialize(destination, level);

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let mut config = load_config(&config_path, cli.config.is_some());
    if let Some(out) = cli.out {
        config.output_dir = out;
    }
    if let Some(width) = cli.width {
        config.frame_width = width;
    }
    if let Some(height) = cli.height {
        config.frame_height = height;
    }

    if cli.print_config {
        println!("{}", config.to_ron()?);
        return Ok(());
    }
    if cli.files.is_empty() && !cli.stdin {
        anyhow::bail!("no files given; pass ZIP paths or use --stdin");
    }

    let page = run_app(RunOptions {
        files: cli.files,
        from_stdin: cli.stdin,
        config,
    })?;
    println!("{}", page.display());
    Ok(())
}
