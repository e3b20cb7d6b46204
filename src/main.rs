//! CLI entry point for the seamless PBR tiling tool

use clap::Parser;
use seamtile::io::cli::{Cli, FileProcessor};

fn main() -> seamtile::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
