// src/main.rs
use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use std::process::ExitCode;

use rootdeductor::cli::{self, Args};

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);
    cli::run(&args)
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}
