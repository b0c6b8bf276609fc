// src/cli/mod.rs
//
// Command-line interface module

mod args;
mod output;

pub use args::{Args, OutputFormat, PlatformArg};
pub use output::{format_json, format_markers, format_result};

use anyhow::{Context, Result};
use chrono::Local;
use std::process::ExitCode;

use crate::core::environment::HostEnvironment;
use crate::core::evaluator::Evaluator;
use crate::core::probes::{AndroidProbes, IntegrityProbes, IosProbes, NativeProbes};
use crate::detection::{DetectionResult, Platform};
use crate::error::SecurityCheckError;

/// Exit status when `--fail-on-compromise` is set and a signal fired
pub const EXIT_COMPROMISED: u8 = 2;

/// Platform of the probe set compiled for this target
pub fn native_platform() -> Platform {
    <NativeProbes<HostEnvironment> as IntegrityProbes>::PLATFORM
}

/// Run the CLI with parsed arguments
pub fn run(args: &Args) -> Result<ExitCode> {
    let config = args
        .resolve_config()
        .context("Failed to load configuration")?;
    let platform = config.platform.unwrap_or_else(native_platform);

    if args.list_markers {
        print!("{}", format_markers(platform));
        return Ok(ExitCode::SUCCESS);
    }

    let env = HostEnvironment::new(&config);
    let result = evaluate(platform, env).context("Security check failed")?;

    match args.format {
        OutputFormat::Json => {
            println!("{}", format_json(&result).context("Failed to serialize report")?)
        }
        OutputFormat::Text => print!(
            "{}",
            format_result(&result, platform, Local::now(), args.verbose)
        ),
    }

    if args.fail_on_compromise && result.is_compromised() {
        Ok(ExitCode::from(EXIT_COMPROMISED))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn evaluate(platform: Platform, env: HostEnvironment) -> Result<DetectionResult, SecurityCheckError> {
    match platform {
        Platform::Android => Evaluator::new(AndroidProbes::new(env)).evaluate(),
        Platform::Ios => Evaluator::new(IosProbes::new(env)).evaluate(),
    }
}
