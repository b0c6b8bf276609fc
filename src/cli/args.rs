//! CLI argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{CheckConfig, ConfigBuilder};
use crate::detection::Platform;
use crate::error::ConfigError;

/// Which probe set to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    /// The probe set compiled for this target
    Native,
    Android,
    Ios,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "rootdeductor", version)]
#[command(about = "Check this device for root/jailbreak, developer mode and emulator signals")]
pub struct Args {
    /// Probe set to run (overrides the config file)
    #[arg(short, long, value_enum, default_value_t = PlatformArg::Native)]
    pub platform: PlatformArg,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Time limit for each external command, in milliseconds
    #[arg(long, env = "ROOTDEDUCTOR_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// JSON config file (defaults to <config dir>/rootdeductor/config.json)
    #[arg(short, long, env = "ROOTDEDUCTOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the platform's marker paths and exit
    #[arg(long)]
    pub list_markers: bool,

    /// Exit with status 2 when any signal fired
    #[arg(long)]
    pub fail_on_compromise: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Config file (explicit or default location) with command-line overrides applied
    pub fn resolve_config(&self) -> Result<CheckConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => CheckConfig::from_file(path)?,
            None => CheckConfig::load_default()?,
        };

        let mut builder = ConfigBuilder::from_config(base);
        if let Some(ms) = self.timeout_ms {
            builder = builder.command_timeout(Duration::from_millis(ms));
        }
        match self.platform {
            PlatformArg::Native => {}
            PlatformArg::Android => builder = builder.platform(Platform::Android),
            PlatformArg::Ios => builder = builder.platform(Platform::Ios),
        }
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["rootdeductor"]).unwrap();
        assert_eq!(args.platform, PlatformArg::Native);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(!args.fail_on_compromise);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "command_timeout_ms": 900, "platform": "android" }}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = Args::try_parse_from([
            "rootdeductor",
            "--config",
            path.as_str(),
            "--platform",
            "ios",
            "--timeout-ms",
            "300",
        ])
        .unwrap();
        let config = args.resolve_config().unwrap();

        assert_eq!(config.platform, Some(Platform::Ios));
        assert_eq!(config.command_timeout_ms, 300);
    }

    #[test]
    fn test_file_values_kept_without_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "command_timeout_ms": 900, "platform": "android" }}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = Args::try_parse_from(["rootdeductor", "-c", path.as_str()]).unwrap();
        let config = args.resolve_config().unwrap();

        assert_eq!(config.platform, Some(Platform::Android));
        assert_eq!(config.command_timeout_ms, 900);
    }

    #[test]
    fn test_unknown_platform() {
        assert!(Args::try_parse_from(["rootdeductor", "--platform", "web"]).is_err());
    }
}
