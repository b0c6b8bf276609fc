//! rootdeductor - heuristic device integrity checks
//!
//! Runs a set of platform-specific signal probes and folds them into one
//! report:
//!
//! - **Root / jailbreak**: known su, root-manager and jailbreak files, `which
//!   su`, test-keys builds, writes outside the sandbox, injected libraries
//! - **Developer mode**: the OS developer-settings switch
//! - **Developer options**: USB debugging (Android only)
//! - **Emulator / simulator**: build descriptors, simulator environment and
//!   build target
//!
//! These are heuristics. A determined attacker can hide every one of these
//! signals; a clean report is not an attestation.
//!
//! ## Module Structure
//!
//! - `core` - providers for ambient device state, the probes, the evaluator
//! - `detection` - report types and check identifiers
//! - `bridge` - the module surface handed to a host application
//! - `config` - runtime settings
//! - `cli` - command-line interface
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! let report = rootdeductor::check_device_security()?;
//! if report.is_compromised() {
//!     println!("failed checks: {:?}", report.failed_checks());
//! }
//! # Ok::<(), rootdeductor::SecurityCheckError>(())
//! ```
//!
//! ## Testing against a simulated device
//!
//! ```rust
//! use rootdeductor::core::{AndroidProbes, Evaluator, FakeEnvironment};
//! use rootdeductor::CheckId;
//!
//! let env = FakeEnvironment::new().with_setting("development_settings_enabled", 1);
//! let report = Evaluator::new(AndroidProbes::new(env)).evaluate().unwrap();
//! assert_eq!(report.failed_checks(), &[CheckId::DeveloperModeEnabled]);
//! ```

// Providers, probes and evaluator
pub mod core;

// Command-line interface
pub mod cli;

// Runtime settings
pub mod config;

// Report types
pub mod detection;

// Host-facing module surface
pub mod bridge;

pub mod error;

pub use bridge::{ModuleEvent, RootDeductorModule};
pub use config::{CheckConfig, ConfigBuilder};
pub use self::core::{check_device_security, check_device_security_with, Evaluator, IntegrityProbes};
pub use detection::{CheckId, DetectionResult, Details, Platform, ProbeFamily};
pub use error::{BridgeError, ConfigError, ProbeError, SecurityCheckError};
