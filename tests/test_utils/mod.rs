// Shared helpers for the integration tests: simulated device states and
// access to the compiled binary.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

use rootdeductor::core::environment::BuildProperty;
use rootdeductor::core::FakeEnvironment;
use rootdeductor::ProbeFamily;

pub fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_rootdeductor"))
}

pub fn run_rootdeductor(args: &[&str]) -> Output {
    Command::new(get_binary_path())
        .args(args)
        .env_remove("ROOTDEDUCTOR_CONFIG")
        .env_remove("ROOTDEDUCTOR_TIMEOUT_MS")
        .output()
        .expect("Failed to execute rootdeductor")
}

pub fn run_json_check(platform: &str) -> serde_json::Value {
    let output = run_rootdeductor(&["--format", "json", "--platform", platform, "--timeout-ms", "500"]);
    assert!(
        output.status.success(),
        "rootdeductor failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

/// Which families a simulated device should trip
#[derive(Debug, Clone, Copy, Default)]
pub struct Signals {
    pub root: bool,
    pub developer_mode: bool,
    pub developer_options: bool,
    pub emulator: bool,
}

impl Signals {
    pub fn fires(&self, family: ProbeFamily) -> bool {
        match family {
            ProbeFamily::RootOrJailbreak => self.root,
            ProbeFamily::DeveloperMode => self.developer_mode,
            ProbeFamily::DeveloperOptions => self.developer_options,
            ProbeFamily::Emulator => self.emulator,
        }
    }
}

/// A stock retail Android phone
pub fn retail_android() -> FakeEnvironment {
    FakeEnvironment::new()
        .with_property(
            BuildProperty::Fingerprint,
            "google/husky/husky:14/AP1A.240305.019/11445699:user/release-keys",
        )
        .with_property(BuildProperty::Hardware, "husky")
        .with_property(BuildProperty::Product, "husky")
        .with_property(BuildProperty::Manufacturer, "Google")
        .with_property(BuildProperty::Model, "Pixel 8 Pro")
        .with_property(BuildProperty::Brand, "google")
        .with_property(BuildProperty::Device, "husky")
        .with_property(BuildProperty::Tags, "release-keys")
        .with_setting("development_settings_enabled", 0)
        .with_setting("adb_enabled", 0)
        .with_image("/system/lib64/libc.so")
}

pub fn android_with(signals: Signals) -> FakeEnvironment {
    let mut env = FakeEnvironment::new();
    if signals.root {
        env = env.with_file("/data/data/com.topjohnwu.magisk");
    }
    env = env
        .with_setting("development_settings_enabled", signals.developer_mode as i64)
        .with_setting("adb_enabled", signals.developer_options as i64);
    if signals.emulator {
        env = env.with_property(BuildProperty::Hardware, "ranchu");
    }
    env
}

pub fn ios_with(signals: Signals) -> FakeEnvironment {
    let mut env = FakeEnvironment::new();
    if signals.root {
        env = env.with_file("/Applications/Cydia.app");
    }
    if signals.emulator {
        env = env.with_var("SIMULATOR_DEVICE_NAME", "iPhone 15 Pro");
    }
    env
}
