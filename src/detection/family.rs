//! Probe families, platforms and their canonical check identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of compromise evidence
///
/// Evaluation always walks the families in `ProbeFamily::ORDER`; that order
/// is also the order of identifiers in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeFamily {
    RootOrJailbreak,
    DeveloperMode,
    DeveloperOptions,
    Emulator,
}

impl ProbeFamily {
    pub const ORDER: [ProbeFamily; 4] = [
        ProbeFamily::RootOrJailbreak,
        ProbeFamily::DeveloperMode,
        ProbeFamily::DeveloperOptions,
        ProbeFamily::Emulator,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ProbeFamily::RootOrJailbreak => "root_or_jailbreak",
            ProbeFamily::DeveloperMode => "developer_mode",
            ProbeFamily::DeveloperOptions => "developer_options",
            ProbeFamily::Emulator => "emulator",
        }
    }

    /// Key of the matching field in the report's `details` record
    pub fn detail_key(&self) -> &'static str {
        match self {
            ProbeFamily::RootOrJailbreak => "isRooted",
            ProbeFamily::DeveloperMode => "isDeveloperMode",
            ProbeFamily::DeveloperOptions => "isDeveloperOptionsEnabled",
            ProbeFamily::Emulator => "isEmulator",
        }
    }
}

impl fmt::Display for ProbeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical identifier of a fired signal, as reported in `failedChecks`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckId {
    RootDetected,
    JailbreakDetected,
    DeveloperModeEnabled,
    DeveloperOptionsEnabled,
    EmulatorDetected,
    SimulatorDetected,
}

impl CheckId {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckId::RootDetected => "ROOT_DETECTED",
            CheckId::JailbreakDetected => "JAILBREAK_DETECTED",
            CheckId::DeveloperModeEnabled => "DEVELOPER_MODE_ENABLED",
            CheckId::DeveloperOptionsEnabled => "DEVELOPER_OPTIONS_ENABLED",
            CheckId::EmulatorDetected => "EMULATOR_DETECTED",
            CheckId::SimulatorDetected => "SIMULATOR_DETECTED",
        }
    }

    pub fn family(&self) -> ProbeFamily {
        match self {
            CheckId::RootDetected | CheckId::JailbreakDetected => ProbeFamily::RootOrJailbreak,
            CheckId::DeveloperModeEnabled => ProbeFamily::DeveloperMode,
            CheckId::DeveloperOptionsEnabled => ProbeFamily::DeveloperOptions,
            CheckId::EmulatorDetected | CheckId::SimulatorDetected => ProbeFamily::Emulator,
        }
    }

    /// Human-readable description for terminal output
    pub fn description(&self) -> &'static str {
        match self {
            CheckId::RootDetected => "Root access indicators found",
            CheckId::JailbreakDetected => "Jailbreak indicators found",
            CheckId::DeveloperModeEnabled => "Developer mode is enabled",
            CheckId::DeveloperOptionsEnabled => "USB debugging is enabled",
            CheckId::EmulatorDetected => "Running on an emulator",
            CheckId::SimulatorDetected => "Running on a simulator",
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mobile platform a probe set targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "android" => Some(Platform::Android),
            "ios" => Some(Platform::Ios),
            _ => None,
        }
    }

    /// Identifier reported when `family` fires, or `None` if the platform has
    /// no equivalent concept and the family is never probed
    pub fn check_id(&self, family: ProbeFamily) -> Option<CheckId> {
        match (self, family) {
            (Platform::Android, ProbeFamily::RootOrJailbreak) => Some(CheckId::RootDetected),
            (Platform::Ios, ProbeFamily::RootOrJailbreak) => Some(CheckId::JailbreakDetected),
            (_, ProbeFamily::DeveloperMode) => Some(CheckId::DeveloperModeEnabled),
            (Platform::Android, ProbeFamily::DeveloperOptions) => {
                Some(CheckId::DeveloperOptionsEnabled)
            }
            (Platform::Ios, ProbeFamily::DeveloperOptions) => None,
            (Platform::Android, ProbeFamily::Emulator) => Some(CheckId::EmulatorDetected),
            (Platform::Ios, ProbeFamily::Emulator) => Some(CheckId::SimulatorDetected),
        }
    }

    pub fn supports(&self, family: ProbeFamily) -> bool {
        self.check_id(family).is_some()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_ids_map_back_to_their_family() {
        for platform in [Platform::Android, Platform::Ios] {
            for family in ProbeFamily::ORDER {
                if let Some(id) = platform.check_id(family) {
                    assert_eq!(id.family(), family);
                }
            }
        }
    }

    #[test]
    fn test_ios_has_no_developer_options() {
        assert!(!Platform::Ios.supports(ProbeFamily::DeveloperOptions));
        assert!(Platform::Android.supports(ProbeFamily::DeveloperOptions));
    }

    #[test]
    fn test_check_id_serializes_as_canonical_string() {
        let json = serde_json::to_string(&CheckId::DeveloperOptionsEnabled).unwrap();
        assert_eq!(json, "\"DEVELOPER_OPTIONS_ENABLED\"");
        for id in [CheckId::RootDetected, CheckId::SimulatorDetected] {
            assert_eq!(serde_json::to_string(&id).unwrap(), format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn test_platform_from_name() {
        assert_eq!(Platform::from_name("iOS"), Some(Platform::Ios));
        assert_eq!(Platform::from_name("android"), Some(Platform::Android));
        assert_eq!(Platform::from_name("web"), None);
    }
}
