//! Detection report returned by every evaluation pass

use serde::Serialize;

use super::family::{CheckId, Platform, ProbeFamily};

/// Raw per-family outcome, recorded whether or not the signal fired
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Details {
    pub is_rooted: bool,
    pub is_developer_mode: bool,
    pub is_developer_options_enabled: bool,
    pub is_emulator: bool,
}

impl Details {
    pub fn get(&self, family: ProbeFamily) -> bool {
        match family {
            ProbeFamily::RootOrJailbreak => self.is_rooted,
            ProbeFamily::DeveloperMode => self.is_developer_mode,
            ProbeFamily::DeveloperOptions => self.is_developer_options_enabled,
            ProbeFamily::Emulator => self.is_emulator,
        }
    }

    fn set(&mut self, family: ProbeFamily, value: bool) {
        match family {
            ProbeFamily::RootOrJailbreak => self.is_rooted = value,
            ProbeFamily::DeveloperMode => self.is_developer_mode = value,
            ProbeFamily::DeveloperOptions => self.is_developer_options_enabled = value,
            ProbeFamily::Emulator => self.is_emulator = value,
        }
    }
}

/// Device integrity report
///
/// Built once per evaluation and never mutated afterwards. The fields are
/// only reachable through accessors so that `is_compromised` always agrees
/// with `failed_checks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    is_compromised: bool,
    failed_checks: Vec<CheckId>,
    details: Details,
}

impl DetectionResult {
    pub fn builder(platform: Platform) -> ResultBuilder {
        ResultBuilder {
            platform,
            failed_checks: Vec::with_capacity(ProbeFamily::ORDER.len()),
            details: Details::default(),
        }
    }

    pub fn is_compromised(&self) -> bool {
        self.is_compromised
    }

    pub fn failed_checks(&self) -> &[CheckId] {
        &self.failed_checks
    }

    pub fn details(&self) -> &Details {
        &self.details
    }

    pub fn has_failed(&self, id: CheckId) -> bool {
        self.failed_checks.contains(&id)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Accumulates per-family outcomes in execution order
#[derive(Debug)]
pub struct ResultBuilder {
    platform: Platform,
    failed_checks: Vec<CheckId>,
    details: Details,
}

impl ResultBuilder {
    /// Record the raw outcome of one family. A fired family with a platform
    /// identifier is appended to the failed checks; a family already
    /// recorded as fired is not appended twice.
    pub fn record(&mut self, family: ProbeFamily, fired: bool) -> &mut Self {
        let Some(id) = self.platform.check_id(family) else {
            self.details.set(family, false);
            return self;
        };

        self.details.set(family, fired);
        if fired && !self.failed_checks.contains(&id) {
            self.failed_checks.push(id);
        }
        self
    }

    pub fn build(self) -> DetectionResult {
        DetectionResult {
            is_compromised: !self.failed_checks.is_empty(),
            failed_checks: self.failed_checks,
            details: self.details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_result() {
        let mut builder = DetectionResult::builder(Platform::Android);
        for family in ProbeFamily::ORDER {
            builder.record(family, false);
        }
        let result = builder.build();

        assert!(!result.is_compromised());
        assert!(result.failed_checks().is_empty());
        assert_eq!(*result.details(), Details::default());
    }

    #[test]
    fn test_fired_family_sets_detail_and_identifier() {
        let mut builder = DetectionResult::builder(Platform::Android);
        builder
            .record(ProbeFamily::RootOrJailbreak, false)
            .record(ProbeFamily::DeveloperMode, true);
        let result = builder.build();

        assert!(result.is_compromised());
        assert_eq!(result.failed_checks(), &[CheckId::DeveloperModeEnabled]);
        assert!(result.details().is_developer_mode);
        assert!(!result.details().is_rooted);
    }

    #[test]
    fn test_unsupported_family_stays_false() {
        let mut builder = DetectionResult::builder(Platform::Ios);
        builder.record(ProbeFamily::DeveloperOptions, true);
        let result = builder.build();

        assert!(!result.is_compromised());
        assert!(!result.details().is_developer_options_enabled);
    }

    #[test]
    fn test_serialized_shape() {
        let mut builder = DetectionResult::builder(Platform::Ios);
        builder
            .record(ProbeFamily::RootOrJailbreak, true)
            .record(ProbeFamily::Emulator, true);
        let value: serde_json::Value =
            serde_json::from_str(&builder.build().to_json().unwrap()).unwrap();

        assert_eq!(value["isCompromised"], true);
        assert_eq!(
            value["failedChecks"],
            serde_json::json!(["JAILBREAK_DETECTED", "SIMULATOR_DETECTED"])
        );
        assert_eq!(value["details"]["isRooted"], true);
        assert_eq!(value["details"]["isDeveloperMode"], false);
        assert_eq!(value["details"]["isDeveloperOptionsEnabled"], false);
        assert_eq!(value["details"]["isEmulator"], true);
    }
}
