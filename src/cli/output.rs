//! Output formatting for CLI results

use chrono::{DateTime, Local};
use colorful::Colorful;

use crate::core::probes::markers;
use crate::detection::{DetectionResult, Platform, ProbeFamily};

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Format a report for terminal output
pub fn format_result(
    result: &DetectionResult,
    platform: Platform,
    checked_at: DateTime<Local>,
    verbose: bool,
) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Device security check ({}) at {}\n",
        platform.name().cyan(),
        checked_at.format("%Y-%m-%d %H:%M:%S")
    ));

    if result.is_compromised() {
        output.push_str(&format!("  Status: {}\n", "✗ COMPROMISED".red()));
        output.push_str("\n  Failed checks:\n");
        for id in result.failed_checks() {
            output.push_str(&format!(
                "    • {} ({})\n",
                id.as_str().yellow(),
                id.description()
            ));
        }
    } else {
        output.push_str(&format!("  Status: {}\n", "✓ CLEAN".green()));
    }

    if verbose {
        output.push_str("\n  Details:\n");
        for family in ProbeFamily::ORDER {
            let note = if platform.supports(family) {
                ""
            } else {
                " (not applicable)"
            };
            output.push_str(&format!(
                "    {}: {}{}\n",
                family.detail_key(),
                yes_no(result.details().get(family)),
                note
            ));
        }
    }

    output
}

/// Format a report as the camelCase JSON object the host application receives
pub fn format_json(result: &DetectionResult) -> serde_json::Result<String> {
    result.to_json_pretty()
}

/// Marker paths and restricted write targets for `platform`
pub fn format_markers(platform: Platform) -> String {
    let (paths, write_targets) = match platform {
        Platform::Android => (markers::ANDROID_ROOT_PATHS, markers::ANDROID_RESTRICTED_WRITE_PATHS),
        Platform::Ios => (markers::IOS_JAILBREAK_PATHS, markers::IOS_RESTRICTED_WRITE_PATHS),
    };

    let mut output = format!("Marker paths ({}):\n", platform);
    for path in paths {
        output.push_str(&format!("  {}\n", path));
    }
    output.push_str("\nRestricted write targets:\n");
    for path in write_targets {
        output.push_str(&format!("  {}\n", path));
    }
    output
}
