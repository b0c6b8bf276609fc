// tests/cli_test.rs
//
// Runs the compiled binary against the host. The host's actual state is
// unknown, so these tests check report shape and invariants only.

mod test_utils;

use test_utils::{run_json_check, run_rootdeductor};

fn assert_report_shape(report: &serde_json::Value) {
    let failed = report["failedChecks"].as_array().expect("failedChecks array");
    assert_eq!(report["isCompromised"].as_bool(), Some(!failed.is_empty()));

    let details = report["details"].as_object().expect("details object");
    for key in ["isRooted", "isDeveloperMode", "isDeveloperOptionsEnabled", "isEmulator"] {
        assert!(details[key].is_boolean(), "{} missing", key);
    }
}

#[test]
fn test_android_json_report() {
    let report = run_json_check("android");
    assert_report_shape(&report);

    let failed: Vec<&str> = report["failedChecks"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(failed.contains(&"ROOT_DETECTED"), report["details"]["isRooted"] == true);
    assert_eq!(failed.contains(&"EMULATOR_DETECTED"), report["details"]["isEmulator"] == true);
}

#[test]
fn test_ios_json_report() {
    let report = run_json_check("ios");
    assert_report_shape(&report);
    assert_eq!(report["details"]["isDeveloperMode"], false);
    assert_eq!(report["details"]["isDeveloperOptionsEnabled"], false);
}

#[test]
fn test_list_markers() {
    let output = run_rootdeductor(&["--list-markers", "--platform", "android"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("/system/xbin/su"));
    assert!(stdout.contains("/data/data/com.topjohnwu.magisk"));
}

#[test]
fn test_missing_config_file_is_an_error() {
    let output = run_rootdeductor(&["--config", "/nonexistent/rootdeductor.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("configuration"));
}

#[test]
fn test_text_report() {
    let output = run_rootdeductor(&["--platform", "android", "--timeout-ms", "500", "-v"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Device security check"));
    assert!(stdout.contains("isDeveloperOptionsEnabled"));
}
