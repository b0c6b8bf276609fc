//! Static denylists and indicator substrings
//!
//! All lists are immutable. Substring lists for case-insensitive matching are
//! stored lower-case.

// ---------------------------------------------------------------------------
// Android
// ---------------------------------------------------------------------------

/// Files and package data directories left behind by su binaries, root
/// managers, root cloaking apps and hooking frameworks
pub const ANDROID_ROOT_PATHS: &[&str] = &[
    "/system/app/Superuser.apk",
    "/sbin/su",
    "/system/bin/su",
    "/system/xbin/su",
    "/data/local/xbin/su",
    "/data/local/bin/su",
    "/system/sd/xbin/su",
    "/system/bin/failsafe/su",
    "/data/local/su",
    "/su/bin/su",
    "/system/xbin/daemonsu",
    "/system/etc/init.d/99SuperSUDaemon",
    "/dev/com.koushikdutta.superuser.daemon/",
    "/system/etc/.has_su_daemon",
    "/system/etc/.installed_su_daemon",
    "/system/bin/.ext/.su",
    "/system/usr/we-need-root/su-backup",
    "/system/xbin/mu",
    "/system/xbin/busybox",
    "/system/bin/busybox",
    "/data/local/busybox",
    "/data/local/tmp/busybox",
    "/data/data/com.noshufou.android.su",
    "/data/data/com.thirdparty.superuser",
    "/data/data/eu.chainfire.supersu",
    "/data/data/com.koushikdutta.rommanager",
    "/data/data/com.koushikdutta.rommanager.license",
    "/data/data/com.dimonvideo.luckypatcher",
    "/data/data/com.chelpus.lackypatch",
    "/data/data/com.ramdroid.appquarantine",
    "/data/data/com.ramdroid.appquarantinepro",
    "/data/data/com.devadvance.rootcloak",
    "/data/data/com.devadvance.rootcloakplus",
    "/data/data/de.robv.android.xposed.installer",
    "/data/data/com.saurik.substrate",
    "/data/data/com.zachspong.temprootremovejb",
    "/data/data/com.amphoras.hidemyroot",
    "/data/data/com.amphoras.hidemyrootadfree",
    "/data/data/com.formyhm.hiderootPremium",
    "/data/data/com.formyhm.hideroot",
    "/data/data/me.phh.superuser",
    "/data/data/com.koushikdutta.superuser",
    "/data/data/com.kingouser.com",
    "/data/data/com.topjohnwu.magisk",
];

/// Locations an unprivileged app must not be able to create files in
pub const ANDROID_RESTRICTED_WRITE_PATHS: &[&str] = &[
    "/system/.rootdeductor_probe",
    "/data/.rootdeductor_probe",
];

/// Build tag of images signed with the public test keys (custom ROMs)
pub const TEST_KEYS_TAG: &str = "test-keys";

/// Lower-cased substrings of hooking framework libraries in a process map
pub const ANDROID_INJECTION_MARKERS: &[&str] = &["frida", "xposed", "substrate", "zygisk", "riru"];

pub const EMULATOR_FINGERPRINT_MARKERS: &[&str] = &[
    "generic",
    "unknown",
    "emulator",
    "simulator",
    "sdk",
    "vbox",
    "genymotion",
    "x86",
    "goldfish",
    "ranchu",
    "test-keys",
];

pub const EMULATOR_HARDWARE_MARKERS: &[&str] = &["goldfish", "ranchu", "vbox86"];

pub const EMULATOR_PRODUCT_MARKERS: &[&str] = &[
    "sdk",
    "google_sdk",
    "emulator",
    "simulator",
    "vbox86p",
    "genymotion",
    "generic",
    "generic_x86",
    "generic_x86_64",
];

pub const EMULATOR_MANUFACTURER_MARKERS: &[&str] = &["genymotion", "unknown"];

pub const EMULATOR_MODEL_MARKERS: &[&str] = &[
    "sdk",
    "google_sdk",
    "emulator",
    "simulator",
    "android sdk built for x86",
];

/// Prefix shared by brand and device on stock emulator images
pub const GENERIC_PREFIX: &str = "generic";

pub const DEVELOPMENT_SETTINGS_ENABLED: &str = "development_settings_enabled";
pub const ADB_ENABLED: &str = "adb_enabled";

// ---------------------------------------------------------------------------
// iOS
// ---------------------------------------------------------------------------

/// Jailbreak apps, package manager state, Substrate, and binaries that are
/// absent from a stock device
pub const IOS_JAILBREAK_PATHS: &[&str] = &[
    "/Applications/Cydia.app",
    "/Applications/blackra1n.app",
    "/Applications/FakeCarrier.app",
    "/Applications/Icy.app",
    "/Applications/IntelliScreen.app",
    "/Applications/MxTube.app",
    "/Applications/RockApp.app",
    "/Applications/SBSettings.app",
    "/Applications/WinterBoard.app",
    "/Applications/MobileTerminal.app",
    "/Library/MobileSubstrate",
    "/Library/MobileSubstrate/MobileSubstrate.dylib",
    "/Library/MobileSubstrate/DynamicLibraries/Veency.plist",
    "/Library/MobileSubstrate/DynamicLibraries/LiveClock.plist",
    "/private/var/lib/apt",
    "/private/var/lib/cydia",
    "/private/var/mobile/Library/SBSettings/Themes",
    "/private/var/tmp/cydia.log",
    "/System/Library/LaunchDaemons/com.ikey.bbot.plist",
    "/System/Library/LaunchDaemons/com.saurik.Cydia.Startup.plist",
    "/usr/bin/sshd",
    "/usr/libexec/ssh-keysign",
    "/usr/libexec/sftp-server",
    "/usr/sbin/frida-server",
    "/usr/bin/cycript",
    "/usr/local/bin/cycript",
    "/usr/lib/libcycript.dylib",
    "/usr/bin/ssh",
    "/etc/apt",
    "/etc/ssh/sshd_config",
    "/private/etc/ssh/sshd_config",
    "/bin/bash",
    "/bin/sh",
    "/var/cache/apt",
    "/var/lib/apt",
    "/var/lib/cydia",
    "/var/log/syslog",
];

/// Files outside the app sandbox; creating one means the sandbox is gone
pub const IOS_RESTRICTED_WRITE_PATHS: &[&str] =
    &["/private/jailbreak.txt", "/private/var/mobile/jailbreak.txt"];

/// Case-sensitive substrings of injected dyld images
pub const IOS_INJECTION_MARKERS: &[&str] = &["Substrate", "cycript", "frida"];

/// Set by the simulator runtime for every launched app
pub const SIMULATOR_DEVICE_NAME_VAR: &str = "SIMULATOR_DEVICE_NAME";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_unique(list: &[&str]) {
        let unique: HashSet<_> = list.iter().collect();
        assert_eq!(unique.len(), list.len(), "duplicate marker in {:?}", list);
    }

    #[test]
    fn test_denylists_have_no_duplicates() {
        assert_unique(ANDROID_ROOT_PATHS);
        assert_unique(IOS_JAILBREAK_PATHS);
        assert_unique(EMULATOR_PRODUCT_MARKERS);
    }

    #[test]
    fn test_case_insensitive_lists_are_lower_case() {
        for list in [
            ANDROID_INJECTION_MARKERS,
            EMULATOR_FINGERPRINT_MARKERS,
            EMULATOR_HARDWARE_MARKERS,
            EMULATOR_PRODUCT_MARKERS,
            EMULATOR_MANUFACTURER_MARKERS,
            EMULATOR_MODEL_MARKERS,
        ] {
            for marker in list {
                assert_eq!(*marker, marker.to_lowercase());
            }
        }
    }
}
