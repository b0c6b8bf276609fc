// tests/restricted_write_test.rs
//
// The write-access probe against the real filesystem: the artifact must be
// gone once the check returns, whatever the outcome.

use std::path::Path;
use std::sync::Arc;
use std::thread;

use rootdeductor::core::probes::restricted_write_succeeds;
use rootdeductor::core::HostEnvironment;
use tempfile::TempDir;

#[test]
fn test_successful_write_is_removed() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("jailbreak.txt");
    let env = HostEnvironment::default();

    assert!(restricted_write_succeeds(&env, &target));
    assert!(!target.exists());
}

#[test]
fn test_failed_write_leaves_nothing() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("missing-parent").join("jailbreak.txt");
    let env = HostEnvironment::default();

    assert!(!restricted_write_succeeds(&env, &target));
    assert!(!target.exists());
}

#[cfg(unix)]
#[test]
fn test_read_only_directory() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();
    let target = locked.join("jailbreak.txt");
    let env = HostEnvironment::default();

    let fired = restricted_write_succeeds(&env, &target);
    // root ignores directory permissions; either way nothing may remain
    assert!(!target.exists());
    if !fired {
        assert!(fs::read_dir(&locked).unwrap().next().is_none());
    }

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(unix)]
#[test]
fn test_existing_symlink_survives_failed_write() {
    use std::os::unix::fs::symlink;

    let dir = TempDir::new().unwrap();
    let real_dir = dir.path().join("real");
    std::fs::create_dir(&real_dir).unwrap();
    let link = dir.path().join("jailbreak.txt");
    symlink(&real_dir, &link).unwrap();
    let env = HostEnvironment::default();

    assert!(!restricted_write_succeeds(&env, &link));
    assert!(link.symlink_metadata().is_ok());
    assert!(real_dir.is_dir());
}

#[test]
fn test_existing_file_is_left_alone() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("jailbreak.txt");
    std::fs::write(&target, b"owned by someone else").unwrap();
    let env = HostEnvironment::default();

    assert!(!restricted_write_succeeds(&env, &target));
    assert_eq!(std::fs::read(&target).unwrap(), b"owned by someone else");
}

#[test]
fn test_concurrent_probes_on_same_path() {
    let dir = Arc::new(TempDir::new().unwrap());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let dir = Arc::clone(&dir);
            thread::spawn(move || {
                let env = HostEnvironment::default();
                restricted_write_succeeds(&env, &dir.path().join("shared.txt"))
            })
        })
        .collect();

    let outcomes: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(outcomes.iter().any(|fired| *fired));
    assert!(!Path::new(&dir.path().join("shared.txt")).exists());
}
