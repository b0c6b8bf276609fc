// src/core/environment/host.rs
//
// Provider implementation backed by the device the process runs on.

use crossbeam_channel::{bounded, RecvTimeoutError};
use log::{debug, trace};
use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use super::{
    BuildProperties, BuildProperty, CommandRunner, Filesystem, LoadedImages, ProcessEnv,
    SettingsStore, TargetInfo,
};
use crate::config::CheckConfig;
use crate::error::ProbeError;

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Reads the real filesystem, process table and system properties
#[derive(Debug, Clone)]
pub struct HostEnvironment {
    command_timeout: Duration,
}

impl HostEnvironment {
    pub fn new(config: &CheckConfig) -> Self {
        Self {
            command_timeout: config.command_timeout(),
        }
    }

    pub fn command_timeout(&self) -> Duration {
        self.command_timeout
    }
}

impl Default for HostEnvironment {
    fn default() -> Self {
        Self::new(&CheckConfig::default())
    }
}

impl Filesystem for HostEnvironment {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), ProbeError> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| ProbeError::io(path, e))?;
        file.write_all(contents).map_err(|e| ProbeError::io(path, e))
    }

    fn remove_file(&self, path: &Path) -> Result<(), ProbeError> {
        fs::remove_file(path).map_err(|e| ProbeError::io(path, e))
    }
}

impl CommandRunner for HostEnvironment {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, ProbeError> {
        run_bounded(program, args, self.command_timeout)
    }
}

impl SettingsStore for HostEnvironment {
    fn global_int(&self, name: &str) -> Result<Option<i64>, ProbeError> {
        let output = self.run("settings", &["get", "global", name])?;
        parse_setting(name, &output)
    }
}

impl BuildProperties for HostEnvironment {
    fn property(&self, property: BuildProperty) -> Result<Option<String>, ProbeError> {
        let output = self.run("getprop", &[property.key()])?;
        let value = output.trim();
        Ok((!value.is_empty()).then(|| value.to_string()))
    }
}

impl LoadedImages for HostEnvironment {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    fn loaded_images(&self) -> Result<Vec<String>, ProbeError> {
        const MAPS: &str = "/proc/self/maps";
        let maps = fs::read_to_string(MAPS).map_err(|e| ProbeError::io(MAPS, e))?;
        Ok(parse_maps(&maps))
    }

    #[cfg(any(target_os = "ios", target_os = "macos"))]
    fn loaded_images(&self) -> Result<Vec<String>, ProbeError> {
        Ok(dyld::image_names())
    }

    #[cfg(not(any(
        target_os = "linux",
        target_os = "android",
        target_os = "ios",
        target_os = "macos"
    )))]
    fn loaded_images(&self) -> Result<Vec<String>, ProbeError> {
        Err(ProbeError::unavailable("loaded image enumeration"))
    }
}

impl ProcessEnv for HostEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn target(&self) -> TargetInfo {
        TargetInfo::current()
    }
}

/// Run `program` and collect stdout, killing it once `timeout` has elapsed
fn run_bounded(program: &str, args: &[&str], timeout: Duration) -> Result<String, ProbeError> {
    trace!("running `{} {}`", program, args.join(" "));

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| ProbeError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| ProbeError::unavailable(format!("stdout of `{}`", program)))?;

    // Drain the pipe concurrently so a chatty child never blocks on a full buffer.
    // A background grandchild can hold the pipe open after the child exits, so
    // the read is bounded by the same deadline.
    let (tx, rx) = bounded(1);
    thread::spawn(move || {
        let mut buf = String::new();
        let _ = tx.send(stdout.read_to_string(&mut buf).map(|_| buf));
    });

    let timed_out = || ProbeError::Timeout {
        program: program.to_string(),
        timeout,
    };

    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                debug!("`{}` exited with {}", program, status);
                break;
            }
            Ok(None) if Instant::now() >= deadline => {
                reap(&mut child, program);
                return Err(timed_out());
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(source) => {
                reap(&mut child, program);
                return Err(ProbeError::Spawn {
                    program: program.to_string(),
                    source,
                });
            }
        }
    }

    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(source)) => Err(ProbeError::Spawn {
            program: program.to_string(),
            source,
        }),
        Err(RecvTimeoutError::Timeout) => {
            debug!("`{}` exited but its stdout is still held open", program);
            Err(timed_out())
        }
        Err(RecvTimeoutError::Disconnected) => {
            Err(ProbeError::unavailable(format!("stdout of `{}`", program)))
        }
    }
}

fn reap(child: &mut Child, program: &str) {
    if let Err(err) = child.kill() {
        debug!("could not kill `{}`: {}", program, err);
    }
    if let Err(err) = child.wait() {
        debug!("could not reap `{}`: {}", program, err);
    }
}

fn parse_setting(name: &str, output: &str) -> Result<Option<i64>, ProbeError> {
    let value = output.trim();
    if value.is_empty() || value == "null" {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|_| ProbeError::Parse {
        what: format!("setting {}", name),
        raw: value.to_string(),
    })
}

/// Pathnames of the mappings in a `/proc/<pid>/maps` listing, first occurrence order
#[cfg_attr(not(any(target_os = "linux", target_os = "android")), allow(dead_code))]
fn parse_maps(maps: &str) -> Vec<String> {
    let mut images: Vec<String> = Vec::new();
    for line in maps.lines() {
        // address perms offset dev inode [pathname]
        let pathname = line.split_whitespace().skip(5).collect::<Vec<_>>().join(" ");
        if pathname.is_empty() || images.contains(&pathname) {
            continue;
        }
        images.push(pathname);
    }
    images
}

#[cfg(any(target_os = "ios", target_os = "macos"))]
mod dyld {
    use std::ffi::{c_char, CStr};

    extern "C" {
        fn _dyld_image_count() -> u32;
        fn _dyld_get_image_name(image_index: u32) -> *const c_char;
    }

    pub(super) fn image_names() -> Vec<String> {
        // SAFETY: dyld returns a null pointer for an index that went stale
        // between the count and the lookup; every non-null name is a valid
        // NUL-terminated string owned by dyld.
        unsafe {
            let count = _dyld_image_count();
            (0..count)
                .filter_map(|i| {
                    let name = _dyld_get_image_name(i);
                    (!name.is_null()).then(|| CStr::from_ptr(name).to_string_lossy().into_owned())
                })
                .collect()
        }
    }
}
