// src/core/environment/fake.rs
//
// In-memory device used by tests and the demo front ends. Every provider
// call is recorded so tests can assert which probes actually ran.

use std::collections::{BTreeSet, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use super::{
    BuildProperties, BuildProperty, CommandRunner, Filesystem, LoadedImages, ProcessEnv,
    SettingsStore, TargetInfo,
};
use crate::error::ProbeError;

#[derive(Debug, Clone)]
enum Canned<T> {
    Value(T),
    Fault,
}

/// Deterministic device state with fault injection
#[derive(Debug)]
pub struct FakeEnvironment {
    files: Mutex<BTreeSet<PathBuf>>,
    writable_dirs: Vec<PathBuf>,
    fail_removal: bool,
    commands: HashMap<String, Canned<String>>,
    hung_commands: Vec<String>,
    settings: HashMap<String, Canned<i64>>,
    properties: HashMap<BuildProperty, String>,
    properties_fault: bool,
    images: Canned<Vec<String>>,
    vars: HashMap<String, String>,
    target: TargetInfo,
    calls: Mutex<Vec<String>>,
}

impl Default for FakeEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeEnvironment {
    /// A clean ARM device: no markers, no settings, no descriptors
    pub fn new() -> Self {
        Self {
            files: Mutex::new(BTreeSet::new()),
            writable_dirs: Vec::new(),
            fail_removal: false,
            commands: HashMap::new(),
            hung_commands: Vec::new(),
            settings: HashMap::new(),
            properties: HashMap::new(),
            properties_fault: false,
            images: Canned::Value(Vec::new()),
            vars: HashMap::new(),
            target: TargetInfo {
                simulator: false,
                arch: "aarch64",
            },
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_file(self, path: impl Into<PathBuf>) -> Self {
        lock(&self.files).insert(path.into());
        self
    }

    /// Writes below `dir` succeed
    pub fn with_writable_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.writable_dirs.push(dir.into());
        self
    }

    /// Every removal fails, leaving the file in place
    pub fn with_failing_removal(mut self) -> Self {
        self.fail_removal = true;
        self
    }

    pub fn with_command_output(mut self, program: &str, stdout: impl Into<String>) -> Self {
        self.commands
            .insert(program.to_string(), Canned::Value(stdout.into()));
        self
    }

    /// `program` cannot be launched
    pub fn with_command_fault(mut self, program: &str) -> Self {
        self.commands.insert(program.to_string(), Canned::Fault);
        self
    }

    /// `program` never finishes
    pub fn with_hung_command(mut self, program: &str) -> Self {
        self.hung_commands.push(program.to_string());
        self
    }

    pub fn with_setting(mut self, name: &str, value: i64) -> Self {
        self.settings.insert(name.to_string(), Canned::Value(value));
        self
    }

    /// Reading `name` is denied
    pub fn with_setting_fault(mut self, name: &str) -> Self {
        self.settings.insert(name.to_string(), Canned::Fault);
        self
    }

    pub fn with_property(mut self, property: BuildProperty, value: impl Into<String>) -> Self {
        self.properties.insert(property, value.into());
        self
    }

    /// Build descriptors cannot be read at all
    pub fn with_property_fault(mut self) -> Self {
        self.properties_fault = true;
        self
    }

    pub fn with_image(mut self, name: impl Into<String>) -> Self {
        if let Canned::Value(images) = &mut self.images {
            images.push(name.into());
        } else {
            self.images = Canned::Value(vec![name.into()]);
        }
        self
    }

    /// Loaded images cannot be enumerated
    pub fn with_image_fault(mut self) -> Self {
        self.images = Canned::Fault;
        self
    }

    pub fn with_var(mut self, name: &str, value: impl Into<String>) -> Self {
        self.vars.insert(name.to_string(), value.into());
        self
    }

    pub fn with_target(mut self, target: TargetInfo) -> Self {
        self.target = target;
        self
    }

    /// Provider calls made so far, e.g. `"run which su"` or `"setting adb_enabled"`
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    pub fn was_called(&self, prefix: &str) -> bool {
        lock(&self.calls).iter().any(|c| c.starts_with(prefix))
    }

    fn record(&self, call: String) {
        lock(&self.calls).push(call);
    }

    fn is_writable(&self, path: &Path) -> bool {
        self.writable_dirs.iter().any(|dir| path.starts_with(dir))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn denied(path: &Path) -> ProbeError {
    ProbeError::io(path, io::Error::from(io::ErrorKind::PermissionDenied))
}

impl Filesystem for FakeEnvironment {
    fn exists(&self, path: &Path) -> bool {
        self.record(format!("exists {}", path.display()));
        lock(&self.files).contains(path)
    }

    fn write_file(&self, path: &Path, _contents: &[u8]) -> Result<(), ProbeError> {
        self.record(format!("write {}", path.display()));
        if !self.is_writable(path) {
            return Err(denied(path));
        }
        if !lock(&self.files).insert(path.to_path_buf()) {
            return Err(ProbeError::io(path, io::Error::from(io::ErrorKind::AlreadyExists)));
        }
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<(), ProbeError> {
        self.record(format!("remove {}", path.display()));
        if self.fail_removal {
            return Err(denied(path));
        }
        if lock(&self.files).remove(path) {
            Ok(())
        } else {
            Err(ProbeError::io(path, io::Error::from(io::ErrorKind::NotFound)))
        }
    }
}

impl CommandRunner for FakeEnvironment {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, ProbeError> {
        self.record(format!("run {} {}", program, args.join(" ")).trim_end().to_string());
        if self.hung_commands.iter().any(|p| p == program) {
            return Err(ProbeError::Timeout {
                program: program.to_string(),
                timeout: Duration::from_secs(2),
            });
        }
        match self.commands.get(program) {
            Some(Canned::Value(stdout)) => Ok(stdout.clone()),
            Some(Canned::Fault) => Err(ProbeError::Spawn {
                program: program.to_string(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            }),
            // Unknown programs behave like a lookup that found nothing
            None => Ok(String::new()),
        }
    }
}

impl SettingsStore for FakeEnvironment {
    fn global_int(&self, name: &str) -> Result<Option<i64>, ProbeError> {
        self.record(format!("setting {}", name));
        match self.settings.get(name) {
            Some(Canned::Value(v)) => Ok(Some(*v)),
            Some(Canned::Fault) => Err(ProbeError::unavailable(format!("setting {}", name))),
            None => Ok(None),
        }
    }
}

impl BuildProperties for FakeEnvironment {
    fn property(&self, property: BuildProperty) -> Result<Option<String>, ProbeError> {
        self.record(format!("property {}", property.key()));
        if self.properties_fault {
            return Err(ProbeError::unavailable(property.key()));
        }
        Ok(self.properties.get(&property).cloned())
    }
}

impl LoadedImages for FakeEnvironment {
    fn loaded_images(&self) -> Result<Vec<String>, ProbeError> {
        self.record("images".to_string());
        match &self.images {
            Canned::Value(images) => Ok(images.clone()),
            Canned::Fault => Err(ProbeError::unavailable("loaded image enumeration")),
        }
    }
}

impl ProcessEnv for FakeEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.record(format!("var {}", name));
        self.vars.get(name).cloned()
    }

    fn target(&self) -> TargetInfo {
        self.target
    }
}
