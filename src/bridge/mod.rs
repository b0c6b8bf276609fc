//! Host-facing module surface
//!
//! Mirrors what the mobile module exposes to application code: a name, a
//! `PI` constant, a greeting, a value setter that emits `onChange`, and the
//! security check that resolves to a report or rejects with
//! `SECURITY_CHECK_ERROR`. Marshalling into a particular host runtime is
//! left to the embedding layer; results cross as serde types or JSON.

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use log::{debug, warn};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::thread;

use crate::core::environment::{DeviceEnvironment, HostEnvironment};
use crate::core::evaluator::Evaluator;
use crate::core::probes::{IntegrityProbes, NativeProbes};
use crate::config::CheckConfig;
use crate::detection::DetectionResult;
use crate::error::{BridgeError, SecurityCheckError};

pub const MODULE_NAME: &str = "ExpoRootDeductor";

/// Event emitted to subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ModuleEvent {
    Change { value: String },
}

impl ModuleEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ModuleEvent::Change { .. } => "onChange",
        }
    }
}

/// Module object handed to the host application
pub struct RootDeductorModule<P> {
    evaluator: Arc<Evaluator<P>>,
    subscribers: Mutex<Vec<Sender<ModuleEvent>>>,
}

impl<E: DeviceEnvironment> RootDeductorModule<NativeProbes<E>> {
    pub fn native(env: E) -> Self {
        Self::new(NativeProbes::new(env))
    }
}

impl RootDeductorModule<NativeProbes<HostEnvironment>> {
    /// Module reading the device this process runs on
    pub fn for_host(config: &CheckConfig) -> Self {
        Self::native(HostEnvironment::new(config))
    }
}

impl<P: IntegrityProbes> RootDeductorModule<P> {
    pub const NAME: &'static str = MODULE_NAME;
    pub const PI: f64 = std::f64::consts::PI;

    pub fn new(probes: P) -> Self {
        Self {
            evaluator: Arc::new(Evaluator::new(probes)),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn hello(&self) -> &'static str {
        "Hello world! 👋"
    }

    pub fn subscribe(&self) -> Receiver<ModuleEvent> {
        let (tx, rx) = unbounded();
        self.lock_subscribers().push(tx);
        rx
    }

    /// Emit `onChange` with `value` to every live subscriber
    pub fn set_value_async(&self, value: impl Into<String>) {
        let event = ModuleEvent::Change {
            value: value.into(),
        };
        let mut subscribers = self.lock_subscribers();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        debug!("{} delivered to {} subscriber(s)", event.name(), subscribers.len());
    }

    pub fn check_device_security(&self) -> Result<DetectionResult, BridgeError> {
        self.evaluator.evaluate().map_err(|err| {
            warn!("rejecting with {}: {}", BridgeError::CODE, err);
            BridgeError::from(err)
        })
    }

    fn lock_subscribers(&self) -> std::sync::MutexGuard<'_, Vec<Sender<ModuleEvent>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<P: IntegrityProbes + Send + Sync + 'static> RootDeductorModule<P> {
    /// Run the check on a worker thread; the receiver yields exactly one outcome
    pub fn check_device_security_async(&self) -> Receiver<Result<DetectionResult, BridgeError>> {
        let (tx, rx) = bounded(1);
        let evaluator = Arc::clone(&self.evaluator);
        let worker_tx = tx.clone();

        let spawned = thread::Builder::new()
            .name("rootdeductor-check".to_string())
            .spawn(move || {
                let _ = worker_tx.send(evaluator.evaluate().map_err(BridgeError::from));
            });

        if let Err(err) = spawned {
            let _ = tx.send(Err(BridgeError::from(SecurityCheckError::Aborted {
                message: format!("could not start worker thread: {}", err),
            })));
        }
        rx
    }
}

/// JSON payload of a rejection, as handed to a promise's reject callback
pub fn rejection_payload(err: &BridgeError) -> serde_json::Value {
    serde_json::json!({
        "code": err.code(),
        "message": err.to_string(),
    })
}
