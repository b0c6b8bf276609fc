//! Detection report types

mod family;
mod result;

pub use family::{CheckId, Platform, ProbeFamily};
pub use result::{DetectionResult, Details, ResultBuilder};
