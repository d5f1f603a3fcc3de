//! Computes why a conclusion holds: inclusion-minimal sets of axioms that,
//! together with a caller-supplied proof, suffice to derive it
//! (justifications), and inclusion-minimal sets of axioms whose removal
//! blocks every derivation (repairs).

pub mod andor;
mod error;
pub use error::{Error, Result};
pub mod justifications;
pub mod monitor;
pub mod normalize;
pub mod proof;
pub mod stats;

pub use justifications::{JustificationEngine, Outcome};
pub use monitor::{AtomicMonitor, DummyMonitor, InterruptMonitor};
