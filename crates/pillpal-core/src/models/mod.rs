//! Domain models for label parsing.

mod candidate;
mod dosage;
mod medication;

pub use candidate::*;
pub use dosage::*;
pub use medication::*;
