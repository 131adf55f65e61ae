//! Terminal capability discovery
//!
//! Each submodule classifies one capability from an explicit
//! [`env::EnvSnapshot`] and [`platform::Platform`], so callers can detect
//! against the live process or against a hand-built environment.

pub mod color;
pub mod env;
pub mod platform;
pub mod unicode;
