//! Configuration module for origami-fold
//!
//! Holds the validated settings shared between the session controller and
//! the command line: grid width bounds, the default message and playback
//! pacing.

pub mod cipher;

pub use cipher::{CipherConfig, ConfigError};
