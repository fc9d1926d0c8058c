use std::time::Duration;

use thiserror::Error;

use crate::domain::grid::{validate_width, Grid, GridError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// User-facing settings for building and playing back a fold run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherConfig {
    width: usize,
    step_delay_ms: u64,
}

impl CipherConfig {
    pub const MIN_WIDTH: usize = Grid::MIN_WIDTH;
    pub const MAX_WIDTH: usize = Grid::MAX_WIDTH;
    pub const DEFAULT_WIDTH: usize = 5;
    pub const DEFAULT_TEXT: &'static str = "HELLOWORLD";
    pub const DEFAULT_STEP_DELAY_MS: u64 = 600;
    pub const MAX_STEP_DELAY_MS: u64 = 10_000;

    /// Creates a config with an explicit width, rejecting out-of-range values
    pub fn with_width(width: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            width: validate_width(width)?,
            ..Self::default()
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Applies a new width
    ///
    /// An out-of-range width is rejected and the previous width stays in
    /// effect.
    pub fn set_width(&mut self, width: usize) -> Result<(), ConfigError> {
        self.width = validate_width(width)?;
        Ok(())
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    /// Sets the pause between animated steps, clamped to a sane ceiling
    pub fn set_step_delay_ms(&mut self, millis: u64) {
        self.step_delay_ms = Self::sanitize_step_delay(millis);
    }

    pub fn sanitize_step_delay(millis: u64) -> u64 {
        millis.min(Self::MAX_STEP_DELAY_MS)
    }
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            step_delay_ms: Self::DEFAULT_STEP_DELAY_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CipherConfig::default();
        assert_eq!(config.width(), 5);
        assert_eq!(config.step_delay(), Duration::from_millis(600));
    }

    #[test]
    fn invalid_width_keeps_previous() {
        let mut config = CipherConfig::default();
        config.set_width(8).unwrap();

        let err = config.set_width(11).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Grid(GridError::InvalidWidth { width: 11, min: 3, max: 10 })
        );
        assert_eq!(config.width(), 8);

        assert!(config.set_width(2).is_err());
        assert_eq!(config.width(), 8);
    }

    #[test]
    fn width_bounds_are_inclusive() {
        assert!(CipherConfig::with_width(CipherConfig::MIN_WIDTH).is_ok());
        assert!(CipherConfig::with_width(CipherConfig::MAX_WIDTH).is_ok());
        assert!(CipherConfig::with_width(0).is_err());
    }

    #[test]
    fn step_delay_is_clamped() {
        let mut config = CipherConfig::default();
        config.set_step_delay_ms(0);
        assert_eq!(config.step_delay(), Duration::ZERO);
        config.set_step_delay_ms(u64::MAX);
        assert_eq!(config.step_delay(), Duration::from_millis(CipherConfig::MAX_STEP_DELAY_MS));
    }

    #[test]
    fn error_message_names_bounds() {
        let err = CipherConfig::with_width(42).unwrap_err();
        assert_eq!(err.to_string(), "grid width 42 is outside 3..=10");
    }
}
