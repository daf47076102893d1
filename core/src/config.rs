use crate::error::{Error, Result};

/// Lower bound for `max_memory_mb`.
pub const MIN_MEMORY_MB: usize = 64;

/// Upper bound for `max_memory_mb` (128 GB).
pub const MAX_MEMORY_MB: usize = 131_072;

pub const DEFAULT_MEMORY_MB: usize = 4096;

/// Settings applied to every `load` on an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadConfig {
    /// Memory cap for one loaded graph. Loads that exceed it fail.
    pub max_memory_mb: usize,
    /// Treat lines starting with `#` as comments (SNAP edge-list headers).
    pub allow_comments: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            max_memory_mb: DEFAULT_MEMORY_MB,
            allow_comments: true,
        }
    }
}

impl LoadConfig {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_MEMORY_MB..=MAX_MEMORY_MB).contains(&self.max_memory_mb) {
            return Err(Error::Config(format!(
                "max_memory_mb must be in {}..={}, got {}",
                MIN_MEMORY_MB, MAX_MEMORY_MB, self.max_memory_mb
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        let cfg = LoadConfig::default();
        assert_eq!(cfg.max_memory_mb, 4096);
        assert!(cfg.allow_comments);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_memory_bounds() {
        let low = LoadConfig {
            max_memory_mb: 63,
            ..LoadConfig::default()
        };
        assert!(matches!(low.validate(), Err(Error::Config(_))));

        let high = LoadConfig {
            max_memory_mb: MAX_MEMORY_MB + 1,
            ..LoadConfig::default()
        };
        assert!(high.validate().is_err());

        let edge = LoadConfig {
            max_memory_mb: MIN_MEMORY_MB,
            ..LoadConfig::default()
        };
        assert!(edge.validate().is_ok());
    }
}
