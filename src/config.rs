//! Configuration for the input layer
//!
//! Loaded from YAML. Everything is optional; an empty document yields
//! autodetection on, a half-scale axis threshold and no pinned ports.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::error::InputError;
use crate::input::{ControlFunction, DeviceKind, PhysicalCode, Port};

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InputConfig {
    /// Regenerate default bindings when a port changes family
    #[serde(default = "default_true")]
    pub autodetect: bool,

    /// Fraction of full scale a half-axis must pass to count as pressed
    #[serde(default = "default_axis_threshold")]
    pub axis_threshold: f32,

    /// Manually pinned ports
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<PortOverride>,
}

/// Manual binding configuration for one port
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PortOverride {
    pub port: u8,

    /// Family whose defaults the overrides start from; all unbound if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,

    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub bindings: BTreeMap<ControlFunction, PhysicalCode>,
}

fn default_true() -> bool {
    true
}

fn default_axis_threshold() -> f32 {
    0.5
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            autodetect: default_true(),
            axis_threshold: default_axis_threshold(),
            ports: Vec::new(),
        }
    }
}

impl PortOverride {
    /// Pins nothing: no base family and no overrides
    pub fn is_empty(&self) -> bool {
        self.device.is_none() && self.bindings.is_empty()
    }
}

impl InputConfig {
    /// Load configuration from file with validation
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_yaml_str(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse and validate an in-memory YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty map
        let config: InputConfig = if yaml.trim().is_empty() {
            InputConfig::default()
        } else {
            serde_yaml::from_str(yaml).context("Failed to parse YAML config")?
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for correctness and consistency
    pub fn validate(&self) -> Result<()> {
        let t = self.axis_threshold;
        if t.is_nan() || t <= 0.0 || t > 1.0 {
            anyhow::bail!(
                "axis_threshold must be in (0, 1], got {}",
                t
            );
        }

        let mut seen = HashSet::new();
        for entry in &self.ports {
            Port::try_from(entry.port)?;
            if !seen.insert(entry.port) {
                return Err(InputError::DuplicatePort(entry.port).into());
            }
            for (function, code) in &entry.bindings {
                if let PhysicalCode::Axis(axis) = code {
                    if axis.target().is_none() {
                        anyhow::bail!(
                            "port {}: {} bound to axis {} (expected 0..4)",
                            entry.port,
                            function,
                            axis.index
                        );
                    }
                }
            }
        }
        Ok(())
    }

    /// Threshold in normalized axis units
    pub fn axis_threshold_units(&self) -> i16 {
        (self.axis_threshold.clamp(0.0, 1.0) * crate::input::normalize::AXIS_MAX as f32) as i16
    }
}
