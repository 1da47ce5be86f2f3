//! Recorded input traces for the replay tool
//!
//! A trace is a YAML list of frames. Each frame is the complete raw state
//! of every port for one poll; ports left out are unplugged.
//!
//! ```yaml
//! frames:
//!   - ports:
//!       0: { kind: fixed_pad, buttons: 4096 }
//!       1:
//!         kind: motion_remote_with_extension
//!         analog: { shape: polar, left: { magnitude: 1.0, angle: 90.0 } }
//!     repeat: 2
//!   - reset: true
//! ```

use anyhow::{Context, Result};
use gx_input::input::ScriptedSource;
use gx_input::{InputError, Port, RawSample};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Trace {
    #[serde(default)]
    pub frames: Vec<Frame>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub ports: BTreeMap<u8, RawSample>,
    /// Raise the reset request before this frame's poll
    #[serde(default)]
    pub reset: bool,
    #[serde(default)]
    pub power_down: bool,
    /// Number of polls this frame is held for
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

fn default_repeat() -> u32 {
    1
}

impl Trace {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read trace file: {}", path.display()))?;
        Self::from_yaml_str(&contents)
            .with_context(|| format!("Invalid trace file: {}", path.display()))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let trace: Trace = serde_yaml::from_str(yaml).context("Failed to parse YAML trace")?;
        for (idx, frame) in trace.frames.iter().enumerate() {
            for &port in frame.ports.keys() {
                Port::try_from(port).with_context(|| format!("frame {}", idx))?;
            }
        }
        Ok(trace)
    }

    /// Total number of polls the trace drives
    pub fn cycles(&self) -> u64 {
        self.frames.iter().map(|f| f.repeat as u64).sum()
    }
}

impl Frame {
    /// Stage this frame's samples, unplugging every other port
    pub fn stage(&self, source: &mut ScriptedSource) -> Result<(), InputError> {
        source.clear();
        for (&index, sample) in &self.ports {
            source.set(Port::try_from(index)?, Some(*sample));
        }
        Ok(())
    }
}
