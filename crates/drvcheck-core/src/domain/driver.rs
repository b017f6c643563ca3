//! Driver channel and GPU selection types.

use std::fmt;
use std::str::FromStr;

/// Driver channel stored under the `Driver type` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverType {
    /// Game Ready Driver: day-one support for new games, patches and DLCs.
    GameReady,
    /// Studio Driver: stability-focused releases for creative workloads.
    Studio,
}

/// Returned when a stored `Driver type` value is not a known tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown driver type tag '{0}'")]
pub struct UnknownDriverType(pub String);

impl DriverType {
    /// All driver types, in the order they are offered to the operator.
    pub const ALL: [DriverType; 2] = [DriverType::GameReady, DriverType::Studio];

    /// Tag persisted on disk (`"grd"` or `"sd"`).
    pub fn tag(self) -> &'static str {
        match self {
            DriverType::GameReady => "grd",
            DriverType::Studio => "sd",
        }
    }

    /// Button label shown when choosing a driver type.
    pub fn label(self) -> &'static str {
        match self {
            DriverType::GameReady => "Game Ready Driver (GRD)",
            DriverType::Studio => "Studio Driver (SD)",
        }
    }
}

impl FromStr for DriverType {
    type Err = UnknownDriverType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grd" => Ok(DriverType::GameReady),
            "sd" => Ok(DriverType::Studio),
            other => Err(UnknownDriverType(other.to_string())),
        }
    }
}

impl fmt::Display for DriverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A GPU the operator can pick when `GPU ID` is provisioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuCandidate {
    /// Identifier persisted under `GPU ID`.
    pub id: String,
    /// Human-readable adapter name.
    pub name: String,
}

impl GpuCandidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Auxiliary context passed to setup for keys that need more than the key
/// itself to build a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupPayload {
    /// Detected GPUs to choose from when provisioning `GPU ID`.
    Gpus(Vec<GpuCandidate>),
}
