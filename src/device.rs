//! Inference device selection.
//!
//! Selection is a deterministic preference walk, not a negotiation: Metal if
//! the host exposes it, else CUDA, else CPU. It never fails and is probed
//! exactly once per run; callers inject a [`DeviceProbe`] so tests (and
//! engines with their own capability discovery) control the answer.

use std::fmt;

/// The compute device handed to the ASR engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    /// Apple Metal / MPS acceleration.
    Metal,
    /// CUDA-class accelerator.
    Cuda,
    /// CPU fallback; always available.
    Cpu,
}

impl Device {
    /// The device hint string engines conventionally accept.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metal => "mps",
            Self::Cuda => "cuda",
            Self::Cpu => "cpu",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host capability probe consumed by [`select`].
pub trait DeviceProbe {
    fn has_metal(&self) -> bool;
    fn has_cuda(&self) -> bool;
}

/// A probe that reports no accelerators.
///
/// This is the stock probe: accelerator discovery belongs to the engine
/// integration, and claiming a GPU we cannot verify would only move the
/// failure into model load.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuOnlyProbe;

impl DeviceProbe for CpuOnlyProbe {
    fn has_metal(&self) -> bool {
        false
    }

    fn has_cuda(&self) -> bool {
        false
    }
}

/// Pick the preferred device: Metal, else CUDA, else CPU.
pub fn select(probe: &dyn DeviceProbe) -> Device {
    if probe.has_metal() {
        Device::Metal
    } else if probe.has_cuda() {
        Device::Cuda
    } else {
        Device::Cpu
    }
}
