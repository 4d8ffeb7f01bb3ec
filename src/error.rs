//! Error types for the panel engine.
//!
//! Hardware errors are logged with their `Debug` form where they happen and then
//! mapped into the small `Copy` enums below, so a [`Panel`](crate::Panel) can keep the
//! last fatal one around without being generic over every bus, pin and regulator.

use core::fmt;

/// Which rail operation failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RailOp {
    Enable,
    Disable,
}

/// A power rail refused to switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RailError {
    /// Supply name, as listed in the descriptor.
    pub rail: &'static str,
    /// Position of the rail in enable order.
    pub index: usize,
    pub op: RailOp,
}

impl fmt::Display for RailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.op {
            RailOp::Enable => "enable",
            RailOp::Disable => "disable",
        };
        write!(f, "failed to {} rail {} (#{})", op, self.rail, self.index)
    }
}

/// Hardware fault while driving the reset line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResetError;

impl fmt::Display for ResetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("failed to drive reset line")
    }
}

/// A single control bus write failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// The DSI host reported a failed transfer.
    Write,
    /// Generic write with nothing to send.
    EmptyPayload,
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::Write => f.write_str("bus write failed"),
            BusError::EmptyPayload => f.write_str("generic write with empty payload"),
        }
    }
}

/// One or more writes of a command sequence failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequenceError {
    /// Index of the first failing step.
    pub index: usize,
    /// Cause of the first failure.
    pub cause: BusError,
    /// Total number of failed steps.
    pub failures: usize,
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "command #{} failed: {} ({} failed in total)",
            self.index, self.cause, self.failures
        )
    }
}

/// Problems with a [`PanelDescriptor`](crate::descriptor::PanelDescriptor).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DescriptorError {
    NoRails,
    TooManyRails { count: usize, max: usize },
    EmptyRailName { index: usize },
    DuplicateRail { rail: &'static str },
    /// A generic write in one of the sequences carries no bytes.
    EmptyPayload { sequence: &'static str, index: usize },
}

impl fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescriptorError::NoRails => f.write_str("no power rails"),
            DescriptorError::TooManyRails { count, max } => {
                write!(f, "{} power rails, at most {} supported", count, max)
            }
            DescriptorError::EmptyRailName { index } => write!(f, "rail #{} has no name", index),
            DescriptorError::DuplicateRail { rail } => write!(f, "rail {} listed twice", rail),
            DescriptorError::EmptyPayload { sequence, index } => {
                write!(f, "{} sequence: step #{} has an empty payload", sequence, index)
            }
        }
    }
}

/// Resources the panel needs are not available.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AttachError {
    InvalidDescriptor(DescriptorError),
    MissingRegulator(&'static str),
    MissingResetLine,
    /// The reset line could not be driven to its idle level.
    Reset(ResetError),
}

impl fmt::Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachError::InvalidDescriptor(e) => write!(f, "invalid descriptor: {}", e),
            AttachError::MissingRegulator(name) => write!(f, "cannot get {} supply", name),
            AttachError::MissingResetLine => f.write_str("cannot get reset line"),
            AttachError::Reset(e) => write!(f, "{}", e),
        }
    }
}

impl From<DescriptorError> for AttachError {
    fn from(e: DescriptorError) -> Self {
        AttachError::InvalidDescriptor(e)
    }
}

/// Error returned by the lifecycle operations, classified by failing sub-step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    Rail(RailError),
    Reset(ResetError),
    Command(SequenceError),
    /// `enable` was called before `prepare`.
    NotPrepared,
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelError::Rail(e) => write!(f, "{}", e),
            PanelError::Reset(e) => write!(f, "{}", e),
            PanelError::Command(e) => write!(f, "{}", e),
            PanelError::NotPrepared => f.write_str("panel is not prepared"),
        }
    }
}

impl From<RailError> for PanelError {
    fn from(e: RailError) -> Self {
        PanelError::Rail(e)
    }
}

impl From<ResetError> for PanelError {
    fn from(e: ResetError) -> Self {
        PanelError::Reset(e)
    }
}

impl From<SequenceError> for PanelError {
    fn from(e: SequenceError) -> Self {
        PanelError::Command(e)
    }
}
