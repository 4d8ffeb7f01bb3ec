//! Static description of one panel model.
//!
//! A descriptor is built once, usually as a `const`, and shared by every
//! [`Panel`](crate::Panel) driving that model.

use crate::command::Step;
use crate::display::{DisplayTiming, LinkConfig};
use crate::error::DescriptorError;
use crate::power::MAX_RAILS;
use crate::reset::ResetPolarity;

/// Reset line behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResetConfig {
    pub polarity: ResetPolarity,
    /// Logical level the line is driven to when the panel is attached.
    pub idle_asserted: bool,
    /// Time spent deasserted at the start of the pulse.
    pub deassert_delay_ms: u32,
    /// Time waited after asserting, before the first command.
    pub assert_delay_ms: u32,
}

#[derive(Debug)]
pub struct PanelDescriptor {
    pub name: &'static str,
    /// Device tree compatible string.
    pub compatible: &'static str,
    /// Supply names, in enable order.
    pub rails: &'static [&'static str],
    pub reset: ResetConfig,
    /// Sent after the reset pulse, any failure aborts `prepare`.
    pub init_sequence: &'static [Step],
    /// Sent by `enable`.
    pub power_on_sequence: &'static [Step],
    /// Settle time after `power_on_sequence`.
    pub post_enable_delay_ms: u32,
    /// Sent by `unprepare` before the rails go down.
    pub power_off_sequence: &'static [Step],
    pub timing: DisplayTiming,
    pub link: LinkConfig,
}

impl PanelDescriptor {
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.rails.is_empty() {
            return Err(DescriptorError::NoRails);
        }
        if self.rails.len() > MAX_RAILS {
            return Err(DescriptorError::TooManyRails {
                count: self.rails.len(),
                max: MAX_RAILS,
            });
        }
        for (i, name) in self.rails.iter().enumerate() {
            if name.is_empty() {
                return Err(DescriptorError::EmptyRailName { index: i });
            }
            if self.rails[..i].contains(name) {
                return Err(DescriptorError::DuplicateRail { rail: *name });
            }
        }

        for (sequence, steps) in [
            ("init", self.init_sequence),
            ("power on", self.power_on_sequence),
            ("power off", self.power_off_sequence),
        ] {
            if let Some(index) = steps.iter().position(|s| !s.command.is_valid()) {
                return Err(DescriptorError::EmptyPayload { sequence, index });
            }
        }

        Ok(())
    }
}
