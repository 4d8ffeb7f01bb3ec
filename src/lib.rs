//! Power, reset and command sequencing for MIPI DSI display panels.
//!
//! A [`Panel`] drives one physical panel through the four lifecycle operations a
//! display framework calls: `prepare`, `enable`, `disable` and `unprepare`. What
//! differs between panel models (supplies, reset timing, command sequences, video
//! timing) lives in a [`PanelDescriptor`]; see [`panels`] for the known ones.
//!
//! ```ignore
//! let mut panel = Panel::attach(&dsi_panel::panels::R69429, device)?;
//! panel.prepare(&mut delay)?;
//! panel.enable(&mut delay)?;
//! ```
#![cfg_attr(not(test), no_std)]

pub mod command;
pub mod descriptor;
pub mod device;
pub mod display;
pub mod error;
pub mod interface;
pub mod panels;
pub mod power;
pub mod reset;

#[cfg(test)]
mod mock;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use heapless::Vec;
use log::{debug, error, warn};

pub use command::{CommandRecord, Dcs, Step};
pub use descriptor::{PanelDescriptor, ResetConfig};
pub use device::PanelDevice;
pub use display::{DisplayTiming, LinkConfig};
pub use error::{AttachError, BusError, PanelError, RailError, ResetError, SequenceError};
pub use interface::{CommandChannel, DsiHost, SequenceReport};
pub use power::{PowerRails, Regulator, MAX_RAILS};
pub use reset::{ResetLine, ResetPolarity};

/// Lifecycle state of a panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelState {
    /// Rails off. Initial and final state.
    Unprepared,
    /// Rails on, reset done, controller initialized.
    Prepared,
    /// Display on.
    Enabled,
}

/// One attached panel.
///
/// Owns the bus, the supplies and the reset line; shares the descriptor.
pub struct Panel<'d, H, R, P> {
    descriptor: &'d PanelDescriptor,
    channel: CommandChannel<H>,
    rails: PowerRails<R>,
    reset: ResetLine<P>,
    state: PanelState,
    last_error: Option<PanelError>,
}

impl<'d, H, R, P> Panel<'d, H, R, P>
where
    H: DsiHost,
    R: Regulator,
    P: OutputPin,
{
    /// Pull the resources listed in `descriptor` out of `device`.
    ///
    /// The reset line is driven to its idle level; the rails are left alone.
    pub fn attach<DEV>(descriptor: &'d PanelDescriptor, mut device: DEV) -> Result<Self, AttachError>
    where
        DEV: PanelDevice<Host = H, Regulator = R, ResetPin = P>,
    {
        descriptor.validate().map_err(|e| {
            error!("{}: invalid descriptor: {}", descriptor.name, e);
            e
        })?;

        let mut rails = PowerRails::new();
        for &name in descriptor.rails {
            let regulator = device.regulator(name).ok_or_else(|| {
                error!("{}: cannot get {} supply", descriptor.name, name);
                AttachError::MissingRegulator(name)
            })?;
            if rails.push(name, regulator).is_err() {
                return Err(AttachError::InvalidDescriptor(
                    error::DescriptorError::TooManyRails {
                        count: descriptor.rails.len(),
                        max: MAX_RAILS,
                    },
                ));
            }
        }

        let pin = device.reset_pin().ok_or_else(|| {
            error!("{}: cannot get reset line", descriptor.name);
            AttachError::MissingResetLine
        })?;
        let mut reset = ResetLine::new(pin, descriptor.reset.polarity);
        reset
            .set(descriptor.reset.idle_asserted)
            .map_err(AttachError::Reset)?;

        debug!("{}: attached", descriptor.name);
        Ok(Self::from_parts(descriptor, device.into_host(), rails, reset))
    }

    /// Build a panel from already resolved parts. The panel starts `Unprepared`.
    pub fn from_parts(
        descriptor: &'d PanelDescriptor,
        host: H,
        rails: PowerRails<R>,
        reset: ResetLine<P>,
    ) -> Self {
        Panel {
            descriptor,
            channel: CommandChannel::new(host),
            rails,
            reset,
            state: PanelState::Unprepared,
            last_error: None,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn descriptor(&self) -> &'d PanelDescriptor {
        self.descriptor
    }

    pub fn timing(&self) -> &'d DisplayTiming {
        &self.descriptor.timing
    }

    /// The error that made the last `prepare` fail, cleared by a successful one.
    pub fn last_error(&self) -> Option<PanelError> {
        self.last_error
    }

    /// Power up: rails on, reset pulse, init sequence.
    ///
    /// On failure every rail that was switched on is switched off again and the
    /// panel stays `Unprepared`.
    pub fn prepare<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), PanelError> {
        if self.state != PanelState::Unprepared {
            return Ok(());
        }
        debug!("{}: prepare", self.descriptor.name);

        match self.power_up(delay) {
            Ok(()) => {
                self.state = PanelState::Prepared;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                error!("{}: prepare failed: {}", self.descriptor.name, e);
                self.last_error = Some(e);
                Err(e)
            }
        }
    }

    fn power_up<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), PanelError> {
        let desc = self.descriptor;

        if let Err(e) = self.rails.enable_all() {
            // rails before the failing one are on
            if let Err(e) = self.rails.disable_first(e.index) {
                warn!("{}: {}", desc.name, e);
            }
            return Err(e.into());
        }

        if let Err(e) = self.reset.pulse(
            delay,
            desc.reset.deassert_delay_ms,
            desc.reset.assert_delay_ms,
        ) {
            self.power_off_rails();
            return Err(e.into());
        }

        if let Err(e) = self
            .channel
            .write_sequence(desc.init_sequence, delay)
            .into_result()
        {
            self.power_off_rails();
            return Err(e.into());
        }

        Ok(())
    }

    /// Turn the display on. Fails only when the panel was never prepared.
    ///
    /// Failed writes in the power-on sequence are logged and do not stop it.
    pub fn enable<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), PanelError> {
        match self.state {
            PanelState::Enabled => return Ok(()),
            PanelState::Unprepared => return Err(PanelError::NotPrepared),
            PanelState::Prepared => {}
        }
        let desc = self.descriptor;
        debug!("{}: enable", desc.name);

        let report = self.channel.write_sequence(desc.power_on_sequence, delay);
        if let Err(e) = report.into_result() {
            warn!("{}: failed to set panel on: {}", desc.name, e);
        }
        if desc.post_enable_delay_ms > 0 {
            delay.delay_ms(desc.post_enable_delay_ms);
        }

        self.state = PanelState::Enabled;
        Ok(())
    }

    /// Mark the display disabled. No bus traffic, teardown is left to `unprepare`.
    pub fn disable(&mut self) -> Result<(), PanelError> {
        if self.state == PanelState::Enabled {
            debug!("{}: disable", self.descriptor.name);
            self.state = PanelState::Prepared;
        }
        Ok(())
    }

    /// Power down: power-off sequence, then rails off.
    ///
    /// Always ends `Unprepared`; bus and rail failures on the way are only logged.
    pub fn unprepare<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), PanelError> {
        match self.state {
            PanelState::Unprepared => return Ok(()),
            PanelState::Enabled => self.disable()?,
            PanelState::Prepared => {}
        }
        let desc = self.descriptor;
        debug!("{}: unprepare", desc.name);

        let report = self.channel.write_sequence(desc.power_off_sequence, delay);
        if let Err(e) = report.into_result() {
            warn!("{}: failed to set panel off: {}", desc.name, e);
        }
        self.power_off_rails();

        self.state = PanelState::Unprepared;
        Ok(())
    }

    /// System shutdown hook, only disables.
    pub fn shutdown(&mut self) {
        let _ = self.disable();
    }

    fn power_off_rails(&mut self) {
        if let Err(e) = self.rails.disable_all() {
            warn!("{}: regulator disable failed, {}", self.descriptor.name, e);
        }
    }

    /// Take the panel down and give back the bus, the regulators and the reset pin.
    pub fn detach<D: DelayNs>(mut self, delay: &mut D) -> (H, Vec<R, MAX_RAILS>, P) {
        if let Err(e) = self.disable() {
            warn!("{}: failed to disable panel: {}", self.descriptor.name, e);
        }
        if let Err(e) = self.unprepare(delay) {
            warn!("{}: failed to unprepare panel: {}", self.descriptor.name, e);
        }
        debug!("{}: detached", self.descriptor.name);

        (
            self.channel.release(),
            self.rails.release(),
            self.reset.release(),
        )
    }
}
