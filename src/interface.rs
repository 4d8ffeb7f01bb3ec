//! The control bus interface for DSI panels.

use core::fmt::Debug;

use embedded_hal::delay::DelayNs;
use log::{debug, warn};

use crate::command::{CommandRecord, Step};
use crate::error::{BusError, SequenceError};

/// Trait implemented by DSI hosts to send commands to a panel in command mode.
pub trait DsiHost {
    type Error: Debug;

    /// DCS write, `params` is empty or holds the single short-write parameter.
    fn dcs_write(&mut self, opcode: u8, params: &[u8]) -> Result<(), Self::Error>;

    /// Generic (vendor) write, `payload` is never empty.
    fn generic_write(&mut self, payload: &[u8]) -> Result<(), Self::Error>;
}

impl<T: DsiHost + ?Sized> DsiHost for &mut T {
    type Error = T::Error;

    fn dcs_write(&mut self, opcode: u8, params: &[u8]) -> Result<(), Self::Error> {
        T::dcs_write(self, opcode, params)
    }

    fn generic_write(&mut self, payload: &[u8]) -> Result<(), Self::Error> {
        T::generic_write(self, payload)
    }
}

/// Outcome of [`CommandChannel::write_sequence`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequenceReport {
    pub attempted: usize,
    pub failures: usize,
    /// Index and cause of the first failed step.
    pub first_failure: Option<(usize, BusError)>,
}

impl SequenceReport {
    pub fn is_ok(&self) -> bool {
        self.failures == 0
    }

    pub fn into_result(self) -> Result<(), SequenceError> {
        match self.first_failure {
            None => Ok(()),
            Some((index, cause)) => Err(SequenceError {
                index,
                cause,
                failures: self.failures,
            }),
        }
    }
}

/// Ordered command writer on top of a [`DsiHost`].
pub struct CommandChannel<H> {
    host: H,
}

impl<H: DsiHost> CommandChannel<H> {
    pub fn new(host: H) -> Self {
        CommandChannel { host }
    }

    /// Consume the channel and return the underlying host.
    pub fn release(self) -> H {
        self.host
    }

    /// Issue one bus transaction.
    pub fn write(&mut self, command: &CommandRecord) -> Result<(), BusError> {
        let ret = match *command {
            CommandRecord::DcsShortWrite { opcode, param } => match param {
                Some(p) => self.host.dcs_write(opcode, &[p]),
                None => self.host.dcs_write(opcode, &[]),
            },
            CommandRecord::GenericWrite { bytes } => {
                if bytes.is_empty() {
                    return Err(BusError::EmptyPayload);
                }
                self.host.generic_write(bytes)
            }
        };

        ret.map_err(|e| {
            warn!("{}: {:?}", command, e);
            BusError::Write
        })
    }

    /// Write every step in order, sleeping after each step that asks for it.
    ///
    /// A failed write does not stop the sequence; failures are counted in the report.
    pub fn write_sequence<D: DelayNs>(&mut self, steps: &[Step], delay: &mut D) -> SequenceReport {
        let mut report = SequenceReport::default();

        for (i, step) in steps.iter().enumerate() {
            debug!("write #{}: {}", i, step.command);
            report.attempted += 1;

            if let Err(e) = self.write(&step.command) {
                report.failures += 1;
                if report.first_failure.is_none() {
                    report.first_failure = Some((i, e));
                }
            }

            if step.delay_ms > 0 {
                delay.delay_ms(step.delay_ms);
            }
        }

        report
    }
}
