//! Hardware reset line.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{debug, warn};

use crate::error::ResetError;

/// Physical level of an asserted reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetPolarity {
    ActiveHigh,
    ActiveLow,
}

/// Reset line owned by one panel.
pub struct ResetLine<P> {
    pin: P,
    polarity: ResetPolarity,
}

impl<P: OutputPin> ResetLine<P> {
    pub fn new(pin: P, polarity: ResetPolarity) -> Self {
        ResetLine { pin, polarity }
    }

    pub fn polarity(&self) -> ResetPolarity {
        self.polarity
    }

    /// Drive the logical level, `true` asserts reset.
    pub fn set(&mut self, asserted: bool) -> Result<(), ResetError> {
        let high = match self.polarity {
            ResetPolarity::ActiveHigh => asserted,
            ResetPolarity::ActiveLow => !asserted,
        };
        let ret = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        ret.map_err(|e| {
            warn!("reset line: {:?}", e);
            ResetError
        })
    }

    /// Deassert, wait `deassert_delay_ms`, assert, wait `assert_delay_ms`.
    ///
    /// Blocks for the sum of both delays.
    pub fn pulse<D: DelayNs>(
        &mut self,
        delay: &mut D,
        deassert_delay_ms: u32,
        assert_delay_ms: u32,
    ) -> Result<(), ResetError> {
        debug!("reset pulse {}ms/{}ms", deassert_delay_ms, assert_delay_ms);
        self.set(false)?;
        delay.delay_ms(deassert_delay_ms);
        self.set(true)?;
        delay.delay_ms(assert_delay_ms);
        Ok(())
    }

    /// Consume the driver and return the pin.
    pub fn release(self) -> P {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::MockError;
    use std::io::ErrorKind;

    #[test]
    fn active_high_pulse_goes_low_then_high() {
        let pin = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);
        let mut expect = pin.clone();

        let mut line = ResetLine::new(pin, ResetPolarity::ActiveHigh);
        line.pulse(&mut NoopDelay, 25, 510).unwrap();

        expect.done();
    }

    #[test]
    fn active_low_pulse_is_inverted() {
        let pin = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        let mut expect = pin.clone();

        let mut line = ResetLine::new(pin, ResetPolarity::ActiveLow);
        line.pulse(&mut NoopDelay, 25, 510).unwrap();

        expect.done();
    }

    #[test]
    fn pin_fault_is_reported() {
        let pin = PinMock::new(&[PinTransaction::set(PinState::Low)
            .with_error(MockError::Io(ErrorKind::NotConnected))]);
        let mut expect = pin.clone();

        let mut line = ResetLine::new(pin, ResetPolarity::ActiveHigh);
        assert_eq!(line.pulse(&mut NoopDelay, 25, 510), Err(ResetError));

        expect.done();
    }

    #[test]
    fn pulse_sleeps_for_both_delays() {
        use crate::mock::{Event, Log, MockDelay, MockPin};
        use std::vec;

        let log = Log::new();
        let mut line = ResetLine::new(MockPin::new(&log), ResetPolarity::ActiveHigh);
        line.pulse(&mut MockDelay::new(&log), 25, 510).unwrap();

        assert_eq!(
            log.events(),
            vec![
                Event::Pin(false),
                Event::Delay(25),
                Event::Pin(true),
                Event::Delay(510),
            ]
        );
    }
}
