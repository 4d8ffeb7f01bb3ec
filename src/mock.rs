//! Recording test doubles.
//!
//! Every fake appends to one shared [`Log`], so ordering across rails, reset line,
//! bus and delays can be checked in a single assertion.

use core::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};

use crate::command::{CommandRecord, Dcs, Step};
use crate::descriptor::{PanelDescriptor, ResetConfig};
use crate::device::PanelDevice;
use crate::display::{DisplayTiming, LinkConfig, ModeFlags, PixelFormat};
use crate::interface::DsiHost;
use crate::power::Regulator;
use crate::reset::ResetPolarity;

/// R69429 like panel with a four step init sequence.
pub const TEST_PANEL: PanelDescriptor = PanelDescriptor {
    name: "test",
    compatible: "test,panel",
    rails: &["vddp", "iovcc"],
    reset: ResetConfig {
        polarity: ResetPolarity::ActiveHigh,
        idle_asserted: true,
        deassert_delay_ms: 25,
        assert_delay_ms: 510,
    },
    init_sequence: &[
        Step::new(CommandRecord::generic(&[0xb0, 0x04])),
        Step::new(CommandRecord::dcs_with_param(Dcs::SetPixelFormat, 0x77)),
        Step::new(CommandRecord::generic(&[0xd6, 0x01])).then_wait(10),
        Step::new(CommandRecord::dcs_with_param(Dcs::SetTearOn, 0x00)),
    ],
    power_on_sequence: &[
        Step::new(CommandRecord::dcs(Dcs::ExitSleepMode)).then_wait(150),
        Step::new(CommandRecord::dcs(Dcs::SetDisplayOn)).then_wait(150),
    ],
    post_enable_delay_ms: 100,
    power_off_sequence: &[
        Step::new(CommandRecord::dcs(Dcs::SetDisplayOff)),
        Step::new(CommandRecord::dcs(Dcs::EnterSleepMode)).then_wait(100),
    ],
    timing: DisplayTiming {
        clock_khz: 162_560,
        hactive: 1200,
        hfront_porch: 70,
        hsync_len: 8,
        hback_porch: 70,
        vactive: 1920,
        vfront_porch: 4,
        vsync_len: 2,
        vback_porch: 84,
        width_mm: 94,
        height_mm: 151,
    },
    link: LinkConfig {
        lanes: 4,
        format: PixelFormat::Rgb888,
        mode_flags: ModeFlags::VIDEO,
    },
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    RailOn(&'static str),
    RailOff(&'static str),
    /// Physical pin level, `true` is high.
    Pin(bool),
    Delay(u32),
    Dcs(u8, Vec<u8>),
    Generic(Vec<u8>),
}

impl Event {
    pub fn is_bus(&self) -> bool {
        matches!(self, Event::Dcs(..) | Event::Generic(..))
    }
}

#[derive(Default)]
struct Inner {
    events: Vec<Event>,
    /// Rail names, once per enable or disable call, failed or not.
    attempts: Vec<&'static str>,
}

#[derive(Clone, Default)]
pub struct Log(Rc<RefCell<Inner>>);

impl Log {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().events.push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    pub fn clear(&self) {
        let mut inner = self.0.borrow_mut();
        inner.events.clear();
        inner.attempts.clear();
    }

    pub fn bus_events(&self) -> Vec<Event> {
        self.events().into_iter().filter(Event::is_bus).collect()
    }

    pub fn rail_events(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, Event::RailOn(_) | Event::RailOff(_)))
            .collect()
    }

    pub fn attempts(&self, rail: &str) -> usize {
        self.0.borrow().attempts.iter().filter(|&&r| r == rail).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockFault;

impl digital::Error for MockFault {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

pub struct MockRegulator {
    name: &'static str,
    log: Log,
    fail_enable: bool,
    fail_disable: bool,
}

impl MockRegulator {
    pub fn new(name: &'static str, log: &Log) -> Self {
        MockRegulator {
            name,
            log: log.clone(),
            fail_enable: false,
            fail_disable: false,
        }
    }

    pub fn failing_enable(mut self) -> Self {
        self.fail_enable = true;
        self
    }

    pub fn failing_disable(mut self) -> Self {
        self.fail_disable = true;
        self
    }
}

impl Regulator for MockRegulator {
    type Error = MockFault;

    fn enable(&mut self) -> Result<(), MockFault> {
        self.log.0.borrow_mut().attempts.push(self.name);
        if self.fail_enable {
            return Err(MockFault);
        }
        self.log.push(Event::RailOn(self.name));
        Ok(())
    }

    fn disable(&mut self) -> Result<(), MockFault> {
        self.log.0.borrow_mut().attempts.push(self.name);
        if self.fail_disable {
            return Err(MockFault);
        }
        self.log.push(Event::RailOff(self.name));
        Ok(())
    }
}

/// Records successful writes only; failed ones are not on the wire.
pub struct MockHost {
    log: Log,
    calls: usize,
    fail: Vec<usize>,
}

impl MockHost {
    pub fn new(log: &Log) -> Self {
        MockHost {
            log: log.clone(),
            calls: 0,
            fail: Vec::new(),
        }
    }

    /// Fail the `n`th transaction, counted from 0 over the host's lifetime.
    pub fn fail_on(&mut self, n: usize) {
        self.fail.push(n);
    }

    fn transfer(&mut self, event: Event) -> Result<(), MockFault> {
        let n = self.calls;
        self.calls += 1;
        if self.fail.contains(&n) {
            return Err(MockFault);
        }
        self.log.push(event);
        Ok(())
    }
}

impl DsiHost for MockHost {
    type Error = MockFault;

    fn dcs_write(&mut self, opcode: u8, params: &[u8]) -> Result<(), MockFault> {
        self.transfer(Event::Dcs(opcode, params.to_vec()))
    }

    fn generic_write(&mut self, payload: &[u8]) -> Result<(), MockFault> {
        self.transfer(Event::Generic(payload.to_vec()))
    }
}

pub struct MockPin {
    log: Log,
    fail: bool,
}

impl MockPin {
    pub fn new(log: &Log) -> Self {
        MockPin {
            log: log.clone(),
            fail: false,
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    fn drive(&mut self, high: bool) -> Result<(), MockFault> {
        if self.fail {
            return Err(MockFault);
        }
        self.log.push(Event::Pin(high));
        Ok(())
    }
}

impl digital::ErrorType for MockPin {
    type Error = MockFault;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), MockFault> {
        self.drive(false)
    }

    fn set_high(&mut self) -> Result<(), MockFault> {
        self.drive(true)
    }
}

pub struct MockDelay {
    log: Log,
}

impl MockDelay {
    pub fn new(log: &Log) -> Self {
        MockDelay { log: log.clone() }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.log.push(Event::Delay(ms));
    }
}

/// Platform side of an attach.
pub struct MockDevice {
    log: Log,
    pub host: MockHost,
    pub missing_rail: Option<&'static str>,
    pub fail_enable: Option<&'static str>,
    pub fail_disable: Option<&'static str>,
    pub reset_available: bool,
    pub reset_faulty: bool,
}

impl MockDevice {
    pub fn new(log: &Log) -> Self {
        MockDevice {
            log: log.clone(),
            host: MockHost::new(log),
            missing_rail: None,
            fail_enable: None,
            fail_disable: None,
            reset_available: true,
            reset_faulty: false,
        }
    }
}

impl PanelDevice for MockDevice {
    type Host = MockHost;
    type Regulator = MockRegulator;
    type ResetPin = MockPin;

    fn regulator(&mut self, name: &'static str) -> Option<MockRegulator> {
        if self.missing_rail == Some(name) {
            return None;
        }
        let mut regulator = MockRegulator::new(name, &self.log);
        if self.fail_enable == Some(name) {
            regulator = regulator.failing_enable();
        }
        if self.fail_disable == Some(name) {
            regulator = regulator.failing_disable();
        }
        Some(regulator)
    }

    fn reset_pin(&mut self) -> Option<MockPin> {
        if !self.reset_available {
            return None;
        }
        let pin = MockPin::new(&self.log);
        Some(if self.reset_faulty { pin.failing() } else { pin })
    }

    fn into_host(self) -> MockHost {
        self.host
    }
}
