//! Command Table

use core::fmt;

/// MIPI DCS commands used by the panel sequences.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dcs {
    Nop = 0x00,
    SoftReset = 0x01,
    /// Enter the minimum power consumption mode.
    ///
    /// The panel needs 120ms before the next `ExitSleepMode`.
    EnterSleepMode = 0x10,
    /// Leave sleep mode; DC/DC, oscillator and panel scanning are started.
    ///
    /// The panel needs some time to settle, which is panel specific (100-150ms seen).
    ExitSleepMode = 0x11,
    EnterPartialMode = 0x12,
    EnterNormalMode = 0x13,
    ExitInvertMode = 0x20,
    EnterInvertMode = 0x21,
    /// Blank the panel output, frame memory is kept.
    SetDisplayOff = 0x28,
    SetDisplayOn = 0x29,
    SetTearOff = 0x34,
    SetTearOn = 0x35,
    /// <<A:u8>>, interface pixel format
    SetPixelFormat = 0x3a,
    /// <<A:u8>>, display brightness
    SetDisplayBrightness = 0x51,
    /// <<A:u8>>, BCTRL, DD, BL
    WriteControlDisplay = 0x53,
}

impl Dcs {
    pub const fn opcode(self) -> u8 {
        self as u8
    }

    pub fn from_opcode(opcode: u8) -> Option<Self> {
        use Dcs::*;

        Some(match opcode {
            0x00 => Nop,
            0x01 => SoftReset,
            0x10 => EnterSleepMode,
            0x11 => ExitSleepMode,
            0x12 => EnterPartialMode,
            0x13 => EnterNormalMode,
            0x20 => ExitInvertMode,
            0x21 => EnterInvertMode,
            0x28 => SetDisplayOff,
            0x29 => SetDisplayOn,
            0x34 => SetTearOff,
            0x35 => SetTearOn,
            0x3a => SetPixelFormat,
            0x51 => SetDisplayBrightness,
            0x53 => WriteControlDisplay,
            _ => return None,
        })
    }

    pub const fn name(self) -> &'static str {
        match self {
            Dcs::Nop => "nop",
            Dcs::SoftReset => "soft reset",
            Dcs::EnterSleepMode => "enter sleep mode",
            Dcs::ExitSleepMode => "exit sleep mode",
            Dcs::EnterPartialMode => "enter partial mode",
            Dcs::EnterNormalMode => "enter normal mode",
            Dcs::ExitInvertMode => "exit invert mode",
            Dcs::EnterInvertMode => "enter invert mode",
            Dcs::SetDisplayOff => "set display off",
            Dcs::SetDisplayOn => "set display on",
            Dcs::SetTearOff => "set tear off",
            Dcs::SetTearOn => "set tear on",
            Dcs::SetPixelFormat => "set pixel format",
            Dcs::SetDisplayBrightness => "set display brightness",
            Dcs::WriteControlDisplay => "write control display",
        }
    }
}

/// One control bus transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandRecord {
    /// DCS short write, opcode plus at most one parameter byte.
    DcsShortWrite { opcode: u8, param: Option<u8> },
    /// Vendor specific generic long write. Must not be empty.
    GenericWrite { bytes: &'static [u8] },
}

impl CommandRecord {
    pub const fn dcs(command: Dcs) -> Self {
        CommandRecord::DcsShortWrite {
            opcode: command as u8,
            param: None,
        }
    }

    pub const fn dcs_with_param(command: Dcs, param: u8) -> Self {
        CommandRecord::DcsShortWrite {
            opcode: command as u8,
            param: Some(param),
        }
    }

    /// Raw DCS opcode, for manufacturer commands outside of [`Dcs`].
    pub const fn dcs_raw(opcode: u8, param: Option<u8>) -> Self {
        CommandRecord::DcsShortWrite { opcode, param }
    }

    pub const fn generic(bytes: &'static [u8]) -> Self {
        CommandRecord::GenericWrite { bytes }
    }

    /// `false` for payloads the bus can't express.
    pub const fn is_valid(&self) -> bool {
        match self {
            CommandRecord::DcsShortWrite { .. } => true,
            CommandRecord::GenericWrite { bytes } => !bytes.is_empty(),
        }
    }
}

impl fmt::Display for CommandRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CommandRecord::DcsShortWrite { opcode, param } => {
                match Dcs::from_opcode(opcode) {
                    Some(dcs) => f.write_str(dcs.name())?,
                    None => write!(f, "dcs {:#04x}", opcode)?,
                }
                if let Some(param) = param {
                    write!(f, " [{:#04x}]", param)?;
                }
                Ok(())
            }
            CommandRecord::GenericWrite { bytes } => {
                write!(f, "generic write ({} bytes)", bytes.len())
            }
        }
    }
}

/// A sequence entry: the command and how long to sleep after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    pub command: CommandRecord,
    /// Milliseconds, 0 for none.
    pub delay_ms: u32,
}

impl Step {
    pub const fn new(command: CommandRecord) -> Self {
        Step {
            command,
            delay_ms: 0,
        }
    }

    pub const fn then_wait(self, delay_ms: u32) -> Self {
        Step { delay_ms, ..self }
    }
}
