//! Display timing and DSI link parameters.
//!
//! These are stored and handed out read-only; the engine never interprets them.

/// Video mode timing of a panel.
///
/// Horizontal values are in pixels, vertical values in lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayTiming {
    /// Pixel clock in kHz
    pub clock_khz: u32,
    pub hactive: u16,
    pub hfront_porch: u16,
    pub hsync_len: u16,
    pub hback_porch: u16,
    pub vactive: u16,
    pub vfront_porch: u16,
    pub vsync_len: u16,
    pub vback_porch: u16,
    /// Physical width of the active area in mm
    pub width_mm: u16,
    /// Physical height of the active area in mm
    pub height_mm: u16,
}

impl DisplayTiming {
    pub const fn hsync_start(&self) -> u32 {
        self.hactive as u32 + self.hfront_porch as u32
    }

    pub const fn hsync_end(&self) -> u32 {
        self.hsync_start() + self.hsync_len as u32
    }

    pub const fn htotal(&self) -> u32 {
        self.hsync_end() + self.hback_porch as u32
    }

    pub const fn vsync_start(&self) -> u32 {
        self.vactive as u32 + self.vfront_porch as u32
    }

    pub const fn vsync_end(&self) -> u32 {
        self.vsync_start() + self.vsync_len as u32
    }

    pub const fn vtotal(&self) -> u32 {
        self.vsync_end() + self.vback_porch as u32
    }

    /// Vertical refresh rate in Hz, rounded to the closest integer.
    pub const fn refresh_rate(&self) -> u32 {
        let den = self.htotal() as u64 * self.vtotal() as u64;
        if den == 0 {
            return 0;
        }
        let num = self.clock_khz as u64 * 1000;
        ((num + den / 2) / den) as u32
    }
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::geometry::OriginDimensions for DisplayTiming {
    fn size(&self) -> embedded_graphics_core::geometry::Size {
        embedded_graphics_core::geometry::Size::new(self.hactive as u32, self.vactive as u32)
    }
}

/// Pixel format on the DSI link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelFormat {
    Rgb888,
    Rgb666,
    Rgb666Packed,
    Rgb565,
}

impl PixelFormat {
    pub const fn bits_per_pixel(self) -> u8 {
        match self {
            PixelFormat::Rgb888 | PixelFormat::Rgb666 => 24,
            PixelFormat::Rgb666Packed => 18,
            PixelFormat::Rgb565 => 16,
        }
    }
}

/// DSI mode flags, combined with `|`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeFlags(u32);

impl ModeFlags {
    pub const NONE: ModeFlags = ModeFlags(0);
    /// Video mode
    pub const VIDEO: ModeFlags = ModeFlags(1 << 0);
    /// Video burst mode
    pub const VIDEO_BURST: ModeFlags = ModeFlags(1 << 1);
    /// Video pulse mode
    pub const VIDEO_SYNC_PULSE: ModeFlags = ModeFlags(1 << 2);
    /// Send HSE packets in video mode
    pub const VIDEO_HSE: ModeFlags = ModeFlags(1 << 4);
    /// Clock lane may stop between transfers
    pub const CLOCK_NON_CONTINUOUS: ModeFlags = ModeFlags(1 << 10);
    /// Send commands in low power mode
    pub const LPM: ModeFlags = ModeFlags(1 << 11);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn union(self, other: ModeFlags) -> ModeFlags {
        ModeFlags(self.0 | other.0)
    }

    pub const fn contains(self, other: ModeFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl core::ops::BitOr for ModeFlags {
    type Output = ModeFlags;

    fn bitor(self, rhs: ModeFlags) -> ModeFlags {
        self.union(rhs)
    }
}

/// How the host has to set up the DSI link for this panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    pub lanes: u8,
    pub format: PixelFormat,
    pub mode_flags: ModeFlags,
}
