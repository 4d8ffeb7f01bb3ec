//! LTS LCD183, 1200x1920.
//!
//! Same supplies and reset timing as the R69429, but the display is switched on
//! before leaving sleep and the reset line idles deasserted.

use crate::command::{CommandRecord, Dcs, Step};
use crate::descriptor::{PanelDescriptor, ResetConfig};
use crate::display::{DisplayTiming, LinkConfig, ModeFlags, PixelFormat};
use crate::reset::ResetPolarity;

use super::RAILS;

pub static LCD183: PanelDescriptor = PanelDescriptor {
    name: "lcd183",
    compatible: "lts,lcd183",
    rails: RAILS,
    reset: ResetConfig {
        polarity: ResetPolarity::ActiveHigh,
        idle_asserted: false,
        deassert_delay_ms: 25,
        assert_delay_ms: 510,
    },
    init_sequence: &[],
    power_on_sequence: &[
        Step::new(CommandRecord::dcs(Dcs::SetDisplayOn)).then_wait(100),
        Step::new(CommandRecord::dcs(Dcs::ExitSleepMode)).then_wait(100),
    ],
    post_enable_delay_ms: 100,
    power_off_sequence: &[
        Step::new(CommandRecord::dcs(Dcs::SetDisplayOff)),
        Step::new(CommandRecord::dcs(Dcs::EnterSleepMode)).then_wait(100),
    ],
    timing: DisplayTiming {
        clock_khz: 162_000,
        hactive: 1200,
        hfront_porch: 11,
        hsync_len: 8,
        hback_porch: 10,
        vactive: 1920,
        vfront_porch: 4,
        vsync_len: 4,
        vback_porch: 76,
        width_mm: 94,
        height_mm: 151,
    },
    link: LinkConfig {
        lanes: 4,
        format: PixelFormat::Rgb888,
        mode_flags: ModeFlags::VIDEO
            .union(ModeFlags::VIDEO_HSE)
            .union(ModeFlags::CLOCK_NON_CONTINUOUS)
            .union(ModeFlags::VIDEO_BURST),
    },
};
