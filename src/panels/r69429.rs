//! RenesasSP R69429 driven 1200x1920 LCD.

use crate::command::{CommandRecord, Dcs, Step};
use crate::descriptor::{PanelDescriptor, ResetConfig};
use crate::display::{DisplayTiming, LinkConfig, ModeFlags, PixelFormat};
use crate::reset::ResetPolarity;

use super::RAILS;

pub static R69429: PanelDescriptor = PanelDescriptor {
    name: "r69429",
    compatible: "renesassp,r69429",
    rails: RAILS,
    reset: ResetConfig {
        polarity: ResetPolarity::ActiveHigh,
        idle_asserted: true,
        deassert_delay_ms: 25,
        assert_delay_ms: 510,
    },
    // the controller comes up usable after reset, nothing to send
    // (bypass mode would be dcs 0x09 [0x01])
    init_sequence: &[],
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
        mode_flags: ModeFlags::VIDEO.union(ModeFlags::LPM),
    },
};
