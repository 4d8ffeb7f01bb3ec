use crate::descriptor::PanelDescriptor;

pub use self::lcd183::*;
pub use self::r69429::*;

mod lcd183;
mod r69429;

/// Supplies shared by all supported panels, in enable order.
pub const RAILS: &[&str] = &["vddp", "iovcc"];

/// All known panels.
pub static PANELS: &[&PanelDescriptor] = &[&R69429, &LCD183];

/// Look a panel up by its device tree compatible string.
pub fn by_compatible(compatible: &str) -> Option<&'static PanelDescriptor> {
    PANELS.iter().copied().find(|p| p.compatible == compatible)
}
