//! Attach-time resource lookup.

use embedded_hal::digital::OutputPin;

use crate::interface::DsiHost;
use crate::power::Regulator;

/// A discovered panel device, as handed over by the platform.
///
/// [`Panel::attach`](crate::Panel::attach) pulls the supplies listed in the
/// descriptor and the reset line out of it, then keeps the DSI host for itself.
pub trait PanelDevice {
    type Host: DsiHost;
    type Regulator: Regulator;
    type ResetPin: OutputPin;

    /// Resolve a supply by name, `None` when the platform has no such supply.
    fn regulator(&mut self, name: &'static str) -> Option<Self::Regulator>;

    fn reset_pin(&mut self) -> Option<Self::ResetPin>;

    fn into_host(self) -> Self::Host;
}
