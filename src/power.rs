//! Power rail controller.
//!
//! Rails are switched as one group: enabled in descriptor order, disabled in reverse.
//! The controller keeps no state of its own, the lifecycle in [`Panel`](crate::Panel)
//! makes sure `enable_all` and `disable_all` alternate.

use core::fmt::Debug;

use heapless::Vec;
use log::{debug, warn};

use crate::error::{RailError, RailOp};

/// Upper bound on the number of supplies a single panel can list.
pub const MAX_RAILS: usize = 8;

/// A switchable power supply, e.g. a regulator output or a load switch.
pub trait Regulator {
    type Error: Debug;

    fn enable(&mut self) -> Result<(), Self::Error>;

    fn disable(&mut self) -> Result<(), Self::Error>;
}

/// A named supply.
pub struct Rail<R> {
    pub name: &'static str,
    pub regulator: R,
}

pub struct PowerRails<R> {
    rails: Vec<Rail<R>, MAX_RAILS>,
}

impl<R: Regulator> PowerRails<R> {
    pub fn new() -> Self {
        PowerRails { rails: Vec::new() }
    }

    /// Append a rail, it will be enabled after all rails pushed before it.
    ///
    /// Gives the rail back when [`MAX_RAILS`] is reached.
    pub fn push(&mut self, name: &'static str, regulator: R) -> Result<(), Rail<R>> {
        self.rails.push(Rail { name, regulator })
    }

    pub fn len(&self) -> usize {
        self.rails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rails.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rails.iter().map(|r| r.name)
    }

    /// Enable every rail in order, stopping at the first failure.
    ///
    /// Rails before the failing one are left on; `RailError::index` is how many.
    pub fn enable_all(&mut self) -> Result<(), RailError> {
        for (index, rail) in self.rails.iter_mut().enumerate() {
            debug!("enable {}", rail.name);
            rail.regulator.enable().map_err(|e| {
                warn!("{} enable failed: {:?}", rail.name, e);
                RailError {
                    rail: rail.name,
                    index,
                    op: RailOp::Enable,
                }
            })?;
        }
        Ok(())
    }

    /// Disable every rail in reverse order, trying all of them.
    ///
    /// Returns the first failure seen.
    pub fn disable_all(&mut self) -> Result<(), RailError> {
        self.disable_first(self.rails.len())
    }

    /// Disable the first `count` rails, last one first.
    pub(crate) fn disable_first(&mut self, count: usize) -> Result<(), RailError> {
        let count = count.min(self.rails.len());
        let mut ret = Ok(());

        for (index, rail) in self.rails[..count].iter_mut().enumerate().rev() {
            debug!("disable {}", rail.name);
            if let Err(e) = rail.regulator.disable() {
                warn!("{} disable failed: {:?}", rail.name, e);
                if ret.is_ok() {
                    ret = Err(RailError {
                        rail: rail.name,
                        index,
                        op: RailOp::Disable,
                    });
                }
            }
        }

        ret
    }

    /// Consume the controller and return the regulators in enable order.
    pub fn release(self) -> Vec<R, MAX_RAILS> {
        self.rails.into_iter().map(|r| r.regulator).collect()
    }
}

impl<R: Regulator> Default for PowerRails<R> {
    fn default() -> Self {
        Self::new()
    }
}
