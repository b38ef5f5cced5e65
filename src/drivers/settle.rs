// Settle/pacing time source for the chip drivers.
//
// Every embedded-hal delay is a valid settle timer and can never be
// interrupted. Platforms whose sleeps can be cut short (signals, timer
// cancellation) implement SettleTimer directly and report Interrupted;
// the drivers treat that as non-fatal.

use embedded_hal::delay::DelayNs;

/// A settle or pacing wait ended before the requested time elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupted;

impl core::fmt::Display for Interrupted {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("wait interrupted")
    }
}

pub trait SettleTimer {
    /// Block for at least `ns` nanoseconds.
    fn settle_ns(&mut self, ns: u32) -> Result<(), Interrupted>;
}

impl<D: DelayNs> SettleTimer for D {
    #[inline]
    fn settle_ns(&mut self, ns: u32) -> Result<(), Interrupted> {
        self.delay_ns(ns);
        Ok(())
    }
}
