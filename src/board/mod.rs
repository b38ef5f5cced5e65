//! Raspberry Pi + Displayotron add-on board support
//!
//! Maps the physical board to named resources so application code doesn't
//! need to know which I2C bus or GPIO line a chip hangs off.

pub mod hat;
pub mod identity;
pub mod pins;
pub mod resolver;

pub use hat::{BringUpError, Dot3k};
pub use identity::{BoardIdentity, BoardProfile, I2cBusIndex};
pub use resolver::{BoardPlatform, BusResolver, ResolveError, ResolvedBoard};
