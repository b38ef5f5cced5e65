// Chip drivers — protocol-level, board-independent.
//
// Each driver is generic over embedded-hal traits; only bus wiring and
// pin choices (in board/) are board-specific.

pub mod settle;
pub mod sn3218;
pub mod st7036;

pub use settle::{Interrupted, SettleTimer};
pub use sn3218::{LedController, LedShadow};
pub use st7036::{BusWidth, LcdConfig, LcdController};
