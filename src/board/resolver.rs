//! Board detection and shared I2C bus.
//!
//! [`BusResolver`] asks the platform which board it is running on, picks
//! the I2C bus the header is wired to and opens it. This happens once; the
//! result is cached and every later call (from any thread or interrupt
//! context) gets the same [`ResolvedBoard`]. The bus itself sits behind a
//! critical-section mutex so several drivers can share it.
//!
//! The resolver is usually built once at startup and passed by reference,
//! but `new` is `const` so it can also live in a `static`.

use core::cell::RefCell;
use core::fmt;

use embassy_sync::once_lock::OnceLock;
use embedded_hal::i2c::I2c;
use embedded_hal_bus::i2c::CriticalSectionDevice;
use log::{info, warn};

use super::identity::{BoardIdentity, BoardProfile, FALLBACK_PROFILE, I2cBusIndex, profile_for};

/// Platform services the resolver needs: board identification and an
/// opener for the SoC's I2C buses.
pub trait BoardPlatform {
    type Bus: I2c;
    type Error: fmt::Debug;

    fn identify(&self) -> Result<BoardIdentity, Self::Error>;

    fn open_i2c(&self, bus: I2cBusIndex) -> Result<Self::Bus, Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError<E> {
    /// The board-identity service failed
    Identify(E),
    /// The chosen I2C bus could not be opened
    OpenBus(E),
}

impl<E: fmt::Debug> fmt::Display for ResolveError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::Identify(e) => write!(f, "board identification failed: {:?}", e),
            ResolveError::OpenBus(e) => write!(f, "opening i2c bus failed: {:?}", e),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for ResolveError<E> {}

pub struct ResolvedBoard<B> {
    identity: BoardIdentity,
    profile: BoardProfile,
    bus: critical_section::Mutex<RefCell<B>>,
}

impl<B> ResolvedBoard<B> {
    pub fn identity(&self) -> BoardIdentity {
        self.identity
    }

    pub fn profile(&self) -> BoardProfile {
        self.profile
    }

    pub fn is_plus(&self) -> bool {
        self.profile.is_plus
    }

    pub fn is_rev1(&self) -> bool {
        self.profile.is_rev1
    }
}

impl<B: I2c> ResolvedBoard<B> {
    /// A handle on the shared bus; create one per driver.
    pub fn i2c(&self) -> CriticalSectionDevice<'_, B> {
        CriticalSectionDevice::new(&self.bus)
    }
}

pub struct BusResolver<P: BoardPlatform> {
    platform: P,
    board: OnceLock<ResolvedBoard<P::Bus>>,
}

impl<P: BoardPlatform> BusResolver<P> {
    pub const fn new(platform: P) -> Self {
        Self {
            platform,
            board: OnceLock::new(),
        }
    }

    /// Identify the board and open its I2C bus, or return the cached result.
    ///
    /// Failures are not cached and nothing is retried here; a later call
    /// will query the platform again.
    pub fn resolve(&self) -> Result<&ResolvedBoard<P::Bus>, ResolveError<P::Error>> {
        if let Some(board) = self.board.try_get() {
            return Ok(board);
        }

        // query + open run inside the critical section so concurrent first
        // callers never reach the platform twice
        critical_section::with(|_| {
            if let Some(board) = self.board.try_get() {
                return Ok(board);
            }

            let identity = self.platform.identify().map_err(ResolveError::Identify)?;
            let profile = match profile_for(identity) {
                Some(profile) => profile,
                None => {
                    warn!(
                        "board: unrecognised board type '{}', assuming 40-pin on bus 1",
                        identity
                    );
                    FALLBACK_PROFILE
                }
            };

            let bus = self
                .platform
                .open_i2c(profile.bus)
                .map_err(ResolveError::OpenBus)?;

            info!(
                "board: {} -> i2c bus {} (plus={}, rev1={})",
                identity,
                profile.bus.number(),
                profile.is_plus,
                profile.is_rev1
            );

            Ok(self.board.get_or_init(|| ResolvedBoard {
                identity,
                profile,
                bus: critical_section::Mutex::new(RefCell::new(bus)),
            }))
        })
    }

    pub fn profile(&self) -> Result<BoardProfile, ResolveError<P::Error>> {
        self.resolve().map(ResolvedBoard::profile)
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }
}
