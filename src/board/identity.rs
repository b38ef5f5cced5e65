//! Board identity and the I2C wiring it implies.
//!
//! Only the very first Model A/B boards routed the header I2C pins to the
//! SoC's bus 0; every later board uses bus 1. The 40-pin header arrived
//! with the A+/B+.

/// Board type as reported by the platform's board-identity service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardIdentity {
    ModelARev1,
    ModelBRev1,
    ModelBRev2,
    ModelAPlusRev1,
    ModelBPlusRev1,
    Model2BRev1,
    Model3BRev1,
    ModelZeroRev1,
    ComputeModuleRev1,
    Unknown,
}

impl BoardIdentity {
    pub const fn name(self) -> &'static str {
        match self {
            BoardIdentity::ModelARev1 => "Model A rev 1",
            BoardIdentity::ModelBRev1 => "Model B rev 1",
            BoardIdentity::ModelBRev2 => "Model B rev 2",
            BoardIdentity::ModelAPlusRev1 => "Model A+",
            BoardIdentity::ModelBPlusRev1 => "Model B+",
            BoardIdentity::Model2BRev1 => "Model 2B",
            BoardIdentity::Model3BRev1 => "Model 3B",
            BoardIdentity::ModelZeroRev1 => "Zero",
            BoardIdentity::ComputeModuleRev1 => "Compute Module",
            BoardIdentity::Unknown => "unknown",
        }
    }
}

impl core::fmt::Display for BoardIdentity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum I2cBusIndex {
    Bus0,
    Bus1,
}

impl I2cBusIndex {
    pub const fn number(self) -> u8 {
        match self {
            I2cBusIndex::Bus0 => 0,
            I2cBusIndex::Bus1 => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardProfile {
    pub bus: I2cBusIndex,
    /// 40-pin header board
    pub is_plus: bool,
    /// Original Model A/B
    pub is_rev1: bool,
}

const REV1: BoardProfile = BoardProfile {
    bus: I2cBusIndex::Bus0,
    is_plus: false,
    is_rev1: true,
};

const REV2: BoardProfile = BoardProfile {
    bus: I2cBusIndex::Bus1,
    is_plus: false,
    is_rev1: false,
};

const PLUS: BoardProfile = BoardProfile {
    bus: I2cBusIndex::Bus1,
    is_plus: true,
    is_rev1: false,
};

/// Best guess for boards missing from `PROFILES`: newer boards all share
/// the 40-pin layout.
pub const FALLBACK_PROFILE: BoardProfile = PLUS;

pub const PROFILES: &[(BoardIdentity, BoardProfile)] = &[
    (BoardIdentity::ModelARev1, REV1),
    (BoardIdentity::ModelBRev1, REV1),
    (BoardIdentity::ModelBRev2, REV2),
    (BoardIdentity::ModelAPlusRev1, PLUS),
    (BoardIdentity::ModelBPlusRev1, PLUS),
    (BoardIdentity::Model2BRev1, PLUS),
    (BoardIdentity::Model3BRev1, PLUS),
    (BoardIdentity::ModelZeroRev1, PLUS),
];

/// Look up a known board; `None` means the caller should fall back.
pub fn profile_for(identity: BoardIdentity) -> Option<BoardProfile> {
    PROFILES
        .iter()
        .find(|(id, _)| *id == identity)
        .map(|&(_, profile)| profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rev1_boards_use_bus_0() {
        for id in [BoardIdentity::ModelARev1, BoardIdentity::ModelBRev1] {
            let p = profile_for(id).unwrap();
            assert_eq!(p.bus, I2cBusIndex::Bus0);
            assert!(p.is_rev1);
            assert!(!p.is_plus);
        }
    }

    #[test]
    fn rev2_b_is_bus_1_not_plus() {
        assert_eq!(profile_for(BoardIdentity::ModelBRev2), Some(REV2));
    }

    #[test]
    fn forty_pin_boards_are_plus() {
        for id in [
            BoardIdentity::ModelAPlusRev1,
            BoardIdentity::ModelBPlusRev1,
            BoardIdentity::Model2BRev1,
            BoardIdentity::Model3BRev1,
            BoardIdentity::ModelZeroRev1,
        ] {
            assert_eq!(profile_for(id), Some(PLUS), "{}", id);
        }
    }

    #[test]
    fn unlisted_boards_have_no_profile() {
        assert_eq!(profile_for(BoardIdentity::Unknown), None);
        assert_eq!(profile_for(BoardIdentity::ComputeModuleRev1), None);
    }
}
