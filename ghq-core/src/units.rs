//! Unit type definitions and reserve fleets

use serde::{Deserialize, Serialize};

use crate::error::{GhqError, Result};

/// Unit kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitKind {
    Hq,
    Infantry,
    ArmoredInfantry,
    AirborneInfantry,
    Artillery,
    ArmoredArtillery,
    HeavyArtillery,
}

/// Static attributes of a unit kind
#[derive(Clone, Debug)]
pub struct UnitType {
    pub kind: UnitKind,
    pub name: &'static str,
    /// Squares per move, in a straight line
    pub mobility: u8,
    /// Infantry-class units capture adjacent enemies and take part in engagement
    pub can_capture: bool,
    /// Present only on directional (artillery-class) units
    pub artillery_range: Option<u8>,
    pub can_parachute: bool,
    /// Material value used by the evaluator
    pub value: f32,
}

impl UnitType {
    const fn new(
        kind: UnitKind,
        name: &'static str,
        mobility: u8,
        can_capture: bool,
        artillery_range: Option<u8>,
        can_parachute: bool,
        value: f32,
    ) -> Self {
        Self {
            kind,
            name,
            mobility,
            can_capture,
            artillery_range,
            can_parachute,
            value,
        }
    }
}

/// All unit types, indexed by `UnitKind as usize`
pub static UNIT_TYPES: [UnitType; 7] = [
    UnitType::new(UnitKind::Hq, "HQ", 1, false, None, false, 100.0),
    UnitType::new(UnitKind::Infantry, "INFANTRY", 1, true, None, false, 1.0),
    UnitType::new(UnitKind::ArmoredInfantry, "ARMORED_INFANTRY", 2, true, None, false, 3.0),
    UnitType::new(UnitKind::AirborneInfantry, "AIRBORNE_INFANTRY", 1, true, None, true, 5.0),
    UnitType::new(UnitKind::Artillery, "ARTILLERY", 1, false, Some(2), false, 3.0),
    UnitType::new(UnitKind::ArmoredArtillery, "ARMORED_ARTILLERY", 2, false, Some(2), false, 5.0),
    UnitType::new(UnitKind::HeavyArtillery, "HEAVY_ARTILLERY", 1, false, Some(3), false, 6.0),
];

/// Kinds that can sit in a reserve fleet, in generation order
pub const RESERVE_KINDS: [UnitKind; 6] = [
    UnitKind::Infantry,
    UnitKind::ArmoredInfantry,
    UnitKind::AirborneInfantry,
    UnitKind::Artillery,
    UnitKind::ArmoredArtillery,
    UnitKind::HeavyArtillery,
];

impl UnitKind {
    pub fn unit_type(self) -> &'static UnitType {
        &UNIT_TYPES[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.unit_type().name
    }

    pub fn mobility(self) -> u8 {
        self.unit_type().mobility
    }

    pub fn can_capture(self) -> bool {
        self.unit_type().can_capture
    }

    pub fn artillery_range(self) -> Option<u8> {
        self.unit_type().artillery_range
    }

    /// Directional units carry an orientation and bombard along it
    pub fn is_directional(self) -> bool {
        self.artillery_range().is_some()
    }

    /// Infantry-class units engage each other
    pub fn is_infantry(self) -> bool {
        self.can_capture()
    }

    pub fn can_parachute(self) -> bool {
        self.unit_type().can_parachute
    }

    pub fn value(self) -> f32 {
        self.unit_type().value
    }

    /// Parse from the canonical upper-case name
    pub fn from_name(name: &str) -> Option<UnitKind> {
        UNIT_TYPES.iter().find(|ut| ut.name == name).map(|ut| ut.kind)
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Units waiting off-board
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ReserveFleet {
    pub infantry: u8,
    pub armored_infantry: u8,
    pub airborne_infantry: u8,
    pub artillery: u8,
    pub armored_artillery: u8,
    pub heavy_artillery: u8,
}

impl ReserveFleet {
    /// Reserve every side starts a standard game with
    pub const fn standard() -> Self {
        Self {
            infantry: 5,
            armored_infantry: 3,
            airborne_infantry: 1,
            artillery: 2,
            armored_artillery: 1,
            heavy_artillery: 1,
        }
    }

    pub const fn empty() -> Self {
        Self {
            infantry: 0,
            armored_infantry: 0,
            airborne_infantry: 0,
            artillery: 0,
            armored_artillery: 0,
            heavy_artillery: 0,
        }
    }

    /// Count for a kind; always 0 for the HQ
    pub fn count(&self, kind: UnitKind) -> u8 {
        match kind {
            UnitKind::Hq => 0,
            UnitKind::Infantry => self.infantry,
            UnitKind::ArmoredInfantry => self.armored_infantry,
            UnitKind::AirborneInfantry => self.airborne_infantry,
            UnitKind::Artillery => self.artillery,
            UnitKind::ArmoredArtillery => self.armored_artillery,
            UnitKind::HeavyArtillery => self.heavy_artillery,
        }
    }

    fn slot_mut(&mut self, kind: UnitKind) -> Option<&mut u8> {
        match kind {
            UnitKind::Hq => None,
            UnitKind::Infantry => Some(&mut self.infantry),
            UnitKind::ArmoredInfantry => Some(&mut self.armored_infantry),
            UnitKind::AirborneInfantry => Some(&mut self.airborne_infantry),
            UnitKind::Artillery => Some(&mut self.artillery),
            UnitKind::ArmoredArtillery => Some(&mut self.armored_artillery),
            UnitKind::HeavyArtillery => Some(&mut self.heavy_artillery),
        }
    }

    /// Remove one unit of `kind`, failing if none is left
    pub fn take(&mut self, kind: UnitKind) -> Result<()> {
        match self.slot_mut(kind) {
            Some(slot) if *slot > 0 => {
                *slot -= 1;
                Ok(())
            }
            _ => Err(GhqError::InvalidAction(format!("no {} left in reserve", kind))),
        }
    }

    /// Kinds with at least one unit left
    pub fn available(&self) -> impl Iterator<Item = UnitKind> + '_ {
        RESERVE_KINDS.into_iter().filter(|&k| self.count(k) > 0)
    }

    pub fn total(&self) -> u32 {
        RESERVE_KINDS.iter().map(|&k| self.count(k) as u32).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_kind() {
        for (i, ut) in UNIT_TYPES.iter().enumerate() {
            assert_eq!(ut.kind as usize, i, "{} is out of place", ut.name);
        }
    }

    #[test]
    fn test_directional_units() {
        assert!(UnitKind::Artillery.is_directional());
        assert!(UnitKind::ArmoredArtillery.is_directional());
        assert_eq!(UnitKind::HeavyArtillery.artillery_range(), Some(3));
        assert!(!UnitKind::Infantry.is_directional());
        assert!(!UnitKind::Hq.is_directional());
        assert!(!UnitKind::Hq.can_capture());
        assert!(UnitKind::AirborneInfantry.can_parachute());
    }

    #[test]
    fn test_name_lookup() {
        assert_eq!(UnitKind::from_name("ARMORED_INFANTRY"), Some(UnitKind::ArmoredInfantry));
        assert_eq!(UnitKind::from_name("CAVALRY"), None);
        assert_eq!(UnitKind::HeavyArtillery.to_string(), "HEAVY_ARTILLERY");
    }

    #[test]
    fn test_reserve_take() {
        let mut reserve = ReserveFleet::empty();
        reserve.infantry = 1;
        assert!(reserve.take(UnitKind::Infantry).is_ok());
        assert_eq!(reserve.count(UnitKind::Infantry), 0);
        assert!(reserve.take(UnitKind::Infantry).is_err());
        assert!(reserve.take(UnitKind::Hq).is_err());
    }

    #[test]
    fn test_standard_reserve() {
        let reserve = ReserveFleet::standard();
        assert_eq!(reserve.total(), 13);
        assert_eq!(reserve.available().count(), 6);
    }
}
