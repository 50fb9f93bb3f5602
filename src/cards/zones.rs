use std::fmt;

use serde::{Deserialize, Serialize};

/// The seven map locations. The adjacency graph is fixed game content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneName {
    #[serde(rename = "Royal Chamber")]
    RoyalChamber,
    #[serde(rename = "Cathedral")]
    Cathedral,
    #[serde(rename = "Courtyard")]
    Courtyard,
    #[serde(rename = "Trading Bailey")]
    TradingBailey,
    #[serde(rename = "Docks and Gates")]
    DocksAndGates,
    #[serde(rename = "Eastern Town Square")]
    EasternTownSquare,
    #[serde(rename = "Western Town Square")]
    WesternTownSquare,
}

impl ZoneName {
    pub const ALL: [ZoneName; 7] = [
        ZoneName::RoyalChamber,
        ZoneName::Cathedral,
        ZoneName::Courtyard,
        ZoneName::TradingBailey,
        ZoneName::DocksAndGates,
        ZoneName::EasternTownSquare,
        ZoneName::WesternTownSquare,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ZoneName::RoyalChamber => "Royal Chamber",
            ZoneName::Cathedral => "Cathedral",
            ZoneName::Courtyard => "Courtyard",
            ZoneName::TradingBailey => "Trading Bailey",
            ZoneName::DocksAndGates => "Docks and Gates",
            ZoneName::EasternTownSquare => "Eastern Town Square",
            ZoneName::WesternTownSquare => "Western Town Square",
        }
    }

    pub fn borders(self) -> &'static [ZoneName] {
        use ZoneName::*;
        match self {
            RoyalChamber => &[Courtyard, Cathedral],
            Cathedral => &[Courtyard, EasternTownSquare, TradingBailey, RoyalChamber],
            Courtyard => &[Cathedral, WesternTownSquare, TradingBailey, RoyalChamber],
            TradingBailey => &[
                Cathedral,
                Courtyard,
                DocksAndGates,
                EasternTownSquare,
                WesternTownSquare,
            ],
            DocksAndGates => &[EasternTownSquare, WesternTownSquare, TradingBailey],
            EasternTownSquare => &[DocksAndGates, Cathedral, TradingBailey],
            WesternTownSquare => &[DocksAndGates, Courtyard, TradingBailey],
        }
    }

    /// Legal movement targets are the current zone itself plus its borders.
    pub fn can_move_to(self, target: ZoneName) -> bool {
        self == target || self.borders().contains(&target)
    }

    /// Zones players may start in. The Royal Chamber is reserved.
    pub fn starting_zones() -> impl Iterator<Item = ZoneName> {
        Self::ALL
            .into_iter()
            .filter(|z| *z != ZoneName::RoyalChamber)
    }
}

impl fmt::Display for ZoneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_is_symmetric() {
        for zone in ZoneName::ALL {
            for border in zone.borders() {
                assert!(
                    border.borders().contains(&zone),
                    "{zone} -> {border} is one-way"
                );
            }
        }
    }

    #[test]
    fn staying_put_is_always_legal() {
        for zone in ZoneName::ALL {
            assert!(zone.can_move_to(zone));
        }
    }

    #[test]
    fn royal_chamber_is_not_a_starting_zone() {
        assert!(ZoneName::starting_zones().all(|z| z != ZoneName::RoyalChamber));
        assert_eq!(ZoneName::starting_zones().count(), 6);
    }
}
