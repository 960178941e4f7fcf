//! Mine areas and game variants

use serde::{Deserialize, Serialize};

/// The three upgradeable sections of a mine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Area {
    /// The bottom-most (most recently opened) mineshaft
    PrimaryShaft,
    Elevator,
    Warehouse,
}

impl Area {
    /// Every area, in the order tasks visit them
    pub const ALL: [Area; 3] = [Area::PrimaryShaft, Area::Elevator, Area::Warehouse];

    pub fn name(self) -> &'static str {
        match self {
            Area::PrimaryShaft => "MINESHAFT",
            Area::Elevator => "ELEVATOR",
            Area::Warehouse => "WAREHOUSE",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Area::PrimaryShaft => 0,
            Area::Elevator => 1,
            Area::Warehouse => 2,
        }
    }
}

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which kind of mine the session is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameVariant {
    Event,
    Mainland,
    Frontier,
    Regular,
}

impl GameVariant {
    pub fn name(self) -> &'static str {
        match self {
            GameVariant::Event => "EVENT",
            GameVariant::Mainland => "MAINLAND",
            GameVariant::Frontier => "FRONTIER",
            GameVariant::Regular => "REGULAR",
        }
    }

    /// Whether boosted managers are rotated in this mine
    pub fn cycles_managers(self) -> bool {
        matches!(self, GameVariant::Regular | GameVariant::Event)
    }

    /// Whether the mine overview shows manager boost bars
    pub fn shows_boost_bars(self) -> bool {
        self != GameVariant::Frontier
    }
}

/// One-way latches recording areas that reached their upgrade ceiling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxedFlags {
    pub primary_shaft: bool,
    pub elevator: bool,
    pub warehouse: bool,
}

impl MaxedFlags {
    pub fn is_maxed(&self, area: Area) -> bool {
        match area {
            Area::PrimaryShaft => self.primary_shaft,
            Area::Elevator => self.elevator,
            Area::Warehouse => self.warehouse,
        }
    }

    /// Latch `area` as maxed for the rest of the run
    pub fn set_maxed(&mut self, area: Area) {
        match area {
            Area::PrimaryShaft => self.primary_shaft = true,
            Area::Elevator => self.elevator = true,
            Area::Warehouse => self.warehouse = true,
        }
    }

    /// The area to level when the overview points at `wanted`
    ///
    /// A maxed first choice falls back to one other area, and a maxed first
    /// fallback to the remaining one. The last area is returned even if it
    /// is maxed too.
    pub fn leveling_target(&self, wanted: Area) -> Area {
        let (first, second) = match wanted {
            Area::Warehouse => (Area::Elevator, Area::PrimaryShaft),
            Area::Elevator => (Area::Warehouse, Area::PrimaryShaft),
            Area::PrimaryShaft => (Area::Elevator, Area::Warehouse),
        };
        if !self.is_maxed(wanted) {
            wanted
        } else if !self.is_maxed(first) {
            first
        } else {
            second
        }
    }
}
