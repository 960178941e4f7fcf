//! Screen layout of the game
//!
//! Fixed control positions and reference-image names, in logical
//! (low-resolution) coordinates relative to the emulator window.

use crate::vision::{Loc, Region};

// Shaft view navigation
pub const SHAFT_UP_ARROW: Loc = Loc::new(25, 603);
pub const SHAFT_DOWN_ARROW: Loc = Loc::new(25, 655);
pub const PREVIOUS_SHAFT_ARROW: Loc = Loc::new(10, 380);

// Mine overview navigation
pub const OVERVIEW_UP_ARROW: Loc = Loc::new(50, 563);
pub const OVERVIEW_DOWN_ARROW: Loc = Loc::new(50, 606);

// Panel headings read with OCR
pub const MANAGER_HEADING: Region = Region::new(88, 105, 304, 132);
pub const OVERVIEW_HEADING: Region = Region::new(95, 95, 275, 125);
pub const SHAFT_HEADING: Region = Region::new(41, 94, 317, 131);

/// Name of the manager just assigned, in the manager panel
pub const ASSIGNED_NAME: Region = Region::new(145, 178, 242, 198);
/// Name next to an assign button, measured from the button's top-left
pub const ROSTER_NAME: Region = Region::new(-120, -12, -20, 12);

pub const BONUS_AREA: Region = Region::new(228, 578, 359, 680);
pub const NEW_SHAFT_AREA: Region = Region::new(240, 80, 385, 695);

// Surface areas, visible with the shaft scrolled to the top
pub const ELEVATOR_LEVEL: Loc = Loc::new(61, 302);
pub const ELEVATOR_UPGRADE_ARROW: Loc = Loc::new(65, 282);
pub const ELEVATOR_MANAGER: Loc = Loc::new(53, 405);
pub const WAREHOUSE_LEVEL: Loc = Loc::new(345, 302);
pub const WAREHOUSE_UPGRADE_ARROW: Loc = Loc::new(325, 282);
pub const WAREHOUSE_MANAGER: Loc = Loc::new(340, 405);

// Boost bars in the mine overview
pub const WAREHOUSE_BOOST_BAR: Loc = Loc::new(174, 273);
pub const ELEVATOR_BOOST_BAR: Loc = Loc::new(174, 417);
pub const SHAFT_BOOST_BAR: Loc = Loc::new(174, 613);

/// Attention marker bands in the mine overview, from the top of the game area
pub const WAREHOUSE_BAND_END: i32 = 200;
pub const ELEVATOR_BAND_END: i32 = 350;

/// The shaft's manager sits this far left of its level button
pub const LAST_MANAGER_OFFSET: i32 = 150;

/// Ready-colour probe grid below an assign button, from its top-left
pub const READY_GRID_OFFSET: (i32, i32) = (30, 33);
pub const READY_GRID_SPAN: i32 = 24;
pub const READY_GRID_STEP: usize = 4;

/// Boost button relative to the unassign button's centre
pub const BOOST_OFFSET: (i32, i32) = (20, 35);

/// Manager list drag: start height below the game area's top, and distance
pub const MANAGER_SCROLL_START: i32 = 500;
pub const MANAGER_SCROLL_DISTANCE: i32 = 200;

pub mod images {
    pub const LEVEL: &str = "level";
    pub const SHOVEL: &str = "shovel";
    pub const SHOP: &str = "shop";
    pub const FRONTIER_SHOP: &str = "frontier-shop";
    pub const FRONTIER_SHOP_ALT: &str = "frontier-shop2";
    pub const EXCLAMATION: &str = "exclamation";
    pub const UPGRADE: &str = "upgrade";
    pub const MAX_SELECTED: &str = "max-selected";
    pub const MAX_UNSELECTED: &str = "max-unselected";
    pub const MAXED_UPGRADES: &str = "maxed-upgrades";
    pub const MINESHAFT: &str = "mineshaft";
    pub const ASSIGN: &str = "assign";
    pub const ASSIGN_ANYWAY: [&str; 2] = ["assign-anyway", "assign-anyway2"];
    pub const UNASSIGN: &str = "unassign";
    pub const SUPER_MANAGER_TABS: [&str; 3] = [
        "super-managers-tab",
        "super-managers-tab-dark",
        "super-managers-tab-dark2",
    ];
    pub const BONUS_MARKERS: [&str; 2] = ["edgar", "edgar-extravaganza"];
    pub const FREE: &str = "free";
    pub const NEW_SHAFT: &str = "new-shaft";
    pub const DOLLAR_MANAGER_TAB: &str = "dollar-mgr-tab";
    pub const HIRE_MANAGER: &str = "hire-manager-button";
    pub const HIRE_MANAGER_ALT: &str = "hire-manager-button2";
    pub const REMOVE_BARRIER: &str = "remove-barrier";
    pub const SKIP_NO_TIME: &str = "skip-no-time";
    pub const EVENT_MINE: &str = "event-mine";
    pub const MAINLAND_MENU: &str = "mainland-menu";
    pub const LAUNCHER_ICON: &str = "idle-miner";
    pub const CANCEL: &str = "cancel";

    /// Dismiss buttons tried while clearing popups
    pub const POPUP_DISMISS: [&str; 10] = [
        "free",
        "free-idle",
        "skip-no-time",
        "collect",
        "x",
        "x2",
        "x3",
        "x4",
        "red-x",
        "cancel",
    ];

    /// Transient buttons clicked once per pass whenever they show up
    pub const TRANSIENT: [&str; 14] = [
        "free",
        "edgar",
        "free-idle",
        "remove-barrier",
        "collect",
        "x",
        "x2",
        "x3",
        "x4",
        "claim",
        "close-blue",
        "get",
        "cancel",
        "red-x",
    ];
}
