//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond identity and adjacency,
//! making them usable in any context (board logic, cascade engine, replayers
//! in other processes).
//!
//! # Board Dimensions
//!
//! The default board is 5 rows by 6 columns:
//!
//! - **Rows**: 5 (indexed 0-4, row 0 is the top)
//! - **Columns**: 6 (indexed 0-5, left to right)
//! - **Minimum**: 3 in each direction, since a run needs three cells
//!
//! # Orb Types
//!
//! | Variant | Symbol | Name |
//! |---------|--------|------|
//! | `Fire`  | `F` | `fire` |
//! | `Water` | `W` | `water` |
//! | `Wood`  | `G` | `wood` |
//! | `Light` | `L` | `light` |
//! | `Dark`  | `D` | `dark` |
//! | `Heal`  | `H` | `heal` |
//!
//! The symbol is used by the textual board layout (`.` marks an empty cell).
//!
//! # Examples
//!
//! ```
//! use orb_cascade_types::{Cell, OrbType, DEFAULT_COLS, DEFAULT_ROWS};
//!
//! // Parse an orb type (case-insensitive)
//! assert_eq!(OrbType::from_str("Fire"), Some(OrbType::Fire));
//! assert_eq!(OrbType::from_symbol('h'), Some(OrbType::Heal));
//!
//! // Adjacency is 4-directional
//! let a = Cell::new(2, 3);
//! assert!(a.is_adjacent(Cell::new(2, 4)));
//! assert!(!a.is_adjacent(Cell::new(3, 4)));
//!
//! assert_eq!((DEFAULT_ROWS, DEFAULT_COLS), (5, 6));
//! ```

use serde::{Deserialize, Serialize};

/// Default board height (5 rows)
pub const DEFAULT_ROWS: usize = 5;

/// Default board width (6 columns)
pub const DEFAULT_COLS: usize = 6;

/// Smallest legal board dimension in either direction
pub const MIN_DIMENSION: usize = 3;

/// Number of orbs a run needs before it clears
pub const MIN_RUN: usize = 3;

/// The six orb types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrbType {
    Fire,
    Water,
    Wood,
    Light,
    Dark,
    Heal,
}

impl OrbType {
    /// Every orb type in declaration order
    pub const ALL: [OrbType; 6] = [
        OrbType::Fire,
        OrbType::Water,
        OrbType::Wood,
        OrbType::Light,
        OrbType::Dark,
        OrbType::Heal,
    ];

    /// Parse orb type from its name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use orb_cascade_types::OrbType;
    ///
    /// assert_eq!(OrbType::from_str("water"), Some(OrbType::Water));
    /// assert_eq!(OrbType::from_str("DARK"), Some(OrbType::Dark));
    /// assert_eq!(OrbType::from_str("poison"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fire" => Some(OrbType::Fire),
            "water" => Some(OrbType::Water),
            "wood" => Some(OrbType::Wood),
            "light" => Some(OrbType::Light),
            "dark" => Some(OrbType::Dark),
            "heal" => Some(OrbType::Heal),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrbType::Fire => "fire",
            OrbType::Water => "water",
            OrbType::Wood => "wood",
            OrbType::Light => "light",
            OrbType::Dark => "dark",
            OrbType::Heal => "heal",
        }
    }

    /// Single-character layout symbol
    ///
    /// # Examples
    ///
    /// ```
    /// use orb_cascade_types::OrbType;
    ///
    /// for kind in OrbType::ALL {
    ///     assert_eq!(OrbType::from_symbol(kind.symbol()), Some(kind));
    /// }
    /// ```
    pub fn symbol(&self) -> char {
        match self {
            OrbType::Fire => 'F',
            OrbType::Water => 'W',
            OrbType::Wood => 'G',
            OrbType::Light => 'L',
            OrbType::Dark => 'D',
            OrbType::Heal => 'H',
        }
    }

    /// Parse a layout symbol (case-insensitive)
    pub fn from_symbol(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'F' => Some(OrbType::Fire),
            'W' => Some(OrbType::Water),
            'G' => Some(OrbType::Wood),
            'L' => Some(OrbType::Light),
            'D' => Some(OrbType::Dark),
            'H' => Some(OrbType::Heal),
            _ => None,
        }
    }

    /// Position of this type in [`OrbType::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// A board coordinate
///
/// Row 0 is the top row, column 0 the leftmost column. Cells order row-major,
/// which is the order every log in the workspace uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two cells
    pub fn distance(&self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True when the cells share an edge (Manhattan distance exactly 1)
    pub fn is_adjacent(&self, other: Cell) -> bool {
        self.distance(other) == 1
    }

    /// Cell one row up, if any
    pub fn up(&self) -> Option<Cell> {
        self.row.checked_sub(1).map(|row| Cell::new(row, self.col))
    }

    /// Cell one column left, if any
    pub fn left(&self) -> Option<Cell> {
        self.col.checked_sub(1).map(|col| Cell::new(self.row, col))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Identity of one orb instance
///
/// Ids are minted by the grid that owns the orb and never reused within it,
/// so two orbs of the same type stay distinguishable across moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrbId(pub u32);

impl std::fmt::Display for OrbId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Direction of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}
