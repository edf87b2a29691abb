//! The three edge partitions of the DSG walk.
//!
//! Every edge of the graph belongs to exactly one tessellation, and within a
//! tessellation no node is shared between two edges. One walk layer applies
//! the tessellations in a fixed order.

pub mod compact;
pub mod unary;

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three tessellations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tessellation {
    /// Applied first in every layer.
    First,
    /// Applied second.
    Second,
    /// Applied third.
    Third,
}

impl Tessellation {
    /// Application order within a layer.
    pub const ALL: [Tessellation; 3] = [Self::First, Self::Second, Self::Third];

    /// 1-based index.
    pub fn index(self) -> u32 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }

    /// Name given to the tessellation's gates and sub-circuits.
    pub fn label(self) -> &'static str {
        match self {
            Self::First => "Tessel-1",
            Self::Second => "Tessel-2",
            Self::Third => "Tessel-3",
        }
    }
}

impl fmt::Display for Tessellation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
