//! Automatic rooting strategies.
//!
//! Both strategies choose a [Pivot](crate::reroot::Pivot) on the undirected
//! view of a tree and hand it to the [reroot](crate::reroot) engine:
//! * [midpoint] - halfway along the longest tip-to-tip path
//! * [least_squares] - where root-to-tip distances vary least
//!
//! Choose one by value with [RootingMethod].

pub mod least_squares;
pub mod midpoint;

pub use least_squares::{least_squares_pivot, least_squares_root};
pub use midpoint::{longest_tip_pair, midpoint_pivot, midpoint_root};

use crate::config::RootingConfig;
use crate::model::PhyloTree;
use std::fmt;

/// Automatic rooting strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootingMethod {
    /// Root at the midpoint of the longest tip-to-tip path
    Midpoint,
    /// Root where the variance of root-to-tip distances is minimal
    LeastSquares,
}

impl RootingMethod {
    /// Roots `tree` with this strategy.
    pub fn apply(self, tree: &PhyloTree, config: &RootingConfig) -> PhyloTree {
        match self {
            RootingMethod::Midpoint => midpoint_root(tree, config),
            RootingMethod::LeastSquares => least_squares_root(tree, config),
        }
    }
}

impl fmt::Display for RootingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootingMethod::Midpoint => write!(f, "midpoint"),
            RootingMethod::LeastSquares => write!(f, "least-squares"),
        }
    }
}
