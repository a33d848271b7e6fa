//! # dexbattle
//!
//! Battle analysis between two combatants.
//!
//! ## Pieces
//! - **TypeChart**: static attack-type × defend-type multiplier table
//! - **compute_advantage**: best multiplier an attacker gets against a
//!   defender, with a one-line rationale
//! - **score**: base-stat totals, winner selection, per-stat comparison
//!
//! Everything here is pure; callers supply combatants through [`Combatant`].

#![warn(missing_docs)]

mod advantage;
mod chart;
mod combatant;
mod score;

pub use advantage::{compute_advantage, compute_advantage_with, Advantage, Effectiveness};
pub use chart::TypeChart;
pub use combatant::{Combatant, Stat};
pub use score::{compare_stats, decide, stat_label, total_score, Outcome, Side, StatComparison};
