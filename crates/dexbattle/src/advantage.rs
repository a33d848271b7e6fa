//! Type advantage of one combatant over another

use crate::chart::TypeChart;
use crate::combatant::Combatant;

const DEFAULT_RATIONALE: &str = "normal damage";
const NEUTRAL_RATIONALE: &str = "neutral damage between types";

/// Coarse class of a multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effectiveness {
    /// Multiplier above 1
    SuperEffective,
    /// Multiplier exactly 1
    Neutral,
    /// Multiplier strictly between 0 and 1
    NotVeryEffective,
    /// Multiplier 0
    NoEffect,
}

impl Effectiveness {
    /// Classify a multiplier
    pub fn of(multiplier: f64) -> Self {
        if multiplier > 1.0 {
            Effectiveness::SuperEffective
        } else if multiplier == 0.0 {
            Effectiveness::NoEffect
        } else if multiplier < 1.0 {
            Effectiveness::NotVeryEffective
        } else {
            Effectiveness::Neutral
        }
    }
}

/// Result of a matchup
#[derive(Debug, Clone, PartialEq)]
pub struct Advantage {
    /// Best damage multiplier across the attacker's types
    pub multiplier: f64,
    /// Human-readable explanation
    pub rationale: String,
}

impl Advantage {
    /// Class of the multiplier
    pub fn effectiveness(&self) -> Effectiveness {
        Effectiveness::of(self.multiplier)
    }
}

/// Compute the attacker's advantage using the standard chart
pub fn compute_advantage<A, D>(attacker: &A, defender: &D) -> Advantage
where
    A: Combatant + ?Sized,
    D: Combatant + ?Sized,
{
    compute_advantage_with(&TypeChart::standard(), attacker, defender)
}

/// Compute the attacker's advantage against `chart`.
///
/// Each attacking type scores the product of its multipliers against every
/// defending type. The best score wins; a score of 0 is recorded when nothing
/// has been recorded above 0 yet. The rationale always names the defender's
/// first type, even when a later type decided the product.
pub fn compute_advantage_with<A, D>(chart: &TypeChart, attacker: &A, defender: &D) -> Advantage
where
    A: Combatant + ?Sized,
    D: Combatant + ?Sized,
{
    let defending = defender.types();
    let first_defender = defending.first().map(String::as_str).unwrap_or("unknown");

    let mut best = 0.0_f64;
    let mut rationale = DEFAULT_RATIONALE.to_string();

    for attack in attacker.types() {
        let current: f64 = defending
            .iter()
            .map(|defend| chart.multiplier(attack, defend))
            .product();

        if current > best || (best == 0.0 && current == 0.0) {
            best = current;
            rationale = match Effectiveness::of(best) {
                Effectiveness::SuperEffective => {
                    format!("{} is super effective against {}", attack, first_defender)
                }
                Effectiveness::NoEffect => format!("{} has no effect on {}", attack, first_defender),
                Effectiveness::NotVeryEffective => {
                    format!("{} is not very effective against {}", attack, first_defender)
                }
                Effectiveness::Neutral => NEUTRAL_RATIONALE.to_string(),
            };
        }
    }

    // Nothing recorded: an attacker without types deals plain damage
    if best == 0.0 && rationale == DEFAULT_RATIONALE {
        best = 1.0;
    }

    Advantage {
        multiplier: best,
        rationale,
    }
}
