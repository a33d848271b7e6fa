//! The view of an entity the battle math needs

use serde::{Deserialize, Serialize};

/// A named base stat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    /// Stat name as the API spells it (`hp`, `special-attack`, ...)
    pub name: String,
    /// Base value
    pub value: u32,
}

impl Stat {
    /// Create a stat
    pub fn new(name: impl Into<String>, value: u32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Anything that can take part in a matchup
pub trait Combatant {
    /// Positive numeric id
    fn id(&self) -> u32;

    /// Display name
    fn name(&self) -> &str;

    /// Type names in declared order
    fn types(&self) -> &[String];

    /// Base stats in declared order
    fn stats(&self) -> &[Stat];
}
