//! Evolution chains flattened into tiers by depth

use serde::{Deserialize, Serialize};

use crate::model::{sprite_url, NamedResource};

/// `evolution-chain/{id}` payload
#[derive(Debug, Clone, Deserialize)]
pub struct EvolutionChainResponse {
    /// Chain id
    pub id: u32,
    /// Root of the chain
    pub chain: ChainLink,
}

/// One node of the chain tree
#[derive(Debug, Clone, Deserialize)]
pub struct ChainLink {
    /// Species at this node
    pub species: NamedResource,
    /// Direct evolutions
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

/// A species at some depth of the chain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolutionStage {
    /// Species name
    pub name: String,
    /// Species id, from the last segment of its URL
    pub id: Option<u32>,
    /// Front sprite for `id`
    pub sprite_url: Option<String>,
}

impl EvolutionStage {
    fn of(link: &ChainLink) -> Self {
        let id = link.species.id();
        Self {
            name: link.species.name.clone(),
            id,
            sprite_url: id.map(sprite_url),
        }
    }
}

/// Stages grouped by depth, in walk order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvolutionTiers {
    /// Stages at each depth, root first
    pub tiers: Vec<Vec<EvolutionStage>>,
    /// Some node has more than one child
    pub branching: bool,
}

impl EvolutionTiers {
    /// All stages in tier order
    pub fn flat(&self) -> impl Iterator<Item = &EvolutionStage> {
        self.tiers.iter().flatten()
    }

    /// Total number of stages
    pub fn len(&self) -> usize {
        self.tiers.iter().map(Vec::len).sum()
    }

    /// Whether there are no stages
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

/// Depth-first walk of `chain`
pub fn tiers(chain: &ChainLink) -> EvolutionTiers {
    let mut out = EvolutionTiers::default();
    walk(chain, 0, &mut out);
    out
}

fn walk(link: &ChainLink, depth: usize, out: &mut EvolutionTiers) {
    if out.tiers.len() <= depth {
        out.tiers.push(Vec::new());
    }
    out.tiers[depth].push(EvolutionStage::of(link));

    if link.evolves_to.len() > 1 {
        out.branching = true;
    }
    for child in &link.evolves_to {
        walk(child, depth + 1, out);
    }
}
