//! Typed records for API payloads and persisted list entries
//!
//! The `*Response` types mirror the parts of the API payloads this crate
//! reads. [`Entity`] is the validated form handed to callers.

use dexbattle::{Combatant, Stat};
use serde::{Deserialize, Serialize};

use crate::error::{DexError, DexResult};

/// Named link to another API resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedResource {
    /// Resource name
    pub name: String,
    /// Resource URL; empty when absent
    #[serde(default)]
    pub url: String,
}

impl NamedResource {
    /// Numeric id in the last path segment of the URL, if any
    pub fn id(&self) -> Option<u32> {
        id_from_url(&self.url)
    }
}

/// Extract the id from a resource URL such as `.../pokemon-species/25/`
pub fn id_from_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
}

const SPRITE_BASE: &str = "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// Front sprite for a creature id
pub fn sprite_url(id: u32) -> String {
    format!("{}/{}.png", SPRITE_BASE, id)
}

/// URL-only link, as used for `evolution_chain`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLink {
    /// Resource URL
    pub url: String,
}

/// `pokemon/{name}` payload
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonResponse {
    /// Creature id; validated by [`Entity::from_response`]
    pub id: i64,
    /// API name
    pub name: String,
    /// Type slots in payload order
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    /// Base stats
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    /// Ability slots
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    /// Image URLs
    #[serde(default)]
    pub sprites: Sprites,
    /// Sound URLs
    #[serde(default)]
    pub cries: Option<Cries>,
}

/// One entry of `types`
#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    /// Slot number, 1-based
    #[serde(default)]
    pub slot: u32,
    /// Type resource
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

/// One entry of `stats`
#[derive(Debug, Clone, Deserialize)]
pub struct StatEntry {
    /// Base value
    pub base_stat: u32,
    /// Stat resource (`hp`, `attack`, ...)
    pub stat: NamedResource,
}

/// One entry of `abilities`
#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    /// Ability resource
    pub ability: NamedResource,
}

/// The `sprites` object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    /// Small front sprite
    pub front_default: Option<String>,
    /// Alternative image sets
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

/// `sprites.other`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtherSprites {
    /// Official artwork set
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<Artwork>,
}

/// `sprites.other.official-artwork`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Artwork {
    /// Large front image
    pub front_default: Option<String>,
}

/// The `cries` object
#[derive(Debug, Clone, Deserialize)]
pub struct Cries {
    /// Most recent cry recording
    pub latest: Option<String>,
}

/// `pokemon-species/{id}` payload
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesResponse {
    /// Species id
    pub id: u32,
    /// Species name
    pub name: String,
    /// Link to the species' evolution chain
    pub evolution_chain: Option<ResourceLink>,
}

impl SpeciesResponse {
    /// Id of the species' evolution chain
    pub fn evolution_chain_id(&self) -> Option<u32> {
        self.evolution_chain
            .as_ref()
            .and_then(|link| id_from_url(&link.url))
    }
}

/// `pokemon?limit=N` payload
#[derive(Debug, Clone, Deserialize)]
pub struct NameIndexResponse {
    /// Creature names with their URLs
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

/// A creature as the rest of the system sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Positive creature id
    pub id: u32,
    /// API name
    pub name: String,
    /// Type names, in the order the API lists them
    pub types: Vec<String>,
    /// Base stats in payload order
    pub stats: Vec<Stat>,
    /// Ability names
    #[serde(default)]
    pub abilities: Vec<String>,
    /// Small front sprite URL
    #[serde(default)]
    pub sprite: Option<String>,
    /// Official artwork URL
    #[serde(default)]
    pub artwork: Option<String>,
    /// Latest cry recording URL
    #[serde(default)]
    pub cry: Option<String>,
}

impl Entity {
    /// Validate and convert an API payload
    pub fn from_response(response: PokemonResponse) -> DexResult<Self> {
        let id = u32::try_from(response.id)
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| DexError::InvalidResponse {
                path: format!("pokemon/{}", response.name),
                message: format!("id must be a positive integer, got {}", response.id),
            })?;

        Ok(Self {
            id,
            name: response.name,
            types: response
                .types
                .into_iter()
                .map(|slot| slot.kind.name)
                .collect(),
            stats: response
                .stats
                .into_iter()
                .map(|entry| Stat::new(entry.stat.name, entry.base_stat))
                .collect(),
            abilities: response
                .abilities
                .into_iter()
                .map(|slot| slot.ability.name)
                .collect(),
            artwork: response
                .sprites
                .other
                .and_then(|other| other.official_artwork)
                .and_then(|art| art.front_default),
            sprite: response.sprites.front_default,
            cry: response.cries.and_then(|cries| cries.latest),
        })
    }

    /// Best available image: artwork, then sprite
    pub fn image(&self) -> Option<&str> {
        self.artwork.as_deref().or(self.sprite.as_deref())
    }
}

/// Persisted history/favorites entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySummary {
    /// Creature id
    pub id: u32,
    /// API name
    pub name: String,
    /// Small front sprite URL
    #[serde(default)]
    pub sprite: Option<String>,
    /// Type names
    #[serde(default)]
    pub types: Vec<String>,
    /// Base stats
    #[serde(default)]
    pub stats: Vec<Stat>,
}

impl From<&Entity> for EntitySummary {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            name: entity.name.clone(),
            sprite: entity.sprite.clone(),
            types: entity.types.clone(),
            stats: entity.stats.clone(),
        }
    }
}

impl Combatant for Entity {
    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn types(&self) -> &[String] {
        &self.types
    }

    fn stats(&self) -> &[Stat] {
        &self.stats
    }
}

impl Combatant for EntitySummary {
    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn types(&self) -> &[String] {
        &self.types
    }

    fn stats(&self) -> &[Stat] {
        &self.stats
    }
}
