//! Ability payloads and their display form

use serde::{Deserialize, Serialize};

use crate::model::{sprite_url, NamedResource};

/// Language used when none is configured
pub const DEFAULT_LANG: &str = "en";

/// Shown when no description exists in any usable language
pub const NO_DESCRIPTION: &str = "Description not available.";

/// `ability/{name}` payload
#[derive(Debug, Clone, Deserialize)]
pub struct AbilityResponse {
    /// Ability id
    pub id: u32,
    /// API name, hyphenated
    pub name: String,
    /// Display names per language
    #[serde(default)]
    pub names: Vec<LocalizedName>,
    /// In-game descriptions per language and version
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorText>,
    /// Long effect descriptions per language
    #[serde(default)]
    pub effect_entries: Vec<EffectEntry>,
    /// Creatures that can have the ability
    #[serde(default)]
    pub pokemon: Vec<AbilityHolder>,
}

/// Name in one language
#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedName {
    /// Localized name
    pub name: String,
    /// Language resource (`en`, `es`, ...)
    pub language: NamedResource,
}

/// In-game description in one language
#[derive(Debug, Clone, Deserialize)]
pub struct FlavorText {
    /// Raw text, may contain hard line breaks
    pub flavor_text: String,
    /// Language resource
    pub language: NamedResource,
}

/// Effect description in one language
#[derive(Debug, Clone, Deserialize)]
pub struct EffectEntry {
    /// Effect text
    pub effect: String,
    /// Language resource
    pub language: NamedResource,
}

/// Creature entry of an ability payload
#[derive(Debug, Clone, Deserialize)]
pub struct AbilityHolder {
    /// Creature resource
    pub pokemon: NamedResource,
    /// Hidden ability slot
    #[serde(default)]
    pub is_hidden: bool,
}

/// Creature that can have an ability
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Holder {
    /// Creature name
    pub name: String,
    /// Creature id, if its URL carries one
    pub id: Option<u32>,
    /// Front sprite for `id`
    pub sprite_url: Option<String>,
    /// Only available as a hidden ability
    pub hidden: bool,
}

/// An ability resolved for one language
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbilityView {
    /// Ability id
    pub id: u32,
    /// Localized name, or the API name with spaces
    pub display_name: String,
    /// Best available description
    pub description: String,
    /// Creatures that can have the ability
    pub holders: Vec<Holder>,
}

impl AbilityView {
    /// Resolve names and text for `lang`
    ///
    /// The description falls back from flavor text to the effect entry in
    /// `lang`, then to the English effect.
    pub fn from_response(response: &AbilityResponse, lang: &str) -> Self {
        let display_name = response
            .names
            .iter()
            .find(|n| n.language.name == lang)
            .map(|n| n.name.clone())
            .unwrap_or_else(|| response.name.replace('-', " "));

        let flavor = response
            .flavor_text_entries
            .iter()
            .find(|e| e.language.name == lang)
            .map(|e| e.flavor_text.as_str());
        let effect = |wanted: &str| {
            response
                .effect_entries
                .iter()
                .find(|e| e.language.name == wanted)
                .map(|e| e.effect.as_str())
        };

        let description = match (flavor, effect(lang), effect("en")) {
            (Some(text), _, _) => tidy(text),
            (None, Some(text), _) => tidy(text),
            (None, None, Some(text)) => format!("(English) {}", tidy(text)),
            (None, None, None) => NO_DESCRIPTION.to_string(),
        };

        let holders = response
            .pokemon
            .iter()
            .map(|h| {
                let id = h.pokemon.id();
                Holder {
                    name: h.pokemon.name.clone(),
                    id,
                    sprite_url: id.map(sprite_url),
                    hidden: h.is_hidden,
                }
            })
            .collect();

        Self {
            id: response.id,
            display_name,
            description,
            holders,
        }
    }
}

// flavor text carries hard line breaks and form feeds
fn tidy(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lang(name: &str) -> serde_json::Value {
        json!({"name": name, "url": ""})
    }

    fn response(value: serde_json::Value) -> AbilityResponse {
        serde_json::from_value(value).unwrap()
    }

    fn overgrow() -> AbilityResponse {
        response(json!({
            "id": 65,
            "name": "overgrow",
            "names": [
                {"name": "Espesura", "language": lang("es")},
                {"name": "Overgrow", "language": lang("en")}
            ],
            "flavor_text_entries": [
                {"flavor_text": "Powers up Grass-type\nmoves in a pinch.", "language": lang("en")}
            ],
            "effect_entries": [
                {"effect": "Boosts Grass moves.", "language": lang("en")}
            ],
            "pokemon": [
                {"pokemon": {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"}, "is_hidden": false}
            ]
        }))
    }

    #[test]
    fn test_localized_name_and_flavor() {
        let view = AbilityView::from_response(&overgrow(), "en");
        assert_eq!(view.display_name, "Overgrow");
        assert_eq!(view.description, "Powers up Grass-type moves in a pinch.");
        assert_eq!(view.holders[0].id, Some(1));
    }

    #[test]
    fn test_falls_back_to_english_effect() {
        let view = AbilityView::from_response(&overgrow(), "es");
        assert_eq!(view.display_name, "Espesura");
        assert_eq!(view.description, "(English) Boosts Grass moves.");
    }

    #[test]
    fn test_effect_in_language_beats_english() {
        let mut resp = overgrow();
        resp.effect_entries.push(EffectEntry {
            effect: "Potencia movimientos Planta.".to_string(),
            language: NamedResource {
                name: "es".to_string(),
                url: String::new(),
            },
        });
        let view = AbilityView::from_response(&resp, "es");
        assert_eq!(view.description, "Potencia movimientos Planta.");
    }

    #[test]
    fn test_bare_ability() {
        let resp = response(json!({"id": 999, "name": "made-up-ability"}));
        let view = AbilityView::from_response(&resp, "fr");
        assert_eq!(view.display_name, "made up ability");
        assert_eq!(view.description, NO_DESCRIPTION);
        assert!(view.holders.is_empty());
    }
}
