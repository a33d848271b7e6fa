//! Type interaction chart
//!
//! Rows are attacking types; each row lists the defending types whose
//! multiplier differs from 1. Unlisted pairs are neutral.

type Row = (&'static str, &'static [(&'static str, f64)]);

const STANDARD: &[Row] = &[
    ("normal", &[("rock", 0.5), ("ghost", 0.0), ("steel", 0.5)]),
    (
        "fire",
        &[
            ("fire", 0.5),
            ("water", 0.5),
            ("grass", 2.0),
            ("ice", 2.0),
            ("bug", 2.0),
            ("rock", 0.5),
            ("dragon", 0.5),
            ("steel", 2.0),
        ],
    ),
    (
        "water",
        &[
            ("fire", 2.0),
            ("water", 0.5),
            ("grass", 0.5),
            ("ground", 2.0),
            ("rock", 2.0),
            ("dragon", 0.5),
        ],
    ),
    (
        "grass",
        &[
            ("fire", 0.5),
            ("water", 2.0),
            ("grass", 0.5),
            ("poison", 0.5),
            ("ground", 2.0),
            ("flying", 0.5),
            ("bug", 0.5),
            ("rock", 2.0),
            ("dragon", 0.5),
            ("steel", 0.5),
        ],
    ),
    (
        "electric",
        &[
            ("water", 2.0),
            ("grass", 0.5),
            ("electric", 0.5),
            ("ground", 0.0),
            ("flying", 2.0),
            ("dragon", 0.5),
        ],
    ),
    (
        "ice",
        &[
            ("fire", 0.5),
            ("water", 0.5),
            ("grass", 2.0),
            ("ice", 0.5),
            ("ground", 2.0),
            ("flying", 2.0),
            ("dragon", 2.0),
            ("steel", 0.5),
        ],
    ),
    (
        "fighting",
        &[
            ("normal", 2.0),
            ("ice", 2.0),
            ("rock", 2.0),
            ("dark", 2.0),
            ("steel", 2.0),
            ("poison", 0.5),
            ("flying", 0.5),
            ("psychic", 0.5),
            ("bug", 0.5),
            ("fairy", 0.5),
            ("ghost", 0.0),
        ],
    ),
    (
        "poison",
        &[
            ("grass", 2.0),
            ("fairy", 2.0),
            ("poison", 0.5),
            ("ground", 0.5),
            ("rock", 0.5),
            ("ghost", 0.5),
            ("steel", 0.0),
        ],
    ),
    (
        "ground",
        &[
            ("fire", 2.0),
            ("electric", 2.0),
            ("poison", 2.0),
            ("rock", 2.0),
            ("steel", 2.0),
            ("grass", 0.5),
            ("bug", 0.5),
            ("flying", 0.0),
        ],
    ),
    (
        "flying",
        &[
            ("grass", 2.0),
            ("fighting", 2.0),
            ("bug", 2.0),
            ("electric", 0.5),
            ("rock", 0.5),
            ("steel", 0.5),
        ],
    ),
    (
        "psychic",
        &[
            ("fighting", 2.0),
            ("poison", 2.0),
            ("psychic", 0.5),
            ("steel", 0.5),
            ("dark", 0.0),
        ],
    ),
    (
        "bug",
        &[
            ("grass", 2.0),
            ("psychic", 2.0),
            ("dark", 2.0),
            ("fire", 0.5),
            ("fighting", 0.5),
            ("poison", 0.5),
            ("flying", 0.5),
            ("ghost", 0.5),
            ("steel", 0.5),
            ("fairy", 0.5),
        ],
    ),
    (
        "rock",
        &[
            ("fire", 2.0),
            ("ice", 2.0),
            ("flying", 2.0),
            ("bug", 2.0),
            ("fighting", 0.5),
            ("ground", 0.5),
            ("steel", 0.5),
        ],
    ),
    ("ghost", &[("psychic", 2.0), ("ghost", 2.0), ("dark", 0.5)]),
    ("dragon", &[("dragon", 2.0), ("steel", 0.5), ("fairy", 0.0)]),
    (
        "steel",
        &[
            ("ice", 2.0),
            ("rock", 2.0),
            ("fairy", 2.0),
            ("fire", 0.5),
            ("water", 0.5),
            ("electric", 0.5),
            ("steel", 0.5),
        ],
    ),
    (
        "dark",
        &[
            ("psychic", 2.0),
            ("ghost", 2.0),
            ("fighting", 0.5),
            ("dark", 0.5),
            ("fairy", 0.5),
        ],
    ),
    (
        "fairy",
        &[
            ("fighting", 2.0),
            ("dragon", 2.0),
            ("dark", 2.0),
            ("fire", 0.5),
            ("poison", 0.5),
            ("steel", 0.5),
        ],
    ),
];

/// Immutable attack × defend multiplier table
#[derive(Debug, Clone, Copy)]
pub struct TypeChart {
    rows: &'static [Row],
}

impl TypeChart {
    /// The 18-type chart
    pub const fn standard() -> Self {
        Self { rows: STANDARD }
    }

    /// Multiplier for `attack` hitting `defend`; 1 when the pair is unlisted
    pub fn multiplier(&self, attack: &str, defend: &str) -> f64 {
        self.row(attack)
            .and_then(|row| row.iter().find(|(name, _)| *name == defend))
            .map(|(_, value)| *value)
            .unwrap_or(1.0)
    }

    /// Attacking type names the chart knows, in table order
    pub fn attack_types(&self) -> impl Iterator<Item = &'static str> {
        self.rows.iter().map(|(name, _)| *name)
    }

    fn row(&self, attack: &str) -> Option<&'static [(&'static str, f64)]> {
        self.rows
            .iter()
            .find(|(name, _)| *name == attack)
            .map(|(_, row)| *row)
    }
}

impl Default for TypeChart {
    fn default() -> Self {
        Self::standard()
    }
}
