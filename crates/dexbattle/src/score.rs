//! Base-stat scoring and side-by-side comparison

use crate::combatant::Combatant;

/// Left or right combatant of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// First combatant
    Left,
    /// Second combatant
    Right,
}

/// Winner of a head-to-head by total base stats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The combatant with this id scored higher
    Winner(u32),
    /// Equal totals
    Draw,
}

/// One row of the stat comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatComparison {
    /// Short label (`HP`, `ATK`, ...)
    pub label: &'static str,
    /// Left combatant's value
    pub left: u32,
    /// Right combatant's value
    pub right: u32,
    /// Strictly higher side, if any
    pub leader: Option<Side>,
}

/// Sum of all base stats
pub fn total_score<C: Combatant + ?Sized>(combatant: &C) -> u32 {
    combatant.stats().iter().map(|stat| stat.value).sum()
}

/// Pick the winner by total base stats
pub fn decide<L, R>(left: &L, right: &R) -> Outcome
where
    L: Combatant + ?Sized,
    R: Combatant + ?Sized,
{
    let (l, r) = (total_score(left), total_score(right));
    if l > r {
        Outcome::Winner(left.id())
    } else if r > l {
        Outcome::Winner(right.id())
    } else {
        Outcome::Draw
    }
}

/// Short label for a stat name; `???` for names outside the six base stats
pub fn stat_label(name: &str) -> &'static str {
    match name {
        "hp" => "HP",
        "attack" => "ATK",
        "defense" => "DEF",
        "special-attack" => "SPA",
        "special-defense" => "SPD",
        "speed" => "SPE",
        _ => "???",
    }
}

/// Compare stats pairwise by position, labelled from the left combatant.
///
/// Rows stop at the shorter stat list.
pub fn compare_stats<L, R>(left: &L, right: &R) -> Vec<StatComparison>
where
    L: Combatant + ?Sized,
    R: Combatant + ?Sized,
{
    left.stats()
        .iter()
        .zip(right.stats())
        .map(|(l, r)| StatComparison {
            label: stat_label(&l.name),
            left: l.value,
            right: r.value,
            leader: if l.value > r.value {
                Some(Side::Left)
            } else if r.value > l.value {
                Some(Side::Right)
            } else {
                None
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::Stat;

    struct Mon {
        id: u32,
        stats: Vec<Stat>,
    }

    impl Combatant for Mon {
        fn id(&self) -> u32 {
            self.id
        }
        fn name(&self) -> &str {
            "mon"
        }
        fn types(&self) -> &[String] {
            &[]
        }
        fn stats(&self) -> &[Stat] {
            &self.stats
        }
    }

    fn mon(id: u32, values: &[(&str, u32)]) -> Mon {
        Mon {
            id,
            stats: values.iter().map(|(n, v)| Stat::new(*n, *v)).collect(),
        }
    }

    #[test]
    fn test_total_and_winner() {
        let pikachu = mon(25, &[("hp", 35), ("attack", 55), ("speed", 90)]);
        let bulbasaur = mon(1, &[("hp", 45), ("attack", 49), ("speed", 45)]);

        assert_eq!(total_score(&pikachu), 180);
        assert_eq!(total_score(&bulbasaur), 139);
        assert_eq!(decide(&pikachu, &bulbasaur), Outcome::Winner(25));
        assert_eq!(decide(&bulbasaur, &pikachu), Outcome::Winner(25));
    }

    #[test]
    fn test_draw() {
        let a = mon(1, &[("hp", 50)]);
        let b = mon(2, &[("attack", 50)]);
        assert_eq!(decide(&a, &b), Outcome::Draw);
    }

    #[test]
    fn test_compare_stats() {
        let a = mon(1, &[("hp", 35), ("special-attack", 50), ("accuracy", 1)]);
        let b = mon(2, &[("hp", 45), ("special-attack", 50), ("accuracy", 0)]);

        let rows = compare_stats(&a, &b);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].label, "HP");
        assert_eq!(rows[0].leader, Some(Side::Right));
        assert_eq!(rows[1].label, "SPA");
        assert_eq!(rows[1].leader, None);
        assert_eq!(rows[2].label, "???");
        assert_eq!(rows[2].leader, Some(Side::Left));
    }

    #[test]
    fn test_compare_stats_uneven_lengths() {
        let a = mon(1, &[("hp", 1), ("attack", 2)]);
        let b = mon(2, &[("hp", 3)]);
        assert_eq!(compare_stats(&a, &b).len(), 1);
    }
}
