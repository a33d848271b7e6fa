//! Plain-text views of command results

use std::fmt::Write;

use dexbattle::{
    compare_stats, compute_advantage, decide, stat_label, total_score, Combatant, Outcome, Side,
};
use dexcache::{AbilityView, Entity, EntitySummary, EvolutionTiers, Origin};

const BAR_WIDTH: usize = 20;
const STAT_CEILING: u32 = 255;

fn bar(value: u32) -> String {
    let filled = (value.min(STAT_CEILING) as usize * BAR_WIDTH) / STAT_CEILING as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

pub fn entity(entity: &Entity, origin: Origin, favorite: bool) -> String {
    let mut out = String::new();
    let marker = if favorite { " ♥" } else { "" };

    let _ = writeln!(out, "[{}] #{} {}{}", origin, entity.id, entity.name, marker);
    let _ = writeln!(out, "types:     {}", entity.types.join(", "));
    if !entity.abilities.is_empty() {
        let _ = writeln!(out, "abilities: {}", entity.abilities.join(", "));
    }
    if let Some(image) = entity.image() {
        let _ = writeln!(out, "image:     {}", image);
    }
    if let Some(cry) = &entity.cry {
        let _ = writeln!(out, "cry:       {}", cry);
    }
    for stat in &entity.stats {
        let _ = writeln!(
            out,
            "  {:<4}{:>4} {}",
            stat_label(&stat.name),
            stat.value,
            bar(stat.value)
        );
    }
    out
}

/// Linear chains print as one arrow line, branching chains one tier per line.
pub fn tiers(tiers: &EvolutionTiers) -> String {
    if tiers.is_empty() {
        return String::from("evolution: none\n");
    }

    if !tiers.branching {
        let names: Vec<&str> = tiers.flat().map(|s| s.name.as_str()).collect();
        return format!("evolution: {}\n", names.join(" → "));
    }

    let mut out = String::from("evolution:\n");
    for (depth, tier) in tiers.tiers.iter().enumerate() {
        let names: Vec<&str> = tier.iter().map(|s| s.name.as_str()).collect();
        let _ = writeln!(out, "  {}: {}", depth + 1, names.join(" | "));
    }
    out
}

pub fn ability(view: &AbilityView, origin: Origin) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "[{}] #{} {}",
        origin,
        view.id,
        view.display_name.to_uppercase()
    );
    let _ = writeln!(out, "{}", view.description);
    let _ = writeln!(out, "holders ({}):", view.holders.len());
    for holder in &view.holders {
        let hidden = if holder.hidden { " (hidden)" } else { "" };
        match holder.id {
            Some(id) => {
                let _ = writeln!(out, "  #{} {}{}", id, holder.name, hidden);
            }
            None => {
                let _ = writeln!(out, "  {}{}", holder.name, hidden);
            }
        }
    }
    out
}

pub fn summaries(title: &str, list: &[EntitySummary]) -> String {
    if list.is_empty() {
        return format!("{}: empty\n", title);
    }

    let mut out = format!("{} ({}):\n", title, list.len());
    for entry in list {
        let _ = writeln!(
            out,
            "  #{:<5} {:<16} {}",
            entry.id,
            entry.name,
            entry.types.join("/")
        );
    }
    out
}

fn matchup<A: Combatant, D: Combatant>(attacker: &A, defender: &D) -> String {
    let advantage = compute_advantage(attacker, defender);
    format!(
        "{} vs {}: x{:.2} ({})",
        attacker.name(),
        defender.name(),
        advantage.multiplier,
        advantage.rationale
    )
}

pub fn battle<L: Combatant, R: Combatant>(left: &L, right: &R) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", matchup(left, right));
    let _ = writeln!(out, "{}", matchup(right, left));
    let _ = writeln!(
        out,
        "score: {} {} pts, {} {} pts",
        left.name(),
        total_score(left),
        right.name(),
        total_score(right)
    );

    match decide(left, right) {
        Outcome::Winner(id) if id == left.id() => {
            let _ = writeln!(out, "winner: {}", left.name());
        }
        Outcome::Winner(_) => {
            let _ = writeln!(out, "winner: {}", right.name());
        }
        Outcome::Draw => {
            let _ = writeln!(out, "draw");
        }
    }

    for row in compare_stats(left, right) {
        let lead = match row.leader {
            Some(Side::Left) => "<",
            Some(Side::Right) => ">",
            None => "=",
        };
        let _ = writeln!(out, "  {:<4}{:>4} {} {:<4}", row.label, row.left, lead, row.right);
    }
    out
}
