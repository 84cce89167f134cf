//! AI systems for hostile units.
//!
//! Hostiles have no patrol or memory: pursuers simply re-aim at the nearest
//! live squad member every frame and let the shared fire/move routine do the
//! rest. Turrets never pursue.

use crate::components::*;
use bevy_ecs::prelude::*;

/// Index of the nearest candidate to `from`. Candidates must already be in
/// roster order; on equal distance the earlier one wins.
pub fn nearest<'a, I>(from: &Position, candidates: I) -> Option<(usize, f32)>
where
    I: IntoIterator<Item = &'a Position>,
{
    let mut best: Option<(usize, f32)> = None;
    for (i, pos) in candidates.into_iter().enumerate() {
        let dist = from.distance_to(pos);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((i, dist)),
        }
    }
    best
}

/// Live members of a roster as positions, sorted by creation order.
pub fn roster_positions<'a, I>(members: I) -> Vec<Position>
where
    I: IntoIterator<Item = (&'a UnitId, &'a Position, &'a Health)>,
{
    let mut live: Vec<(UnitId, Position)> = members
        .into_iter()
        .filter(|(_, _, health)| health.is_alive())
        .map(|(id, pos, _)| (*id, *pos))
        .collect();
    live.sort_by_key(|(id, _)| *id);
    live.into_iter().map(|(_, pos)| pos).collect()
}

/// System that points every pursuing hostile at the nearest live squad
/// member. With no squad left, the previous destination is kept.
pub fn pursuit_system(
    squad: Query<(&UnitId, &Position, &Health), (With<Squad>, Without<Hostile>)>,
    mut hostiles: Query<(&Archetype, &Position, &Health, &mut Mobility), (With<Hostile>, Without<Squad>)>,
) {
    let targets = roster_positions(squad.iter());
    if targets.is_empty() {
        return;
    }

    for (archetype, pos, health, mut mobility) in hostiles.iter_mut() {
        if !health.is_alive() || !archetype.stats().pursues {
            continue;
        }
        if let Some((index, _)) = nearest(pos, targets.iter()) {
            let target = targets[index];
            mobility.set_target(target.x, target.y);
        }
    }
}
