//! Combat domain: boss encounter beats (name card, fight start, defeat).

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::Incapacitated;
use crate::combat::events::{BossEncounterEvent, DeathEvent, ReviveEvent};
use crate::movement::Player;

/// How long the name card shows before the fight starts
pub const BOSS_INTRO_DURATION: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BossPhase {
    /// Waiting for the player to come close
    Dormant,
    Intro { elapsed: f32 },
    Active,
    Defeated,
}

/// Step an encounter took during [`BossEncounter::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterStep {
    Intro,
    Start,
}

#[derive(Component, Debug, Clone)]
pub struct BossEncounter {
    pub name: String,
    /// Player distance that triggers the intro
    pub intro_radius: f32,
    pub phase: BossPhase,
}

impl BossEncounter {
    pub fn new(name: impl Into<String>, intro_radius: f32) -> Self {
        Self {
            name: name.into(),
            intro_radius,
            phase: BossPhase::Dormant,
        }
    }

    /// Move the encounter along. `player_distance` is `None` when no live
    /// player is around.
    pub fn advance(&mut self, player_distance: Option<f32>, dt: f32) -> Option<EncounterStep> {
        match self.phase {
            BossPhase::Dormant => {
                let close = player_distance.is_some_and(|d| d <= self.intro_radius);
                if !close {
                    return None;
                }
                self.phase = BossPhase::Intro { elapsed: 0.0 };
                Some(EncounterStep::Intro)
            }
            BossPhase::Intro { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= BOSS_INTRO_DURATION {
                    self.phase = BossPhase::Active;
                    Some(EncounterStep::Start)
                } else {
                    self.phase = BossPhase::Intro { elapsed };
                    None
                }
            }
            BossPhase::Active | BossPhase::Defeated => None,
        }
    }

    pub fn defeat(&mut self) {
        self.phase = BossPhase::Defeated;
    }

    /// Back to dormant so the intro plays again on the next approach.
    pub fn reset(&mut self) {
        self.phase = BossPhase::Dormant;
    }
}

pub(crate) fn advance_boss_encounters(
    time: Res<Time>,
    player_query: Query<&Transform, (With<Player>, Without<Incapacitated>)>,
    mut boss_query: Query<(Entity, &Transform, &mut BossEncounter), Without<Incapacitated>>,
    mut encounter_events: MessageWriter<BossEncounterEvent>,
) {
    let dt = time.delta_secs();
    let player_pos = player_query
        .single()
        .ok()
        .map(|transform| transform.translation.truncate());

    for (boss, transform, mut encounter) in &mut boss_query {
        let distance = player_pos.map(|pos| pos.distance(transform.translation.truncate()));
        match encounter.advance(distance, dt) {
            Some(EncounterStep::Intro) => {
                info!("{} stirs", encounter.name);
                encounter_events.write(BossEncounterEvent::Intro {
                    boss,
                    name: encounter.name.clone(),
                });
            }
            Some(EncounterStep::Start) => {
                encounter_events.write(BossEncounterEvent::Start { boss });
            }
            None => {}
        }
    }
}

/// Defeat on death, back to dormant on revive.
pub(crate) fn settle_boss_encounters(
    mut death_events: MessageReader<DeathEvent>,
    mut revive_events: MessageReader<ReviveEvent>,
    mut boss_query: Query<&mut BossEncounter>,
) {
    for event in death_events.read() {
        if let Ok(mut encounter) = boss_query.get_mut(event.entity) {
            encounter.defeat();
            info!("{} defeated", encounter.name);
        }
    }
    for event in revive_events.read() {
        if let Ok(mut encounter) = boss_query.get_mut(event.entity) {
            encounter.reset();
        }
    }
}
