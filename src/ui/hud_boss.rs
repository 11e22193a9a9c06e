//! UI domain: boss name card and health bar, faded in and out with the encounter.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::combat::{BossEncounter, BossEncounterEvent, DeathEvent, Health, ReviveEvent};
use crate::content::GameplayDefaults;
use crate::ui::hud_player::approach_fill;

const BOSS_HEALTHBAR_WIDTH: f32 = 400.0;
const BOSS_HEALTHBAR_HEIGHT: f32 = 24.0;
const BOSS_HEALTHBAR_BOTTOM: f32 = 40.0;

const INTRO_FADE_IN: f32 = 1.0;
const INTRO_FADE_OUT: f32 = 0.5;
const BAR_FADE: f32 = 1.0;

/// Alpha moving towards a target at a fixed speed, optionally after a delay.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Fade {
    pub alpha: f32,
    target: f32,
    speed: f32,
    delay: f32,
}

impl Fade {
    /// Head for `target` over `duration` seconds once `delay` has passed.
    pub fn towards(&mut self, target: f32, duration: f32, delay: f32) {
        self.target = target;
        self.speed = 1.0 / duration.max(f32::EPSILON);
        self.delay = delay.max(0.0);
    }

    pub fn hide(&mut self) {
        *self = Fade::default();
    }

    pub fn tick(&mut self, dt: f32) {
        let mut dt = dt;
        if self.delay > 0.0 {
            let spill = dt - self.delay;
            self.delay = (self.delay - dt).max(0.0);
            if spill <= 0.0 {
                return;
            }
            dt = spill;
        }

        let step = self.speed * dt;
        self.alpha = if self.alpha < self.target {
            (self.alpha + step).min(self.target)
        } else {
            (self.alpha - step).max(self.target)
        };
    }
}

/// Which half of the boss HUD an element belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossHudLayer {
    Intro,
    Bar,
}

/// Fade state of the boss HUD for the encounter currently shown.
#[derive(Resource, Debug, Default, PartialEq)]
pub struct BossHud {
    pub boss: Option<Entity>,
    pub intro: Fade,
    pub bar: Fade,
}

impl BossHud {
    /// Name card fades in, then the bar follows.
    pub fn on_intro(&mut self, boss: Entity) {
        self.boss = Some(boss);
        self.intro.towards(1.0, INTRO_FADE_IN, 0.0);
        self.bar.towards(1.0, BAR_FADE, INTRO_FADE_IN);
    }

    pub fn on_start(&mut self) {
        self.intro.towards(0.0, INTRO_FADE_OUT, 0.0);
    }

    pub fn on_defeat(&mut self) {
        self.intro.towards(0.0, INTRO_FADE_OUT, 0.0);
        self.bar.towards(0.0, BAR_FADE, 0.0);
    }

    /// Boss is back up and dormant: nothing to show until the next intro.
    pub fn on_reset(&mut self) {
        self.boss = None;
        self.intro.hide();
        self.bar.hide();
    }

    pub fn tick(&mut self, dt: f32) {
        self.intro.tick(dt);
        self.bar.tick(dt);
    }

    pub fn alpha(&self, layer: BossHudLayer) -> f32 {
        match layer {
            BossHudLayer::Intro => self.intro.alpha,
            BossHudLayer::Bar => self.bar.alpha,
        }
    }
}

/// Root node of one half of the boss HUD
#[derive(Component)]
pub struct BossHudRoot(pub BossHudLayer);

/// Element whose colour alpha follows its layer's fade
#[derive(Component)]
pub struct BossHudFade {
    pub layer: BossHudLayer,
    pub base: Color,
}

/// Text showing the boss name, on the card and over the bar
#[derive(Component)]
pub struct BossNameText;

#[derive(Component, Debug)]
pub struct BossBarFill {
    pub shown: f32,
}

fn boss_bar_color(percent: f32) -> Color {
    if percent > 0.5 {
        Color::srgb(0.8, 0.1, 0.1)
    } else if percent > 0.25 {
        Color::srgb(0.9, 0.4, 0.1)
    } else {
        Color::srgb(0.6, 0.0, 0.0)
    }
}

fn name_text(layer: BossHudLayer, font_size: f32) -> impl Bundle {
    let base = Color::srgb(0.95, 0.9, 0.85);
    (
        BossNameText,
        BossHudFade { layer, base },
        Text::new(""),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(base.with_alpha(0.0)),
    )
}

pub(crate) fn spawn_boss_hud(mut commands: Commands) {
    // Name card at the top centre
    let card_base = Color::srgba(0.05, 0.03, 0.03, 0.85);
    commands
        .spawn((
            BossHudRoot(BossHudLayer::Intro),
            BossHudFade {
                layer: BossHudLayer::Intro,
                base: card_base,
            },
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(80.0),
                width: Val::Percent(100.0),
                padding: UiRect::axes(Val::Px(0.0), Val::Px(16.0)),
                justify_content: JustifyContent::Center,
                ..default()
            },
            BackgroundColor(card_base.with_alpha(0.0)),
            Visibility::Hidden,
            ZIndex(40),
        ))
        .with_child(name_text(BossHudLayer::Intro, 40.0));

    // Health bar at the bottom centre, name above it
    let frame_base = Color::srgba(0.05, 0.05, 0.05, 0.9);
    commands
        .spawn((
            BossHudRoot(BossHudLayer::Bar),
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(BOSS_HEALTHBAR_BOTTOM),
                left: Val::Percent(50.0),
                margin: UiRect::left(Val::Px(-BOSS_HEALTHBAR_WIDTH / 2.0)),
                width: Val::Px(BOSS_HEALTHBAR_WIDTH),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(6.0),
                ..default()
            },
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn(name_text(BossHudLayer::Bar, 18.0));
            parent
                .spawn((
                    BossHudFade {
                        layer: BossHudLayer::Bar,
                        base: frame_base,
                    },
                    Node {
                        width: Val::Px(BOSS_HEALTHBAR_WIDTH),
                        height: Val::Px(BOSS_HEALTHBAR_HEIGHT),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(frame_base.with_alpha(0.0)),
                ))
                .with_child((
                    BossBarFill { shown: 1.0 },
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(boss_bar_color(1.0).with_alpha(0.0)),
                ));
        });
}

pub(crate) fn track_boss_encounter(
    mut encounter_events: MessageReader<BossEncounterEvent>,
    mut death_events: MessageReader<DeathEvent>,
    mut revive_events: MessageReader<ReviveEvent>,
    mut hud: ResMut<BossHud>,
    mut name_query: Query<&mut Text, With<BossNameText>>,
    mut fill_query: Query<&mut BossBarFill>,
) {
    for event in encounter_events.read() {
        match event {
            BossEncounterEvent::Intro { boss, name } => {
                hud.on_intro(*boss);
                for mut text in &mut name_query {
                    text.0 = name.clone();
                }
                for mut fill in &mut fill_query {
                    fill.shown = 1.0;
                }
            }
            BossEncounterEvent::Start { boss } => {
                if hud.boss == Some(*boss) {
                    hud.on_start();
                }
            }
        }
    }

    for event in death_events.read() {
        if hud.boss == Some(event.entity) {
            hud.on_defeat();
        }
    }
    for event in revive_events.read() {
        if hud.boss == Some(event.entity) {
            hud.on_reset();
        }
    }
}

pub(crate) fn fade_boss_hud(
    time: Res<Time>,
    mut hud: ResMut<BossHud>,
    mut root_query: Query<(&BossHudRoot, &mut Visibility)>,
    mut background_query: Query<(&BossHudFade, &mut BackgroundColor)>,
    mut text_query: Query<(&BossHudFade, &mut TextColor)>,
) {
    hud.tick(time.delta_secs());

    for (root, mut visibility) in &mut root_query {
        *visibility = if hud.alpha(root.0) > 0.0 {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    for (fade, mut bg_color) in &mut background_query {
        let alpha = fade.base.alpha() * hud.alpha(fade.layer);
        bg_color.0 = fade.base.with_alpha(alpha);
    }
    for (fade, mut text_color) in &mut text_query {
        text_color.0 = fade.base.with_alpha(hud.alpha(fade.layer));
    }
}

pub(crate) fn update_boss_bar(
    time: Res<Time>,
    defaults: Res<GameplayDefaults>,
    hud: Res<BossHud>,
    boss_query: Query<&Health, With<BossEncounter>>,
    mut fill_query: Query<(&mut BossBarFill, &mut Node, &mut BackgroundColor)>,
) {
    let Some(health) = hud.boss.and_then(|boss| boss_query.get(boss).ok()) else {
        return;
    };
    let dt = time.delta_secs();
    let rate = defaults.combat.bar_lerp_rate;

    for (mut fill, mut node, mut bg_color) in &mut fill_query {
        fill.shown = approach_fill(fill.shown, health.percent(), rate, dt);
        node.width = Val::Percent(fill.shown * 100.0);
        bg_color.0 = boss_bar_color(fill.shown).with_alpha(hud.bar.alpha);
    }
}
