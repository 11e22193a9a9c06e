//! UI domain: the dialogue box with speaker, typed text, portrait and continue button.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::dialogue::{DialogueAdvanceRequest, DialogueDisplayEvent, DialoguePortraitEvent};

const PORTRAIT_SIZE: f32 = 96.0;

/// Marker for the dialogue box root
#[derive(Component)]
pub struct DialogueBoxUI;

/// Which text element of the box this is
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueText {
    Speaker,
    Body,
    Continue,
}

#[derive(Component)]
pub struct DialoguePortrait;

#[derive(Component)]
pub struct ContinueButton;

pub fn continue_label(has_more: bool) -> &'static str {
    if has_more { "Continue >>>" } else { "End >>>" }
}

pub(crate) fn spawn_dialogue_box(mut commands: Commands) {
    let text_color = Color::srgb(0.92, 0.9, 0.85);

    commands
        .spawn((
            DialogueBoxUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(10.0),
                right: Val::Percent(10.0),
                bottom: Val::Px(24.0),
                min_height: Val::Px(140.0),
                padding: UiRect::all(Val::Px(16.0)),
                border: UiRect::all(Val::Px(2.0)),
                column_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.05, 0.05, 0.08, 0.92)),
            BorderColor::all(Color::srgb(0.6, 0.55, 0.4)),
            Visibility::Hidden,
            ZIndex(80),
        ))
        .with_children(|parent| {
            parent.spawn((
                DialoguePortrait,
                ImageNode::default(),
                Node {
                    width: Val::Px(PORTRAIT_SIZE),
                    height: Val::Px(PORTRAIT_SIZE),
                    display: Display::None,
                    ..default()
                },
            ));

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    flex_grow: 1.0,
                    ..default()
                })
                .with_children(|column| {
                    column.spawn((
                        DialogueText::Speaker,
                        Text::new(""),
                        TextFont {
                            font_size: 20.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.95, 0.8, 0.4)),
                        Node {
                            margin: UiRect::bottom(Val::Px(8.0)),
                            ..default()
                        },
                    ));

                    column.spawn((
                        DialogueText::Body,
                        Text::new(""),
                        TextFont {
                            font_size: 18.0,
                            ..default()
                        },
                        TextColor(text_color),
                        Node {
                            flex_grow: 1.0,
                            ..default()
                        },
                    ));

                    column
                        .spawn((
                            ContinueButton,
                            Button,
                            Node {
                                align_self: AlignSelf::FlexEnd,
                                padding: UiRect::axes(Val::Px(12.0), Val::Px(4.0)),
                                ..default()
                            },
                            BackgroundColor(Color::srgb(0.2, 0.2, 0.25)),
                        ))
                        .with_child((
                            DialogueText::Continue,
                            Text::new(continue_label(true)),
                            TextFont {
                                font_size: 14.0,
                                ..default()
                            },
                            TextColor(text_color),
                        ));
                });
        });
}

/// Show the latest state the sequencer reported this frame.
pub(crate) fn update_dialogue_box(
    mut display_events: MessageReader<DialogueDisplayEvent>,
    mut box_query: Query<&mut Visibility, With<DialogueBoxUI>>,
    mut text_query: Query<(&DialogueText, &mut Text)>,
) {
    let Some(event) = display_events.read().last() else {
        return;
    };

    for mut visibility in &mut box_query {
        *visibility = if event.is_open {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }

    for (role, mut text) in &mut text_query {
        text.0 = match role {
            DialogueText::Speaker => event.speaker.clone(),
            DialogueText::Body => event.text.clone(),
            DialogueText::Continue => continue_label(event.has_more).to_string(),
        };
    }
}

pub(crate) fn update_dialogue_portrait(
    asset_server: Res<AssetServer>,
    mut portrait_events: MessageReader<DialoguePortraitEvent>,
    mut portrait_query: Query<(&mut ImageNode, &mut Node), With<DialoguePortrait>>,
) {
    let Some(event) = portrait_events.read().last() else {
        return;
    };

    for (mut image, mut node) in &mut portrait_query {
        match &event.portrait {
            Some(path) => {
                image.image = asset_server.load(path.clone());
                node.display = Display::Flex;
            }
            None => node.display = Display::None,
        }
    }
}

pub(crate) fn handle_continue_button(
    button_query: Query<&Interaction, (With<ContinueButton>, Changed<Interaction>)>,
    mut advance_requests: MessageWriter<DialogueAdvanceRequest>,
) {
    if button_query
        .iter()
        .any(|interaction| *interaction == Interaction::Pressed)
    {
        advance_requests.write(DialogueAdvanceRequest);
    }
}
