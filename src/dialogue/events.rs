//! Dialogue domain: requests into the sequencer and updates out of it.

use bevy::ecs::message::Message;

/// Ask for a dialogue script to be played
#[derive(Debug)]
pub struct StartDialogueEvent {
    pub script_id: String,
}

impl Message for StartDialogueEvent {}

/// The player asked to continue (key press or the continue button)
#[derive(Debug)]
pub struct DialogueAdvanceRequest;

impl Message for DialogueAdvanceRequest {}

/// What the dialogue box should show right now
#[derive(Debug, Clone)]
pub struct DialogueDisplayEvent {
    pub speaker: String,
    pub text: String,
    pub is_open: bool,
    /// More lines are queued after the current one
    pub has_more: bool,
}

impl Message for DialogueDisplayEvent {}

/// Portrait for the line that just started, if it has one
#[derive(Debug, Clone)]
pub struct DialoguePortraitEvent {
    pub portrait: Option<String>,
}

impl Message for DialoguePortraitEvent {}

/// Event emitted when a session ends
#[derive(Debug)]
pub struct DialogueClosedEvent;

impl Message for DialogueClosedEvent {}
