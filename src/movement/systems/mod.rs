//! Movement domain: systems for input and locomotion.

mod input;
mod movement;

pub(crate) use input::read_input;
#[cfg(test)]
pub(crate) use movement::approach;
pub(crate) use movement::{apply_movement, update_facing};
