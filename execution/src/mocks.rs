//! Test helpers shared with dependant crates (enable the `mocks` feature).

use std::collections::VecDeque;

use crate::economy::DiceRoller;

pub use crate::state::Memory;

/// Dice that replay a fixed sequence of faces.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    faces: VecDeque<u8>,
}

impl ScriptedDice {
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
        }
    }

    pub fn push(&mut self, player_roll: u8, house_roll: u8) {
        self.faces.push_back(player_roll);
        self.faces.push_back(house_roll);
    }

    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl DiceRoller for ScriptedDice {
    fn roll(&mut self) -> u8 {
        self.faces.pop_front().expect("scripted dice exhausted")
    }
}
