//! Discrete scenario edits queued from outside the tick loop.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "command", content = "count")]
pub enum SimCommand {
    /// One prey at a random position.
    AddPrey,
    /// One predator at a random position.
    AddPredator,
    /// `n` food pellets at random positions; ignores the food cap.
    AddFood(usize),
    /// One obstacle placed fully inside the plane.
    AddObstacle,
    /// Removes the most recently added obstacle, if any.
    RemoveObstacle,
}

impl SimCommand {
    /// Keyboard binding used by interactive front ends.
    ///
    /// `p` prey, `o` predator, `f` a batch of food, `b` obstacle, `n` remove
    /// the last obstacle. Case-insensitive.
    #[must_use]
    pub fn from_key(key: char, food_batch: usize) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'p' => Some(Self::AddPrey),
            'o' => Some(Self::AddPredator),
            'f' => Some(Self::AddFood(food_batch)),
            'b' => Some(Self::AddObstacle),
            'n' => Some(Self::RemoveObstacle),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(SimCommand::from_key('p', 10), Some(SimCommand::AddPrey));
        assert_eq!(SimCommand::from_key('O', 10), Some(SimCommand::AddPredator));
        assert_eq!(SimCommand::from_key('f', 10), Some(SimCommand::AddFood(10)));
        assert_eq!(SimCommand::from_key('b', 10), Some(SimCommand::AddObstacle));
        assert_eq!(SimCommand::from_key('n', 10), Some(SimCommand::RemoveObstacle));
        assert_eq!(SimCommand::from_key('x', 10), None);
    }

    #[test]
    fn test_command_serializes_tagged() {
        let json = serde_json::to_string(&SimCommand::AddFood(3)).expect("serialize");
        assert_eq!(json, r#"{"command":"AddFood","count":3}"#);
        let back: SimCommand = serde_json::from_str(&json).expect("parse");
        assert_eq!(back, SimCommand::AddFood(3));
    }
}
