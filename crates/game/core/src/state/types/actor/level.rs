use crate::config::GameConfig;
use crate::log::{MessageLog, MessageTag};

/// Experience and level progression.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Level {
    pub current_level: i32,
    pub current_xp: i32,
    /// Zero means the actor never gains experience.
    pub level_up_base: i32,
    pub level_up_factor: i32,
    /// Experience awarded to whoever kills this actor.
    pub xp_given: i32,
}

impl Level {
    pub fn new(level_up_base: i32, xp_given: i32) -> Self {
        Self {
            current_level: 1,
            current_xp: 0,
            level_up_base,
            level_up_factor: GameConfig::LEVEL_UP_FACTOR,
            xp_given,
        }
    }

    pub fn experience_to_next_level(&self) -> i32 {
        self.level_up_base + self.current_level * self.level_up_factor
    }

    pub fn requires_level_up(&self) -> bool {
        self.current_xp > self.experience_to_next_level()
    }

    /// Adds experience. Returns true when a level-up is now pending.
    pub fn add_xp(&mut self, xp: i32, log: &mut dyn MessageLog) -> bool {
        if xp == 0 || self.level_up_base == 0 {
            return false;
        }
        self.current_xp += xp;
        log.add_message(
            format!("You gain {} experience points.", xp),
            MessageTag::Neutral,
        );
        if self.requires_level_up() {
            log.add_message(
                format!("You advance to level {}!", self.current_level + 1),
                MessageTag::LevelUp,
            );
            return true;
        }
        false
    }

    pub(crate) fn increase_level(&mut self) {
        self.current_xp -= self.experience_to_next_level();
        self.current_level += 1;
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::MessageBuffer;

    #[test]
    fn threshold_grows_with_level() {
        let mut level = Level::new(200, 0);
        assert_eq!(level.experience_to_next_level(), 350);
        level.current_xp = 351;
        assert!(level.requires_level_up());
        level.increase_level();
        assert_eq!(level.current_level, 2);
        assert_eq!(level.current_xp, 1);
        assert_eq!(level.experience_to_next_level(), 500);
    }

    #[test]
    fn actors_without_base_ignore_xp() {
        let mut level = Level::new(0, 35);
        let mut log = MessageBuffer::default();
        assert!(!level.add_xp(100, &mut log));
        assert_eq!(level.current_xp, 0);
        assert!(log.is_empty());
    }

    #[test]
    fn add_xp_announces_pending_level() {
        let mut level = Level::new(200, 0);
        let mut log = MessageBuffer::default();
        assert!(!level.add_xp(100, &mut log));
        assert!(level.add_xp(300, &mut log));
        assert!(log.contains("You gain 300 experience points."));
        assert!(log.contains("You advance to level 2!"));
    }
}
