//! Single attachable body component.

/// Anatomical slot of a part. Exactly one per part.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PartKind {
    Brain,
    Arm,
    Leg,
    Eye,
    Ear,
    Tongue,
    Heart,
    Torso,
}

impl PartKind {
    /// Map glyph used when the part lies detached on the ground.
    pub const fn glyph(self) -> char {
        match self {
            PartKind::Brain => 'm',
            PartKind::Arm => '\\',
            PartKind::Leg => 'L',
            PartKind::Eye => 'o',
            PartKind::Ear => 'G',
            PartKind::Tongue => 'U',
            PartKind::Heart => 'q',
            PartKind::Torso => 'H',
        }
    }

    /// Total offering quality a ritual needs before this part may be sacrificed.
    pub const fn ritual_requirement(self) -> i32 {
        match self {
            PartKind::Arm | PartKind::Leg => 20,
            PartKind::Brain => 40,
            PartKind::Ear | PartKind::Eye | PartKind::Tongue => 15,
            PartKind::Heart => 50,
            PartKind::Torso => 30,
        }
    }
}

/// Material of a part. Only flesh can be sacrificed.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PartForm {
    #[default]
    Flesh,
    Spirit,
}

/// Fixed stat contributions of a part, excluding health.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PartBonuses {
    pub mental_strength: i32,
    pub spiritual_defense: i32,
    pub spiritual_power: i32,
    pub power: i32,
    pub defense: i32,
}

/// A limb or organ.
///
/// `current_health` always stays within `0..=health_bonus`; it is carried with
/// the part through detach and re-attach.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Part {
    pub name: String,
    pub description: String,
    pub kind: PartKind,
    pub form: PartForm,
    health_bonus: i32,
    current_health: i32,
    pub bonuses: PartBonuses,
}

impl Part {
    /// Builds a part at full health. Negative capacities are treated as zero.
    pub fn new(
        name: impl Into<String>,
        kind: PartKind,
        form: PartForm,
        health_bonus: i32,
        bonuses: PartBonuses,
    ) -> Self {
        let health_bonus = health_bonus.max(0);
        Self {
            name: name.into(),
            description: String::new(),
            kind,
            form,
            health_bonus,
            current_health: health_bonus,
            bonuses,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn health_bonus(&self) -> i32 {
        self.health_bonus
    }

    pub fn current_health(&self) -> i32 {
        self.current_health
    }

    pub fn is_flesh(&self) -> bool {
        self.form == PartForm::Flesh
    }

    /// Sets current health, clamped into `0..=health_bonus`.
    pub fn set_current_health(&mut self, value: i32) {
        self.current_health = value.clamp(0, self.health_bonus);
    }

    /// Moves current health by up to `delta` and returns the amount applied.
    pub fn adjust_health(&mut self, delta: i32) -> i32 {
        let applied = if delta < 0 {
            delta.max(-self.current_health)
        } else {
            delta.min(self.health_bonus - self.current_health)
        };
        self.current_health += applied;
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn leg() -> Part {
        Part::new("Human Leg", PartKind::Leg, PartForm::Flesh, 3, PartBonuses::default())
    }

    #[test]
    fn new_part_starts_full() {
        let part = leg();
        assert_eq!(part.current_health(), 3);
        assert_eq!(part.health_bonus(), 3);
    }

    #[test]
    fn adjust_is_bounded_both_ways() {
        let mut part = leg();
        assert_eq!(part.adjust_health(-5), -3);
        assert_eq!(part.current_health(), 0);
        assert_eq!(part.adjust_health(10), 3);
        assert_eq!(part.current_health(), 3);
    }

    #[test]
    fn set_current_health_clamps() {
        let mut part = leg();
        part.set_current_health(99);
        assert_eq!(part.current_health(), 3);
        part.set_current_health(-4);
        assert_eq!(part.current_health(), 0);
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!(PartKind::from_str("Heart").ok(), Some(PartKind::Heart));
        assert_eq!(PartKind::Torso.to_string(), "torso");
        assert_eq!(PartKind::Arm.ritual_requirement(), 20);
    }
}
