/// Base combat values of an actor.
///
/// These are the numbers before any body or equipment bonus. Effective values
/// live in [`EffectiveStats`](crate::stats::EffectiveStats) and on
/// [`Actor`](crate::state::Actor).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fighter {
    hp: i32,
    max_hp: i32,
    mental_strength: i32,
    pub base_defense: i32,
    pub base_power: i32,
    pub base_spiritual_defense: i32,
    pub base_spiritual_power: i32,
}

impl Fighter {
    /// Fighter at full base health.
    pub fn new(
        hp: i32,
        mental_strength: i32,
        spiritual_defense: i32,
        spiritual_power: i32,
        defense: i32,
        power: i32,
    ) -> Self {
        let hp = hp.max(0);
        Self {
            hp,
            max_hp: hp,
            mental_strength,
            base_defense: defense,
            base_power: power,
            base_spiritual_defense: spiritual_defense,
            base_spiritual_power: spiritual_power,
        }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn base_mental_strength(&self) -> i32 {
        self.mental_strength
    }

    /// Sets base hit points, clamped into `0..=max_hp`.
    pub(crate) fn set_hp(&mut self, value: i32) {
        self.hp = value.clamp(0, self.max_hp);
    }

    pub(crate) fn set_mental_strength(&mut self, value: i32) {
        self.mental_strength = value;
    }

    /// Raises base capacity and current base hit points by the same amount.
    pub fn raise_max_hp(&mut self, amount: i32) {
        self.max_hp += amount;
        self.hp += amount;
    }
}
