//! Tuning for the gameplay reactions.

/// Loot and warning thresholds used by the gameplay handlers.
#[derive(Clone, Debug, PartialEq)]
pub struct GameplayConfig {
    /// Player HP at or below which a low-health warning is logged.
    pub low_health_threshold: i32,
    /// Probability in `0.0..=1.0` that a slain enemy drops gold.
    pub gold_drop_chance: f32,
    pub gold_drop_min: u32,
    pub gold_drop_max: u32,
    /// Probability in `0.0..=1.0` that a slain enemy drops a potion.
    pub potion_drop_chance: f32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            low_health_threshold: 25,
            gold_drop_chance: 0.6,
            gold_drop_min: 5,
            gold_drop_max: 20,
            potion_drop_chance: 0.25,
        }
    }
}

impl GameplayConfig {
    /// Clamps chances into `0.0..=1.0` and orders the gold range.
    pub fn normalized(mut self) -> Self {
        self.gold_drop_chance = self.gold_drop_chance.clamp(0.0, 1.0);
        self.potion_drop_chance = self.potion_drop_chance.clamp(0.0, 1.0);
        if self.gold_drop_min > self.gold_drop_max {
            std::mem::swap(&mut self.gold_drop_min, &mut self.gold_drop_max);
        }
        self
    }
}
