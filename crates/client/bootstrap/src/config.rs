//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use event_bus::BusConfig;
use runtime::GameplayConfig;

/// Everything a front-end needs to assemble the event system.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub bus: BusConfig,
    pub gameplay: GameplayConfig,
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
    /// Frames the headless demo session plays before shutting down.
    pub demo_frames: u32,
    /// Seed for loot rolls. Unset means entropy.
    pub rng_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bus: BusConfig::default(),
            gameplay: GameplayConfig::default(),
            session_id: None,
            log_dir: None,
            demo_frames: 12,
            rng_seed: None,
        }
    }
}

impl AppConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `EVENT_BUS_TRACE` - Trace every publish (default: false)
    /// - `EVENT_BUS_LOG_UNHANDLED` - Log publishes nobody handled (default: false)
    /// - `LOW_HEALTH_THRESHOLD` - HP that triggers the low-health warning (default: 25)
    /// - `GOLD_DROP_CHANCE`, `POTION_DROP_CHANCE` - Loot chances in `0.0..=1.0`
    /// - `GOLD_DROP_MIN`, `GOLD_DROP_MAX` - Gold amount range (default: 5..=20)
    /// - `GAME_SESSION_ID` - Session identifier for log files (default: timestamp)
    /// - `LOG_DIR` - Log directory (default: platform cache dir)
    /// - `DEMO_FRAMES` - Frames the headless session plays (default: 12)
    /// - `RNG_SEED` - Fixed seed for loot rolls (default: entropy)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(enabled) = read_bool(&lookup, "EVENT_BUS_TRACE") {
            config.bus.trace_publishes = enabled;
        }
        if let Some(enabled) = read_bool(&lookup, "EVENT_BUS_LOG_UNHANDLED") {
            config.bus.log_unhandled = enabled;
        }

        let gameplay = &mut config.gameplay;
        if let Some(threshold) = read(&lookup, "LOW_HEALTH_THRESHOLD") {
            gameplay.low_health_threshold = threshold;
        }
        if let Some(chance) = read(&lookup, "GOLD_DROP_CHANCE") {
            gameplay.gold_drop_chance = chance;
        }
        if let Some(min) = read(&lookup, "GOLD_DROP_MIN") {
            gameplay.gold_drop_min = min;
        }
        if let Some(max) = read(&lookup, "GOLD_DROP_MAX") {
            gameplay.gold_drop_max = max;
        }
        if let Some(chance) = read(&lookup, "POTION_DROP_CHANCE") {
            gameplay.potion_drop_chance = chance;
        }
        config.gameplay = config.gameplay.normalized();

        config.session_id = lookup("GAME_SESSION_ID").filter(|id| !id.trim().is_empty());
        config.log_dir = lookup("LOG_DIR").map(PathBuf::from);

        if let Some(frames) = read::<u32>(&lookup, "DEMO_FRAMES") {
            config.demo_frames = frames.max(1);
        }
        config.rng_seed = read(&lookup, "RNG_SEED");

        config
    }
}

fn read<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

/// Accepts `1/0`, `true/false`, `yes/no` and `on/off`. A variable that is set
/// but empty counts as `true`.
fn read_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    let value = lookup(key)?;
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
