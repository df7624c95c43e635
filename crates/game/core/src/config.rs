use crate::procgen::GeneratorKind;

/// Game configuration constants and tunable parameters.
///
/// Everything here is fixed for the lifetime of a session. Generators, the
/// action resolver and the runtime read it; nothing mutates it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub map: MapSettings,
    pub rooms: RoomSettings,
    pub bsp: BspSettings,
    pub cave: CaveSettings,
    /// Generator used for each floor, cycled by floor number.
    pub generator_rotation: Vec<GeneratorKind>,
    /// Turns a neutral actor spends fleeing after being hurt.
    pub flee_turns: u32,
    /// Upper bound on the quality a single ritual can consume.
    pub ritual_max_quality: i32,
    /// Radius used by the runtime when it refreshes the visibility overlay.
    pub fov_radius: i32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of parts a body can ever hold.
    pub const MAX_BODY_PARTS: usize = 12;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FLEE_TURNS: u32 = 10;
    pub const DEFAULT_RITUAL_MAX_QUALITY: i32 = 50;
    pub const DEFAULT_FOV_RADIUS: i32 = 8;
    pub const LEVEL_UP_FACTOR: i32 = 150;

    pub fn new() -> Self {
        Self {
            map: MapSettings::default(),
            rooms: RoomSettings::default(),
            bsp: BspSettings::default(),
            cave: CaveSettings::default(),
            generator_rotation: vec![GeneratorKind::Rooms, GeneratorKind::Bsp, GeneratorKind::Cave],
            flee_turns: Self::DEFAULT_FLEE_TURNS,
            ritual_max_quality: Self::DEFAULT_RITUAL_MAX_QUALITY,
            fov_radius: Self::DEFAULT_FOV_RADIUS,
        }
    }

    /// Generator for the given 1-based floor number.
    ///
    /// Falls back to [`GeneratorKind::Rooms`] when the rotation is empty.
    pub fn generator_for_floor(&self, floor: u32) -> GeneratorKind {
        if self.generator_rotation.is_empty() {
            return GeneratorKind::Rooms;
        }
        let index = floor.saturating_sub(1) as usize % self.generator_rotation.len();
        self.generator_rotation[index]
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapSettings {
    pub width: i32,
    pub height: i32,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            width: 80,
            height: 43,
        }
    }
}

/// Parameters of the room-and-corridor generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoomSettings {
    /// Placement attempts; rejected attempts are not retried.
    pub max_rooms: u32,
    pub room_min_size: i32,
    pub room_max_size: i32,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            max_rooms: 30,
            room_min_size: 6,
            room_max_size: 10,
        }
    }
}

/// Parameters of the binary-space-partition generator.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BspSettings {
    pub depth: u32,
    pub room_min_size: i32,
    pub max_ratio: f32,
    /// Maximum offset applied to corridor endpoints.
    pub corridor_jitter: i32,
}

impl Default for BspSettings {
    fn default() -> Self {
        Self {
            depth: 6,
            room_min_size: 8,
            max_ratio: 1.5,
            corridor_jitter: 2,
        }
    }
}

/// Parameters of the cellular-automaton cave generator.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CaveSettings {
    /// Probability that an interior cell starts as floor.
    pub floor_chance: f64,
    pub smoothing_passes: u32,
    /// A cell becomes wall when at least this many neighbours are wall.
    pub wall_threshold: u32,
    /// Spawn chance per floor tile, in thousandths.
    pub spawn_per_mille: u32,
    /// Distance from the far corner where the exit scan starts.
    pub exit_inset: i32,
    /// Length of the carved diagonal path leading to the exit.
    pub exit_path_length: i32,
}

impl Default for CaveSettings {
    fn default() -> Self {
        Self {
            floor_chance: 0.45,
            smoothing_passes: 6,
            wall_threshold: 5,
            spawn_per_mille: 40,
            exit_inset: 5,
            exit_path_length: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_rotation_cycles_by_floor() {
        let config = GameConfig::default();
        assert_eq!(config.generator_for_floor(1), GeneratorKind::Rooms);
        assert_eq!(config.generator_for_floor(2), GeneratorKind::Bsp);
        assert_eq!(config.generator_for_floor(3), GeneratorKind::Cave);
        assert_eq!(config.generator_for_floor(4), GeneratorKind::Rooms);
    }

    #[test]
    fn empty_rotation_falls_back_to_rooms() {
        let config = GameConfig {
            generator_rotation: Vec::new(),
            ..GameConfig::default()
        };
        assert_eq!(config.generator_for_floor(7), GeneratorKind::Rooms);
    }
}
