/// Ruleset constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Whether the ailment subsystem is active for this ruleset.
    /// When disabled every ailment effect resolves as a no-op.
    pub ailments_enabled: bool,

    /// Damage dealt by HAZARDOUS tiles (lava, pits). Lethal for anything at or
    /// below this many hit points.
    pub hazard_damage: u32,

    /// Maximum depth of emitted-effect cascades before the dispatcher drops
    /// further emissions.
    pub max_cascade_depth: u32,

    /// Upper bound on hexes a single slide or cluster push may travel.
    pub max_slide_steps: u32,

    /// Stun duration applied to every member of a cluster that slams into a
    /// wall without moving.
    pub wall_slam_stun: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_STATUS_EFFECTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HAZARD_DAMAGE: u32 = 99;
    pub const DEFAULT_MAX_CASCADE_DEPTH: u32 = 64;
    pub const DEFAULT_MAX_SLIDE_STEPS: u32 = 32;
    pub const DEFAULT_WALL_SLAM_STUN: u32 = 1;

    pub fn new() -> Self {
        Self {
            ailments_enabled: true,
            hazard_damage: Self::DEFAULT_HAZARD_DAMAGE,
            max_cascade_depth: Self::DEFAULT_MAX_CASCADE_DEPTH,
            max_slide_steps: Self::DEFAULT_MAX_SLIDE_STEPS,
            wall_slam_stun: Self::DEFAULT_WALL_SLAM_STUN,
        }
    }

    /// Ruleset with the ailment subsystem switched off.
    pub fn without_ailments() -> Self {
        Self {
            ailments_enabled: false,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
