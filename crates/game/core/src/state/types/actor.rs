use super::{AilmentState, CubeCoord, EntityId, Faction, Position, StatKind, StatusEffects, StatusKind};

/// Skill id granting conversion of fire damage into healing.
pub const FIRE_ABSORPTION_SKILL: &str = "ABSORB_FIRE";

/// Core stats used by ailment rolls and tick formulas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorStats {
    pub body: i32,
    pub mind: i32,
    pub instinct: i32,
}

impl ActorStats {
    pub const fn new(body: i32, mind: i32, instinct: i32) -> Self {
        Self {
            body,
            mind,
            instinct,
        }
    }

    pub const fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Body => self.body,
            StatKind::Mind => self.mind,
            StatKind::Instinct => self.instinct,
        }
    }
}

/// Outcome of applying damage to an actor's armor and hit points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DamageOutcome {
    /// Portion soaked by temporary armor.
    pub absorbed: u32,
    /// Hit points actually lost.
    pub hp_lost: u32,
}

/// A unit on the board: the player, an enemy or a companion.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: EntityId,
    /// Template or display name.
    pub name: String,
    pub faction: Faction,
    position: Position,
    /// Redundant cube mirror of `position`, re-derived on every move.
    cube: CubeCoord,
    pub hp: u32,
    pub max_hp: u32,
    /// Absorbs damage before hit points.
    pub temporary_armor: u32,
    pub stats: ActorStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub statuses: StatusEffects,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ailments: AilmentState,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub upgrades: Vec<String>,
}

impl Actor {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        faction: Faction,
        position: Position,
        max_hp: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            faction,
            position,
            cube: position.cube(),
            hp: max_hp,
            max_hp,
            temporary_armor: 0,
            stats: ActorStats::default(),
            statuses: StatusEffects::empty(),
            ailments: AilmentState::default(),
            skills: Vec::new(),
            upgrades: Vec::new(),
        }
    }

    pub fn with_stats(mut self, stats: ActorStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp.min(self.max_hp);
        self
    }

    pub fn with_armor(mut self, armor: u32) -> Self {
        self.temporary_armor = armor;
        self
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.push(skill.into());
        self
    }

    pub fn with_status(mut self, kind: StatusKind, duration: u32) -> Self {
        self.statuses.add(kind, duration);
        self
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn cube(&self) -> CubeCoord {
        self.cube
    }

    /// Moves the actor, keeping the cube mirror in sync.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
        self.cube = position.cube();
        debug_assert!(self.cube_is_consistent());
    }

    /// True when the cube mirror matches the axial position.
    pub fn cube_is_consistent(&self) -> bool {
        self.cube.is_valid() && self.cube.to_axial() == self.position
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    pub fn absorbs_fire(&self) -> bool {
        self.has_skill(FIRE_ABSORPTION_SKILL)
    }

    pub fn is_airborne(&self) -> bool {
        self.statuses.has(StatusKind::Flying)
    }

    /// Applies damage, armor first. Neither armor nor hp goes below zero.
    pub fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        let absorbed = amount.min(self.temporary_armor);
        self.temporary_armor -= absorbed;

        let hp_lost = (amount - absorbed).min(self.hp);
        self.hp -= hp_lost;

        DamageOutcome { absorbed, hp_lost }
    }

    /// Restores hit points up to `max_hp`. Returns the amount restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_hp.saturating_sub(self.hp));
        self.hp += restored;
        restored
    }
}
