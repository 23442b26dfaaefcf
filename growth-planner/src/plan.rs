//! Growth plans: a student's current progression snapshot and the target to reach.
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// Unique weapon progression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponState {
    pub rank: u32,
    pub level: u32,
}

/// The four independently leveled skill tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillLevels {
    pub ex: u32,
    pub normal: u32,
    pub passive: u32,
    pub sub: u32,
}

impl Default for SkillLevels {
    fn default() -> Self {
        Self {
            ex: 1,
            normal: 1,
            passive: 1,
            sub: 1,
        }
    }
}

/// Potential stat levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PotentialLevels {
    pub hp: u32,
    pub atk: u32,
    pub heal: u32,
}

/// Progression snapshot of a single student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrowthState {
    pub level: u32,
    pub star: u32,
    pub weapon: WeaponState,
    pub skills: SkillLevels,
    /// Tier of each of the three equipment slots.
    pub equipment: [u32; 3],
    pub affection: u32,
    pub potential: PotentialLevels,
    /// Promotion currency already owned. Only read from the current snapshot.
    pub eleph: u64,
}

impl Default for GrowthState {
    fn default() -> Self {
        Self {
            level: 1,
            star: 1,
            weapon: WeaponState::default(),
            skills: SkillLevels::default(),
            equipment: [0; 3],
            affection: 1,
            potential: PotentialLevels::default(),
            eleph: 0,
        }
    }
}

/// Premium currency shop state used to fund star promotions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligmaInfo {
    /// Current unit price of eleph, in eligma.
    pub price: u32,
    /// Eleph still purchasable at the current price.
    pub stock: Option<u32>,
}

impl Default for EligmaInfo {
    fn default() -> Self {
        Self {
            price: 1,
            stock: None,
        }
    }
}

/// One planning unit for a single student.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPlan {
    #[serde(default)]
    pub student_id: Option<u32>,
    #[serde(default)]
    pub current: GrowthState,
    #[serde(default)]
    pub target: GrowthState,
    #[serde(default)]
    pub use_eligma_for_star: bool,
    #[serde(default)]
    pub eligma_info: EligmaInfo,
}

/// Progression axes a plan can move along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthAxis {
    Level,
    Star,
    WeaponRank,
    WeaponLevel,
    SkillEx,
    SkillNormal,
    SkillPassive,
    SkillSub,
    Equipment1,
    Equipment2,
    Equipment3,
    Affection,
    PotentialHp,
    PotentialAtk,
    PotentialHeal,
}

impl GrowthAxis {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Level => "level",
            Self::Star => "star",
            Self::WeaponRank => "weapon_rank",
            Self::WeaponLevel => "weapon_level",
            Self::SkillEx => "skill_ex",
            Self::SkillNormal => "skill_normal",
            Self::SkillPassive => "skill_passive",
            Self::SkillSub => "skill_sub",
            Self::Equipment1 => "equipment_1",
            Self::Equipment2 => "equipment_2",
            Self::Equipment3 => "equipment_3",
            Self::Affection => "affection",
            Self::PotentialHp => "potential_hp",
            Self::PotentialAtk => "potential_atk",
            Self::PotentialHeal => "potential_heal",
        }
    }

    fn read(self, state: &GrowthState) -> u32 {
        match self {
            Self::Level => state.level,
            Self::Star => state.star,
            Self::WeaponRank => state.weapon.rank,
            Self::WeaponLevel => state.weapon.level,
            Self::SkillEx => state.skills.ex,
            Self::SkillNormal => state.skills.normal,
            Self::SkillPassive => state.skills.passive,
            Self::SkillSub => state.skills.sub,
            Self::Equipment1 => state.equipment[0],
            Self::Equipment2 => state.equipment[1],
            Self::Equipment3 => state.equipment[2],
            Self::Affection => state.affection,
            Self::PotentialHp => state.potential.hp,
            Self::PotentialAtk => state.potential.atk,
            Self::PotentialHeal => state.potential.heal,
        }
    }
}

const AXES: [GrowthAxis; 15] = [
    GrowthAxis::Level,
    GrowthAxis::Star,
    GrowthAxis::WeaponRank,
    GrowthAxis::WeaponLevel,
    GrowthAxis::SkillEx,
    GrowthAxis::SkillNormal,
    GrowthAxis::SkillPassive,
    GrowthAxis::SkillSub,
    GrowthAxis::Equipment1,
    GrowthAxis::Equipment2,
    GrowthAxis::Equipment3,
    GrowthAxis::Affection,
    GrowthAxis::PotentialHp,
    GrowthAxis::PotentialAtk,
    GrowthAxis::PotentialHeal,
];

impl GrowthPlan {
    /// Axes whose target sits below the current value. Those axes cost nothing.
    #[must_use]
    pub fn inverted_axes(&self) -> Vec<GrowthAxis> {
        AXES.into_iter()
            .filter(|axis| axis.read(&self.target) < axis.read(&self.current))
            .collect()
    }
}

/// Parse a saved plan list, failing before any aggregation when the document
/// is not a list of plan records.
///
/// # Errors
///
/// Returns [`PlannerError::MalformedPlans`] if the JSON is not an array of plans.
pub fn parse_plans(json: &str) -> Result<Vec<GrowthPlan>, PlannerError> {
    serde_json::from_str(json).map_err(PlannerError::MalformedPlans)
}
