//! Static cost tables consumed by the growth aggregator.
//!
//! Tables are plain configuration: the calculator only reads them by key and
//! treats a missing row as a zero cost.
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::{PlannerError, TableError};
use crate::resources::ResourceKey;

/// Stat-specific workbook item ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbookIds {
    pub hp: u32,
    pub atk: u32,
    pub heal: u32,
}

impl Default for WorkbookIds {
    fn default() -> Self {
        Self {
            hp: 2000,
            atk: 2001,
            heal: 2002,
        }
    }
}

/// Well-known resource ids referenced by the cost rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceIds {
    #[serde(default = "ResourceIds::default_credit")]
    pub credit: u32,
    #[serde(default = "ResourceIds::default_eligma")]
    pub eligma: u32,
    #[serde(default = "ResourceIds::default_tech_note")]
    pub tech_note: u32,
    #[serde(default)]
    pub workbook: WorkbookIds,
}

impl ResourceIds {
    const fn default_credit() -> u32 {
        1
    }

    const fn default_eligma() -> u32 {
        23
    }

    const fn default_tech_note() -> u32 {
        9999
    }

    #[must_use]
    pub const fn credit_key(&self) -> ResourceKey {
        ResourceKey::currency(self.credit)
    }

    #[must_use]
    pub const fn eligma_key(&self) -> ResourceKey {
        ResourceKey::item(self.eligma)
    }

    #[must_use]
    pub const fn tech_note_key(&self) -> ResourceKey {
        ResourceKey::item(self.tech_note)
    }
}

impl Default for ResourceIds {
    fn default() -> Self {
        Self {
            credit: Self::default_credit(),
            eligma: Self::default_eligma(),
            tech_note: Self::default_tech_note(),
            workbook: WorkbookIds::default(),
        }
    }
}

/// Experience and credit needed to reach a level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelCost {
    pub exp: u64,
    pub credit: u64,
}

/// Promotion currency and credit needed to reach a rank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankCost {
    pub eleph: u64,
    pub credit: u64,
}

/// A material worth a fixed amount of experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denomination {
    pub key: ResourceKey,
    pub value: u64,
}

/// Credit cost per skill level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillCredits {
    pub ex: BTreeMap<u32, u64>,
    /// Shared by the normal, passive and sub tracks.
    pub normal: BTreeMap<u32, u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EquipmentTier {
    pub max_level: u32,
    pub promotion_credit: u64,
    /// Blueprint units of the slot's line needed to promote into this tier.
    pub blueprints: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentTables {
    pub tiers: BTreeMap<u32, EquipmentTier>,
    pub levels: BTreeMap<u32, LevelCost>,
    pub stones: Vec<Denomination>,
    /// Blueprint base id per equipment line; tier `t` uses `base + t`.
    pub lines: HashMap<String, u32>,
}

impl EquipmentTables {
    #[must_use]
    pub fn blueprint_key(&self, line: &str, tier: u32) -> Option<ResourceKey> {
        self.lines
            .get(line)
            .map(|base| ResourceKey::equipment(base.saturating_add(tier)))
    }
}

/// Cost of every potential level within `[start, end]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PotentialTier {
    pub start: u32,
    pub end: u32,
    pub credit: u64,
    pub workbook: u64,
    pub opart: u64,
    /// Offset added to the student's opart base id.
    pub opart_tier: u32,
}

impl PotentialTier {
    #[must_use]
    pub const fn contains(&self, level: u32) -> bool {
        self.start <= level && level <= self.end
    }
}

/// Eligma shop pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligmaPricing {
    #[serde(default = "EligmaPricing::default_batch_size")]
    pub batch_size: u64,
    #[serde(default = "EligmaPricing::default_max_price")]
    pub max_price: u32,
}

impl EligmaPricing {
    const fn default_batch_size() -> u64 {
        20
    }

    const fn default_max_price() -> u32 {
        5
    }
}

impl Default for EligmaPricing {
    fn default() -> Self {
        Self {
            batch_size: Self::default_batch_size(),
            max_price: Self::default_max_price(),
        }
    }
}

/// Every lookup table the aggregator consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CostTables {
    pub ids: ResourceIds,
    pub levels: BTreeMap<u32, LevelCost>,
    pub reports: Vec<Denomination>,
    pub star_ranks: BTreeMap<u32, RankCost>,
    pub weapon_ranks: BTreeMap<u32, RankCost>,
    pub weapon_levels: BTreeMap<u32, u64>,
    pub weapon_enhancers: Vec<Denomination>,
    pub weapon_credit_per_exp: u64,
    pub skills: SkillCredits,
    pub equipment: EquipmentTables,
    pub potential: Vec<PotentialTier>,
    pub affection: BTreeMap<u32, u64>,
    pub eligma: EligmaPricing,
}

impl Default for CostTables {
    fn default() -> Self {
        Self {
            ids: ResourceIds::default(),
            levels: BTreeMap::new(),
            reports: Vec::new(),
            star_ranks: BTreeMap::new(),
            weapon_ranks: BTreeMap::new(),
            weapon_levels: BTreeMap::new(),
            weapon_enhancers: Vec::new(),
            weapon_credit_per_exp: 180,
            skills: SkillCredits::default(),
            equipment: EquipmentTables::default(),
            potential: Vec::new(),
            affection: BTreeMap::new(),
            eligma: EligmaPricing::default(),
        }
    }
}

impl CostTables {
    /// Parse and validate a cost table document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or a table violates its invariants.
    pub fn from_json(json: &str) -> Result<Self, PlannerError> {
        let tables: Self = serde_json::from_str(json).map_err(PlannerError::MalformedTables)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Potential tier covering `level`, if any.
    #[must_use]
    pub fn potential_tier(&self, level: u32) -> Option<&PotentialTier> {
        self.potential.iter().find(|tier| tier.contains(level))
    }

    /// Highest potential level any tier covers, 0 without tiers.
    #[must_use]
    pub fn potential_max_level(&self) -> u32 {
        self.potential.iter().map(|tier| tier.end).max().unwrap_or(0)
    }

    /// Check load-time invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), TableError> {
        validate_denominations("reports", &self.reports)?;
        validate_denominations("weapon enhancers", &self.weapon_enhancers)?;
        validate_denominations("equipment stones", &self.equipment.stones)?;
        if self.eligma.batch_size == 0 {
            return Err(TableError::ZeroEligmaBatch);
        }
        if let Some(tier) = self.potential.iter().find(|tier| tier.start > tier.end) {
            return Err(TableError::PotentialTierInverted {
                start: tier.start,
                end: tier.end,
            });
        }
        Ok(())
    }
}

fn validate_denominations(
    table: &'static str,
    denominations: &[Denomination],
) -> Result<(), TableError> {
    if denominations.is_empty() {
        return Err(TableError::EmptyDenominations { table });
    }
    if let Some(zero) = denominations.iter().find(|d| d.value == 0) {
        return Err(TableError::ZeroDenomination {
            table,
            key: zero.key.to_string(),
        });
    }
    Ok(())
}
