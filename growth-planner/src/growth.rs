//! Growth cost aggregation.
//!
//! Every axis of a plan is costed independently and added into one shopping
//! list. Missing table rows, inverted ranges and unknown students contribute
//! nothing, so a single bad plan never aborts the rest.
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::denomination::add_redeemed;
use crate::eligma::eligma_cost;
use crate::plan::GrowthPlan;
use crate::resources::{Needs, ResourceKey};
use crate::student::{StudentData, StudentInfo};
use crate::tables::CostTables;

/// Non-EX skill level that consumes a tech note.
const TECH_NOTE_LEVEL: u32 = 10;

/// Costs attributed to a single plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanNeeds {
    pub student_id: u32,
    pub needs: Needs,
    /// Relationship experience still to earn. Informational only; never part of `needs`.
    pub affection_exp: u64,
}

/// Levels crossed when moving from `from` to `to`, i.e. `(from, to]`.
fn steps(from: u32, to: u32) -> impl Iterator<Item = u32> {
    (from..to).map(|level| level + 1)
}

/// Table rows keyed inside `(from, to]`. Only existing rows are visited.
fn crossed<V>(table: &BTreeMap<u32, V>, from: u32, to: u32) -> impl Iterator<Item = &V> {
    let rows = (from < to).then(|| table.range(from + 1..=to));
    rows.into_iter().flatten().map(|(_, row)| row)
}

/// Aggregates growth plans against injected cost tables and student data.
#[derive(Debug, Clone, Copy)]
pub struct GrowthCalculator<'a> {
    tables: &'a CostTables,
    students: &'a StudentData,
}

impl<'a> GrowthCalculator<'a> {
    #[must_use]
    pub const fn new(tables: &'a CostTables, students: &'a StudentData) -> Self {
        Self { tables, students }
    }

    /// Sum of every plan's needs.
    #[must_use]
    pub fn aggregate(&self, plans: &[GrowthPlan]) -> Needs {
        let mut total = Needs::new();
        for plan in self.breakdown(plans) {
            total.merge(&plan.needs);
        }
        total
    }

    /// Needs of each costed plan, in input order. Skipped plans are omitted.
    #[must_use]
    pub fn breakdown(&self, plans: &[GrowthPlan]) -> Vec<PlanNeeds> {
        plans.iter().filter_map(|plan| self.plan_needs(plan)).collect()
    }

    /// Needs of a single plan, or `None` when the plan has no known student.
    #[must_use]
    pub fn plan_needs(&self, plan: &GrowthPlan) -> Option<PlanNeeds> {
        let Some(student_id) = plan.student_id else {
            debug!("skipping growth plan without a student id");
            return None;
        };
        let Some(student) = self.students.get(student_id) else {
            debug!("skipping growth plan for unknown student {student_id}");
            return None;
        };

        let mut needs = Needs::new();
        self.add_level(&mut needs, plan);
        self.add_weapon_level(&mut needs, plan);
        self.add_promotions(&mut needs, plan, student_id);
        self.add_skills(&mut needs, plan, student);
        self.add_equipment(&mut needs, plan, student);
        self.add_potential(&mut needs, plan, student);
        let affection_exp = self.affection_exp(plan);

        trace!(
            "student {student_id}: {} resources, {affection_exp} affection exp",
            needs.len()
        );
        Some(PlanNeeds {
            student_id,
            needs,
            affection_exp,
        })
    }

    fn credit(&self) -> ResourceKey {
        self.tables.ids.credit_key()
    }

    fn add_level(&self, needs: &mut Needs, plan: &GrowthPlan) {
        let mut exp = 0u64;
        for cost in crossed(&self.tables.levels, plan.current.level, plan.target.level) {
            exp = exp.saturating_add(cost.exp);
            needs.add(self.credit(), cost.credit);
        }
        add_redeemed(needs, exp, &self.tables.reports);
    }

    fn add_weapon_level(&self, needs: &mut Needs, plan: &GrowthPlan) {
        let (from, to) = (plan.current.weapon.level, plan.target.weapon.level);
        let exp = crossed(&self.tables.weapon_levels, from, to)
            .fold(0u64, |acc, exp| acc.saturating_add(*exp));
        needs.add(
            self.credit(),
            exp.saturating_mul(self.tables.weapon_credit_per_exp),
        );
        add_redeemed(needs, exp, &self.tables.weapon_enhancers);
    }

    /// Star and weapon rank promotions share one eleph budget.
    fn add_promotions(&self, needs: &mut Needs, plan: &GrowthPlan, student_id: u32) {
        let star = crossed(&self.tables.star_ranks, plan.current.star, plan.target.star);
        let weapon = crossed(
            &self.tables.weapon_ranks,
            plan.current.weapon.rank,
            plan.target.weapon.rank,
        );

        let mut eleph = 0u64;
        for cost in star.chain(weapon) {
            eleph = eleph.saturating_add(cost.eleph);
            needs.add(self.credit(), cost.credit);
        }

        let deficit = eleph.saturating_sub(plan.current.eleph);
        if deficit == 0 {
            return;
        }
        if plan.use_eligma_for_star {
            let eligma = eligma_cost(deficit, &plan.eligma_info, &self.tables.eligma);
            needs.add(self.tables.ids.eligma_key(), eligma);
        } else {
            needs.add(ResourceKey::item(student_id), deficit);
        }
    }

    fn add_skills(&self, needs: &mut Needs, plan: &GrowthPlan, student: &StudentInfo) {
        let (current, target) = (&plan.current.skills, &plan.target.skills);
        let skills = &self.tables.skills;

        for credit in crossed(&skills.ex, current.ex, target.ex) {
            needs.add(self.credit(), *credit);
        }
        for level in steps(current.ex, target.ex.min(student.ex_material_levels())) {
            for (key, amount) in student.ex_materials(level) {
                needs.add(key, amount);
            }
        }

        let tracks = [
            (current.normal, target.normal),
            (current.passive, target.passive),
            (current.sub, target.sub),
        ];
        for (from, to) in tracks {
            for credit in crossed(&skills.normal, from, to) {
                needs.add(self.credit(), *credit);
            }
            if from < TECH_NOTE_LEVEL && TECH_NOTE_LEVEL <= to {
                needs.add(self.tables.ids.tech_note_key(), 1);
            }
            for level in steps(from, to.min(student.skill_material_levels())) {
                for (key, amount) in student.skill_materials(level) {
                    needs.add(key, amount);
                }
            }
        }
    }

    fn add_equipment(&self, needs: &mut Needs, plan: &GrowthPlan, student: &StudentInfo) {
        let equipment = &self.tables.equipment;
        for (slot, line) in student.equipment.iter().enumerate() {
            let mut exp = 0u64;
            let (from, to) = (plan.current.equipment[slot], plan.target.equipment[slot]);
            let tiers = (from < to).then(|| equipment.tiers.range(from + 1..=to));
            for (&tier, cost) in tiers.into_iter().flatten() {
                for level_cost in crossed(&equipment.levels, 1, cost.max_level) {
                    exp = exp.saturating_add(level_cost.exp);
                    needs.add(self.credit(), level_cost.credit);
                }
                needs.add(self.credit(), cost.promotion_credit);
                if let Some(blueprint) = equipment.blueprint_key(line, tier) {
                    needs.add(blueprint, cost.blueprints);
                }
            }
            add_redeemed(needs, exp, &equipment.stones);
        }
    }

    fn add_potential(&self, needs: &mut Needs, plan: &GrowthPlan, student: &StudentInfo) {
        let (current, target) = (&plan.current.potential, &plan.target.potential);
        let workbook = self.tables.ids.workbook;
        let last_level = self.tables.potential_max_level();
        let stats = [
            (current.hp, target.hp, workbook.hp),
            (current.atk, target.atk, workbook.atk),
            (current.heal, target.heal, workbook.heal),
        ];
        for (from, to, workbook_id) in stats {
            for level in steps(from, to.min(last_level)) {
                let Some(tier) = self.tables.potential_tier(level) else {
                    continue;
                };
                needs.add(self.credit(), tier.credit);
                needs.add(ResourceKey::item(workbook_id), tier.workbook);
                let opart = student.potential_material.saturating_add(tier.opart_tier);
                needs.add(ResourceKey::item(opart), tier.opart);
            }
        }
    }

    fn affection_exp(&self, plan: &GrowthPlan) -> u64 {
        crossed(&self.tables.affection, plan.current.affection, plan.target.affection)
            .fold(0u64, |acc, exp| acc.saturating_add(*exp))
    }
}

/// Aggregate `plans` into a single shopping list.
#[must_use]
pub fn calculate_growth_needs(
    plans: &[GrowthPlan],
    students: &StudentData,
    tables: &CostTables,
) -> Needs {
    GrowthCalculator::new(tables, students).aggregate(plans)
}
