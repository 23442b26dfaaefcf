//! Growth Planner
//!
//! Platform-agnostic cost aggregation for student growth plans.
//! This crate turns saved plans plus static cost tables into a material
//! shopping list, without UI, storage or platform-specific dependencies.

pub mod denomination;
pub mod eligma;
pub mod error;
pub mod growth;
pub mod plan;
pub mod resources;
pub mod student;
pub mod tables;

// Re-export commonly used types
pub use denomination::{Redemption, add_redeemed, redeem, redeemed_value};
pub use eligma::eligma_cost;
pub use error::{PlannerError, TableError};
pub use growth::{GrowthCalculator, PlanNeeds, calculate_growth_needs};
pub use plan::{
    EligmaInfo, GrowthAxis, GrowthPlan, GrowthState, PotentialLevels, SkillLevels, WeaponState,
    parse_plans,
};
pub use resources::{Inventory, Needs, ResourceCategory, ResourceKey, ResourceKeyError};
pub use student::{StudentData, StudentInfo};
pub use tables::{CostTables, Denomination, ResourceIds};

use log::warn;

/// Trait for abstracting data loading operations
/// Platform-specific implementations should provide this
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the cost tables from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the tables cannot be loaded or fail validation.
    fn load_cost_tables(&self) -> Result<CostTables, Self::Error>;

    /// Load the student catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the student data cannot be loaded or parsed.
    fn load_students(&self) -> Result<StudentData, Self::Error>;
}

/// Planner engine holding loaded game data
pub struct PlannerEngine<L>
where
    L: DataLoader,
{
    data_loader: L,
    tables: CostTables,
    students: StudentData,
}

impl<L> PlannerEngine<L>
where
    L: DataLoader,
{
    /// Create a planner engine, loading tables and students once
    ///
    /// # Errors
    ///
    /// Returns an error if either data set cannot be loaded.
    pub fn new(data_loader: L) -> Result<Self, L::Error> {
        let tables = data_loader.load_cost_tables()?;
        let students = data_loader.load_students()?;
        Ok(Self {
            data_loader,
            tables,
            students,
        })
    }

    /// Reload tables and students from the data loader
    ///
    /// # Errors
    ///
    /// Returns an error if either data set cannot be loaded; the previous data is kept.
    pub fn reload(&mut self) -> Result<(), L::Error> {
        let tables = self.data_loader.load_cost_tables()?;
        let students = self.data_loader.load_students()?;
        self.tables = tables;
        self.students = students;
        Ok(())
    }

    #[must_use]
    pub const fn tables(&self) -> &CostTables {
        &self.tables
    }

    #[must_use]
    pub const fn students(&self) -> &StudentData {
        &self.students
    }

    #[must_use]
    pub const fn calculator(&self) -> GrowthCalculator<'_> {
        GrowthCalculator::new(&self.tables, &self.students)
    }

    /// Aggregate needs across all plans
    #[must_use]
    pub fn needs_for(&self, plans: &[GrowthPlan]) -> Needs {
        report_inverted_axes(plans);
        self.calculator().aggregate(plans)
    }

    /// Per-plan needs, in plan order
    #[must_use]
    pub fn breakdown_for(&self, plans: &[GrowthPlan]) -> Vec<PlanNeeds> {
        report_inverted_axes(plans);
        self.calculator().breakdown(plans)
    }

    /// Parse a saved plan list and aggregate it
    ///
    /// # Errors
    ///
    /// Returns an error before any aggregation if the plan list is malformed.
    pub fn needs_for_json(&self, json: &str) -> Result<Needs, PlannerError> {
        let plans = parse_plans(json)?;
        Ok(self.needs_for(&plans))
    }
}

fn report_inverted_axes(plans: &[GrowthPlan]) {
    for plan in plans {
        let inverted = plan.inverted_axes();
        if inverted.is_empty() {
            continue;
        }
        let axes: Vec<&str> = inverted.iter().map(|axis| axis.key()).collect();
        warn!(
            "plan for student {:?} targets below current on {}; those axes cost nothing",
            plan.student_id,
            axes.join(", ")
        );
    }
}
