//! Per-student material catalog.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

use crate::error::PlannerError;
use crate::resources::ResourceKey;

/// One row of a skill material matrix: ids or amounts for a single level.
pub type MaterialRow = SmallVec<[u32; 4]>;

/// Static data for a single student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StudentInfo {
    pub id: u32,
    /// Base item id of the student's opart line.
    #[serde(default)]
    pub potential_material: u32,
    #[serde(default)]
    pub skill_ex_material: Vec<MaterialRow>,
    #[serde(default)]
    pub skill_ex_material_amount: Vec<MaterialRow>,
    #[serde(default)]
    pub skill_material: Vec<MaterialRow>,
    #[serde(default)]
    pub skill_material_amount: Vec<MaterialRow>,
    /// Equipment line occupying each slot.
    pub equipment: [String; 3],
}

impl StudentInfo {
    /// Materials consumed by an EX skill transition into `level`.
    pub fn ex_materials(&self, level: u32) -> impl Iterator<Item = (ResourceKey, u64)> + '_ {
        material_pairs(&self.skill_ex_material, &self.skill_ex_material_amount, level)
    }

    /// Materials consumed by a normal/passive/sub skill transition into `level`.
    pub fn skill_materials(&self, level: u32) -> impl Iterator<Item = (ResourceKey, u64)> + '_ {
        material_pairs(&self.skill_material, &self.skill_material_amount, level)
    }

    /// Highest EX level with a material row.
    #[must_use]
    pub fn ex_material_levels(&self) -> u32 {
        last_material_level(&self.skill_ex_material, &self.skill_ex_material_amount)
    }

    /// Highest normal/passive/sub level with a material row.
    #[must_use]
    pub fn skill_material_levels(&self) -> u32 {
        last_material_level(&self.skill_material, &self.skill_material_amount)
    }
}

fn last_material_level(ids: &[MaterialRow], amounts: &[MaterialRow]) -> u32 {
    let rows = ids.len().min(amounts.len());
    u32::try_from(rows).unwrap_or(u32::MAX).saturating_add(1)
}

/// Matrix rows start at the transition into level 2.
fn material_pairs<'a>(
    ids: &'a [MaterialRow],
    amounts: &'a [MaterialRow],
    level: u32,
) -> impl Iterator<Item = (ResourceKey, u64)> + 'a {
    let row = level
        .checked_sub(2)
        .and_then(|idx| usize::try_from(idx).ok());
    let ids = row.and_then(|idx| ids.get(idx));
    let amounts = row.and_then(|idx| amounts.get(idx));
    ids.zip(amounts)
        .into_iter()
        .flat_map(|(ids, amounts)| ids.iter().zip(amounts.iter()))
        .map(|(id, amount)| (ResourceKey::item(*id), u64::from(*amount)))
}

/// Student lookup keyed by student id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentData {
    students: HashMap<u32, StudentInfo>,
}

impl StudentData {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load student data from a JSON object keyed by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into student records.
    pub fn from_json(json: &str) -> Result<Self, PlannerError> {
        serde_json::from_str(json).map_err(PlannerError::MalformedStudents)
    }

    #[must_use]
    pub fn from_students(students: impl IntoIterator<Item = StudentInfo>) -> Self {
        Self {
            students: students
                .into_iter()
                .map(|student| (student.id, student))
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, id: u32) -> Option<&StudentInfo> {
        self.students.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
