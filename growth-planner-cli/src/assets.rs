use anyhow::{Context, Result};
use growth_planner::{
    CostTables, DataLoader, GrowthPlan, Inventory, PlannerError, StudentData, parse_plans,
};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUNDLED_TABLES: &str = include_str!("../../data/tables.json");
const BUNDLED_STUDENTS: &str = include_str!("../../data/students.json");
const BUNDLED_PLANS: &str = include_str!("../../data/plans.json");
const BUNDLED_LABEL: &str = "<bundled>";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: {source}")]
    Planner {
        path: String,
        #[source]
        source: PlannerError,
    },
}

/// Reads a JSON document from `path`, or falls back to the bundled copy.
fn read_or_bundled(path: Option<&Path>, bundled: &str) -> Result<(String, String), LoadError> {
    let Some(path) = path else {
        return Ok((BUNDLED_LABEL.to_string(), bundled.to_string()));
    };
    let label = path.display().to_string();
    debug!("reading {label}");
    let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: label.clone(),
        source,
    })?;
    Ok((label, json))
}

/// Loads tables and students from files, defaulting to the bundled sample data.
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    tables: Option<PathBuf>,
    students: Option<PathBuf>,
}

impl FileLoader {
    pub const fn new(tables: Option<PathBuf>, students: Option<PathBuf>) -> Self {
        Self { tables, students }
    }
}

impl DataLoader for FileLoader {
    type Error = LoadError;

    fn load_cost_tables(&self) -> Result<CostTables, Self::Error> {
        let (path, json) = read_or_bundled(self.tables.as_deref(), BUNDLED_TABLES)?;
        CostTables::from_json(&json).map_err(|source| LoadError::Planner { path, source })
    }

    fn load_students(&self) -> Result<StudentData, Self::Error> {
        let (path, json) = read_or_bundled(self.students.as_deref(), BUNDLED_STUDENTS)?;
        StudentData::from_json(&json).map_err(|source| LoadError::Planner { path, source })
    }
}

/// Saved plans from `path`, or the bundled sample plans.
pub fn load_plans(path: Option<&Path>) -> Result<Vec<GrowthPlan>> {
    let (label, json) = read_or_bundled(path, BUNDLED_PLANS)?;
    parse_plans(&json).with_context(|| format!("loading plans from {label}"))
}

/// Owned stock keyed like the needs output.
pub fn load_inventory(path: &Path) -> Result<Inventory> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("inventory {} is malformed", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use growth_planner::ResourceKey;

    fn temp_file(label: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "growth-planner-assets-{label}-{}",
            std::process::id()
        ));
        fs::write(&path, contents).expect("write temp file");
        path
    }

    #[test]
    fn default_loader_uses_bundled_data() {
        let loader = FileLoader::default();
        assert_eq!(loader.load_students().unwrap().len(), 3);
        assert!(!loader.load_cost_tables().unwrap().reports.is_empty());
        assert_eq!(load_plans(None).unwrap().len(), 4);
    }

    #[test]
    fn missing_file_reports_path() {
        let loader = FileLoader::new(Some(PathBuf::from("/nonexistent/tables.json")), None);
        let err = loader.load_cost_tables().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tables.json"));
    }

    #[test]
    fn invalid_tables_surface_planner_error() {
        let path = temp_file("tables", r#"{"reports": []}"#);
        let loader = FileLoader::new(Some(path.clone()), None);
        let err = loader.load_cost_tables().unwrap_err();
        assert!(matches!(
            err,
            LoadError::Planner {
                source: PlannerError::InvalidTable(_),
                ..
            }
        ));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn inventory_parses_resource_keys() {
        let path = temp_file("inventory", r#"{"Currency_1": 5000, "Item_10": 3}"#);
        let inventory = load_inventory(&path).unwrap();
        assert_eq!(inventory.get(&ResourceKey::currency(1)), Some(&5000));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn malformed_plans_fail_with_context() {
        let path = temp_file("plans", r#"{"not": "a list"}"#);
        let err = load_plans(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("loading plans from"));
        let _ = fs::remove_file(path);
    }
}
