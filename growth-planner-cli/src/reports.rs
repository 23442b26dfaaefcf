use anyhow::Result;
use colored::Colorize;
use growth_planner::{Inventory, Needs, PlanNeeds, ResourceCategory, ResourceKey};
use serde::Serialize;
use std::io::Write;

/// Everything a report renders.
#[derive(Debug, Clone, Serialize)]
pub struct PlannerReport {
    pub generated_at: String,
    pub plans_read: usize,
    pub plans_costed: usize,
    pub needs: Needs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Vec<PlanNeeds>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Needs>,
    #[serde(skip)]
    pub owned: Option<Inventory>,
}

impl PlannerReport {
    fn owned(&self, key: ResourceKey) -> Option<u64> {
        self.owned
            .as_ref()
            .map(|owned| owned.get(&key).copied().unwrap_or(0))
    }

    fn missing(&self, key: ResourceKey) -> Option<u64> {
        self.missing.as_ref().map(|missing| missing.get(key))
    }
}

pub fn generate_console_report(out: &mut dyn Write, report: &PlannerReport) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📦 Growth Plan Needs".bright_cyan().bold())?;
    writeln!(out, "{}", "====================".cyan())?;
    writeln!(
        out,
        "Plans costed: {}/{}",
        report.plans_costed, report.plans_read
    )?;
    writeln!(out, "Resources needed: {}", report.needs.len())?;
    writeln!(out)?;

    if report.needs.is_empty() {
        writeln!(out, "{}", "Nothing to gather.".green())?;
    }
    for category in ResourceCategory::ALL {
        let mut entries = report.needs.by_category(category).peekable();
        if entries.peek().is_none() {
            continue;
        }
        writeln!(out, "{}", category.key().bright_yellow().bold())?;
        for (key, qty) in entries {
            let status = match report.missing(key) {
                Some(0) => format!("{}", "✓ owned".green()),
                Some(missing) => format!("{}", format!("missing {missing}").red()),
                None => String::new(),
            };
            writeln!(out, "  {:<18} {qty:>14}  {status}", key.to_string())?;
        }
        writeln!(out)?;
    }

    if let Some(breakdown) = &report.breakdown {
        writeln!(out, "{}", "🧑‍🎓 Per Student".bright_yellow().bold())?;
        writeln!(out, "{}", "--------------".yellow())?;
        for plan in breakdown {
            writeln!(
                out,
                "Student {} ({} resources, {} affection exp)",
                plan.student_id.to_string().bold(),
                plan.needs.len(),
                plan.affection_exp
            )?;
            for (key, qty) in plan.needs.iter() {
                writeln!(out, "  {:<18} {qty:>14}", key.to_string())?;
            }
        }
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, report: &PlannerReport) -> Result<()> {
    let json_output = serde_json::to_string_pretty(report)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, report: &PlannerReport) -> Result<()> {
    writeln!(out, "# Growth Plan Needs\n")?;
    writeln!(
        out,
        "- **Plans costed**: {}/{}",
        report.plans_costed, report.plans_read
    )?;
    writeln!(out, "- **Generated**: {}\n", report.generated_at)?;

    if report.needs.is_empty() {
        writeln!(out, "_Nothing to gather._")?;
        return Ok(());
    }

    if report.missing.is_some() {
        writeln!(out, "| Resource | Quantity | Missing |")?;
        writeln!(out, "| --- | ---: | ---: |")?;
    } else {
        writeln!(out, "| Resource | Quantity |")?;
        writeln!(out, "| --- | ---: |")?;
    }
    for (key, qty) in report.needs.iter() {
        match report.missing(key) {
            Some(missing) => writeln!(out, "| {key} | {qty} | {missing} |")?,
            None => writeln!(out, "| {key} | {qty} |")?,
        }
    }

    if let Some(breakdown) = &report.breakdown {
        writeln!(out, "\n## Per Student\n")?;
        for plan in breakdown {
            writeln!(out, "### Student {}\n", plan.student_id)?;
            writeln!(out, "- **Affection exp**: {}", plan.affection_exp)?;
            for (key, qty) in plan.needs.iter() {
                writeln!(out, "- {key}: {qty}")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn generate_csv_report(out: &mut dyn Write, report: &PlannerReport) -> Result<()> {
    let with_owned = report.owned.is_some();
    if with_owned {
        writeln!(out, "scope,key,category,id,quantity,owned,missing")?;
    } else {
        writeln!(out, "scope,key,category,id,quantity")?;
    }

    for (key, qty) in report.needs.iter() {
        write!(out, "total,{key},{},{},{qty}", key.category, key.id)?;
        if let (Some(owned), Some(missing)) = (report.owned(key), report.missing(key)) {
            write!(out, ",{owned},{missing}")?;
        }
        writeln!(out)?;
    }

    for plan in report.breakdown.iter().flatten() {
        for (key, qty) in plan.needs.iter() {
            write!(
                out,
                "{},{key},{},{},{qty}",
                plan.student_id, key.category, key.id
            )?;
            if with_owned {
                write!(out, ",,")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}
