mod assets;
mod reports;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use growth_planner::{Needs, PlannerEngine};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};

use assets::{FileLoader, load_inventory, load_plans};
use reports::PlannerReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Coloured summary grouped by category
    Console,
    Json,
    Markdown,
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "growth-planner", version)]
#[command(about = "Aggregate student growth plans into a material shopping list")]
struct Args {
    /// Cost tables JSON (defaults to the bundled tables)
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Student catalog JSON (defaults to the bundled catalog)
    #[arg(long)]
    students: Option<PathBuf>,

    /// Saved growth plans JSON (defaults to the bundled sample plans)
    #[arg(long)]
    plans: Option<PathBuf>,

    /// Owned resources JSON; adds what is still missing to the report
    #[arg(long)]
    inventory: Option<PathBuf>,

    /// Include a per-student breakdown
    #[arg(long)]
    per_plan: bool,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let engine = PlannerEngine::new(FileLoader::new(args.tables.clone(), args.students.clone()))
        .context("loading planner data")?;
    let plans = load_plans(args.plans.as_deref())?;
    let owned = args.inventory.as_deref().map(load_inventory).transpose()?;

    let breakdown = engine.breakdown_for(&plans);
    let mut needs = Needs::new();
    for plan in &breakdown {
        needs.merge(&plan.needs);
    }
    info!(
        "costed {} of {} plans into {} resources",
        breakdown.len(),
        plans.len(),
        needs.len()
    );

    let report = PlannerReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        plans_read: plans.len(),
        plans_costed: breakdown.len(),
        missing: owned.as_ref().map(|owned| needs.shortfall(owned)),
        needs,
        breakdown: args.per_plan.then_some(breakdown),
        owned,
    };

    write_report(&args, &report)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn write_report(args: &Args, report: &PlannerReport) -> Result<()> {
    let mut sink = ReportSink::open(args.output.as_deref())?;

    match args.report {
        ReportFormat::Json => reports::generate_json_report(&mut sink, report)?,
        ReportFormat::Markdown => reports::generate_markdown_report(&mut sink, report)?,
        ReportFormat::Csv => reports::generate_csv_report(&mut sink, report)?,
        ReportFormat::Console => {
            announce_banner(&mut sink)?;
            reports::generate_console_report(&mut sink, report)?;
        }
    }

    sink.finish()
}

fn announce_banner(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", "🎒 Growth Planner".bright_cyan().bold())?;
    writeln!(out, "{}", "=================".cyan())?;
    Ok(())
}

/// Buffered report destination: stdout, or the file named by `--output`.
struct ReportSink {
    label: String,
    writer: BufWriter<Box<dyn Write>>,
}

impl ReportSink {
    fn open(path: Option<&Path>) -> Result<Self> {
        let (label, inner): (String, Box<dyn Write>) = match path {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("creating report file {}", path.display()))?;
                (path.display().to_string(), Box::new(file))
            }
            None => ("stdout".to_string(), Box::new(stdout())),
        };
        Ok(Self {
            label,
            writer: BufWriter::new(inner),
        })
    }

    fn finish(mut self) -> Result<()> {
        self.writer
            .flush()
            .with_context(|| format!("writing report to {}", self.label))
    }
}

impl Write for ReportSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_default_to_console_report() {
        let args = Args::try_parse_from(["growth-planner"]).unwrap();
        assert_eq!(args.report, ReportFormat::Console);
        assert!(args.plans.is_none());
        assert!(!args.per_plan);
    }

    #[test]
    fn args_accept_all_inputs() {
        let args = Args::try_parse_from([
            "growth-planner",
            "--tables",
            "t.json",
            "--students",
            "s.json",
            "--plans",
            "p.json",
            "--inventory",
            "i.json",
            "--per-plan",
            "--report",
            "csv",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.report, ReportFormat::Csv);
        assert_eq!(args.inventory, Some(PathBuf::from("i.json")));
        assert!(args.per_plan && args.verbose);
    }

    #[test]
    fn unknown_report_format_is_rejected() {
        assert!(Args::try_parse_from(["growth-planner", "--report", "xml"]).is_err());
    }

    #[test]
    fn report_sink_writes_file_on_finish() {
        let path = std::env::temp_dir().join(format!("growth-planner-out-{}", std::process::id()));
        let mut sink = ReportSink::open(Some(&path)).unwrap();
        assert_eq!(sink.label, path.display().to_string());
        writeln!(sink, "hello").unwrap();
        sink.finish().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn report_sink_names_unwritable_path() {
        let path = std::env::temp_dir().join("growth-planner-missing-dir").join("out.json");
        let err = ReportSink::open(Some(&path)).err().unwrap();
        assert!(err.to_string().contains("creating report file"));
    }
}
