use aegis_core::*;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aegis")]
#[command(about = "Family health assessment toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the symptom checker and log the report
    Check {
        /// Symptom tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Body region whose symptoms to include (head, chest, ...)
        #[arg(long)]
        region: Option<String>,

        /// Self-reported severity, 1-10
        #[arg(long)]
        severity: u8,

        /// How long symptoms have persisted, e.g. "1-3 days"
        #[arg(long)]
        duration: String,

        /// Free-form note attached to the report
        #[arg(long)]
        notes: Option<String>,

        /// Show the assessment without logging the report
        #[arg(long)]
        dry_run: bool,
    },

    /// List body regions and their symptom tags
    Regions,

    /// Show recent symptom reports
    History {
        /// How many days back to look
        #[arg(long)]
        days: Option<i64>,
    },

    /// Generate a vitals insight from a CSV export
    Insight {
        /// Path to a vitals CSV (id,kind,value,unit,recorded_at)
        #[arg(long)]
        vitals_csv: PathBuf,

        /// Subject name shown in the result
        #[arg(long, default_value = "Family member")]
        subject: String,
    },

    /// Render a chart to an SVG file
    Chart {
        #[arg(long, value_enum)]
        kind: ChartKind,

        /// Comma-separated numeric values
        #[arg(long)]
        values: String,

        /// Comma-separated labels, same count as values
        #[arg(long)]
        labels: Option<String>,

        /// Output SVG path
        #[arg(long)]
        out: PathBuf,
    },

    /// Roll up the report log to CSV
    Rollup {
        /// Clean up processed log files after rollup
        #[arg(long)]
        cleanup: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ChartKind {
    Line,
    Donut,
    Bar,
}

fn main() -> Result<()> {
    aegis_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        Commands::Check {
            tags,
            region,
            severity,
            duration,
            notes,
            dry_run,
        } => cmd_check(data_dir, tags, region, severity, &duration, notes, dry_run, &config),
        Commands::Regions => cmd_regions(),
        Commands::History { days } => cmd_history(
            data_dir,
            days.unwrap_or(config.assessment.history_window_days),
        ),
        Commands::Insight {
            vitals_csv,
            subject,
        } => cmd_insight(&vitals_csv, subject),
        Commands::Chart {
            kind,
            values,
            labels,
            out,
        } => cmd_chart(kind, &values, labels.as_deref(), &out, &config),
        Commands::Rollup { cleanup } => cmd_rollup(data_dir, cleanup),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_check(
    data_dir: PathBuf,
    mut tags: Vec<String>,
    region: Option<String>,
    severity: u8,
    duration: &str,
    notes: Option<String>,
    dry_run: bool,
    config: &Config,
) -> Result<()> {
    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    if let Some(region_id) = region {
        let region = catalog.region(&region_id).ok_or_else(|| {
            Error::InvalidInput(format!(
                "Unknown body region '{}' (try the 'regions' command)",
                region_id
            ))
        })?;
        for symptom in &region.symptoms {
            if !tags.contains(symptom) {
                tags.push(symptom.clone());
            }
        }
    }

    if tags.is_empty() {
        return Err(Error::InvalidInput(
            "No symptoms given; use --tag and/or --region".into(),
        ));
    }

    let duration = DurationBucket::parse(duration).ok_or_else(|| {
        Error::InvalidInput(format!(
            "Unrecognized duration '{}'; expected one of: Less than 1 hour, 1-6 hours, \
             6-24 hours, 1-3 days, 3-7 days, 1-2 weeks, 2+ weeks",
            duration
        ))
    })?;

    let log_path = data_dir.join("reports").join("reports.jsonl");
    let history = load_recent_reports(&log_path, config.assessment.history_window_days)?;

    let now = chrono::Utc::now();
    let assessment = assess(&tags, severity, duration, &history, now)?;

    display_assessment(&tags, duration, &assessment);

    if dry_run {
        println!("\n[Dry run - not logging report]");
        return Ok(());
    }

    let report = SymptomReport {
        id: uuid::Uuid::new_v4(),
        tags,
        severity,
        duration,
        reported_at: now,
        notes,
    };

    let mut sink = JsonlSink::new(&log_path);
    sink.append(&report)?;

    println!("\n✓ Report logged!");
    Ok(())
}

fn cmd_regions() -> Result<()> {
    let catalog = get_default_catalog();

    println!("Body regions:");
    for region in catalog.regions_sorted() {
        println!("  {} ({})", region.name, region.id);
        for symptom in &region.symptoms {
            println!("    - {}", symptom);
        }
    }

    Ok(())
}

fn cmd_history(data_dir: PathBuf, days: i64) -> Result<()> {
    let log_path = data_dir.join("reports").join("reports.jsonl");
    let reports = load_recent_reports(&log_path, days)?;

    if reports.is_empty() {
        println!("No reports in the last {} days.", days);
        return Ok(());
    }

    println!("Reports from the last {} days:", days);
    for report in reports {
        println!(
            "  {}  severity {}/10, {}  [{}]",
            report.reported_at.format("%Y-%m-%d %H:%M"),
            report.severity,
            report.duration.display(),
            report.tags.join(", ")
        );
    }

    Ok(())
}

fn cmd_insight(vitals_csv: &PathBuf, subject: String) -> Result<()> {
    let vitals = load_vitals_from_csv(vitals_csv)?;
    let profile = SubjectProfile {
        id: subject.to_lowercase().replace(' ', "_"),
        name: subject,
        age: None,
    };

    let insight = vitals_insight(&vitals, &profile);

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  VITALS INSIGHT: {}", profile.name);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  Risk level: {}",
        match insight.risk_level {
            RiskLevel::High => "HIGH",
            RiskLevel::Low => "low",
        }
    );
    println!("  Confidence: {:.0}%", insight.confidence * 100.0);
    println!();
    println!("  Recommendations:");
    for recommendation in &insight.recommendations {
        println!("    - {}", recommendation);
    }
    println!();
    println!("  Trend: {}", insight.predicted_trends);
    println!();

    Ok(())
}

fn cmd_chart(
    kind: ChartKind,
    values: &str,
    labels: Option<&str>,
    out: &PathBuf,
    config: &Config,
) -> Result<()> {
    let values = parse_values(values)?;
    let labels: Vec<String> = labels
        .map(|l| l.split(',').map(|s| s.trim().to_string()).collect())
        .unwrap_or_default();

    let svg = match kind {
        ChartKind::Line => {
            let geometry = line_geometry(&values, &labels, &config.chart.area())?;
            line_chart_svg(&geometry, &config.chart.area(), config.chart.color(0))
        }
        ChartKind::Bar => {
            let geometry = bar_geometry(&values, &labels, &config.chart.area())?;
            bar_chart_svg(&geometry, config.chart.color(1))
        }
        ChartKind::Donut => {
            if labels.len() != values.len() {
                return Err(Error::Chart(
                    "donut charts need one label per value".into(),
                ));
            }
            let slices: Vec<CategorySlice> = values
                .iter()
                .zip(labels.iter())
                .enumerate()
                .map(|(i, (value, label))| CategorySlice {
                    value: *value,
                    label: label.clone(),
                    color: config.chart.color(i).to_string(),
                })
                .collect();
            let geometry = donut_geometry(&slices, config.chart.donut_size)?;

            for wedge in &geometry.wedges {
                println!("  {} {}%", wedge.label, wedge.percent);
            }

            donut_chart_svg(&geometry)
        }
    };

    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(out, svg)?;

    println!("✓ Wrote chart to {}", out.display());
    Ok(())
}

fn cmd_rollup(data_dir: PathBuf, cleanup: bool) -> Result<()> {
    let log_dir = data_dir.join("reports");
    let log_path = log_dir.join("reports.jsonl");
    let csv_path = data_dir.join("reports.csv");

    if !log_path.exists() {
        println!("No report log found - nothing to roll up.");
        return Ok(());
    }

    let count = aegis_core::rollup::log_to_csv_and_archive(&log_path, &csv_path)?;

    println!("✓ Rolled up {} reports to CSV", count);
    println!("  CSV: {}", csv_path.display());

    if cleanup {
        let cleaned = aegis_core::rollup::cleanup_processed_logs(&log_dir)?;
        if cleaned > 0 {
            println!("✓ Cleaned up {} processed log files", cleaned);
        }
    }

    Ok(())
}

fn parse_values(input: &str) -> Result<Vec<f64>> {
    input
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<f64>()
                .map_err(|_| Error::InvalidInput(format!("'{}' is not a number", s.trim())))
        })
        .collect()
}

fn display_assessment(tags: &[String], duration: DurationBucket, assessment: &Assessment) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {} SEVERITY ASSESSMENT", assessment.tier.display().to_uppercase());
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Symptoms: {}", tags.join(", "));
    println!("  Duration: {}", duration.display());
    println!("  Confidence: {:.0}%", assessment.confidence * 100.0);
    println!();
    println!("  {}", assessment.recommendation);
    println!();

    for action in &assessment.actions {
        println!("  → {}", action);
    }

    if let Some(ref pattern) = assessment.pattern {
        println!();
        println!("  ℹ {}", pattern);
    }

    println!();
}
