use crate::config::{JobConfig, DEFAULT_SHEET};
use crate::core::{self, columns};
use crate::error::RatioResult;
use crate::excel::{DatasetImporter, WorkbookExporter};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of a successful `generate` run
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub output_path: PathBuf,
    pub sheets: Vec<String>,
    pub ratios: Vec<u32>,
    pub candidate_columns: Vec<String>,
    pub max_candidate_sum: i64,
}

/// Read-only view of a roster
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub sheet: String,
    pub headers: Vec<String>,
    pub rows: usize,
    pub candidate_columns: Vec<String>,
    pub total_candidate_column: Option<String>,
    pub max_candidate_sum: Option<i64>,
}

/// Execute the generate command
///
/// `config` is an optional YAML job file; `flags` override anything it sets.
pub fn generate(
    input: PathBuf,
    flags: JobConfig,
    config: Option<PathBuf>,
    verbose: bool,
) -> RatioResult<GenerateReport> {
    println!("{}", "📊 Ratio Forge - Multi-Ratio Workbook".bold().green());
    println!("   Input:  {}", input.display());

    let job = match &config {
        Some(path) => {
            if verbose {
                println!("   Job file: {}", path.display());
            }
            JobConfig::load(path)?.merged_with(flags)
        }
        None => flags,
    };
    let settings = job.resolve()?;
    let output = settings.output_path();

    println!("   Output: {}", output.display());
    println!(
        "   Ratios: {}-{}  Service: {}\n",
        settings.start,
        settings.end,
        settings.service.to_string().bright_yellow().bold()
    );

    if verbose {
        println!(
            "{}",
            format!("📖 Reading worksheet '{}'...", settings.sheet).cyan()
        );
    }
    let dataset = DatasetImporter::new(&input)
        .with_sheet(&settings.sheet)
        .import()?;

    if verbose {
        println!(
            "   Found {} columns, {} rows\n",
            dataset.column_count(),
            dataset.row_count()
        );
        println!("{}", "🧮 Building ratio sheets...".cyan());
    }

    let generated = core::generate(&dataset, settings.start, settings.end, settings.service)?;

    if verbose {
        let names: Vec<&str> = generated
            .candidates
            .iter()
            .map(|c| c.header.as_str())
            .collect();
        println!("   Candidate columns: {}", names.join(", ").bright_blue());
        println!("   Max Candidate: {}\n", generated.max_candidate_sum);
        println!("{}", "💾 Writing workbook...".cyan());
    }

    WorkbookExporter::new(&dataset, &generated).export(&output)?;

    let sheets = generated.sheet_names();
    println!("{}", "✅ Excel file generated successfully".bold().green());
    for name in &sheets {
        println!("   📄 {}", name.bright_blue());
    }
    println!("   Excel file: {}\n", output.display());

    Ok(GenerateReport {
        output_path: output,
        sheets,
        ratios: generated.ratios.as_slice().to_vec(),
        candidate_columns: generated
            .candidates
            .iter()
            .map(|c| c.header.clone())
            .collect(),
        max_candidate_sum: generated.max_candidate_sum,
    })
}

/// Execute the inspect command
///
/// Missing columns are reported rather than treated as failures, so the user
/// can see why a later `generate` would be rejected.
pub fn inspect(input: PathBuf, sheet: Option<String>) -> RatioResult<InspectReport> {
    let sheet = sheet.unwrap_or_else(|| DEFAULT_SHEET.to_string());

    println!("{}", "🔍 Ratio Forge - Roster Inspection".bold().green());
    println!("   File:  {}", input.display());
    println!("   Sheet: {}\n", sheet);

    let dataset = DatasetImporter::new(&input).with_sheet(&sheet).import()?;

    println!("{}", "📋 Columns:".bold().cyan());
    for (idx, header) in dataset.headers().iter().enumerate() {
        let marker = if columns::is_candidate_header(header) {
            "candidate".green()
        } else {
            "".normal()
        };
        println!(
            "   {:>3}. {} {}",
            idx + 1,
            header,
            marker
        );
    }
    println!("   {} data rows\n", dataset.row_count());

    let candidates = columns::classify_candidates(dataset.headers()).unwrap_or_default();
    let total_candidate = columns::find_total_candidate(&dataset)
        .ok()
        .map(|idx| dataset.headers()[idx].clone());

    if candidates.is_empty() {
        println!("{}", "❌ No candidate columns detected".red());
    } else {
        println!(
            "   Candidate columns: {}",
            candidates.len().to_string().bold()
        );
    }
    match &total_candidate {
        Some(name) => println!("   Total Candidate column: {}", name.bright_blue()),
        None => println!(
            "{}",
            format!("❌ Column '{}' not found", columns::TOTAL_CANDIDATE_HEADER).red()
        ),
    }

    let max_candidate_sum =
        (!candidates.is_empty()).then(|| columns::max_candidate_sum(&dataset, &candidates));
    if let Some(sum) = max_candidate_sum {
        println!("   Max Candidate: {}", sum.to_string().bold().green());
    }
    println!();

    Ok(InspectReport {
        sheet,
        headers: dataset.headers().to_vec(),
        rows: dataset.row_count(),
        candidate_columns: candidates.into_iter().map(|c| c.header).collect(),
        total_candidate_column: total_candidate,
        max_candidate_sum,
    })
}
