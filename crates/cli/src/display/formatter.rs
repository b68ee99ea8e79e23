use anyhow::Result;
use mapmap_core::GenerationReport;
use std::fmt::Write;

/// Human-readable summary of a run
pub fn format_report(report: &GenerationReport) -> String {
    let mut out = String::new();

    for path in &report.generated {
        let _ = writeln!(out, "✅ {}", path.display());
    }
    for failure in &report.failures {
        let _ = writeln!(
            out,
            "❌ {} ({}): {}",
            failure.interface, failure.module_path, failure.error
        );
    }

    let _ = writeln!(
        out,
        "📦 {} generated, {} failed",
        report.generated.len(),
        report.failures.len()
    );
    out
}

pub fn print_report(report: &GenerationReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", format_report(report));
    }
    Ok(())
}
