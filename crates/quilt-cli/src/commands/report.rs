//! Report command implementation.
//!
//! `quilt report <dir> [--width 3] [--output-dir out/]`

use std::path::Path;

use anyhow::Context;
use console::style;

use quilt_bench::{comparison_stats, save_comparison_stats};

/// Execute the report command: compare every circuit in a directory
/// against every other and write one report per circuit.
pub fn execute(dir: &str, width: usize, output_dir: Option<&str>) -> anyhow::Result<()> {
    let reports = comparison_stats(Path::new(dir), width)
        .with_context(|| format!("comparison report over '{dir}' failed"))?;

    for report in &reports {
        eprintln!();
        eprintln!("{}", style(&report.name).bold().underlined());
        for row in &report.rows {
            eprintln!(
                "  vs {:<20} {} entangling, depth {}, chi2 {:.6}, kl {:.6}",
                row.circuit, row.multi_qubit_gates, row.depth, row.chi2, row.kl
            );
        }
    }

    if let Some(out) = output_dir {
        let paths = save_comparison_stats(&reports, Path::new(out))?;
        eprintln!(
            "{} {} reports written to {}",
            style("OK").green().bold(),
            paths.len(),
            out
        );
    } else {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}
