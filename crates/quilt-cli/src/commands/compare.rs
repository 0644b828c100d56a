//! Compare command implementation.
//!
//! `quilt compare <a.qasm> <b.qasm> [--width 3]`
//! `quilt compare <dir_a/> <dir_b/> [--width 3]`

use std::path::Path;

use anyhow::Context;
use console::style;

use quilt_bench::{
    BlockDistanceRow, CircuitSource, PartitionDistanceReport, compare_directories, compare_sources,
};

/// Execute the compare command.
pub fn execute(a: &str, b: &str, width: usize) -> anyhow::Result<()> {
    let path_a = Path::new(a);
    let path_b = Path::new(b);

    let reports = if path_a.is_dir() && path_b.is_dir() {
        compare_directories(path_a, path_b, width)
            .with_context(|| format!("comparing '{a}' against '{b}' failed"))?
    } else {
        let report = compare_sources(
            &CircuitSource::path(path_a),
            &CircuitSource::path(path_b),
            width,
        )
        .with_context(|| format!("comparing '{a}' against '{b}' failed"))?;
        vec![report]
    };

    for report in &reports {
        print_report(report);
    }
    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

fn print_report(report: &PartitionDistanceReport) {
    eprintln!();
    eprintln!("{}", style(&report.name).bold().underlined());
    eprintln!(
        "  Blocks:      {} vs {}",
        report.num_blocks_a, report.num_blocks_b
    );
    eprintln!("  KL:          {:.6}", report.kl);
    eprintln!("  Chi2:        {:.6}", report.chi2);
    if let Some(ref rows) = report.unitary {
        for line in unitary_lines(rows) {
            eprintln!("{line}");
        }
    }
}

/// One summary line per block of the first circuit.
fn unitary_lines(rows: &[BlockDistanceRow]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            format!(
                "  Unitary[{}]:  min {:.4}, max {:.4}, mean {:.4}",
                row.block, row.stats.min, row.stats.max, row.stats.mean
            )
        })
        .collect()
}
