//! Optimize command implementation.
//!
//! `quilt optimize --input <circuit.qasm> [--baseline-level 3]`
//! `quilt optimize --dir <benchmarks/> --output-dir <out/>`

use std::path::Path;

use anyhow::Context;
use console::style;

use quilt_bench::{
    CircuitSource, MetricsRecord, ReplaceFilter, RunConfig, full_comparison, optimize_circuit,
    optimize_directory, save_circuit, save_metrics,
};
use quilt_compile::SynthesisAlgorithm;
use quilt_partition::PartitionStrategy;

/// Parsed arguments for the optimize command.
pub struct Args {
    pub input: Option<String>,
    pub dir: Option<String>,
    pub output_dir: String,
    pub partitioner: String,
    pub width: usize,
    pub algorithm: String,
    pub filter: String,
    pub threshold: f64,
    pub search_width: usize,
    pub workers: Option<usize>,
    pub baseline_level: Option<u8>,
}

/// Execute the optimize command.
pub fn execute(args: Args) -> anyhow::Result<()> {
    let config = RunConfig {
        strategy: PartitionStrategy::from_name(&args.partitioner)?,
        block_width: args.width,
        algorithm: SynthesisAlgorithm::from_name(&args.algorithm)?,
        filter: ReplaceFilter::from_name(&args.filter)?,
        threshold: args.threshold,
        search_width: args.search_width,
        workers: args.workers,
    };
    let output_dir = Path::new(&args.output_dir);

    match (args.input, args.dir) {
        (Some(input), None) => {
            optimize_one(&config, &input, output_dir, args.baseline_level)
        }
        (None, Some(dir)) => {
            let records = optimize_directory(&config, Path::new(&dir), output_dir)
                .with_context(|| format!("bulk run over '{dir}' failed"))?;
            for record in &records {
                print_summary(record);
            }
            eprintln!(
                "{} {} circuits optimized, outputs in {}",
                style("OK").green().bold(),
                records.len(),
                output_dir.display()
            );
            Ok(())
        }
        _ => anyhow::bail!("exactly one of --input or --dir is required"),
    }
}

fn optimize_one(
    config: &RunConfig,
    input: &str,
    output_dir: &Path,
    baseline_level: Option<u8>,
) -> anyhow::Result<()> {
    let source = CircuitSource::path(input);

    if let Some(level) = baseline_level {
        let report = full_comparison(config, &source, level)
            .with_context(|| format!("comparison run on '{input}' failed"))?;
        print_summary(&report.pipeline);
        print_summary(&report.baseline);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let outcome = optimize_circuit(config, &source)
        .with_context(|| format!("pipeline run on '{input}' failed"))?;
    let circuit_path = save_circuit(
        &outcome.circuit,
        output_dir,
        &config.output_stem(&outcome.metrics.name),
    )?;
    save_metrics(&outcome.metrics, output_dir)?;

    print_summary(&outcome.metrics);
    eprintln!(
        "{} Optimized circuit written to {}",
        style("OK").green().bold(),
        circuit_path.display()
    );
    Ok(())
}

fn print_summary(record: &MetricsRecord) {
    eprintln!();
    eprintln!(
        "{} ({}, {}, {})",
        style(&record.name).bold().underlined(),
        record.partitioner,
        record.algorithm,
        record.filter
    );
    eprintln!(
        "  Gates:       {} -> {} ({} entangling -> {})",
        record.before.gates,
        record.after.gates,
        record.before.multi_qubit_gates,
        record.after.multi_qubit_gates
    );
    eprintln!(
        "  Depth:       {} -> {}",
        record.before.depth, record.after.depth
    );
    if record.num_blocks > 0 {
        eprintln!(
            "  Blocks:      {} total, {} replaced",
            record.num_blocks, record.blocks_replaced
        );
    }
    eprintln!("  Duration:    {} ms", record.duration_ms);
}
