//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum circuit partitioning and resynthesis benchmarks",
        style("Quilt").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  quilt-ir         Circuit intermediate representation");
    println!("  quilt-qasm       OpenQASM 2/3 parsing and emission");
    println!("  quilt-partition  Width-bounded circuit partitioning");
    println!("  quilt-compile    Gate rewriting and resynthesis");
    println!("  quilt-session    Parallel compilation sessions");
    println!("  quilt-bench      Benchmark pipeline and metrics");
    println!();
    println!(
        "Repository: {}",
        style("https://github.com/quilt-qc/quilt").underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
