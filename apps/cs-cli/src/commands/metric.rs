// metric.rs — Metric catalog subcommands.

use clap::Subcommand;

use cs_metric::MetricCatalog;

#[derive(Subcommand)]
pub enum MetricCommands {
    /// List the built-in metric catalog.
    List,
}

pub fn execute(cmd: &MetricCommands) -> anyhow::Result<()> {
    match cmd {
        MetricCommands::List => list_metrics(),
    }
}

fn list_metrics() -> anyhow::Result<()> {
    let catalog = MetricCatalog::builtin();

    println!(
        "{:<26} {:<26} {:<12} {:<9} {:<10}",
        "ID", "NAME", "CATEGORY", "AGG", "UNIT"
    );
    println!("{}", "-".repeat(85));

    for d in catalog.all() {
        println!(
            "{:<26} {:<26} {:<12} {:<9} {:<10}",
            d.id,
            d.name,
            format!("{:?}", d.category).to_lowercase(),
            format!("{:?}", d.aggregation).to_lowercase(),
            d.unit,
        );
    }
    println!("\n{} metric(s) in the catalog.", catalog.all().len());

    Ok(())
}
