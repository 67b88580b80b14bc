use anyhow::Result;
use std::path::Path;
use sumstats_analysis::analysis::Partitioner;

use crate::utils::load_callset;

pub fn show_summary(path: &Path) -> Result<()> {
    let callset = load_callset(path)?;
    let partitioner = Partitioner::new(&callset);

    println!("\n📊 Callset Summary");
    println!("{}", "=".repeat(50));
    println!("Samples: {}", callset.n_samples());
    println!("Variants: {}", callset.n_variants());
    println!("Ploidy: {}", callset.ploidy());

    let missing = callset.missing_calls();
    let total = callset.n_variants() * callset.n_samples() * callset.ploidy();
    if total > 0 {
        println!(
            "Missing allele calls: {missing} ({:.2}%)",
            missing as f64 / total as f64 * 100.0
        );
    }

    println!("\n🧬 Contigs:");
    for &contig in partitioner.contigs() {
        let variants = partitioner.contig_variants(contig);
        let positions = callset.positions();
        let first = variants.first().map(|&v| positions[v]);
        let last = variants.last().map(|&v| positions[v]);
        if let (Some(first), Some(last)) = (first, last) {
            println!("  • {contig}: {} variants ({first}..={last})", variants.len());
        }
    }

    println!("\nSample identifiers:");
    println!("  {}", callset.samples().join(", "));

    Ok(())
}
