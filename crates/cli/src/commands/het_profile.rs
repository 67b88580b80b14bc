use anyhow::{Context, Result};
use sumstats_analysis::analysis::{heterozygosity_profile, Partitioner};

use crate::args::HetProfileArgs;
use crate::utils::{load_callset, write_output};

pub fn write_profile(args: &HetProfileArgs) -> Result<()> {
    let callset = load_callset(&args.callset)?;
    let partitioner = Partitioner::new(&callset);

    let samples = if args.samples.is_empty() {
        partitioner.all_samples()
    } else {
        partitioner
            .sample_indices(args.samples.as_slice())
            .context("Invalid sample selection")?
    };

    let profile = heterozygosity_profile(&callset, &samples, args.ploidy)
        .context("Failed to compute heterozygosity profile")?;

    let content =
        serde_json::to_string_pretty(&profile).context("Failed to serialize profile")?;
    write_output(&content, args.output.as_ref())
}
