use anyhow::{Context, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use sumstats_analysis::analysis::{aggregate, AnalysisConfig, DiversityEngine, DiversityReport};
use sumstats_core::{CladeMap, ContigWeights};
use tracing::{info, warn};

use crate::args::ComputeArgs;
use crate::utils::{load_callset, load_json, write_output};

/// Reports keyed by statistic name, in requested order.
struct ResultDocument<'a>(&'a [DiversityReport]);

impl Serialize for ResultDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for report in self.0 {
            map.serialize_entry(report.statistic.name(), &report.result)?;
        }
        map.end()
    }
}

pub fn compute_statistics(args: &ComputeArgs) -> Result<()> {
    let callset = load_callset(&args.callset)?;
    let base = match &args.config {
        Some(path) => load_json::<AnalysisConfig>(path, "config")?,
        None => AnalysisConfig::default(),
    };
    let config = args.apply(base);
    let groups = args
        .clades
        .as_deref()
        .map(|path| load_json::<CladeMap>(path, "clades"))
        .transpose()?;
    let weights = args
        .weights
        .as_deref()
        .map(|path| load_json::<ContigWeights>(path, "weights"))
        .transpose()?;

    info!(
        samples = callset.n_samples(),
        variants = callset.n_variants(),
        clades = groups.as_ref().map_or(0, |g| g.len()),
        "Loaded inputs"
    );

    let policy = config.unweighted_policy;
    let engine = DiversityEngine::new(&callset, config);
    let mut reports = engine.compute_all(&args.statistics(), groups.as_ref());

    if let Some(weights) = &weights {
        for report in &mut reports {
            aggregate(&mut report.result, weights, policy);
        }
    }

    let failed: usize = reports.iter().map(|r| r.failures.len()).sum();
    if failed > 0 {
        warn!("{failed} unit(s) could not be computed and were skipped or left undefined");
    }

    let content = serde_json::to_string_pretty(&ResultDocument(&reports))
        .context("Failed to serialize results")?;
    write_output(&content, args.output.as_ref())
}
