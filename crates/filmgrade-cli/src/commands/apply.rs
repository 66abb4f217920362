//! Apply command
//!
//! Runs one named operator over an image file.

use crate::ApplyArgs;
use anyhow::{Context, Result};
use filmgrade_ops::{OpParams, Operator};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, trace};

pub fn run(args: ApplyArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), filter = %args.filter, "apply::run");

    let op: Operator = args.filter.parse()?;
    let mut params = match &args.params {
        Some(path) => load_params(path)?,
        None => OpParams::default(),
    };
    if args.seed.is_some() {
        params.seed = args.seed;
    }
    debug!(?params, "Operator params");

    let image = super::load_image(&args.input)?;
    info!(op = %op, w = image.width(), h = image.height(), "Processing");

    if verbose > 0 {
        println!("Applying {} to {}", op.display_name(), args.input.display());
    }

    let start = Instant::now();
    let output = op
        .apply(&image, &params)
        .with_context(|| format!("{} failed on {}", op.display_name(), args.input.display()))?;
    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Operator finished");

    super::save_image(&args.output, output)?;

    if verbose > 0 {
        println!("Wrote {}", args.output.display());
    }

    Ok(())
}

/// Reads an [`OpParams`] YAML document.
fn load_params(path: &Path) -> Result<OpParams> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read params: {}", path.display()))?;
    let params: OpParams = serde_yaml::from_str(&text)
        .with_context(|| format!("Invalid params file: {}", path.display()))?;
    Ok(params)
}
