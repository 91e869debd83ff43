use std::fs;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use nimbus_classify::{clip_field, find_edges};
use nimbus_remap::{RemapResult, lave_scaling_exact, shift_mean_lave};
use nimbus_synth::stacked_field;

use crate::cli::GenerateArgs;
use crate::config::NimbusConfig;
use crate::convert::{self, RemapVariant};
use crate::output;

/// Run the full field generation pipeline.
pub fn run(args: GenerateArgs) -> Result<()> {
    // Step 1: Load config and apply CLI overrides
    let raw = fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config: {}", args.config.display()))?;
    let mut config: NimbusConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config: {}", args.config.display()))?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(output) = args.output {
        config.io.output = Some(output);
    }
    let out_path = config.io.output.as_ref().ok_or_else(|| {
        anyhow::anyhow!("no output path: set [io].output in config or use --output")
    })?;

    // Step 2: Build configs from TOML
    let params = convert::build_calibration(&config.target)?;
    let stack_cfg = convert::build_stack_config(&config.target);
    let variant = convert::parse_variant(&config.remap.variant)?;
    let size = (config.size.rows, config.size.cols);

    // Step 3: Create seeded RNG
    let mut rng = match config.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    // Step 4: Synthesize the cloud field and an independent classification
    // field; both share the spatial statistics, neither leaks structure
    // into the other
    info!(rows = size.0, cols = size.1, vs = params.vs(), "synthesizing cloud field");
    let cfield = stacked_field(params.vs(), size, &stack_cfg, &mut rng)
        .context("cloud field synthesis failed")?;
    let class_field = stacked_field(params.vs(), size, &stack_cfg, &mut rng)
        .context("classification field synthesis failed")?;

    // Step 5: Classify clear sky and locate cloud edges
    let clear_mask = clip_field(&class_field, params.frac_clear())
        .context("clear-sky classification failed")?;
    info!(
        clear_fraction = clear_mask.fraction_set(),
        "classified clear sky"
    );
    let (_, edge_mask) =
        find_edges(&clear_mask, config.edges.window).context("edge detection failed")?;
    info!(edge_pixels = edge_mask.count_set(), "located cloud edges");

    // Step 6: Remap onto the observed distribution
    let result: RemapResult = match variant {
        RemapVariant::Exact => {
            let lave_cfg = convert::build_lave_config(&config.remap);
            lave_scaling_exact(&cfield, &clear_mask, &edge_mask, &params, &lave_cfg)
                .context("exact remapping failed")?
        }
        RemapVariant::Shift => {
            // Saturate clear pixels before the field-only remap.
            let composed =
                cfield.map_masked(&clear_mask, |v, clear| if clear { 1.0 } else { v });
            let shift_cfg = convert::build_shift_config(&config.remap);
            shift_mean_lave(&composed, params.ktmean(), &shift_cfg)
                .context("mean-shift remapping failed")?
        }
    };
    info!(
        target_mean = result.target_mean(),
        achieved_mean = result.achieved_mean(),
        "remapping complete"
    );

    // Step 7: Write the field
    output::write_field(out_path, result.field())?;
    info!(path = %out_path.display(), "field written");

    Ok(())
}
