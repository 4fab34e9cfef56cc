use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::TranscodeError;
use crate::render;

/// True when the path has an `.svg` extension, case-insensitive. Everything
/// else is skipped at the queue boundary.
pub fn is_svg_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("svg"))
        .unwrap_or(false)
}

/// Output path for a converted file: same directory, same stem, `.png`.
pub fn png_sibling(input: &Path) -> PathBuf {
    let mut output = input.to_path_buf();
    output.set_extension("png");
    output
}

/// Convert one SVG file to its sibling PNG at the given scale.
pub fn convert_file(input: &Path, scale: f32) -> Result<PathBuf, TranscodeError> {
    let svg = fs::read_to_string(input).map_err(|source| TranscodeError::ReadFailed {
        path: input.display().to_string(),
        source,
    })?;

    let rendered =
        render::rasterize(&svg, scale).map_err(|source| TranscodeError::RenderFailed {
            path: input.display().to_string(),
            source,
        })?;

    let output = png_sibling(input);
    fs::write(&output, &rendered.png).map_err(|source| TranscodeError::WriteFailed {
        path: output.display().to_string(),
        source,
    })?;

    Ok(output)
}

/// Convert every input independently; one file's failure never stops the
/// rest. The returned vec is index-aligned with `inputs`. The call blocks
/// until the whole batch is done.
pub fn convert_all(inputs: &[PathBuf], scale: f32) -> Vec<Result<PathBuf, TranscodeError>> {
    inputs
        .par_iter()
        .map(|input| {
            let result = convert_file(input, scale);
            match &result {
                Ok(output) => {
                    tracing::info!("Converted {} -> {}", input.display(), output.display());
                }
                Err(err) => {
                    tracing::warn!("Failed to convert {}: {err:#}", input.display());
                }
            }
            result
        })
        .collect()
}
