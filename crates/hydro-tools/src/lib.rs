//! Convert `.apf` model assets to Wavefront OBJ.
//!
//! This crate wraps [`hydro_decode`] with file handling: read the asset,
//! decode it, report what was found and write the OBJ.
//!
//! # Example
//!
//! ```no_run
//! use hydro_tools::{ModelVariant, convert_model};
//!
//! let summary = convert_model("boat.mdl".as_ref(), None, ModelVariant::Animated)?;
//! println!("wrote {}", summary.output.display());
//! # Ok::<(), hydro_tools::Error>(())
//! ```

mod error;

pub mod obj;
pub mod report;

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

pub use error::{Error, Result};
pub use hydro_decode::{DecodeError, DecodedModel, Mesh, ModelVariant};

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSummary {
    pub output: PathBuf,
    pub vertex_count: usize,
    pub triangle_count: usize,
}

/// Default OBJ path for an input: the input path with `.obj` appended.
///
/// The original extension is kept, so `boat.mdl` becomes `boat.mdl.obj`.
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut path = OsString::from(input.as_os_str());
    path.push(".obj");
    PathBuf::from(path)
}

/// Decode a model file and report what it contains, without writing anything.
pub fn inspect_model(input: &Path, variant: ModelVariant) -> Result<DecodedModel> {
    tracing::info!("Opening {}", input.display());
    let data = fs::read(input).map_err(|source| Error::FileOpen {
        path: input.to_path_buf(),
        source,
    })?;
    tracing::debug!(bytes = data.len(), "read input");

    let model = hydro_decode::decode(&data, variant).map_err(|source| Error::Decode {
        path: input.to_path_buf(),
        source,
    })?;
    report::model_summary(input, variant, &model);
    Ok(model)
}

/// Decode a model file and export it as OBJ.
///
/// With no `output`, the OBJ is written next to the input (see
/// [`default_output_path`]). Nothing is written unless decoding succeeds.
pub fn convert_model(
    input: &Path,
    output: Option<&Path>,
    variant: ModelVariant,
) -> Result<ConvertSummary> {
    let model = inspect_model(input, variant)?;

    let output = output.map_or_else(|| default_output_path(input), Path::to_path_buf);
    obj::write_obj_file(&model.mesh, &output).map_err(|source| Error::FileWrite {
        path: output.clone(),
        source,
    })?;
    tracing::info!("Wrote {}", output.display());

    Ok(ConvertSummary {
        output,
        vertex_count: model.mesh.vertex_count(),
        triangle_count: model.mesh.triangle_count(),
    })
}
