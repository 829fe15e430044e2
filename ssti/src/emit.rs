//!
//! # Artifact Emission
//!

// Std-Lib
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

// Crates.io Imports
use log::info;

// Local Imports
use crate::error::BboxResult;
use crate::template::Artifact;

/// Subdirectory, under the output root, holding all generated black boxes
pub const BBOX_DIR: &str = "blackboxes";

/// # Rendered Driver & Component Text
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifacts {
    pub driver: String,
    pub component: String,
}

/// # Paths of an Emitted Driver & Component
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Emitted {
    pub driver: PathBuf,
    pub component: PathBuf,
}

/// Output path of `module`'s `artifact` under `root`.
/// The file extension follows that of the artifact's template, if it has one.
pub fn artifact_path(
    root: impl AsRef<Path>,
    module: &str,
    artifact: Artifact,
    template: impl AsRef<Path>,
) -> PathBuf {
    let suffix = match artifact {
        Artifact::Driver => "driver",
        Artifact::Component => "comp",
    };
    let mut fname = format!("{}_{}", module, suffix);
    if let Some(ext) = template.as_ref().extension().and_then(|e| e.to_str()) {
        fname.push('.');
        fname.push_str(ext);
    }
    root.as_ref().join(BBOX_DIR).join(fname)
}

///
/// Write `artifacts` to the paths in `dest`, driver first.
///
/// Creates the [BBOX_DIR] directory under `root` if it does not yet exist,
/// and overwrites any existing files. The two writes are not atomic:
/// if the component write fails, the driver file remains.
///
pub fn emit(root: impl AsRef<Path>, artifacts: &Artifacts, dest: Emitted) -> BboxResult<Emitted> {
    std::fs::create_dir_all(root.as_ref().join(BBOX_DIR))?;
    write(&dest.driver, &artifacts.driver)?;
    write(&dest.component, &artifacts.component)?;
    Ok(dest)
}

/// Write `content` to file `path`
fn write(path: &Path, content: &str) -> BboxResult<()> {
    let mut file = BufWriter::new(std::fs::File::create(path)?);
    file.write_all(content.as_bytes())?;
    file.flush()?;
    info!("Wrote {:?}", path);
    Ok(())
}
