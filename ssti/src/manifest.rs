//!
//! # Black-Box Manifests
//!
//! A single file describing a black box, its binding formats and its ports.
//! Loadable from JSON, YAML or TOML.
//!
//! ```yaml
//! ports:
//!   - ["1", load, input]
//!   - ["2", state, output]
//! bbox:
//!   module: traffic_light_fsm
//!   lib: intersection
//!   ipc: sock
//!   driver_template: driver.py
//!   component_template: comp.hpp
//! binding:
//!   width: numeric
//!   input_format: "{sig} = int(signal[{sp}:{sl}])"
//!   output_format: "{sig} = output[{sp}:{sl}]"
//! ```
//!

// Std-Lib
use std::path::Path;

// Crates.io Imports
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// Local Imports
use crate::bbox::{BlackBox, Generator};
use crate::binding::FormatBinding;
use crate::error::BboxResult;
use crate::ports::{PortDecl, PortList};
use crate::utils::SerdeFile;

/// # Black-Box Manifest
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct BboxManifest {
    /// Port Declarations
    #[serde(default)]
    pub ports: Vec<PortDecl>,
    /// Black-Box Description
    pub bbox: BlackBox,
    /// Binding Formats
    pub binding: FormatBinding,
}
impl SerdeFile for BboxManifest {}

impl BboxManifest {
    /// Load from file `fname`, in the format indicated by its extension.
    /// Relative template paths are resolved against the manifest's directory.
    pub fn from_file(fname: impl AsRef<Path>) -> BboxResult<Self> {
        let fname = fname.as_ref();
        let mut manifest = <Self as SerdeFile>::load(fname)?;
        if let Some(dir) = fname.parent() {
            manifest.resolve_paths(dir);
        }
        Ok(manifest)
    }
    /// Make relative template paths relative to `dir`
    pub fn resolve_paths(&mut self, dir: impl AsRef<Path>) {
        let dir = dir.as_ref();
        for path in [
            &mut self.bbox.driver_template,
            &mut self.bbox.component_template,
        ] {
            if path.is_relative() {
                let joined = dir.join(&*path);
                *path = joined;
            }
        }
    }
    /// Classify our port declarations
    pub fn port_list(&self) -> BboxResult<PortList> {
        PortList::classify(&self.ports)
    }
    /// Create a [Generator] from our description and binding
    pub fn generator(&self) -> BboxResult<Generator<FormatBinding>> {
        Generator::new(self.bbox.clone(), self.binding.clone())
    }
}
