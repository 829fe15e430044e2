//!
//! # Black-Box Generator
//!
//! Ties the port model, layout allocator, link descriptors and template renderer
//! into the pipeline producing a black box's driver and component artifacts.
//!

// Std-Lib
use std::path::{Path, PathBuf};

// Crates.io Imports
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// Local Imports
use crate::binding::{Binding, Direction};
use crate::emit::{self, artifact_path, Artifacts, Emitted};
use crate::error::{BboxError, BboxResult};
use crate::ipc::{IpcProtocol, SIGNAL_IO};
use crate::layout::{allocate, Layout};
use crate::links::{link_descriptors, render_link_descriptors, LinkDescriptions};
use crate::ports::{Port, PortList};
use crate::template::{Artifact, Template, TemplateContext};

///
/// # Black-Box Description
///
/// Identity, transport and template settings of a single black box.
///
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct BlackBox {
    /// Module Name
    pub module: String,
    /// SST Library Name
    pub lib: String,
    /// IPC Protocol, one of `sock` or `zmq`
    pub ipc: String,
    /// Driver Template Path
    pub driver_template: PathBuf,
    /// Component Template Path
    pub component_template: PathBuf,
    /// Description of the SST model
    #[serde(default)]
    pub desc: String,
    /// Directory of the hardware model's sources, as seen from the generated driver
    #[serde(default)]
    pub module_dir: String,
    /// Directory of the SSTI library, as seen from the generated artifacts
    #[serde(default)]
    pub lib_dir: String,
    /// Link-Description Overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_desc: Option<LinkDescriptions>,
}

/// # Input & Output Layouts of a [PortList]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layouts<'p> {
    pub inputs: Layout<'p>,
    pub outputs: Layout<'p>,
}
impl<'p> Layouts<'p> {
    /// Size of the shared transport buffer, large enough for either direction
    pub fn buf_size(&self) -> usize {
        self.inputs.buf_size.max(self.outputs.buf_size)
    }
}

///
/// # Black-Box Generator
///
/// Created once per black box with a [Binding] provider,
/// and then handed a classified [PortList] to render or generate.
///
#[derive(Debug)]
pub struct Generator<B: Binding> {
    bbox: BlackBox,
    ipc: IpcProtocol,
    binding: B,
}
impl<B: Binding> Generator<B> {
    /// Create a new [Generator].
    /// Fails with [BboxError::Configuration] if `bbox.ipc` is not a supported protocol,
    /// or if `bbox.module` cannot serve as a file-name stem.
    pub fn new(bbox: BlackBox, binding: B) -> BboxResult<Self> {
        let ipc = IpcProtocol::parse(&bbox.ipc)?;
        let module = bbox.module.as_str();
        if module.contains(&['/', '\\'][..]) || module == "." || module == ".." {
            return Err(BboxError::Configuration(format!(
                "Invalid module name `{}`: must not contain path separators",
                module
            )));
        }
        Ok(Self { bbox, ipc, binding })
    }
    pub fn bbox(&self) -> &BlackBox {
        &self.bbox
    }
    pub fn ipc(&self) -> IpcProtocol {
        self.ipc
    }
    pub fn binding(&self) -> &B {
        &self.binding
    }
    /// Lay out `ports` in both directions.
    /// Inputs are followed by inouts and then clocks; outputs are followed by inouts.
    pub fn layouts<'p>(&self, ports: &'p PortList) -> BboxResult<Layouts<'p>> {
        let widths = self.binding.width_parser();
        let opts = self.binding.layout_options();
        let inputs = allocate(
            ports.inputs().iter().chain(ports.inouts()),
            ports.clocks(),
            widths,
            opts,
            &self.binding.formats(Direction::Inputs),
        )?;
        let outputs = allocate(
            ports.outputs().iter().chain(ports.inouts()),
            std::iter::empty::<&Port>(),
            widths,
            opts,
            &self.binding.formats(Direction::Outputs),
        )?;
        debug!(
            "{}: input buffer {}, output buffer {}",
            self.bbox.module, inputs.buf_size, outputs.buf_size
        );
        Ok(Layouts { inputs, outputs })
    }
    /// Metadata shared by both artifacts
    fn base_context(&self, layouts: &Layouts) -> TemplateContext {
        TemplateContext::new()
            .with("module", &self.bbox.module)
            .with("lib", &self.bbox.lib)
            .with("desc", &self.bbox.desc)
            .with("lib_dir", &self.bbox.lib_dir)
            .with("buf_size", layouts.buf_size())
            .with("sender", SIGNAL_IO)
            .with("receiver", SIGNAL_IO)
    }
    /// Context substituted into the component template
    pub fn component_context(&self, layouts: &Layouts) -> TemplateContext {
        let links = link_descriptors(&self.bbox.module, self.bbox.link_desc.as_ref());
        self.base_context(layouts)
            .with("ports", render_link_descriptors(&links))
            .with("sig_type", self.ipc.sig_type())
    }
    /// Context substituted into the driver template.
    /// Binding-provider definitions are included, but never replace the generator's own keys.
    pub fn driver_context(
        &self,
        ports: &PortList,
        layouts: &Layouts,
    ) -> BboxResult<TemplateContext> {
        let mut ctx = self.binding.driver_defs(ports)?;
        ctx.extend(
            self.base_context(layouts)
                .with("module_dir", &self.bbox.module_dir)
                .with("ipc", self.ipc)
                .with("inputs", &layouts.inputs.text)
                .with("outputs", &layouts.outputs.text),
        );
        Ok(ctx)
    }
    /// Render both artifacts for `ports`.
    /// Fails with [BboxError::PortsNotSet] if `ports` is empty.
    pub fn render(&self, ports: &PortList) -> BboxResult<Artifacts> {
        if ports.is_empty() {
            return Err(BboxError::PortsNotSet);
        }
        let driver_tmpl = Template::load(Artifact::Driver, &self.bbox.driver_template)?;
        let comp_tmpl = Template::load(Artifact::Component, &self.bbox.component_template)?;
        let layouts = self.layouts(ports)?;
        let driver = driver_tmpl.render(&self.driver_context(ports, &layouts)?)?;
        let component = comp_tmpl.render(&self.component_context(&layouts))?;
        Ok(Artifacts { driver, component })
    }
    /// Output paths of the two artifacts under `root`
    pub fn destinations(&self, root: impl AsRef<Path>) -> Emitted {
        let root = root.as_ref();
        let module = &self.bbox.module;
        Emitted {
            driver: artifact_path(root, module, Artifact::Driver, &self.bbox.driver_template),
            component: artifact_path(
                root,
                module,
                Artifact::Component,
                &self.bbox.component_template,
            ),
        }
    }
    /// Render both artifacts for `ports`, and write them under `root`.
    /// Returns the paths written.
    pub fn generate(&self, ports: &PortList, root: impl AsRef<Path>) -> BboxResult<Emitted> {
        let artifacts = self.render(ports)?;
        let dest = self.destinations(&root);
        emit::emit(root, &artifacts, dest)
    }
}
