//!
//! # Binding Providers
//!
//! A [Binding] supplies everything toolchain-specific about the driver artifact:
//! how port widths are spelled, the text of each buffer-binding line,
//! and any extra definitions its template needs.
//!

// Crates.io Imports
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// Local Imports
use crate::error::BboxResult;
use crate::layout::{LineFormats, LayoutOptions};
use crate::ports::PortList;
use crate::template::{Artifact, Template, TemplateContext};
use crate::utils::{enumstr, EnumStr};
use crate::width::{WidthKind, WidthParser};

enumstr!(
    /// # Transfer Directions, relative to the driven hardware model
    Direction {
        Inputs: "inputs",
        Outputs: "outputs",
    }
);

/// Separator between rendered port declarations
pub const PORT_SEP: &str = "\n    ";

///
/// # Binding Provider
///
pub trait Binding {
    /// Width parser for this toolchain's declared types
    fn width_parser(&self) -> &dyn WidthParser;
    /// Binding-line formats for direction `dir`
    fn formats(&self, dir: Direction) -> LineFormats;
    /// Buffer position of the first allocated port
    fn start_offset(&self) -> usize {
        0
    }
    /// Whether to lay out in splice mode
    fn splice(&self) -> bool {
        false
    }
    /// Layout options combining [Binding::start_offset] and [Binding::splice]
    fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            start: self.start_offset(),
            splice: self.splice(),
        }
    }
    /// Driver-specific template definitions
    fn driver_defs(&self, _ports: &PortList) -> BboxResult<TemplateContext> {
        Ok(TemplateContext::new())
    }
}

///
/// # Format-String Binding
///
/// A [Binding] configured entirely by data, typically loaded as part of a [crate::BboxManifest].
///
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct FormatBinding {
    /// Width-parser selection
    #[serde(default)]
    pub width: WidthKind,
    /// Buffer position of the first allocated port
    #[serde(default)]
    pub start: usize,
    /// Splice-mode layout
    #[serde(default)]
    pub splice: bool,
    /// Input binding-line format
    pub input_format: String,
    /// Output binding-line format
    pub output_format: String,
    /// Clock binding-line format
    #[serde(default)]
    pub clock_format: String,
    /// Per-port declaration format, with placeholders `{type}` and `{sig}`.
    /// Rendered over every port into the driver's `ports` placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_format: Option<String>,
    /// Additional driver-template definitions
    #[serde(default, skip_serializing_if = "TemplateContext::is_empty")]
    pub defs: TemplateContext,
}
impl Binding for FormatBinding {
    fn width_parser(&self) -> &dyn WidthParser {
        self.width.parser()
    }
    fn formats(&self, dir: Direction) -> LineFormats {
        let data = match dir {
            Direction::Inputs => &self.input_format,
            Direction::Outputs => &self.output_format,
        };
        LineFormats::new(data.clone(), self.clock_format.clone())
    }
    fn start_offset(&self) -> usize {
        self.start
    }
    fn splice(&self) -> bool {
        self.splice
    }
    fn driver_defs(&self, ports: &PortList) -> BboxResult<TemplateContext> {
        let mut defs = self.defs.clone();
        if let Some(ref fmt) = self.port_format {
            let fmt = Template::parse(Artifact::Driver, fmt)?;
            let mut decls = Vec::with_capacity(ports.len());
            for port in ports.iter() {
                let ctx = TemplateContext::new()
                    .with("type", port.display_type())
                    .with("sig", &port.name);
                decls.push(fmt.fill(&ctx)?);
            }
            defs.insert("ports", decls.join(PORT_SEP));
        }
        Ok(defs)
    }
}
