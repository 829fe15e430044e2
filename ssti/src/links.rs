//!
//! # Link Descriptors
//!
//! The two named links a generated component exposes to the surrounding simulation topology.
//!

// Crates.io Imports
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Event type carried on both links
pub const EVENT_TYPE: &str = "sst.Interfaces.StringEvent";
/// Separator between rendered descriptors
pub const DESC_SEP: &str = ",\n        ";

/// # Link Descriptor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkDescriptor {
    pub name: String,
    pub description: String,
    pub event_type: &'static str,
}
impl LinkDescriptor {
    /// Render as a component port-declaration entry
    pub fn render(&self) -> String {
        format!(
            "{{ \"{}\", \"{}\", {{ \"{}\" }}}}",
            self.name, self.description, self.event_type
        )
    }
}

/// # Optional Link-Description Overrides
/// Replace the default `"<module> data in"` and `"<module> data out"` descriptions.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct LinkDescriptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub din: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dout: Option<String>,
}

/// Create the data-in and data-out [LinkDescriptor]s of `module`
pub fn link_descriptors(
    module: &str,
    overrides: Option<&LinkDescriptions>,
) -> [LinkDescriptor; 2] {
    let desc = |custom: Option<&String>, suffix: &str| match custom {
        Some(d) => d.clone(),
        None => format!("{}{}", module, suffix),
    };
    let din = overrides.and_then(|o| o.din.as_ref());
    let dout = overrides.and_then(|o| o.dout.as_ref());
    [
        LinkDescriptor {
            name: format!("{}_din", module),
            description: desc(din, " data in"),
            event_type: EVENT_TYPE,
        },
        LinkDescriptor {
            name: format!("{}_dout", module),
            description: desc(dout, " data out"),
            event_type: EVENT_TYPE,
        },
    ]
}

/// Render `links` into a single block, as substituted into the component's `ports` placeholder
pub fn render_link_descriptors(links: &[LinkDescriptor]) -> String {
    links
        .iter()
        .map(LinkDescriptor::render)
        .collect::<Vec<_>>()
        .join(DESC_SEP)
}
