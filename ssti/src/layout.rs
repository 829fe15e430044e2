//!
//! # Transport-Buffer Layout Allocation
//!
//! Packs a set of ports into one shared transport buffer.
//! Data ports are placed first, in declaration order, each at the running cursor.
//! Clocks always trail every data port, so that binding code can find them
//! without first decoding data-signal lengths.
//!

// Crates.io Imports
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// Local Imports
use crate::error::{BboxError, BboxResult};
use crate::ports::Port;
use crate::template::{Artifact, Template, TemplateContext};
use crate::width::WidthParser;

/// Separator between rendered binding lines
pub const LINE_SEP: &str = "\n        ";

///
/// # Binding-Line Formats
///
/// * `data` is rendered once per data port, with placeholders
///   `{sp}` (start position), `{sl}` (length, or end position in splice mode) and `{sig}` (port name).
/// * `clock` is rendered once per clock, with placeholders `{sp}` and `{sig}`.
///
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct LineFormats {
    pub data: String,
    pub clock: String,
}
impl LineFormats {
    pub fn new(data: impl Into<String>, clock: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            clock: clock.into(),
        }
    }
}

/// # Layout Entry
/// Position of a single port within the transport buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutEntry<'p> {
    pub port: &'p Port,
    pub offset: usize,
    pub width: usize,
}

/// # Layout Allocation Options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Offset of the first allocated port
    pub start: usize,
    /// Splice mode: `{sl}` is an absolute end position, and one trailing buffer unit is reserved
    pub splice: bool,
}

///
/// # Layout
///
/// Result of [allocate]: per-port entries, their rendered binding text,
/// and the total transport-buffer size.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout<'p> {
    pub entries: Vec<LayoutEntry<'p>>,
    pub text: String,
    pub buf_size: usize,
}

///
/// Allocate buffer positions for data-ports `ports`, followed by `clocks`.
///
/// Data-port widths come from `widths`; clock widths from their declared-type suffixes.
///
pub fn allocate<'p>(
    ports: impl IntoIterator<Item = &'p Port>,
    clocks: impl IntoIterator<Item = &'p Port>,
    widths: &dyn WidthParser,
    opts: LayoutOptions,
    formats: &LineFormats,
) -> BboxResult<Layout<'p>> {
    let data_fmt = Template::parse(Artifact::Driver, &formats.data)?;
    let clock_fmt = Template::parse(Artifact::Driver, &formats.clock)?;

    let mut cursor = opts.start;
    let mut entries = Vec::new();
    let mut lines = Vec::new();

    for port in ports {
        let width = widths.width_of(&port.declared_type)?;
        let end = cursor
            .checked_add(width)
            .ok_or_else(|| BboxError::width(&port.declared_type))?;
        let sl = if opts.splice { end } else { width };
        let ctx = TemplateContext::new()
            .with("sp", cursor)
            .with("sl", sl)
            .with("sig", &port.name);
        lines.push(data_fmt.fill(&ctx)?);
        debug!("Allocated {} at [{}, {})", port.name, cursor, end);
        entries.push(LayoutEntry {
            port,
            offset: cursor,
            width,
        });
        cursor = end;
    }
    for clock in clocks {
        let width = clock.suffix_width()?;
        let end = cursor
            .checked_add(width)
            .ok_or_else(|| BboxError::width(&clock.declared_type))?;
        let ctx = TemplateContext::new()
            .with("sp", cursor)
            .with("sig", &clock.name);
        lines.push(clock_fmt.fill(&ctx)?);
        debug!("Allocated clock {} at [{}, {})", clock.name, cursor, end);
        entries.push(LayoutEntry {
            port: clock,
            offset: cursor,
            width,
        });
        cursor = end;
    }

    let buf_size = if opts.splice {
        let msg = format!("Layout overflows the transport buffer at offset {}", cursor);
        cursor.checked_add(1).ok_or_else(|| BboxError::msg(msg))?
    } else {
        cursor
    };
    Ok(Layout {
        entries,
        text: lines.join(LINE_SEP),
        buf_size,
    })
}
