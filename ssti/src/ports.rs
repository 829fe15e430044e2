//!
//! # Port Model
//!
//! Classification of raw `(declared_type, name, category)` port declarations
//! into the ordered clock, input, output and inout groups of a [PortList].
//!

// Crates.io Imports
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// Local Imports
use crate::error::{BboxError, BboxResult};
use crate::utils::{enumstr, EnumStr};
use crate::width::positive;

/// Delimiter separating a declared type from an embedded bit-width, as in `"<bool>//1"`
pub const WIDTH_DELIM: &str = "//";

enumstr!(
    /// # Port Categories
    /// Listed in the priority order of a flattened [PortList].
    PortCategory {
        Clock: "clock",
        Input: "input",
        Output: "output",
        Inout: "inout",
    }
);

///
/// # Port Declaration
///
/// Raw, unvalidated `(declared_type, name, category)` triple,
/// serialized as a three-element sequence.
///
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct PortDecl(pub String, pub String, pub String);
impl PortDecl {
    pub fn new(
        declared_type: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self(declared_type.into(), name.into(), category.into())
    }
}
impl<A: Into<String>, B: Into<String>, C: Into<String>> From<(A, B, C)> for PortDecl {
    fn from(t: (A, B, C)) -> Self {
        Self::new(t.0, t.1, t.2)
    }
}

/// # Classified Port
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Port {
    /// Declared type, including any width suffix
    pub declared_type: String,
    /// Port Name
    pub name: String,
    /// Port Category
    pub category: PortCategory,
}
impl Port {
    /// Declared type with any width suffix removed, for textual rendering
    pub fn display_type(&self) -> &str {
        match self.declared_type.split_once(WIDTH_DELIM) {
            Some((ty, _)) => ty,
            None => &self.declared_type,
        }
    }
    /// Width embedded after the last delimiter, or the whole declared type if none.
    /// Used for clocks, whose widths are never routed through a [crate::WidthParser].
    pub fn suffix_width(&self) -> BboxResult<usize> {
        let txt = match self.declared_type.rsplit_once(WIDTH_DELIM) {
            Some((_, w)) => w,
            None => &self.declared_type,
        };
        positive(txt, &self.declared_type)
    }
}

///
/// # Port List
///
/// Ports grouped by [PortCategory], each group in declaration order.
/// Created once by [PortList::classify] and immutable thereafter.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PortList {
    clocks: Vec<Port>,
    inputs: Vec<Port>,
    outputs: Vec<Port>,
    inouts: Vec<Port>,
}
impl PortList {
    /// Classify raw port declarations.
    /// Fails with [BboxError::PortType] on the first unrecognized category.
    pub fn classify<'d>(decls: impl IntoIterator<Item = &'d PortDecl>) -> BboxResult<Self> {
        let mut list = Self::default();
        for PortDecl(declared_type, name, category) in decls {
            let cat = PortCategory::from_str(category).ok_or_else(|| BboxError::PortType {
                name: name.clone(),
                category: category.clone(),
            })?;
            let port = Port {
                declared_type: declared_type.clone(),
                name: name.clone(),
                category: cat,
            };
            list.group_mut(cat).push(port);
        }
        Ok(list)
    }
    fn group_mut(&mut self, cat: PortCategory) -> &mut Vec<Port> {
        match cat {
            PortCategory::Clock => &mut self.clocks,
            PortCategory::Input => &mut self.inputs,
            PortCategory::Output => &mut self.outputs,
            PortCategory::Inout => &mut self.inouts,
        }
    }
    /// Get the group of ports of category `cat`
    pub fn group(&self, cat: PortCategory) -> &[Port] {
        match cat {
            PortCategory::Clock => &self.clocks,
            PortCategory::Input => &self.inputs,
            PortCategory::Output => &self.outputs,
            PortCategory::Inout => &self.inouts,
        }
    }
    pub fn clocks(&self) -> &[Port] {
        &self.clocks
    }
    pub fn inputs(&self) -> &[Port] {
        &self.inputs
    }
    pub fn outputs(&self) -> &[Port] {
        &self.outputs
    }
    pub fn inouts(&self) -> &[Port] {
        &self.inouts
    }
    /// Iterate over all ports in priority order: clocks, inputs, outputs, inouts
    pub fn iter(&self) -> impl Iterator<Item = &Port> {
        PortCategory::ALL.iter().flat_map(move |c| self.group(*c).iter())
    }
    pub fn len(&self) -> usize {
        self.clocks.len() + self.inputs.len() + self.outputs.len() + self.inouts.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
