//!
//! # Width Parsers
//!
//! Hardware-description front ends spell signal widths differently.
//! A [WidthParser] maps one front end's declared type strings to bit-widths.
//!

// Crates.io Imports
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// Local Imports
use crate::error::{BboxError, BboxResult};
use crate::ports::WIDTH_DELIM;
use crate::utils::{enumstr, EnumStr};

///
/// # Width Parser
///
/// Maps a declared type string to its (positive) bit-width.
/// Implementations must be pure.
///
pub trait WidthParser {
    fn width_of(&self, declared_type: &str) -> BboxResult<usize>;
}
impl<F> WidthParser for F
where
    F: Fn(&str) -> BboxResult<usize>,
{
    fn width_of(&self, declared_type: &str) -> BboxResult<usize> {
        self(declared_type)
    }
}

/// Parse a strictly-positive decimal width from `txt`, reporting failures against `declared_type`
pub(crate) fn positive(txt: &str, declared_type: &str) -> BboxResult<usize> {
    match txt.trim().parse::<usize>() {
        Ok(w) if w > 0 => Ok(w),
        _ => Err(BboxError::width(declared_type)),
    }
}

/// # Numeric Width Parser
/// The declared type *is* the bit count, e.g. `"6"`.
/// An explicit `//`-delimited width suffix takes precedence.
#[derive(Clone, Copy, Debug, Default)]
pub struct NumericWidth;
impl WidthParser for NumericWidth {
    fn width_of(&self, declared_type: &str) -> BboxResult<usize> {
        match declared_type.rsplit_once(WIDTH_DELIM) {
            Some((_, w)) => positive(w, declared_type),
            None => positive(declared_type, declared_type),
        }
    }
}

/// # Bracketed Width Parser
///
/// For angle-bracketed type annotations such as `"<sc_uint<6>>"` or `"<sc_bv<12>>"`,
/// in which the width is the innermost bracketed integer.
/// Single-bit `bool` types, bracketed or not, are one bit wide.
/// An explicit `//`-delimited width suffix takes precedence.
#[derive(Clone, Copy, Debug, Default)]
pub struct BracketWidth;
impl WidthParser for BracketWidth {
    fn width_of(&self, declared_type: &str) -> BboxResult<usize> {
        if let Some((_, w)) = declared_type.rsplit_once(WIDTH_DELIM) {
            return positive(w, declared_type);
        }
        let inner = declared_type
            .trim()
            .trim_start_matches('<')
            .trim_end_matches('>')
            .trim();
        if inner == "bool" {
            return Ok(1);
        }
        // Innermost bracket pair, e.g. `sc_uint<6` => `6`
        let start = inner.rfind('<').ok_or_else(|| BboxError::width(declared_type))?;
        positive(&inner[start + 1..], declared_type)
    }
}

enumstr!(
    /// # Stock Width-Parser Selector
    WidthKind {
        Numeric: "numeric",
        Bracket: "bracket",
    }
);
impl WidthKind {
    /// Get the stock [WidthParser] for this kind
    pub fn parser(&self) -> &'static dyn WidthParser {
        match self {
            Self::Numeric => &NumericWidth,
            Self::Bracket => &BracketWidth,
        }
    }
}
impl Default for WidthKind {
    fn default() -> Self {
        Self::Numeric
    }
}
