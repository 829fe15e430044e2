//!
//! # Template Rendering
//!
//! Flat, logic-free placeholder substitution.
//!
//! Templates are plain text in which `{name}` marks a placeholder,
//! and `{{` and `}}` stand for literal braces.
//! There are no loops, conditionals or expressions;
//! anything repetitive is rendered into a single context value before substitution.
//!

// Std-Lib
use std::collections::BTreeMap;
use std::path::Path;

// Crates.io Imports
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// Local Imports
use crate::error::{BboxError, BboxResult};
use crate::utils::{enumstr, EnumStr};

enumstr!(
    /// # Generated Artifacts
    Artifact {
        Driver: "driver",
        Component: "component",
    }
);
impl Artifact {
    /// Keys every context for this artifact must provide
    pub fn required_keys(&self) -> &'static [&'static str] {
        match self {
            Self::Driver => &[
                "module",
                "lib",
                "desc",
                "module_dir",
                "lib_dir",
                "ipc",
                "buf_size",
                "sender",
                "receiver",
                "inputs",
                "outputs",
            ],
            Self::Component => &[
                "lib_dir",
                "module",
                "lib",
                "desc",
                "ports",
                "sig_type",
                "buf_size",
                "sender",
                "receiver",
            ],
        }
    }
}

///
/// # Template Context
///
/// Mapping from placeholder name to its substituted text.
///
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct TemplateContext(BTreeMap<String, String>);
impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }
    /// Insert (or replace) the value of `key`
    pub fn insert(&mut self, key: impl Into<String>, val: impl ToString) -> &mut Self {
        self.0.insert(key.into(), val.to_string());
        self
    }
    /// Builder-style insertion
    pub fn with(mut self, key: impl Into<String>, val: impl ToString) -> Self {
        self.insert(key, val);
        self
    }
    /// Add all entries of `other`, which win on conflicts
    pub fn extend(&mut self, other: TemplateContext) {
        self.0.extend(other.0);
    }
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|s| s.as_str())
    }
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|s| s.as_str())
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for TemplateContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ctx = Self::new();
        for (k, v) in iter {
            ctx.insert(k, v);
        }
        ctx
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Text(String),
    Key { name: String, line: usize },
}

///
/// # Parsed Template
///
/// Text broken into literal runs and placeholders, ready for any number of [Template::fill] calls.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    artifact: Artifact,
    segments: Vec<Segment>,
}
impl Template {
    /// Parse template-text `src`
    pub fn parse(artifact: Artifact, src: &str) -> BboxResult<Self> {
        let syntax = |line: usize, msg: &str| BboxError::TemplateSyntax {
            artifact,
            line,
            msg: msg.to_string(),
        };
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut line = 1;
        let mut chars = src.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    text.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    text.push('}');
                }
                '}' => return Err(syntax(line, "single `}` outside a placeholder")),
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(ch) if ch.is_ascii_alphanumeric() || ch == '_' => name.push(ch),
                            Some(ch) => {
                                let msg = format!("invalid character {:?} in placeholder", ch);
                                return Err(syntax(line, &msg));
                            }
                            None => return Err(syntax(line, "unterminated placeholder")),
                        }
                    }
                    if name.is_empty() {
                        return Err(syntax(line, "empty placeholder"));
                    }
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Key { name, line });
                }
                '\n' => {
                    line += 1;
                    text.push(c);
                }
                _ => text.push(c),
            }
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }
        Ok(Self { artifact, segments })
    }
    /// Load and parse the template file at `path`.
    /// Fails with [BboxError::TemplateNotFound] if there is no such file.
    pub fn load(artifact: Artifact, path: impl AsRef<Path>) -> BboxResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(BboxError::TemplateNotFound {
                artifact,
                path: path.to_path_buf(),
            });
        }
        let src = std::fs::read_to_string(path)?;
        Self::parse(artifact, &src)
    }
    /// Names of all placeholders, in order of appearance (with repeats)
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Key { name, .. } => Some(name.as_str()),
            Segment::Text(_) => None,
        })
    }
    /// Substitute `ctx` into our placeholders.
    /// Every placeholder is checked against `ctx` before any text is produced.
    pub fn fill(&self, ctx: &TemplateContext) -> BboxResult<String> {
        if let Some(key) = self.placeholders().find(|k| !ctx.contains_key(k)) {
            return Err(BboxError::Placeholder {
                artifact: self.artifact,
                key: key.to_string(),
            });
        }
        let mut rv = String::new();
        for seg in self.segments.iter() {
            match seg {
                Segment::Text(t) => rv.push_str(t),
                Segment::Key { name, .. } => rv.push_str(ctx.get(name).unwrap_or_default()),
            }
        }
        Ok(rv)
    }
    /// Render with a full artifact context.
    /// Checks `ctx` against the artifact's [Artifact::required_keys] schema, then fills.
    pub fn render(&self, ctx: &TemplateContext) -> BboxResult<String> {
        let artifact = self.artifact;
        if let Some(key) = artifact.required_keys().iter().find(|k| !ctx.contains_key(k)) {
            return Err(BboxError::Placeholder {
                artifact,
                key: key.to_string(),
            });
        }
        let rv = self.fill(ctx)?;
        debug!(
            "Rendered {} template: {} placeholders, {} bytes",
            artifact,
            self.placeholders().count(),
            rv.len()
        );
        Ok(rv)
    }
}

/// Load the `artifact` template at `path` and render it with `ctx`
pub fn render(
    artifact: Artifact,
    path: impl AsRef<Path>,
    ctx: &TemplateContext,
) -> BboxResult<String> {
    Template::load(artifact, path)?.render(ctx)
}
