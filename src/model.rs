use serde::Serialize;

/// Everything the extractor pulls out of one class file.
///
/// Built once by `parser::load`, completed by `processor::run` (which adds
/// `declarations`) and then only read by the writers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModuleDescription {
    /// `None` when no line looks like `Name = ...`. Generated identifiers
    /// then carry an empty class part.
    pub class_name: Option<String>,
    pub includes: Vec<String>,
    pub init_block: Option<LifecycleBlock>,
    pub fini_block: Option<LifecycleBlock>,
    pub primitives: PrimitiveTable,
    pub declarations: Vec<String>,
}

impl ModuleDescription {
    /// Class name as it appears inside generated identifiers.
    pub fn class(&self) -> &str {
        self.class_name.as_deref().unwrap_or("")
    }
}

/// `@init{ ... }@` or `@fini{ ... }@` hook.
///
/// `body_lines[0]` is the synthesized C signature, the rest is copied from
/// the input (escaped).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifecycleBlock {
    pub function_name: String,
    pub body_lines: Vec<String>,
}

/// One `selector = primitive "@ ... @"` definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Primitive {
    /// Name of the generated C definition, e.g. `_Integer_at_put_`.
    pub mangled_name: String,
    pub is_class_side: bool,
    pub body_lines: Vec<String>,
}

/// Selector -> primitive map that remembers insertion order.
///
/// Re-inserting a selector replaces the entry where it already sits.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct PrimitiveTable {
    entries: Vec<(String, Primitive)>,
}

impl PrimitiveTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, selector: String, primitive: Primitive) {
        match self.entries.iter_mut().find(|(s, _)| *s == selector) {
            Some((_, slot)) => *slot = primitive,
            None => self.entries.push((selector, primitive)),
        }
    }

    pub fn get(&self, selector: &str) -> Option<&Primitive> {
        self.entries
            .iter()
            .find(|(s, _)| s == selector)
            .map(|(_, p)| p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Primitive)> {
        self.entries.iter().map(|(s, p)| (s.as_str(), p))
    }

    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(s, _)| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
