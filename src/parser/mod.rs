//! Line scanner that turns a class file into a [`ModuleDescription`].
//!
//! Every section (class name, includes, init, fini, primitives) makes its own
//! pass over the full line list. The scanners never fail: malformed input
//! yields a best-effort description and the C compiler sorts out the rest.
//!
//! Recognised markers (informal):
//!
//! ```text
//! Name = ( ...                  class name, first match wins
//! @include <header.h>           include target, `\'` becomes `"`
//! @init{ ... }@                 load hook
//! @fini{ ... }@                 unload hook
//! ----                          following primitives are class-side
//! sel = primitive "@ ... @"     primitive body
//! ```

pub mod blocks;
pub mod primitives;

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::ModuleDescription;
use blocks::{BlockKind, lifecycle_block};

static CLASS_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\w+\s*=").unwrap());
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());
static INCLUDE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"@include\s+([\w.<>/\\']+)"#).unwrap());

/// Extract everything but the declarations from `source`.
pub fn load(source: &str) -> ModuleDescription {
    info!("Input loaded, size: {} bytes", source.len());
    let lines: Vec<&str> = source.lines().collect();

    let class_name = class_name(&lines);
    match &class_name {
        Some(name) => debug!("class name: {name}"),
        None => warn!("no `Name = ...` line found, generated identifiers will be malformed"),
    }
    let class = class_name.as_deref().unwrap_or("");

    let includes = includes(&lines);
    let init_block = lifecycle_block(&lines, class, BlockKind::Init);
    let fini_block = lifecycle_block(&lines, class, BlockKind::Fini);
    let primitives = primitives::primitives(&lines, class);

    debug!(
        "{} includes, init: {}, fini: {}, {} primitives",
        includes.len(),
        init_block.is_some(),
        fini_block.is_some(),
        primitives.len()
    );

    ModuleDescription {
        class_name,
        includes,
        init_block,
        fini_block,
        primitives,
        declarations: Vec::new(),
    }
}

/// First word of the first line that contains `word =`.
pub fn class_name(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .find(|line| CLASS_LINE.is_match(line))
        .and_then(|line| WORD.find(line))
        .map(|m| m.as_str().to_string())
}

/// Targets of all `@include` lines, in file order.
pub fn includes(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .filter(|line| line.contains("@include"))
        .filter_map(|line| match INCLUDE.captures(line) {
            Some(caps) => Some(unescape(&caps[1])),
            None => {
                warn!("skipping `@include` without a target: {}", line.trim());
                None
            }
        })
        .collect()
}

/// The input spells C double quotes as `\'`.
pub(crate) fn unescape(text: &str) -> String {
    text.replace("\\'", "\"")
}
