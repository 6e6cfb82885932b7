//! `@init{ ... }@` / `@fini{ ... }@` extraction.

use log::{debug, warn};

use super::unescape;
use crate::model::LifecycleBlock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Init,
    Fini,
}

impl BlockKind {
    fn open_marker(self) -> &'static str {
        match self {
            BlockKind::Init => "@init{",
            BlockKind::Fini => "@fini{",
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            BlockKind::Init => "init",
            BlockKind::Fini => "fini",
        }
    }

    /// `__<class>_init` / `__<class>_fini`
    pub fn function_name(self, class: &str) -> String {
        format!("__{}_{}", class, self.suffix())
    }
}

const CLOSE_MARKER: &str = "}@";

#[derive(Debug)]
enum State {
    Outside,
    Inside(LifecycleBlock),
}

/// Scan for one lifecycle block of the given kind.
///
/// The opening marker line itself is dropped and replaced by the C
/// signature. A later block of the same kind replaces an earlier one. An
/// unterminated block swallows the rest of the file and is returned without
/// its closing brace.
pub fn lifecycle_block(lines: &[&str], class: &str, kind: BlockKind) -> Option<LifecycleBlock> {
    let mut found = None;
    let mut state = State::Outside;

    for line in lines {
        state = match state {
            State::Outside if line.contains(kind.open_marker()) => {
                let function_name = kind.function_name(class);
                debug!("opening {function_name}");
                State::Inside(LifecycleBlock {
                    body_lines: vec![format!("void {function_name}(void){{")],
                    function_name,
                })
            }
            State::Outside => State::Outside,
            State::Inside(mut block) if line.contains(CLOSE_MARKER) => {
                block
                    .body_lines
                    .push(unescape(&line.replacen(CLOSE_MARKER, "}", 1)));
                found = Some(block);
                State::Outside
            }
            State::Inside(mut block) => {
                block.body_lines.push(unescape(line));
                State::Inside(block)
            }
        };
    }

    if let State::Inside(block) = state {
        warn!("{} is never closed with `}}@`", block.function_name);
        found = Some(block);
    }

    found
}
