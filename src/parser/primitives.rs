//! Extraction of `selector = primitive "@ ... @"` bodies.

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use super::unescape;
use crate::model::{Primitive, PrimitiveTable};
use crate::processor::mangle::mangle;

static KEYWORD_HEAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.*)\s+=\s+primitive").unwrap());
static UNARY_HEAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"([\w_]+)\s+=\s+primitive").unwrap());

const OPEN_MARKER: &str = "\"@";
const CLOSE_MARKER: &str = "@\"";
const CLASS_SIDE_MARKER: &str = "----";

/// Scanner position. `class_side` lives next to it because it never resets.
#[derive(Debug)]
enum State {
    Outside,
    Inside { selector: String, primitive: Primitive },
}

/// Collect every primitive of the file, keyed by its raw selector.
///
/// A primitive that is still open at the end of the file is kept as is,
/// without its closing brace.
pub fn primitives(lines: &[&str], class: &str) -> PrimitiveTable {
    let mut table = PrimitiveTable::new();
    let mut class_side = false;
    let mut state = State::Outside;

    for line in lines {
        state = match state {
            State::Outside if line.contains(OPEN_MARKER) => {
                let selector = selector(line);
                let mangled_name = definition_name(class, &selector, class_side);
                debug!("opening primitive {selector:?} as {mangled_name}");
                State::Inside {
                    selector,
                    primitive: Primitive {
                        body_lines: vec![format!(
                            "void {mangled_name}(pVMObject object, pVMFrame frame){{"
                        )],
                        mangled_name,
                        is_class_side: class_side,
                    },
                }
            }
            State::Outside => {
                if line.contains(CLASS_SIDE_MARKER) {
                    class_side = true;
                }
                State::Outside
            }
            State::Inside {
                selector,
                mut primitive,
            } if line.contains(CLOSE_MARKER) => {
                primitive.body_lines.push("}".to_string());
                table.insert(selector, primitive);
                State::Outside
            }
            State::Inside {
                selector,
                mut primitive,
            } => {
                primitive.body_lines.push(format!("\t{}", unescape(line)));
                State::Inside {
                    selector,
                    primitive,
                }
            }
        };
    }

    if let State::Inside {
        selector,
        primitive,
    } = state
    {
        warn!("primitive {selector:?} is never closed with `@\"`");
        table.insert(selector, primitive);
    }

    table
}

/// Raw selector of a primitive header line.
///
/// Keyword selectors are the `:`-tokens before `= primitive` glued together
/// (`at: index put: value = primitive` gives `at:put:`); anything else is the
/// word right before `= primitive`.
pub fn selector(line: &str) -> String {
    let found = if line.contains(':') {
        KEYWORD_HEAD.captures(line).map(|caps| {
            caps[1]
                .split_whitespace()
                .filter(|token| token.contains(':'))
                .collect::<String>()
        })
    } else {
        UNARY_HEAD.captures(line).map(|caps| caps[1].to_string())
    };

    found.unwrap_or_else(|| {
        warn!("no selector before `= primitive` in: {}", line.trim());
        String::new()
    })
}

/// Name of the generated C function. Instance-side primitives get a leading
/// underscore, class-side ones do not.
pub fn definition_name(class: &str, selector: &str, class_side: bool) -> String {
    let prefix = if class_side { "" } else { "_" };
    format!("{}{}_{}", prefix, class, mangle(selector))
}
