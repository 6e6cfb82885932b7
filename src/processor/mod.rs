//! Passes that run on a freshly extracted description.
//!
//! For the moment this is only the declaration synthesis.
pub mod decls;
pub mod mangle;

use log::debug;

use crate::model::ModuleDescription;

/// Complete `desc` with its forward declarations and hand it to the writers.
pub fn run(mut desc: ModuleDescription) -> ModuleDescription {
    desc.declarations = decls::declarations(&desc);
    debug!("{} forward declarations", desc.declarations.len());
    desc
}
