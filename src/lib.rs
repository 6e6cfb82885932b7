pub mod cli;
pub mod model;
pub mod parser;
pub mod processor;
pub mod writer;

use anyhow::Context;
use clap::Parser;
use std::path::Path;

use crate::model::ModuleDescription;

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    let desc = generate(&args.input, &args.out_dir)?;

    if args.dump {
        let json = serde_json::to_string_pretty(&desc).with_context(|| "Serializing description")?;
        println!("{json}");
    }

    Ok(())
}

/// Read `input`, run every stage and write `<class>.c` into `out_dir`.
/// Returns the completed description.
pub fn generate(input: &Path, out_dir: &Path) -> anyhow::Result<ModuleDescription> {
    // 1. ── Parse ──────────────────────────────────────────────────────
    let source = std::fs::read_to_string(input)
        .with_context(|| format!("Reading {}", input.display()))?;
    let extracted = parser::load(&source);

    // 2. ── Process ────────────────────────────────────────────────────
    let desc = processor::run(extracted);

    // 3. ── Write output ───────────────────────────────────────────────
    writer::c::emit(&desc, out_dir)
        .with_context(|| format!("Writing {}", writer::c::output_file_name(&desc)))?;

    Ok(desc)
}
