use clap::Parser;
use std::path::PathBuf;

/// Generate a loadable primitive library (`<Class>.c`) from a class file.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Input class file (`Class.som`)
    pub input: PathBuf,
    /// Directory the generated `<Class>.c` is written to
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,
    /// Also print the extracted module description as JSON
    #[arg(long)]
    pub dump: bool,
}
