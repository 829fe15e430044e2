//! # ssti2bbox
//!
//! SSTI Black-Box Manifest to Driver & Component Generator
//!

use clap::Parser;
use log::info;
use std::error::Error;

// => The doc-comment on `ProgramOptions` here is displayed by the `clap`-generated help docs =>

/// SSTI Black-Box Manifest to Driver & Component Generator
#[derive(Parser)]
struct ProgramOptions {
    /// Black-Box Manifest File (JSON, YAML or TOML)
    #[clap(short = 'i', long)]
    manifest: String,
    /// Output Root Directory. Artifacts are written to its `blackboxes` subdirectory.
    #[clap(short = 'o', long, default_value = ".")]
    out: String,
    /// Verbose Output Mode
    #[clap(short, long)]
    verbose: bool,
}

/// The main entry point.
/// All logic is offloaded to `_main` for sake of testing.
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let options = ProgramOptions::parse();
    _main(&options)
}

/// All the real logic, with `ProgramOptions` argument for sake of testing
fn _main(options: &ProgramOptions) -> Result<(), Box<dyn Error>> {
    // Load the manifest, with template paths relative to its own location
    let manifest = ssti::BboxManifest::from_file(&options.manifest)?;
    info!("Loaded manifest {:?}", &options.manifest);

    let ports = manifest.port_list()?;
    let generator = manifest.generator()?;
    let emitted = generator.generate(&ports, &options.out)?;

    if options.verbose {
        println!("wrote {:?}", &emitted.driver);
        println!("wrote {:?}", &emitted.component);
    }

    Ok(())
}
