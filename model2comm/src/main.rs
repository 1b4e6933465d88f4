//! A command-line application to compile a structural model, exported to
//! JSON, into a Code_Aster command file.

#![allow(clippy::needless_return)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use camodel::prelude::*;
use clap::Parser;
use comm_deck::prelude::*;
use log::*;

/// The arguments passed to the compiler.
#[derive(Clone, Debug, Parser)]
#[command(author, version, about)]
struct Cli {
  /// Output extra/debug info while compiling.
  #[arg(short = 'v', long = "verbose")]
  verbose: bool,
  /// TOML file with deck settings. If absent, defaults are used.
  #[arg(short = 'c', long = "config")]
  config: Option<PathBuf>,
  /// Overrides the magnitude of gravity.
  #[arg(short = 'g', long = "gravity")]
  gravity: Option<f64>,
  /// Overrides the logical unit the mesh is read from.
  #[arg(long = "mesh-unit")]
  mesh_unit: Option<usize>,
  /// Overrides the logical unit results are written to.
  #[arg(long = "result-unit")]
  result_unit: Option<usize>,
  /// Path to write the command file to. If absent, writes to standard
  /// output.
  #[arg(short = 'o')]
  output: Option<PathBuf>,
  /// The input JSON model. If -, reads from standard input.
  input: PathBuf
}

impl Cli {
  /// Loads the settings file, if any, and applies the overrides.
  fn settings(&self) -> Result<DeckSettings, SettingsError> {
    let mut settings = match &self.config {
      Some(path) => {
        info!("Reading settings from {}...", path.display());
        DeckSettings::from_file(path)?
      },
      None => DeckSettings::default()
    };
    if let Some(g) = self.gravity {
      settings.gravity = g;
    }
    if let Some(u) = self.mesh_unit {
      settings.mesh_unit = u;
    }
    if let Some(u) = self.result_unit {
      settings.result_unit = u;
    }
    debug!("Deck settings: {:?}", settings);
    return Ok(settings);
  }

  /// Reads the input model.
  fn records(&self) -> Result<ModelRecords, ModelError> {
    if self.input.as_os_str().eq_ignore_ascii_case("-") {
      return ModelRecords::from_reader(BufReader::new(io::stdin()));
    }
    if let Some(bn) = self.input.file_name().and_then(|bn| bn.to_str()) {
      info!("Reading {}...", bn);
    } else {
      info!("Reading...");
    }
    return ModelRecords::from_file(&self.input);
  }
}

/// Does the whole job. Nothing is written unless everything succeeds.
fn run(args: &Cli) -> Result<(), Box<dyn Error>> {
  let settings = args.settings()?;
  let graph = ConnectionGraph::load(args.records()?)?;
  let deck = render_deck(&graph, &settings);
  let mut output: BufWriter<Box<dyn Write>> = BufWriter::new(
    if let Some(ref op) = args.output {
      Box::new(File::create(op)?)
    } else {
      Box::new(io::stdout())
    }
  );
  output.write_all(deck.as_bytes())?;
  output.flush()?;
  return Ok(());
}

fn main() {
  // init cli stuff
  let args = Cli::parse();
  let log_level = if args.verbose {
    LevelFilter::Debug
  } else {
    LevelFilter::Info
  };
  env_logger::builder().filter_level(log_level).init();
  if !args.input.as_os_str().eq_ignore_ascii_case("-") && !args.input.is_file() {
    error!("Provided path either does not exist or is not a file!");
    std::process::exit(1);
  }
  if let Err(e) = run(&args) {
    error!("{}", e);
    std::process::exit(1);
  }
  info!("All done.");
}
