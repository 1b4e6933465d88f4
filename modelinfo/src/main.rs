//! Dumps information on a structural model: its groups, what each relation
//! compiles to, and which connections tie eccentric attachments together.

#![allow(clippy::needless_return)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::io::{self, BufReader};
use std::path::PathBuf;

use camodel::prelude::*;
use clap::Parser;
use log::{LevelFilter, info, error};

/// The arguments passed to the inspector.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
  /// Only report connections of these dimensionalities. Can be specified
  /// more than once, or comma-separated. If absent, all are reported.
  #[arg(long = "only", num_args = 0.., value_delimiter = ',')]
  only: Vec<ConnectionGeometry>,
  /// Dump the compiled model as JSON to standard output instead.
  #[arg(short, long)]
  json: bool,
  /// Output extra/debug info while compiling.
  #[arg(short, long)]
  verbose: bool,
  /// File path (set to "-" to read from standard input).
  file: PathBuf
}

/// Indentation for nested report lines.
const INDENT: &str = "  ";

/// Reports one connection and its relations.
fn report_connection(conn: &Connection) {
  info!(
    "{}- {} ({}, {} relations, {} eccentric):",
    INDENT,
    conn.group,
    conn.geometry,
    conn.relations.len(),
    conn.eccentric_relations().count()
  );
  if conn.is_restrained() {
    info!(
      "{}{}- ground: {} equations, stiffnesses {:?}",
      INDENT,
      INDENT,
      conn.restraint.equations.len(),
      conn.restraint.stiffnesses.to_array()
    );
  }
  for rel in conn.relations.iter() {
    let source = if rel.declared { "declared" } else { "default" };
    info!(
      "{}{}- {} -> {}: {} equations ({}), stiffnesses {:?}",
      INDENT,
      INDENT,
      rel.primary_group,
      rel.secondary_group,
      rel.constraints.equations.len(),
      source,
      rel.constraints.stiffnesses.to_array()
    );
    if let Some(link) = &rel.link {
      info!(
        "{}{}{}- eccentric #{}: rigid link {}",
        INDENT,
        INDENT,
        INDENT,
        link.index,
        link.rigid_link_group
      );
    }
  }
  if conn.is_unified() {
    let names: Vec<&str> = conn.unified.names.iter().map(|n| n.as_str()).collect();
    info!("{}{}- unified: {}", INDENT, INDENT, names.join(", "));
  }
}

fn main() -> io::Result<()> {
  // init cli stuff
  let args = Cli::parse();
  let log_level = if args.verbose {
    LevelFilter::Debug
  } else {
    LevelFilter::Info
  };
  env_logger::builder().filter_level(log_level).init();
  // read and compile
  let records = if args.file.as_os_str().eq_ignore_ascii_case("-") {
    ModelRecords::from_reader(BufReader::new(io::stdin()))
  } else if args.file.is_file() {
    if let Some(sbn) = args.file.file_name().and_then(|bn| bn.to_str()) {
      info!("Reading {}...", sbn);
    }
    ModelRecords::from_file(&args.file)
  } else {
    error!("Provided path either does not exist or is not a file!");
    std::process::exit(1);
  };
  let graph = match records.and_then(ConnectionGraph::load) {
    Ok(g) => g,
    Err(e) => {
      error!("{}", e);
      std::process::exit(1);
    }
  };
  if args.json {
    serde_json::to_writer_pretty(io::stdout(), &graph)?;
    println!();
    return Ok(());
  }
  // elements
  for geometry in ElementGeometry::all() {
    let groups = graph.element_groups(*geometry);
    info!(
      "{} {} elements ({}).",
      groups.len(),
      geometry,
      geometry.formulation()
    );
  }
  info!("{} materials, {} profiles.", graph.materials().len(), graph.profiles().len());
  // connections
  let wanted = |g: &ConnectionGeometry| args.only.is_empty() || args.only.contains(g);
  for geometry in ConnectionGeometry::all().iter().filter(|g| wanted(*g)) {
    let connections: Vec<&Connection> = graph.connections_of(*geometry).collect();
    if connections.is_empty() {
      info!("No {} connections.", geometry);
      continue;
    }
    info!("{} {} connections:", connections.len(), geometry);
    for conn in connections {
      report_connection(conn);
    }
  }
  let rigid_links = graph.rigid_link_groups();
  let unified = graph.unified_connections().count();
  info!(
    "{} rigid links, {} unified connections.",
    rigid_links.len(),
    unified
  );
  info!("All done.");
  return Ok(());
}
