use std::{path::PathBuf, process};

use clap::{Args, Parser, Subcommand};

use obograph::{
    CollectionParams, ConnectParams, OboGraph, OboGraphError, SqliteDataSource, Term,
    build_graph_from_path, load_graph,
    logging::{self, LogFormat},
};

#[derive(Parser, Debug)]
#[command(name = "obograph", version, about = "Load OBO graph JSON into a document store")]
struct Cli {
    /// Log level or filter directives
    #[arg(long, global = true, default_value = "error", env = "OBOGRAPH_LOG_LEVEL")]
    log_level: String,
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text, env = "OBOGRAPH_LOG_FORMAT")]
    log_format: LogFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create or reconcile ontologies in the store
    Load(LoadArgs),
    /// Build a graph and print counts or the neighborhood of one term
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct LoadArgs {
    /// OBO graph JSON files, loaded in order
    #[arg(long = "obojson", required = true, num_args = 1..)]
    files: Vec<PathBuf>,
    /// Database file, or `memory`
    #[arg(long, default_value = obograph::config::IN_MEMORY, env = "OBOGRAPH_DB")]
    db: String,
    #[arg(long, default_value = "cvterm", env = "OBOGRAPH_TERM_COLLECTION")]
    term_collection: String,
    #[arg(long, default_value = "cvterm_relationship", env = "OBOGRAPH_REL_COLLECTION")]
    rel_collection: String,
    #[arg(long, default_value = "cv", env = "OBOGRAPH_CV_COLLECTION")]
    cv_collection: String,
    /// Named graph linking terms through relationships
    #[arg(long, default_value = "obograph", env = "OBOGRAPH_GRAPH")]
    obograph: String,
}

impl LoadArgs {
    fn collections(&self) -> CollectionParams {
        CollectionParams {
            term: self.term_collection.clone(),
            relationship: self.rel_collection.clone(),
            graph_info: self.cv_collection.clone(),
            obo_graph: self.obograph.clone(),
        }
    }
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[arg(long = "obojson")]
    file: PathBuf,
    /// Term id to show relatives of
    #[arg(long)]
    term: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = logging::init(&cli.log_level, cli.log_format) {
        eprintln!("error: {err}");
        process::exit(2);
    }
    let outcome = match &cli.command {
        Command::Load(args) => run_load(args),
        Command::Inspect(args) => run_inspect(args),
    };
    if let Err(err) = outcome {
        eprintln!("{err}");
        process::exit(2);
    }
}

fn run_load(args: &LoadArgs) -> Result<(), String> {
    let store = SqliteDataSource::open(&ConnectParams::new(&args.db), args.collections())
        .map_err(|e| e.to_string())?;
    for file in &args.files {
        let info = build_graph_from_path(file)
            .and_then(|graph| load_graph(&graph, &store))
            .map_err(|e| format!("failed to load {}: {e}", file.display()))?;
        tracing::info!(file = %file.display(), ?info, "loaded file");
        println!(
            "{}: new_graph={} created={} updated={} deleted={} relationships={}",
            file.display(),
            info.is_created,
            info.term_stats.created,
            info.term_stats.updated,
            info.term_stats.deleted,
            info.relationship_stats
        );
    }
    Ok(())
}

fn run_inspect(args: &InspectArgs) -> Result<(), String> {
    let graph = build_graph_from_path(&args.file)
        .map_err(|e| format!("failed to read {}: {e}", args.file.display()))?;
    match &args.term {
        None => {
            println!(
                "graph={} terms={} relationships={}",
                graph.id(),
                graph.term_count(),
                graph.relationship_count()
            );
            Ok(())
        }
        Some(id) => print_term(&graph, id).map_err(|e| e.to_string()),
    }
}

fn print_term(graph: &OboGraph, id: &str) -> Result<(), OboGraphError> {
    let term = graph
        .get_term(id)
        .ok_or_else(|| OboGraphError::not_found(format!("term {id}")))?;
    println!("term={} label={}", term.id(), term.label());
    print_ids("parents", graph.parents(id));
    print_ids("children", graph.children(id));
    print_ids("ancestors", graph.ancestors(id));
    print_ids("descendents", graph.descendents(id));
    Ok(())
}

fn print_ids(section: &str, terms: Vec<&Term>) {
    let mut ids: Vec<&str> = terms.iter().map(|t| t.id().as_str()).collect();
    ids.sort_unstable();
    println!("{section}={}", ids.join(","));
}
