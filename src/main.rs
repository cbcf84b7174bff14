pub mod ircore;
use std::io;
use std::path::Path;
use std::process;
use clap::{Parser, Subcommand};
use ircore::analyzer::Analyzer;
use ircore::config::Params;
use ircore::engine::{self, Engine};
use ircore::error::{ConfigError, Result};
use ircore::index::memory::MemoryIndex;
use ircore::output::write_rows;
use ircore::query::DefaultOperator;
use ircore::query::parser::QueryParser;
use ircore::ranking::RetrievalModel;

#[derive(Parser)]
#[derive(Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
/// Structured query evaluation over a positional inverted index
struct Cli {
    #[clap(short, long, action)]
    /// Log progress of every query
    verbose: bool,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[derive(Debug)]
enum Commands {
    /// Evaluate every query of a parameter file and write a TREC run
    Run {
        #[clap(value_parser)]
        /// YAML parameter file
        param_file: String,
    },
    /// Print the operator tree of a query
    Parse {
        #[clap(value_parser)]
        /// query text
        query: String,
        #[clap(long, action)]
        /// print the tree as JSON
        json: bool,
    },
    /// Evaluate one query and print the ranked documents
    Search {
        #[clap(short, long, value_parser)]
        /// Index file
        index: String,
        #[clap(short, long, value_parser, default_value_t = String::from("UnrankedBoolean"))]
        /// UnrankedBoolean, RankedBoolean, BM25 or Indri
        model: String,
        #[clap(short = 'n', long, value_parser, default_value_t = 10)]
        /// Number of documents to print
        count: usize,
        #[clap(value_parser)]
        /// query text
        query: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match &cli.command {
        Commands::Run { param_file } => command_run(param_file),
        Commands::Parse { query, json } => command_parse(query, *json),
        Commands::Search { index, model, count, query } => command_search(index, model, *count, query),
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn command_run(param_file: &str) -> Result<()> {
    let params = Params::load(Path::new(param_file))?;
    let summary = engine::run(&params)?;
    println!("{} queries evaluated, {} failed, results in {}",
        summary.queries, summary.failed, params.trec_eval_output_path.display());
    Ok(())
}

fn command_parse(query: &str, json: bool) -> Result<()> {
    let parser = QueryParser::new(Analyzer::default(), DefaultOperator::Or);
    let node = parser.parse(query)?;
    if json {
        let encoded = serde_json::to_string_pretty(&node)?;
        println!("{}", encoded);
    } else {
        println!("{}", node.to_query_string());
        print!("{}", node);
    }
    Ok(())
}

fn command_search(index_file: &str, model: &str, count: usize, query: &str) -> Result<()> {
    let model = RetrievalModel::from_name(model).ok_or_else(|| ConfigError::InvalidParameter {
        name: "model",
        reason: format!("unknown retrieval model '{}'", model),
    })?;
    let index = MemoryIndex::load_from(Path::new(index_file))?;
    let parser = QueryParser::new(Analyzer::default(), DefaultOperator::Or);
    let engine = Engine::new(&index, model, parser, count);
    let ranked = engine.search(query)?;
    if ranked.is_empty() {
        println!("no documents found");
        return Ok(());
    }
    write_rows(&mut io::stdout().lock(), "0", &ranked, model.name())?;
    Ok(())
}
