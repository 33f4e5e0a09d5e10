mod config;
mod report;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::AppConfig;
use lineage_graph::{FamilyGraph, Genealogy, PersonId};
use lineage_kinship::{KinshipCalculator, Locale};
use lineage_layout::{FamilyTreeLayout, GenerationResolver};
use serde::Serialize;
use std::fmt::Display;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Family tree in node-link JSON, the built-in sample when omitted
    #[arg(short, long)]
    tree: Option<PathBuf>,

    /// Id of the focus person, the first person when omitted
    #[arg(short, long)]
    focus: Option<u64>,

    /// RON file with geometry and locale settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Language of the labels, overrides the config
    #[arg(short, long, value_enum)]
    locale: Option<Language>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Position of every person around the focus
    Layout,
    /// Relationship of persons to the focus, everyone when no id is given
    Kinship { persons: Vec<u64> },
    /// Every edge with its color as seen from the focus
    Edges,
    /// Colors of the relationship categories
    Legend,
    /// Write the tree back as node-link JSON
    Export,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Language {
    En,
    Uk,
}

impl From<Language> for Locale {
    fn from(language: Language) -> Self {
        match language {
            Language::En => Locale::English,
            Language::Uk => Locale::Ukrainian,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn emit<T: Serialize + Display>(rows: &[T], format: Format) -> Result<()> {
    match format {
        Format::Text => {
            for row in rows {
                println!("{row}");
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(rows)?),
    }
    Ok(())
}

fn load_tree(path: Option<&PathBuf>) -> Result<FamilyGraph> {
    let Some(path) = path else {
        info!("No tree given, using the sample family");
        return Ok(FamilyGraph::sample());
    };

    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let graph = FamilyGraph::from_node_link_reader(BufReader::new(file))
        .with_context(|| format!("Failed to load tree {}", path.display()))?;
    info!("Loaded {} persons from {}", graph.len(), path.display());
    Ok(graph)
}

/// The given person, or the first one of the tree
fn resolve_person(graph: &FamilyGraph, id: Option<u64>) -> Result<PersonId> {
    match id.map(PersonId) {
        Some(id) if graph.contains(id) => Ok(id),
        Some(id) => bail!("Person {id} is not in the tree"),
        None => graph
            .person_ids()
            .first()
            .copied()
            .context("The tree is empty"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(language) = args.locale {
        config.locale = language.into();
    }

    let graph = load_tree(args.tree.as_ref())?;
    let locale = config.locale;

    match args.command {
        Command::Legend => emit(&report::legend(locale), args.format),
        Command::Export => {
            graph.write_node_link(std::io::stdout().lock())?;
            println!();
            Ok(())
        }
        Command::Layout => {
            let focus = resolve_person(&graph, args.focus)?;
            debug!("Laying out {} persons around {focus}", graph.len());
            let positions = FamilyTreeLayout::new(config.geometry)
                .layout(&graph, focus)
                .context("Focus person vanished from the tree")?;
            let generations = GenerationResolver.resolve(&graph, focus);
            emit(&report::placed(&graph, &positions, &generations), args.format)
        }
        Command::Kinship { persons } => {
            let focus = resolve_person(&graph, args.focus)?;
            let persons = if persons.is_empty() {
                graph.person_ids()
            } else {
                persons
                    .into_iter()
                    .map(|id| resolve_person(&graph, Some(id)))
                    .collect::<Result<_>>()?
            };
            let mut calc = KinshipCalculator::new(&graph);
            let rows = report::related(&mut calc, focus, &persons, locale);
            emit(&rows, args.format)
        }
        Command::Edges => {
            let focus = resolve_person(&graph, args.focus)?;
            let mut calc = KinshipCalculator::new(&graph);
            emit(&report::colored_edges(&mut calc, focus), args.format)
        }
    }
}
