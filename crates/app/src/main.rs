mod table;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use graph_walk::{
    bfs_edges, checked_depth_limit, dfs_edges, dfs_edges_ordered, is_tree, Edge,
    HierarchicalLayout, RootSelection,
};
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

use table::FamilyTable;

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// CSV table with `padre,hijo` (or `parent,child`) columns
    #[arg(short, long, default_value = "data.csv")]
    data: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print node and edge counts
    Info,

    /// Print the edges of a breadth-first search
    Bfs {
        start: String,

        #[arg(long, allow_negative_numbers = true)]
        depth_limit: Option<i64>,
    },

    /// Print the edges of a depth-first search, over every root if none is given
    Dfs {
        start: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        depth_limit: Option<i64>,

        /// Explore neighbors in reverse order
        #[arg(long)]
        reverse: bool,
    },

    /// Print hierarchical layout positions
    Layout {
        #[arg(long)]
        root: Option<String>,

        #[arg(long, default_value_t = 1.0)]
        width: f64,

        #[arg(long, default_value_t = 0.2)]
        level_gap: f64,

        /// Seed for picking a random root when none is given
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        json: bool,
    },

    /// Time draining both traversals for increasing repetition counts
    Bench {
        #[arg(default_value = "A")]
        start: String,

        #[arg(long, value_delimiter = ',', default_value = "1,10,100,1000,10000")]
        repetitions: Vec<u32>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let table = FamilyTable::load(&args.data)?;
    debug!(path = %args.data.display(), "table loaded");

    match args.command {
        Command::Info => {
            println!(
                "{} nodes, {} edges, tree: {}",
                table.graph.node_count(),
                table.graph.edge_count(),
                is_tree(&table.graph)
            );
        }
        Command::Bfs { start, depth_limit } => {
            let start = table.node(&start)?;
            let depth_limit = depth_limit.map(checked_depth_limit::<String>).transpose()?;
            print_edges(&table, bfs_edges(&table.graph, start, depth_limit)?);
        }
        Command::Dfs {
            start,
            depth_limit,
            reverse,
        } => {
            let start = start.map(|name| table.node(&name)).transpose()?;
            let depth_limit = depth_limit.map(checked_depth_limit::<String>).transpose()?;
            if reverse {
                let edges = dfs_edges_ordered(&table.graph, start, depth_limit, |neighbors| {
                    let mut neighbors: Vec<_> = neighbors.collect();
                    neighbors.reverse();
                    neighbors
                })?;
                print_edges(&table, edges);
            } else {
                print_edges(&table, dfs_edges(&table.graph, start, depth_limit)?);
            }
        }
        Command::Layout {
            root,
            width,
            level_gap,
            seed,
            json,
        } => {
            let root = root.map(|name| table.node(&name)).transpose()?;
            let selection = seed.map_or(RootSelection::Auto, RootSelection::Seeded);
            let positions = HierarchicalLayout::new(width, level_gap)
                .with_root_selection(selection)
                .compute_positions(&table.graph, root)
                .context("computing hierarchical layout")?;

            let named: BTreeMap<_, _> = positions
                .into_iter()
                .map(|(id, point)| (table.name(id), point))
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&named)?);
            } else {
                for (name, point) in named {
                    println!("{name}\t{:.4}\t{:.4}", point.x, point.y);
                }
            }
        }
        Command::Bench { start, repetitions } => {
            let start = table.node(&start)?;
            println!("repetitions\tbfs (s)\tdfs (s)");
            for count in repetitions {
                let bfs = time(count, || {
                    bfs_edges(&table.graph, start, None).map(Iterator::count)
                })?;
                let dfs = time(count, || {
                    dfs_edges(&table.graph, Some(start), None).map(Iterator::count)
                })?;
                info!(count, ?bfs, ?dfs, "benchmark round");
                println!(
                    "{count}\t{:.10}\t{:.10}",
                    bfs.as_secs_f64(),
                    dfs.as_secs_f64()
                );
            }
        }
    }

    Ok(())
}

fn print_edges(table: &FamilyTable, edges: impl Iterator<Item = Edge<u32>>) {
    for (parent, child) in edges {
        println!("{} -> {}", table.name(parent), table.name(child));
    }
}

/// Total time spent running `run` `count` times
fn time<T, E>(count: u32, mut run: impl FnMut() -> Result<T, E>) -> Result<Duration, E> {
    let started = Instant::now();
    for _ in 0..count {
        std::hint::black_box(run()?);
    }
    Ok(started.elapsed())
}
