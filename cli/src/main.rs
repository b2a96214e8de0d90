//! Roadgraph CLI: load DIMACS road networks and time shortest path and
//! spanning tree runs against them.

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use roadgraph::algo::{connected_components, single_source, MstAlgorithm, ShortestPathQuery};
use roadgraph::{
    load_graph, BenchConfig, BenchReport, BenchmarkRunner, DatasetCatalog, DatasetFetcher,
    LoadConfig, LoadedGraph,
};
use serde_json::json;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::Level;

#[derive(Parser)]
#[command(name = "roadgraph", version, about = "DIMACS road network benchmarks")]
struct Cli {
    /// Skip malformed edge lines instead of failing
    #[arg(long, global = true)]
    lenient: bool,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum AlgorithmArg {
    Kruskal,
    Prim,
    PrimLazy,
}

impl From<AlgorithmArg> for MstAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Kruskal => MstAlgorithm::Kruskal,
            AlgorithmArg::Prim => MstAlgorithm::Prim,
            AlgorithmArg::PrimLazy => MstAlgorithm::PrimLazy,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print node, edge and component counts
    Stats {
        #[arg(long)]
        file: PathBuf,
    },
    /// Time single-source shortest paths
    Sssp {
        #[arg(long)]
        file: PathBuf,

        /// Raw id of the source node
        #[arg(long)]
        source: u64,

        /// Stop once this node is finalized and print its path
        #[arg(long)]
        target: Option<u64>,

        #[arg(long, default_value_t = 5)]
        runs: usize,

        #[arg(long)]
        parallel: bool,
    },
    /// Time minimum spanning forest construction
    Mst {
        #[arg(long)]
        file: PathBuf,

        #[arg(long, default_value = "kruskal")]
        algorithm: AlgorithmArg,

        #[arg(long, default_value_t = 5)]
        runs: usize,

        #[arg(long)]
        parallel: bool,
    },
    /// Download and extract a dataset unless it is already present
    Fetch {
        #[arg(long)]
        dataset: String,

        #[arg(long, env = "ROADGRAPH_DATA_DIR", default_value = "data")]
        dest: PathBuf,

        /// YAML catalog to use instead of the built-in DIMACS table
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Write the graph as a networkx-style edge list
    Export {
        #[arg(long)]
        file: PathBuf,

        #[arg(long)]
        out: PathBuf,
    },
    /// List the datasets of a catalog
    Datasets {
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let load_config = if cli.lenient {
        LoadConfig::lenient()
    } else {
        LoadConfig::default()
    };

    let result = match cli.command {
        Commands::Stats { file } => run_stats(&file, &load_config, cli.format),
        Commands::Sssp {
            file,
            source,
            target,
            runs,
            parallel,
        } => run_sssp(
            &file,
            &load_config,
            ShortestPathQuery::new(source, target),
            BenchConfig { runs, parallel },
            cli.format,
        ),
        Commands::Mst {
            file,
            algorithm,
            runs,
            parallel,
        } => run_mst(
            &file,
            &load_config,
            algorithm.into(),
            BenchConfig { runs, parallel },
            cli.format,
        ),
        Commands::Fetch {
            dataset,
            dest,
            catalog,
        } => run_fetch(&dataset, &dest, catalog.as_deref()).await,
        Commands::Export { file, out } => run_export(&file, &out, &load_config),
        Commands::Datasets { catalog } => run_datasets(catalog.as_deref(), cli.format),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn load(file: &Path, config: &LoadConfig) -> anyhow::Result<LoadedGraph> {
    load_graph(file, config).with_context(|| format!("failed to load {}", file.display()))
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<DatasetCatalog> {
    match path {
        Some(path) => DatasetCatalog::from_yaml_file(path)
            .with_context(|| format!("failed to read catalog {}", path.display())),
        None => Ok(DatasetCatalog::dimacs()),
    }
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn report_json(report: &BenchReport) -> serde_json::Value {
    json!({
        "label": report.label,
        "parallel": report.parallel,
        "runs_ms": report.runs.iter().map(|d| millis(*d)).collect::<Vec<_>>(),
        "average_ms": millis(report.average()),
        "min_ms": millis(report.min()),
        "max_ms": millis(report.max()),
    })
}

fn print_fields(rows: &[(&str, String)]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Metric", "Value"]);
    for (name, value) in rows {
        table.add_row(vec![name.to_string(), value.clone()]);
    }
    println!("{}", table);
}

fn print_report(report: &BenchReport) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Run", "Elapsed (ms)"]);
    for (i, run) in report.runs.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), format!("{:.3}", millis(*run))]);
    }
    println!("{}", table);
    println!(
        "{}: average {:.3} ms, min {:.3} ms, max {:.3} ms over {} run(s)",
        report.label,
        millis(report.average()),
        millis(report.min()),
        millis(report.max()),
        report.len()
    );
}

fn run_stats(file: &Path, config: &LoadConfig, format: OutputFormat) -> anyhow::Result<()> {
    let LoadedGraph { store, stats } = load(file, config)?;
    let components = connected_components(&store);

    match format {
        OutputFormat::Json => {
            let out = json!({
                "file": file.display().to_string(),
                "nodes": store.node_count(),
                "edges": store.edge_count(),
                "components": components.count(),
                "largest_component": components.largest(),
                "total_weight": store.total_weight(),
                "skipped_lines": stats.skipped,
                "load_ms": millis(stats.elapsed),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table => print_fields(&[
            ("Nodes", store.node_count().to_string()),
            ("Edges", store.edge_count().to_string()),
            ("Components", components.count().to_string()),
            ("Largest component", components.largest().to_string()),
            ("Total weight", store.total_weight().to_string()),
            ("Skipped lines", stats.skipped.to_string()),
            ("Load time (ms)", format!("{:.3}", millis(stats.elapsed))),
        ]),
    }

    Ok(())
}

fn run_sssp(
    file: &Path,
    load_config: &LoadConfig,
    query: ShortestPathQuery,
    bench: BenchConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let store = load(file, load_config)?.store;
    let (source, target) = query.resolve(&store)?;

    let runner = BenchmarkRunner::new(bench);
    let report = runner.run("dijkstra", || single_source(&store, source, target));

    let paths = single_source(&store, source, target)?;
    let path = match target {
        Some(t) => paths.resolve(&store, t)?,
        None => None,
    };

    match format {
        OutputFormat::Json => {
            let out = json!({
                "source": query.source,
                "target": query.target,
                "settled": paths.len(),
                "cost": path.as_ref().map(|p| p.cost),
                "path": path.as_ref().map(|p| &p.path),
                "report": report_json(&report),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table => {
            print_report(&report);
            println!("Settled {} node(s) from {}", paths.len(), query.source);
            if let Some(t) = query.target {
                match &path {
                    Some(p) => println!(
                        "Path {} -> {}: cost {}, {} hop(s)",
                        query.source,
                        t,
                        p.cost,
                        p.path.len().saturating_sub(1)
                    ),
                    None => println!("Node {} is unreachable from {}", t, query.source),
                }
            }
        }
    }

    Ok(())
}

fn run_mst(
    file: &Path,
    load_config: &LoadConfig,
    algorithm: MstAlgorithm,
    bench: BenchConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let store = load(file, load_config)?.store;

    let runner = BenchmarkRunner::new(bench);
    let report = runner.run(algorithm.name(), || algorithm.run(&store));
    let forest = algorithm.run(&store);

    match format {
        OutputFormat::Json => {
            let out = json!({
                "algorithm": algorithm,
                "edges": forest.len(),
                "trees": forest.tree_count(),
                "total_weight": forest.total_weight,
                "report": report_json(&report),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table => {
            print_report(&report);
            println!(
                "Spanning forest: {} edge(s), {} tree(s), total weight {}",
                forest.len(),
                forest.tree_count(),
                forest.total_weight
            );
        }
    }

    Ok(())
}

async fn run_fetch(name: &str, dest: &Path, catalog: Option<&Path>) -> anyhow::Result<()> {
    let fetcher = DatasetFetcher::new(load_catalog(catalog)?);
    let path = fetcher
        .prepare(name, dest)
        .await
        .with_context(|| format!("failed to prepare dataset {}", name))?;
    println!("{}", path.display());
    Ok(())
}

fn run_export(file: &Path, out: &Path, config: &LoadConfig) -> anyhow::Result<()> {
    let store = load(file, config)?.store;

    let mut writer = BufWriter::new(
        File::create(out).with_context(|| format!("failed to create {}", out.display()))?,
    );
    store.write_edge_list(&mut writer)?;
    writer.flush()?;

    println!(
        "Wrote {} edge(s) to {}",
        store.edge_count(),
        out.display()
    );
    Ok(())
}

fn run_datasets(catalog: Option<&Path>, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&catalog)?),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Name", "File", "URL"]);
            for name in catalog.names() {
                if let Some(entry) = catalog.get(name) {
                    table.add_row(vec![name, entry.file.as_str(), entry.url.as_str()]);
                }
            }
            println!("{}", table);
        }
    }

    Ok(())
}
