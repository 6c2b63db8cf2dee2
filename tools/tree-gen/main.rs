use clap::Parser;
use flowtree::prelude::*;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// A CLI tool that grows random flows through an editing session and reports the layout
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Total number of nodes to create, the initial node included
    #[arg(short, long, default_value_t = 50)]
    nodes: usize,

    /// Probability that a new node is a decision node rather than a terminal one
    #[arg(long, default_value_t = 0.4)]
    decision_ratio: f64,

    /// Seed for reproducible flows
    #[arg(long)]
    seed: Option<u64>,

    /// Print the position of every node
    #[arg(short, long)]
    print: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flowtree=warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if cli.nodes == 0 {
        eprintln!("Error: --nodes must be at least 1");
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&cli.decision_ratio) {
        eprintln!(
            "Error: --decision-ratio ({}) must be between 0 and 1",
            cli.decision_ratio
        );
        std::process::exit(1);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let editor = FlowEditor::builder()
        .with_id_generator(SequentialIds::default())
        .build();
    let mut session = Session::new(editor, TreeLayout::default());

    println!("Growing a flow of {} nodes...", cli.nodes);
    let build_start = Instant::now();

    session.create_root(&InitialNodeForm::new("Generated", "Random flow").validate()?);
    while session.graph().nodes().len() < cli.nodes {
        let open = session
            .graph()
            .nodes()
            .iter()
            .filter(|n| !n.kind.is_terminal())
            .collect_vec();
        if open.is_empty() {
            break;
        }

        let source = open[rng.random_range(0..open.len())];
        let handles = source.output_handles();
        let handle = handles[rng.random_range(0..handles.len())].clone();
        let source_id = source.id.clone();

        let kind = if rng.random_bool(cli.decision_ratio) {
            NodeKind::Decision
        } else if rng.random_bool(0.5) {
            NodeKind::TerminalSuccess
        } else {
            NodeKind::TerminalFailure
        };

        session.request_new_node(&source_id, &handle);
        session.create_child(kind)?;
    }
    let build_duration = build_start.elapsed();

    let graph = session.graph();
    graph.validate()?;

    let relayout_start = Instant::now();
    let heights = session
        .layout()
        .subtree_heights(graph.nodes(), graph.edges())
        .unwrap_or_default();
    let relayout_duration = relayout_start.elapsed();

    let max_x = graph
        .nodes()
        .iter()
        .map(|n| n.position.x)
        .fold(f64::MIN, f64::max);
    let by_kind = graph.nodes().iter().counts_by(|n| n.kind);

    if cli.print {
        println!("\n--- Positions ---");
        for node in graph.nodes() {
            println!(
                "{:<8} {:<18} ({:>9.1}, {:>9.1})",
                node.id, node.kind, node.position.x, node.position.y
            );
        }
    }

    println!("\n--- Flow Summary ---");
    println!("Nodes:              {}", graph.nodes().len());
    println!("Edges:              {}", graph.edges().len());
    for kind in [
        NodeKind::Initial,
        NodeKind::Decision,
        NodeKind::TerminalSuccess,
        NodeKind::TerminalFailure,
    ] {
        println!(
            "  {:<18}{}",
            format!("{}:", kind),
            by_kind.get(&kind).copied().unwrap_or(0)
        );
    }
    println!(
        "Total band height:  {}",
        heights.get(ROOT_NODE_ID).copied().unwrap_or(0.0)
    );
    println!("Rightmost column:   {}", max_x);

    println!("\n--- Performance Summary ---");
    println!("Build + layouts:    {:?}", build_duration);
    println!("Single measure:     {:?}", relayout_duration);
    println!();

    Ok(())
}
