use clap::Parser;
use flowtree::prelude::*;
use itertools::Itertools;
use std::fs;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

/// Build a decision flow from the terminal and watch it being laid out
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a JSON layout configuration (origin, gaps, node heights)
    #[arg(short, long)]
    config: Option<String>,

    /// Run the commands in this file instead of prompting
    #[arg(short, long)]
    script: Option<String>,

    /// Number new nodes n1, n2, ... instead of using random ids
    #[arg(long)]
    sequential_ids: bool,
}

/// One line of user input.
#[derive(Debug)]
enum Command {
    Root {
        label: String,
        description: String,
        background: Option<String>,
    },
    Request {
        node: String,
        handle: String,
    },
    Add(String),
    Cancel,
    Clear,
    Show,
    Check,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let args = words.collect_vec();
        let expect = |count: usize, usage: &str| {
            if args.len() < count {
                Err(format!("usage: {}", usage))
            } else {
                Ok(())
            }
        };

        let command = match head {
            "root" => {
                expect(2, "root <label> <description> [blue|green|red]")?;
                Command::Root {
                    label: args[0].to_string(),
                    description: args[1].to_string(),
                    background: args.get(2).map(|s| s.to_string()),
                }
            }
            "request" => {
                expect(2, "request <node> <handle>")?;
                Command::Request {
                    node: args[0].to_string(),
                    handle: args[1].to_string(),
                }
            }
            "add" => Command::Add(args.first().map(|s| s.to_string()).unwrap_or_default()),
            "cancel" => Command::Cancel,
            "clear" => Command::Clear,
            "show" => Command::Show,
            "check" => Command::Check,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command '{}', try 'help'", other)),
        };
        Ok(Some(command))
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flowtree=info,warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => LayoutConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load layout config: {}", e))),
        None => LayoutConfig::default(),
    };
    let editor = if cli.sequential_ids {
        FlowEditor::builder().with_id_generator(SequentialIds::default())
    } else {
        FlowEditor::builder()
    }
    .build();
    let mut session = Session::new(editor, TreeLayout::new(config));

    match &cli.script {
        Some(path) => run_script(&mut session, path),
        None => run_interactive(&mut session),
    }
}

/// Runs every line of a script file, stopping at the first failing command.
fn run_script(session: &mut Session, path: &str) {
    let script = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read script '{}': {}", path, e)));

    for (number, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        match Command::parse(line).and_then(|cmd| match cmd {
            Some(cmd) => execute(session, cmd),
            None => Ok(true),
        }) {
            Ok(true) => {}
            Ok(false) => break,
            Err(message) => exit_with_error(&format!("line {}: {}", number + 1, message)),
        }
    }
    print_flow(session);
}

/// Runs the CLI as a prompt loop until `quit` or end of input.
fn run_interactive(session: &mut Session) {
    println!("--- Flowtree Interactive Mode ---");
    println!("Type 'help' for the list of commands.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let outcome = Command::parse(&line).and_then(|cmd| match cmd {
            Some(cmd) => execute(session, cmd),
            None => Ok(true),
        });
        match outcome {
            Ok(true) => {}
            Ok(false) => break,
            Err(message) => eprintln!("Error: {}", message),
        }
    }
}

/// Applies one command. `Ok(false)` asks the caller to stop.
fn execute(session: &mut Session, command: Command) -> Result<bool, String> {
    match command {
        Command::Root {
            label,
            description,
            background,
        } => {
            let background = match background {
                Some(b) => b.parse::<Background>().map_err(|e| e.to_string())?,
                None => Background::default(),
            };
            let values = InitialNodeForm::new(label, description)
                .with_background(background)
                .validate()
                .map_err(|e| e.to_string())?;
            if session.create_root(&values) {
                println!("Initial node created.");
            } else {
                println!("The flow already has an initial node. Use 'clear' to start over.");
            }
        }
        Command::Request { node, handle } => {
            let source = session
                .graph()
                .node(&node)
                .ok_or_else(|| format!("no node '{}' in the flow", node))?;
            let handles = source.output_handles();
            if !handles.contains(&handle) {
                return Err(if source.kind.is_terminal() {
                    format!("'{}' is a terminal node and has no outputs", node)
                } else {
                    format!("'{}' has no handle '{}'; choose one of {}", node, handle, handles.join(", "))
                });
            }
            session.request_new_node(&node, &handle);
            println!("Next node will attach to {} via {}.", node, handle);
        }
        Command::Add(kind) => {
            let kind = NewNodeForm::new(kind).validate().map_err(|e| e.to_string())?;
            match session.create_child(kind).map_err(|e| e.to_string())? {
                Some(id) => println!("Added {} node '{}'.", kind, id),
                None => println!("Nothing to attach to yet. Create the initial node first."),
            }
        }
        Command::Cancel => {
            session.reset();
            println!("Pending selection dropped.");
        }
        Command::Clear => {
            session.clear();
            println!("Flow cleared.");
        }
        Command::Show => print_flow(session),
        Command::Check => match session.graph().validate() {
            Ok(()) => println!("Flow is a valid tree."),
            Err(e) => return Err(e.to_string()),
        },
        Command::Help => print_help(),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn print_flow(session: &Session) {
    let graph = session.graph();
    if graph.is_empty() {
        println!("(empty flow)");
        return;
    }

    println!("\n--- Nodes ---");
    for node in graph.nodes() {
        let outputs = node.output_handles();
        println!(
            "{:<12} {:<18} ({:>7.1}, {:>7.1}){}",
            node.id,
            node.kind,
            node.position.x,
            node.position.y,
            if outputs.is_empty() {
                String::new()
            } else {
                format!("  outputs: {}", outputs.iter().join(", "))
            }
        );
    }

    if !graph.edges().is_empty() {
        println!("\n--- Edges ---");
        for edge in graph.edges() {
            println!(
                "{} -> {}  [{}] {}",
                edge.source,
                edge.target,
                edge.case.map_or("none".to_string(), |c| c.to_string()),
                edge.style.stroke
            );
        }
    }

    match session.phase() {
        EditorPhase::AwaitingChild(pending) => println!(
            "\nPending: next node attaches to {} via {}",
            pending.node_id, pending.handle_id
        ),
        EditorPhase::Empty | EditorPhase::Rooted => {}
    }
    println!();
}

fn print_help() {
    let kinds = NodeKind::ATTACHABLE.iter().join("|");
    let backgrounds = Background::ALL
        .iter()
        .map(|b| format!("{:?}", b).to_lowercase())
        .join("|");
    println!("Commands:");
    println!("  root <label> <description> [{}]", backgrounds);
    println!("  request <node> <handle>   choose where the next node attaches");
    println!("  add <{}>", kinds);
    println!("  cancel                    drop the pending selection");
    println!("  clear                     remove every node and edge");
    println!("  show                      print nodes, positions and edges");
    println!("  check                     validate the flow structure");
    println!("  quit");
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
