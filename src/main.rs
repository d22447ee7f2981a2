use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::info;
use phyroot::{PhyloTree, Rooter, RootingConfig, RootingMethod};
use std::fs;
use std::path::PathBuf;

/// Reroot, root and edit phylogenetic trees stored as JSON records.
#[derive(Parser, Debug)]
#[command(name = "phyroot", version, about)]
struct Cli {
    /// Tree as JSON record (fields: id, name, length, children, _collapsedChildren)
    input: PathBuf,

    /// JSON file with rooting settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the resulting tree here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print an outline of the tree
    Show,
    /// Print tip count, node count and branch length statistics
    Stats,
    /// Reroot so that the given node hangs directly below the root
    Reroot {
        #[arg(long)]
        node: String,
    },
    /// Root at the midpoint of the longest tip-to-tip path
    Midpoint,
    /// Root where root-to-tip distances vary least
    LeastSquares,
    /// Dissolve a bifurcating root
    Unroot,
    /// Collapse or expand the given node
    Collapse {
        #[arg(long)]
        node: String,
    },
    /// Reverse the children of the given node
    Swap {
        #[arg(long)]
        node: String,
    },
    /// Expand every collapsed subtree
    Expand,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            RootingConfig::from_json(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => RootingConfig::default(),
    };
    let rooter = Rooter::new(config);

    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading tree {}", cli.input.display()))?;
    let tree = PhyloTree::from_json(&text)
        .with_context(|| format!("parsing tree {}", cli.input.display()))?;
    info!("loaded tree with {} tips", tree.count_tips());

    let result = match &cli.command {
        Command::Show => {
            print!("{}", tree);
            return Ok(());
        }
        Command::Stats => {
            print_stats(&tree);
            return Ok(());
        }
        Command::Reroot { node } => rooter.try_reroot_at_node(&tree, node)?,
        Command::Midpoint => rooter.root(&tree, RootingMethod::Midpoint),
        Command::LeastSquares => rooter.root(&tree, RootingMethod::LeastSquares),
        Command::Unroot => rooter.unroot(&tree),
        Command::Collapse { node } => {
            if !phyroot::can_toggle_collapse(&tree, node) {
                bail!("node '{}' has nothing to collapse or expand", node);
            }
            phyroot::toggle_collapse(&tree, node)
        }
        Command::Swap { node } => {
            if !phyroot::can_swap(&tree, node) {
                bail!("node '{}' has fewer than two children to swap", node);
            }
            phyroot::swap_children(&tree, node)
        }
        Command::Expand => phyroot::expand_all_collapsed(&tree),
    };

    let json = if cli.pretty {
        result.to_json_pretty()?
    } else {
        result.to_json()?
    };
    match &cli.output {
        Some(path) => {
            fs::write(path, json + "\n")
                .with_context(|| format!("writing tree {}", path.display()))?;
            info!("wrote tree with {} tips to {}", result.count_tips(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn print_stats(tree: &PhyloTree) {
    let describe = |value: Option<bool>| match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => "n/a",
    };
    println!("tips:                {}", tree.count_tips());
    println!("nodes:               {}", tree.count_nodes());
    println!("total branch length: {:.6}", tree.total_branch_length());
    println!("bifurcating:         {}", describe(tree.is_bifurcating()));
    println!("ultrametric:         {}", describe(tree.is_ultrametric()));
}
