//! Scalable-Go command line.
//!
//! ## Usage
//!
//! - `scalable-go gtp --size 9 --network net9.txt` - GTP engine on stdin/stdout
//! - `scalable-go init --size 3 --output net3.txt` - write a random network
//! - `scalable-go scale --input net3.txt --size 3 --output net5.txt` - grow a network by 2
//! - `scalable-go mutate --input net5.txt --output child5.txt` - perturb every weight
//! - `scalable-go demo` - let the engine play itself on a small board

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{LevelFilter, info};

use scalable_go::board::Color;
use scalable_go::constants::{DEFAULT_DEPTH, DEFAULT_MUTATION_RADIUS, MAX_GAME_LEN};
use scalable_go::game::Game;
use scalable_go::gtp::GtpEngine;
use scalable_go::network::GoNetwork;
use scalable_go::search::best_move;

/// Scalable-Go: Go engine with a board-size-scalable neural evaluator
#[derive(Parser)]
#[command(name = "scalable-go")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log search and scaling progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Settings shared by every command that builds a network.
#[derive(Args, Clone)]
struct NetworkArgs {
    /// Board size (odd, 3 to 19)
    #[arg(short, long, default_value_t = 5)]
    size: usize,
    /// Share one first-layer network per segment size
    #[arg(short, long)]
    uniform: bool,
    /// Seed for weight initialization
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) engine for use with GUI applications
    Gtp {
        #[command(flatten)]
        net: NetworkArgs,
        /// Weight file to load; a random network is used if omitted
        #[arg(short, long)]
        network: Option<PathBuf>,
        /// Plies searched below each candidate move
        #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
        depth: i32,
    },
    /// Write a randomly initialized network to a weight file
    Init {
        #[command(flatten)]
        net: NetworkArgs,
        /// Output weight file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Grow a network for an n x n board into one for (n+2) x (n+2)
    Scale {
        #[command(flatten)]
        net: NetworkArgs,
        /// Weight file of the smaller network (board size given by --size)
        #[arg(short, long)]
        input: PathBuf,
        /// Output weight file for the larger network
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Write a copy of a network with uniform noise added to every weight
    Mutate {
        #[command(flatten)]
        net: NetworkArgs,
        /// Weight file to start from
        #[arg(short, long)]
        input: PathBuf,
        /// Output weight file
        #[arg(short, long)]
        output: PathBuf,
        /// Largest change applied to a single weight
        #[arg(short, long, default_value_t = DEFAULT_MUTATION_RADIUS)]
        radius: f64,
    },
    /// Let the engine play both colors and print the result
    Demo {
        #[command(flatten)]
        net: NetworkArgs,
        /// Plies searched below each candidate move
        #[arg(short, long, default_value_t = 0)]
        depth: i32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    simple_logging::log_to_stderr(level);

    match cli.command {
        Some(Commands::Gtp {
            net,
            network,
            depth,
        }) => run_gtp(&net, network.as_deref(), depth),
        Some(Commands::Init { net, output }) => {
            let mut rng = make_rng(&net);
            let network = random_network(&net, &mut rng)?;
            save_network(&network, &output)
        }
        Some(Commands::Scale { net, input, output }) => run_scale(&net, &input, &output),
        Some(Commands::Mutate {
            net,
            input,
            output,
            radius,
        }) => {
            let mut rng = make_rng(&net);
            let mut network = load_network(net.size, net.uniform, &input)?;
            network.mutate(radius, &mut rng);
            save_network(&network, &output)
        }
        Some(Commands::Demo { net, depth }) => run_demo(&net, depth),
        None => run_demo(
            &NetworkArgs {
                size: 5,
                uniform: false,
                seed: None,
            },
            0,
        ),
    }
}

fn make_rng(net: &NetworkArgs) -> fastrand::Rng {
    match net.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    }
}

fn random_network(net: &NetworkArgs, rng: &mut fastrand::Rng) -> Result<GoNetwork> {
    let mut network = GoNetwork::new(net.size, net.uniform)
        .with_context(|| format!("cannot build a network for a {0}x{0} board", net.size))?;
    network.initialize_random(rng);
    Ok(network)
}

fn load_network(size: usize, uniform: bool, path: &Path) -> Result<GoNetwork> {
    let mut network = GoNetwork::new(size, uniform)
        .with_context(|| format!("cannot build a network for a {size}x{size} board"))?;
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    network
        .import_weights(&mut BufReader::new(file))
        .with_context(|| format!("cannot read weights from {}", path.display()))?;
    Ok(network)
}

fn save_network(network: &GoNetwork, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    network
        .export_weights(&mut writer)
        .with_context(|| format!("cannot write weights to {}", path.display()))?;
    writer.flush()?;
    info!("wrote {} network to {}", network.board_size(), path.display());
    Ok(())
}

fn run_gtp(net: &NetworkArgs, weights: Option<&Path>, depth: i32) -> Result<()> {
    let mut rng = make_rng(net);
    let network = match weights {
        Some(path) => load_network(net.size, net.uniform, path)?,
        None => random_network(net, &mut rng)?,
    };
    let mut engine = GtpEngine::new(network, depth, rng)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    engine.run(stdin.lock(), &mut stdout)?;
    Ok(())
}

fn run_scale(net: &NetworkArgs, input: &Path, output: &Path) -> Result<()> {
    let mut rng = make_rng(net);
    let smaller = load_network(net.size, net.uniform, input)?;
    let mut larger = GoNetwork::new(net.size + 2, net.uniform)
        .with_context(|| format!("cannot scale a {0}x{0} network any further", net.size))?;
    larger.scale_network(&smaller, &mut rng)?;
    save_network(&larger, output)
}

fn run_demo(net: &NetworkArgs, depth: i32) -> Result<()> {
    println!("Scalable-Go: self-play demo on {0}x{0}\n", net.size);

    let mut rng = make_rng(net);
    let network = random_network(net, &mut rng)?;
    let mut game = Game::new(net.size)?;
    let mut color = Color::Black;

    for ply in 0..MAX_GAME_LEN {
        if game.is_over() {
            break;
        }
        let (mv, value) = best_move(&network, &game, color, depth)?;
        game.make_move(&mv, color)?;
        match mv.piece() {
            Some(c) => println!("{ply:>3}. {color:?} ({}, {})  value {value:+.3}", c.x, c.y),
            None => println!("{ply:>3}. {color:?} pass  value {value:+.3}"),
        }
        color = color.opponent();
    }

    let [black, white] = game.calculate_scores();
    println!("\n{}", game.get_board());
    println!("Black: {black}  White: {white}");
    Ok(())
}
