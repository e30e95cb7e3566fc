use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use motorway_sim::simulation::{SimWorld, GRID_HEIGHT, GRID_WIDTH, MAX_STEPS};

#[derive(Parser)]
#[command(name = "motorway_sim")]
#[command(about = "Grid traffic simulation driven by a random policy")]
struct Cli {
    /// Seed for the world and the policy; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum steps per episode
    #[arg(long, default_value_t = MAX_STEPS)]
    steps: u32,

    /// Number of episodes to run
    #[arg(long, default_value = "1")]
    episodes: u32,

    /// Print a summary line every N steps
    #[arg(long, default_value = "100")]
    summary_every: u32,

    /// Draw the ascii map alongside each summary
    #[arg(long)]
    show_map: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    info!("running {} episode(s) with seed {}", cli.episodes, seed);

    let mut world = SimWorld::new_with_seed(seed);
    let mut policy = StdRng::seed_from_u64(seed.wrapping_add(1));

    for episode in 0..cli.episodes {
        run_episode(&mut world, &mut policy, episode, &cli);
    }
}

/// Drive one episode with uniformly random actions
fn run_episode(world: &mut SimWorld, policy: &mut StdRng, episode: u32, cli: &Cli) {
    world.reset();
    info!("--- episode {} ---", episode);
    if cli.show_map {
        println!("{}", world.ascii_map());
    }

    let mut steps_taken = 0;
    while !world.is_done() && steps_taken < cli.steps {
        let action = [
            policy.random_range(0..=6),
            policy.random_range(0..GRID_WIDTH),
            policy.random_range(0..GRID_HEIGHT),
        ];
        world.step(&action);
        steps_taken += 1;

        if cli.summary_every > 0 && steps_taken % cli.summary_every == 0 {
            info!("{}", world.summary());
            if cli.show_map {
                println!("{}", world.ascii_map());
            }
        }
    }

    info!("episode {} finished: {}", episode, world.summary());
    info!(
        "total cars spawned: {} | total cars completed: {}",
        world.traffic().total_spawned(),
        world.traffic().total_completed()
    );
    if cli.show_map {
        println!("{}", world.ascii_map());
    }
}
