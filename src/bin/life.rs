use clap::Parser;
use lifesim::{Config, Simulation, Status, Strategy};
use log::{error, info};
use std::thread::sleep;
use std::time::Duration;

/// Seed a random board and print it every generation until it dies out or settles.
#[derive(Debug, Parser)]
#[clap(version, about)]
struct Args {
    #[clap(long, default_value_t = 4)]
    height: usize,
    #[clap(long, default_value_t = 4)]
    width: usize,
    /// Number of cells to bring to life before the first generation.
    #[clap(short, long, default_value_t = 10)]
    cells: usize,
    /// `dense` or `sparse`.
    #[clap(short, long, default_value_t = Strategy::Dense)]
    strategy: Strategy,
    /// Stop after this many generations.
    #[clap(short, long, default_value_t = 50)]
    generations: u64,
    /// Seed for reproducible boards.
    #[clap(long)]
    rng_seed: Option<u64>,
    /// Delay between generations in milliseconds.
    #[clap(long, default_value_t = 100)]
    delay: u64,
    /// Also print the neighbor counts (dense strategy only).
    #[clap(long)]
    counts: bool,
}

fn dump(sim: &Simulation, counts: bool) {
    println!("Cell states:");
    print!("{}", sim);
    if counts {
        if let Some(grid) = sim.neighbor_counts() {
            println!("Neighbor counts:");
            print!("{}", grid);
        }
    }
    println!("{}", sim.live_cell_count());
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = Config {
        height: args.height,
        width: args.width,
        strategy: args.strategy,
        max_generations: Some(args.generations),
        rng_seed: args.rng_seed,
    };
    let mut sim = match Simulation::new(&config) {
        Ok(sim) => sim,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };

    let seeded = sim.seed(args.cells);
    info!(
        "seeded {} cells on a {}x{} {} board",
        seeded,
        args.height,
        args.width,
        sim.strategy()
    );
    if args.counts && sim.neighbor_counts().is_none() {
        info!("neighbor counts are only kept by the dense strategy");
    }
    dump(&sim, args.counts);

    loop {
        let status = sim.tick();
        match status {
            Status::Running => {
                println!("generation {}:", sim.generation());
                dump(&sim, args.counts);
                sleep(Duration::from_millis(args.delay));
            }
            Status::Extinct => {
                println!("All cells are dead, game over.");
                break;
            }
            Status::SteadyState => {
                println!("Reached a steady state, game over.");
                break;
            }
            Status::MaxGenerationsReached => {
                println!("Stopped after {} generations.", sim.generation());
                break;
            }
        }
    }
}
