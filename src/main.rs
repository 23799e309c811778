use nbsim::{scaling_sweep, Body3, Scenario, ScenarioConfig, ScalingRecord, StepperKind};

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Direct-summation gravitational n-body engine", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scenario file and print the final body table
    Run {
        /// Scenario file, looked up under `scenarios/` when not found as given
        #[arg(short, long, default_value = "two_body.yaml")]
        file_name: String,

        /// Print a `step,x,y,z,...` frame every K steps instead of the final table
        #[arg(short, long, value_name = "K")]
        every: Option<usize>,
    },
    /// Time a backend across body counts and thread counts, CSV to stdout
    Bench {
        #[arg(short, long, value_enum, default_value_t = StepperKind::Threaded)]
        backend: StepperKind,

        /// Body counts to sweep
        #[arg(long, value_delimiter = ',', default_values_t = vec![500, 1000, 2000])]
        ns: Vec<usize>,

        /// Thread counts to sweep
        #[arg(short, long, value_delimiter = ',', default_values_t = vec![1, 2, 4, 8])]
        threads: Vec<usize>,

        /// Steps timed per cell
        #[arg(short, long, default_value_t = 100)]
        repeats: usize,

        #[arg(long, default_value_t = 0.001)]
        dt: f64,

        #[arg(short = 'g', long = "gravity", default_value_t = 0.001)]
        g: f64,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

// resolve here to keep main clean
fn scenario_path(file_name: &str) -> PathBuf {
    let given = PathBuf::from(file_name);
    if given.exists() {
        return given;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

fn print_body(prefix: &str, b: &Body3) {
    println!("{prefix}{},{},{},{},{},{},{}", b.x.x, b.x.y, b.x.z, b.v.x, b.v.y, b.v.z, b.m);
}

fn run(file_name: &str, every: Option<usize>) -> Result<()> {
    let path = scenario_path(file_name);
    let cfg = ScenarioConfig::from_path(&path)?;
    let mut scenario = Scenario::build_scenario(cfg)?;

    match every {
        Some(k) => {
            println!("step,x,y,z,vx,vy,vz,mass");
            scenario.run_with_frames(k, |step, bodies| {
                let prefix = format!("{step},");
                for b in bodies.bodies() {
                    print_body(&prefix, b);
                }
            })?;
        }
        None => {
            scenario.run()?;
            println!("x,y,z,vx,vy,vz,mass");
            for b in scenario.bodies.bodies() {
                print_body("", b);
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Run { file_name, every } => run(&file_name, every)?,
        Command::Bench { backend, ns, threads, repeats, dt, g, seed } => {
            info!("sweeping {backend} over N = {ns:?}, threads = {threads:?}");
            let records = scaling_sweep(backend, &ns, &threads, repeats, dt, g, seed)?;
            println!("{}", ScalingRecord::CSV_HEADER);
            for r in &records {
                println!("{}", r.to_csv_row());
            }
        }
    }

    Ok(())
}
