use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use floorplan::import;
use floorplan::{DetectMerge, DetectorParams, FloorPlan, SynthesisTarget};

#[derive(Parser)]
#[command(name = "floorplan", about = "Floor-plan room detection", version)]
struct Cli {
    /// Log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect candidate rooms on a floor-plan image.
    Detect {
        /// Path to the scanned floor plan (any format the image crate decodes).
        image: PathBuf,
        /// Editor canvas width the rooms are rescaled into.
        #[arg(long, default_value_t = 1200)]
        width: i32,
        /// Editor canvas height.
        #[arg(long, default_value_t = 900)]
        height: i32,
        /// JSON file with detector parameter overrides.
        #[arg(long)]
        params: Option<PathBuf>,
        /// Print the resulting floor plan as JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = floorplan::core::init_with_level(level);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Detect {
            image,
            width,
            height,
            params,
            json,
        } => {
            let params = match params {
                Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
                None => DetectorParams::default(),
            };

            let mut plan = FloorPlan::new();
            let target = SynthesisTarget::new(
                width,
                height,
                plan.next_room_index(),
                plan.legend.first_id(),
                plan.sections.first_id(),
            );

            let rooms = import::detect_rooms_from_path(&image, &params, &target)?;
            if rooms.is_empty() {
                eprintln!("no rooms detected; add rooms manually in the editor");
            }
            plan.apply_detected(rooms, DetectMerge::Replace);

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                for room in &plan.rooms {
                    println!(
                        "{:<12} x={:<5} y={:<5} w={:<5} h={:<5}",
                        room.name, room.rect.x, room.rect.y, room.rect.width, room.rect.height
                    );
                }
                println!("{} room(s)", plan.rooms.len());
            }
            Ok(())
        }
    }
}
