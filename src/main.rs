//! Idle Miner CLI
//!
//! Runs the automation against an emulator reachable over ADB, or a single
//! diagnostic with `--test`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use idle_miner::android::Adb;
use idle_miner::clock::SystemClock;
use idle_miner::config::Settings;
use idle_miner::game::Area;
use idle_miner::vision::{Perception, ScaleContext, TemplateStore, TesseractReader};
use idle_miner::{Miner, MinerError};

#[derive(Parser, Debug)]
#[command(name = "miner")]
#[command(about = "Play Idle Miner Tycoon in an Android emulator")]
struct Args {
    /// JSON settings file; defaults are used for anything it leaves out
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run one feature and print its result instead of playing
    #[arg(long, value_enum, num_args = 0..=1, default_missing_value = "verify-shaft")]
    test: Option<Feature>,

    /// With a managers feature, assign this manager (normalized name, e.g. "drsteiner")
    #[arg(long)]
    manager: Option<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum, PartialEq, Eq)]
enum Feature {
    VerifyShaft,
    VerifyGame,
    Overview,
    Discover,
    ManagersShaft,
    ManagersElevator,
    ManagersWarehouse,
    NewShaft,
    Barrier,
    LevelUp,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), MinerError> {
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let mut adb = Adb::new(&settings.device);
    let ctx = ScaleContext::discover(&mut adb)?;
    let templates = TemplateStore::new(settings.assets_dir.join(ctx.resolution().asset_dir_name()));
    log::info!("Reference images from {}", templates.dir().display());

    let vision = Perception::new(adb.clone(), TesseractReader::new(&settings.device), templates);
    let mut miner = Miner::new(vision, adb, SystemClock::new(), ctx, settings);

    match args.test {
        Some(feature) => diagnose(&mut miner, feature, args.manager.as_deref()),
        None => miner.run(),
    }
}

fn diagnose<V, I, C>(miner: &mut Miner<V, I, C>, feature: Feature, manager: Option<&str>) -> Result<(), MinerError>
where
    V: idle_miner::vision::Vision,
    I: idle_miner::android::Input,
    C: idle_miner::clock::Clock,
{
    match feature {
        Feature::VerifyShaft => {
            let found = miner.verify_in_shaft(idle_miner::tasks::verify::SHAFT_TIMEOUT)?;
            println!("verify_in_shaft: {}", found);
        }
        Feature::VerifyGame => println!("verify_in_game: {}", miner.verify_in_game()?),
        Feature::Overview => {
            println!("mine_overview: {}", miner.mine_overview()?);
            println!("area needing level: {}", miner.state.area_needing_level);
        }
        Feature::Discover => println!("mine: {}", miner.discover_variant()?.name()),
        Feature::ManagersShaft => cycle(miner, Area::PrimaryShaft, manager)?,
        Feature::ManagersElevator => cycle(miner, Area::Elevator, manager)?,
        Feature::ManagersWarehouse => cycle(miner, Area::Warehouse, manager)?,
        Feature::NewShaft => println!("new shafts opened: {}", miner.new_shaft()?),
        Feature::Barrier => println!("barrier unlocked: {}", miner.unlock_barrier()?),
        Feature::LevelUp => println!("level up: {:?}", miner.level_up()?),
    }
    Ok(())
}

fn cycle<V, I, C>(miner: &mut Miner<V, I, C>, area: Area, manager: Option<&str>) -> Result<(), MinerError>
where
    V: idle_miner::vision::Vision,
    I: idle_miner::android::Input,
    C: idle_miner::clock::Clock,
{
    let assigned = miner.cycle_area(area, manager)?;
    let state = miner.state.managers.get(area);
    println!("{} manager assigned: {}", area, assigned);
    println!(
        "  known: {}, boosted: {}, next change at {}s",
        state.identity_known,
        state.boosted,
        state.next_eligible_change.as_secs()
    );
    Ok(())
}
