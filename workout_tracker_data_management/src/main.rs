use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_tracker_data_management::{
    console::{ConsoleGeolocation, ConsoleMap, ConsoleView},
    default_store_dir, FileStore,
};
use workout_tracker_lib::{
    config::SessionConfig,
    coords::Coords,
    form::FormFields,
    session::SessionController,
    workout::WorkoutId,
};

#[derive(Parser)]
#[command(name = "WorkoutCLI")]
#[command(about = "A CLI to record and inspect workouts", long_about = None)]
struct Cli {
    /// Directory holding the workout store. Defaults to data/store in the project root
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all saved workouts
    List,
    /// Record a workout at a position, as if the map was clicked there
    Add {
        #[command(subcommand)]
        workout: NewWorkout,
    },
    /// Move the map to a saved workout
    Show { id: String },
    /// Remove all saved workouts
    Reset,
}

#[derive(Subcommand)]
enum NewWorkout {
    Running {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// km
        #[arg(long, allow_hyphen_values = true)]
        distance: f64,
        /// min
        #[arg(long, allow_hyphen_values = true)]
        duration: f64,
        /// steps/min
        #[arg(long, allow_hyphen_values = true)]
        cadence: f64,
    },
    Cycling {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// km
        #[arg(long, allow_hyphen_values = true)]
        distance: f64,
        /// min
        #[arg(long, allow_hyphen_values = true)]
        duration: f64,
        /// m
        #[arg(long, allow_hyphen_values = true)]
        elevation: f64,
    },
}

impl NewWorkout {
    fn split(&self) -> (f64, f64, FormFields) {
        match *self {
            NewWorkout::Running { lat, lng, distance, duration, cadence } => {
                (lat, lng, FormFields::running(distance, duration, cadence))
            }
            NewWorkout::Cycling { lat, lng, distance, duration, elevation } => {
                (lat, lng, FormFields::cycling(distance, duration, elevation))
            }
        }
    }
}

type Controller = SessionController<ConsoleMap, ConsoleView, FileStore>;

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info,workout_tracker_data_management=info,workout_tracker_lib=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let dir = cli.data_dir.unwrap_or_else(default_store_dir);
    let store = match FileStore::open(&dir) {
        Ok(store) => store,
        Err(err) => {
            tracing::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut controller = Controller::new(ConsoleMap::default(), ConsoleView::default(), store, SessionConfig::default());

    match &cli.command {
        Commands::List => {
            controller.start(&mut ConsoleGeolocation::default());
            if controller.workouts().is_empty() {
                println!("No workouts");
            }
        }
        Commands::Add { workout } => {
            let (lat, lng, fields) = workout.split();
            let coords = match Coords::new(lat, lng) {
                Ok(coords) => coords,
                Err(err) => {
                    eprintln!("{err}");
                    return ExitCode::FAILURE;
                }
            };

            let mut geolocation = ConsoleGeolocation::at(coords);
            controller.start(&mut geolocation);
            if let Some(fix) = geolocation.fix {
                controller.position_acquired(fix);
            }

            controller.map_clicked(coords);
            if controller.form_submitted(fields).is_err() {
                // already reported through the view
                return ExitCode::FAILURE;
            }
        }
        Commands::Show { id } => {
            controller.start(&mut ConsoleGeolocation::default());
            let id = WorkoutId::from(id.as_str());

            // center on the most recent workout, as the browser would on the user's position
            let Some(latest) = controller.workouts().last().map(|workout| workout.coords()) else {
                println!("No workouts");
                return ExitCode::FAILURE;
            };
            if !controller.workouts().iter().any(|workout| workout.id() == &id) {
                println!("No workout with id {id}");
                return ExitCode::FAILURE;
            }

            controller.position_acquired(latest);
            controller.list_item_clicked(&id);
        }
        Commands::Reset => {
            if controller.reset().is_err() {
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
