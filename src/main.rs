use clap::Parser;
use log::{error, info, warn};
use macroquad::prelude::Conf;
use slingshot::config::{self, WINDOW_HEIGHT, WINDOW_WIDTH};
use slingshot::error::GameError;
use slingshot::game::Game;
use slingshot::input::MacroquadInput;
use slingshot::logging;
use slingshot::render::Renderer;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Debug filter to specify log topics (e.g., "physics,collision")
    /// Available topics: physics, collision, camera, input
    #[arg(long)]
    debug_filter: Option<String>,

    /// Physics ticks per second.
    #[arg(long, default_value_t = config::TICK_RATE)]
    tick_rate: u32,

    /// Disable sound effects.
    #[arg(long)]
    mute: bool,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Slingshot".to_owned(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

async fn start(args: Args) -> Result<(), GameError> {
    logging::init_logger(logging::parse_level(&args.log_level), args.debug_filter.clone())?;

    if let Some(filter) = &args.debug_filter {
        for topic in filter.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if !logging::TOPICS.iter().any(|known| known.starts_with(topic)) {
                warn!("Unknown debug topic '{}'; available: {}", topic, logging::TOPICS.join(", "));
            }
        }
    }

    info!("Initializing Slingshot...");
    let mut game = Game::new(args.tick_rate, args.mute)?;

    info!("Tessellating scene");
    let renderer = Renderer::new(&game.simulation.scene);
    let mut input = MacroquadInput::new();

    game.run(&mut input, &renderer).await
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();

    if let Err(e) = start(args).await {
        // The logger may be the thing that failed
        if matches!(e, GameError::Logger(_)) {
            eprintln!("Error: {}", e);
        } else {
            error!("{}", e);
        }
        std::process::exit(1);
    }
}
