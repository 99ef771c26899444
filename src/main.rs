//! Reef Runner headless runner
//!
//! Plays a level pack with a simple autopilot and logs what happens. Rendering,
//! audio and device input belong to a host application.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result};
    use clap::Parser;

    use reef_runner::Tuning;
    use reef_runner::consts::TICKS_PER_SECOND;
    use reef_runner::sim::{
        GameEvent, GamePhase, GameState, LevelPack, TickInput, floor_ahead, tick, wall_ahead,
    };

    #[derive(Parser)]
    #[command(name = "reef-runner")]
    #[command(about = "Run the Reef Runner simulation headless with an autopilot")]
    struct Cli {
        /// Level pack JSON file (built-in levels if omitted)
        #[arg(long)]
        levels: Option<PathBuf>,
        /// Tuning overrides JSON file
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Number of ticks to simulate
        #[arg(long, default_value_t = 3600)]
        ticks: u64,
        /// Seed for screen shake jitter
        #[arg(long, default_value_t = 0)]
        seed: u64,
    }

    fn read(path: &Path) -> Result<String> {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Holds right, hops over walls, gaps and enemies, confirms every prompt
    #[derive(Default)]
    struct Autopilot {
        jump_held: bool,
        start_held: bool,
    }

    impl Autopilot {
        fn input(&mut self, state: &GameState) -> TickInput {
            if state.phase != GamePhase::Playing {
                // Alternate so each confirm is a fresh press
                self.start_held = !self.start_held;
                return TickInput {
                    start: self.start_held,
                    ..Default::default()
                };
            }

            let player = &state.level.player;
            let body = &player.body;
            let grid = &state.level.grid;
            let enemy_ahead = state.level.enemies.iter().any(|e| {
                let dx = e.body.pos.x - body.pos.x;
                e.alive && dx > 0.0 && dx < 80.0 && (e.body.center_y() - body.center_y()).abs() < 40.0
            });
            let want_jump = body.grounded
                && (wall_ahead(body, grid, 2.0) || !floor_ahead(body, grid, 2.0) || enemy_ahead);

            let jump = want_jump && !self.jump_held;
            self.jump_held = jump;
            TickInput {
                right: true,
                jump,
                ..Default::default()
            }
        }
    }

    #[derive(Debug, Default)]
    struct Tally {
        coins: u32,
        blocks: u32,
        stomps: u32,
        hurts: u32,
        deaths: u32,
        goals: u32,
    }

    impl Tally {
        fn record(&mut self, event: GameEvent, tick: u64) {
            match event {
                GameEvent::CoinCollected => self.coins += 1,
                GameEvent::BlockStruck { .. } => self.blocks += 1,
                GameEvent::EnemyStomped => self.stomps += 1,
                GameEvent::PlayerHurt => self.hurts += 1,
                GameEvent::PlayerDied => {
                    self.deaths += 1;
                    log::info!("Tick {tick}: player died");
                }
                GameEvent::GoalReached => {
                    self.goals += 1;
                    log::info!("Tick {tick}: goal reached");
                }
                GameEvent::LevelLoaded { index } => log::info!("Tick {tick}: level {index} loaded"),
                GameEvent::GameStarted | GameEvent::Jumped | GameEvent::PowerupCollected => {
                    log::debug!("Tick {tick}: {event:?}");
                }
            }
        }
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();

        let pack = match &cli.levels {
            Some(path) => LevelPack::from_json(&read(path)?)
                .with_context(|| format!("Failed to load level pack {}", path.display()))?,
            None => LevelPack::builtin(),
        };
        let tuning = match &cli.tuning {
            Some(path) => Tuning::from_json(&read(path)?)
                .with_context(|| format!("Failed to parse tuning {}", path.display()))?,
            None => Tuning::default(),
        };

        log::info!(
            "Running pack '{}' for {} ticks ({:.1}s), seed {}",
            pack.name,
            cli.ticks,
            cli.ticks as f32 / TICKS_PER_SECOND as f32,
            cli.seed
        );

        let mut state = GameState::new(pack, tuning, cli.seed);
        let mut pilot = Autopilot::default();
        let mut tally = Tally::default();

        for _ in 0..cli.ticks {
            let input = pilot.input(&state);
            tick(&mut state, &input);
            for &event in &state.events {
                tally.record(event, state.time_ticks);
            }
        }

        println!("Finished after {} ticks", state.time_ticks);
        println!("  phase:  {:?}", state.phase);
        println!("  level:  {}", state.level_index);
        println!("  score:  {}", state.score);
        println!("  {tally:?}");
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Reef Runner (native) starting...");
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on the web; nothing to run here
}
