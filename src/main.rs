//! Tomato Rush headless runner
//!
//! Drives the simulation with an autopilot player and reports how far it got.
//! Usage: `tomato-rush [tuning.json] [seed]`

use glam::Vec3;

use tomato_rush::consts::*;
use tomato_rush::player::{MoveIntent, PlayerController};
use tomato_rush::sim::{GameEvent, TickInput, World, tick};
use tomato_rush::tuning::Tuning;

/// Wall-clock frame length the runner pretends to render at
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up after five minutes of game time
const MAX_RUN_MS: u64 = 5 * 60 * 1000;
/// Autopilot trigger discipline
const FIRE_INTERVAL_MS: u64 = 250;
/// Autopilot backs off when an enemy is closer than this
const PANIC_RANGE: f32 = 12.0;

/// Game instance holding all state
struct Game {
    world: World,
    player: PlayerController,
    accumulator: f32,
    now_ms: u64,
    last_fire_ms: u64,
}

impl Game {
    fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            world: World::new(tuning, seed, 0),
            player: PlayerController::default(),
            accumulator: 0.0,
            now_ms: 0,
            last_fire_ms: 0,
        }
    }

    /// Aim at the nearest enemy, circle-strafe, back off when crowded
    fn autopilot(&self) -> (MoveIntent, Vec3, bool) {
        let eye = self.player.pos;
        let nearest = self
            .world
            .enemies()
            .iter()
            .min_by(|a, b| {
                a.pos
                    .distance_squared(eye)
                    .partial_cmp(&b.pos.distance_squared(eye))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let Some(target) = nearest else {
            return (MoveIntent::default(), Vec3::NEG_Z, false);
        };

        let facing = (target.pos - eye).normalize_or_zero();
        let crowded = tomato_rush::horizontal(target.pos - eye).length() < PANIC_RANGE;
        let intent = MoveIntent {
            backward: crowded,
            right: true,
            ..Default::default()
        };
        let fire = self.now_ms.saturating_sub(self.last_fire_ms) >= FIRE_INTERVAL_MS;
        (intent, facing, fire)
    }

    /// Run simulation ticks for one rendered frame
    fn update(&mut self, dt: f32) {
        self.accumulator += dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let (intent, facing, fire) = self.autopilot();
            self.player
                .update(&intent, facing, SIM_DT, self.world.tuning());

            let mut input = TickInput {
                player_pos: self.player.pos,
                shots: Vec::new(),
            };
            if fire {
                input.shots.push(self.player.shot(facing));
                self.last_fire_ms = self.now_ms;
            }

            tick(&mut self.world, &input, SIM_DT, self.now_ms);
            self.now_ms += SIM_DT_MS;
            self.accumulator -= SIM_DT;
            substeps += 1;

            for event in self.world.drain_events() {
                match event {
                    GameEvent::LevelUp { level } => log::info!("Reached level {}", level),
                    GameEvent::GameOver { score, level } => {
                        log::info!("Run over: score {} at level {}", score, level)
                    }
                    other => log::debug!("{:?}", other),
                }
            }
        }
    }

    fn finished(&self) -> bool {
        self.world.state().is_game_over() || self.now_ms >= MAX_RUN_MS
    }
}

fn main() {
    env_logger::init();
    log::info!("Tomato Rush (headless) starting...");

    let args: Vec<String> = std::env::args().collect();
    let tuning = match args.get(1) {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };
    let seed = args
        .get(2)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);
    log::info!("Seed {}", seed);

    let mut game = Game::new(tuning, seed);
    while !game.finished() {
        game.update(FRAME_DT);
    }

    let hud = game.world.hud();
    println!(
        "{:?} after {:.1}s: score {}, level {}, lives {}",
        hud.status,
        game.now_ms as f64 / 1000.0,
        hud.score,
        hud.level,
        hud.lives
    );
}
