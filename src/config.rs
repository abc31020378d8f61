// All tunable game constants in one place.

// World (size of the night-sky backdrop, centred on the origin)
pub const WORLD_WIDTH: f32 = 960.0;
pub const WORLD_HEIGHT: f32 = 1280.0;

// Screen
pub const SCREEN_WIDTH: f32 = 480.0;
pub const SCREEN_HEIGHT: f32 = 640.0;

// Session
pub const ROUND_TIME: f32 = 2.0 * 60.0;
pub const CAPTURE_TIME_BONUS: f32 = 10.0;
pub const FIREFLIES_MIN: u32 = 5;
pub const FIREFLIES_MAX: u32 = 10; // exclusive
pub const BUTTERFLIES_PER_LEVEL: u32 = 2;

// Fireflies
pub const FIREFLY_RADIUS: f32 = 4.0;
pub const FIREFLY_MAX_FORCE: f32 = 5.0 * 2.0;
pub const FIREFLY_MIN_SPEED: f32 = 8.0 * 2.0;
pub const FIREFLY_MAX_SPEED: f32 = 12.0 * 2.0;
pub const FIREFLY_WANDER_GAIN: f32 = 12.0;
pub const FIREFLY_CONTAINMENT_GAIN: f32 = 2.0;
pub const FIREFLY_FLICKER_SPEED_MIN: f32 = 0.4;
pub const FIREFLY_FLICKER_SPEED_MAX: f32 = 0.8;

// Butterflies
pub const BUTTERFLY_RADIUS: f32 = 4.0;
pub const BUTTERFLY_MAX_SPEED: f32 = 75.0;
pub const BUTTERFLY_MAX_FORCE: f32 = 3.0 * BUTTERFLY_MAX_SPEED;
pub const BUTTERFLY_WANDER_GAIN: f32 = 1.0;
pub const BUTTERFLY_CONTAINMENT_GAIN: f32 = 3.0;
pub const BUTTERFLY_WING_RATE_MIN: f32 = 3.0;
pub const BUTTERFLY_WING_RATE_MAX: f32 = 7.0;

// Shared flicker
pub const RADIUS_FLICKER_AMPLITUDE: f32 = 2.0;
pub const RADIUS_FLICKER_SPEED: f32 = 50.0;

// Player
pub const PLAYER_RADIUS: f32 = 8.0;
pub const PLAYER_MAX_SPEED: f32 = 75.0;
pub const PLAYER_MAX_FORCE: f32 = 3.0 * PLAYER_MAX_SPEED;
pub const PLAYER_SPEED_DAMPING: f32 = 0.97; // per update
pub const PLAYER_WING_RATE_MIN: f32 = 2.0;
pub const PLAYER_WING_RATE_MAX: f32 = 3.0;

// Ghost trail
pub const GHOST_SAMPLE_INTERVAL: u32 = 4;
pub const GHOST_ALPHA: f32 = 0.3;
pub const GHOST_SCALE: f32 = 0.6;
pub const GHOST_ALPHA_FADE: f32 = 0.1;
pub const GHOST_SCALE_FADE: f32 = 0.2;

// Sonar
pub const SONAR_PING_SPEED: f32 = 100.0;
pub const SONAR_COOLDOWN: f32 = 2.0;
pub const SONAR_PING_RADIUS: f32 = 1.0;

// Camera
pub const CAMERA_SMOOTH_SPEED: f32 = 8.0;

// Star field
pub const STAR_CELL_SIZE: f32 = 32.0;
pub const STAR_DENSITY: f32 = 0.6;

// Persistence
pub const DEFAULT_SCORES_PATH: &str = "chase_highscore.json";

/// Command-line overrides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchOptions {
    pub seed: Option<u64>,
    pub scores_path: String,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            seed: None,
            scores_path: DEFAULT_SCORES_PATH.to_string(),
        }
    }
}

impl LaunchOptions {
    /// Parse `--seed <u64>` and `--scores <path>`. Unknown or malformed
    /// arguments are reported and ignored.
    pub fn parse_cli<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut opts = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "--seed" => match args.next().map(|v| v.as_ref().parse::<u64>()) {
                    Some(Ok(seed)) => opts.seed = Some(seed),
                    _ => log::warn!("--seed expects an unsigned integer"),
                },
                "--scores" => match args.next() {
                    Some(path) => opts.scores_path = path.as_ref().to_string(),
                    None => log::warn!("--scores expects a file path"),
                },
                other => log::warn!("ignoring unknown argument {other:?}"),
            }
        }
        opts
    }

    pub fn from_env() -> Self {
        Self::parse_cli(std::env::args().skip(1))
    }
}
