// World geometry (world units, origin at screen centre, +y up)
pub const CAMERA_ORTHOGRAPHIC_SIZE: f64 = 50.0;
pub const TOTAL_VERTICAL_SPAN: f64 = CAMERA_ORTHOGRAPHIC_SIZE * 2.0;
pub const WORLD_FLOOR_Y: f64 = -CAMERA_ORTHOGRAPHIC_SIZE;
pub const WORLD_CEILING_Y: f64 = CAMERA_ORTHOGRAPHIC_SIZE;

// Pipes
pub const PIPE_BODY_WIDTH: f64 = 11.7;
pub const PIPE_HEAD_HEIGHT: f64 = 5.0;
pub const PIPE_MOVE_SPEED: f64 = 30.0;
pub const PIPE_SPAWN_X_POSITION: f64 = 100.0;
pub const PIPE_DESTROY_X_POSITION: f64 = -100.0;
pub const GAP_EDGE_MARGIN: f64 = 10.0;

// Flyer
pub const FLYER_X_POSITION: f64 = 0.0;
pub const FLYER_JUMP_AMOUNT: f64 = 100.0;
pub const FLYER_HALF_WIDTH: f64 = 4.0;
pub const FLYER_HALF_HEIGHT: f64 = 3.5;

// Physics
pub const GRAVITY: f64 = -300.0;
pub const TERMINAL_VELOCITY: f64 = -200.0;

// Difficulty thresholds on pipes spawned
pub const MEDIUM_THRESHOLD: u32 = 10;
pub const HARD_THRESHOLD: u32 = 20;
pub const IMPOSSIBLE_THRESHOLD: u32 = 30;

// Ground belt
pub const GROUND_SEGMENT_COUNT: usize = 3;
pub const GROUND_SEGMENT_WIDTH: f64 = 192.0;
pub const GROUND_DESTROY_X_POSITION: f64 = -200.0;
pub const GROUND_SPEED_MULTIPLIER: f64 = 1.0;

// Clouds
pub const CLOUD_SPAWN_X_POSITION: f64 = 160.0;
pub const CLOUD_DESTROY_X_POSITION: f64 = -160.0;
pub const CLOUD_Y_POSITION: f64 = 30.0;
pub const CLOUD_SPEED_MULTIPLIER: f64 = 0.7;
pub const CLOUD_SPAWN_INTERVAL: f64 = 6.0;

// Session stepping
pub const PHYSICS_STEP_SECONDS: f64 = 1.0 / 60.0;
pub const MAX_FRAME_SECONDS: f64 = 0.1;

// Persistence
pub const DATA_DIR_NAME: &str = ".flappy";
pub const PREFS_FILE_NAME: &str = "prefs.json";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = "flappy.log";
pub const HIGHSCORE_KEY: &str = "highscore";
