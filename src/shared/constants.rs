pub const APP_NAME: &str = "cellpaint";

pub const CONFIG_FILE: &str = "cellpaint.json";
pub const USER_CONFIG_FILE: &str = "config.json";
pub const ERROR_LOG_FILE: &str = "cellpaint-error.log";
pub const DEBUG_LOG_FILE: &str = "cellpaint-debug.log";

pub const DEFAULT_FPS: u32 = 30;
pub const DEFAULT_CIRCLE_COUNT: usize = 3;

pub const SNAPSHOT_WIDTH: u16 = 80;
pub const SNAPSHOT_HEIGHT: u16 = 24;

pub const DEMO_TITLE: &str = " cellpaint  [q] quit  [space] pause ";
