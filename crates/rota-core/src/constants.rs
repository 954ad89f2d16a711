/// Seconds in one daily rotation turn.
pub const SECONDS_PER_DAY: u32 = 86_400;
/// Seconds in one weekly rotation turn.
pub const SECONDS_PER_WEEK: u32 = 604_800;

/// Expansion horizon used when the caller does not pick one.
pub const DEFAULT_HORIZON_WEEKS: u32 = 52;

/// Bounds for generated calendar color channels. Keeps colors light enough
/// to read against a white table.
pub const COLOR_CHANNEL_MIN: u8 = 100;
pub const COLOR_CHANNEL_MAX: u8 = 255;

/// Schedule name and description limits of the downstream schedule API.
pub const SCHEDULE_NAME_MAX_CHARS: usize = 255;
pub const SCHEDULE_DESCRIPTION_MAX_CHARS: usize = 1024;

/// Prefix for environment variable overrides, e.g. `ROTA_LOGGING__LEVEL`.
pub const ENV_PREFIX: &str = "ROTA";
