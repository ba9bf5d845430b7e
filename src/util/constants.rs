// blazestd - util/constants.rs
//
// Single source of truth for named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "BlazeVM";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "BlazeVM";

/// Crate version (from Cargo.toml).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Virtual machine banner
// =============================================================================

/// Version printed in the VM banner. Independent of the crate version.
pub const VM_VERSION: &str = "0.0.1";

/// First line of the VM banner.
pub const VM_BANNER_TITLE: &str = "---Blaze Virtual Machine---";

/// Environment variable holding the name of the compiled file.
pub const ENV_FILE_NAME: &str = "bze_name";

/// Environment variable holding the content of the compiled file.
pub const ENV_FILE_CONTENT: &str = "bze_content";

// =============================================================================
// Console input limits
// =============================================================================

/// Default maximum characters returned by `input_string`.
///
/// Compiled programs historically read lines into a 100-byte buffer,
/// one byte of which held the terminator.
pub const DEFAULT_MAX_INPUT_STRING_LEN: usize = 99;

/// Lower bound for the configured `input_string` limit.
pub const MIN_MAX_INPUT_STRING_LEN: usize = 1;

/// Hard upper bound for the configured `input_string` limit.
pub const ABSOLUTE_MAX_INPUT_STRING_LEN: usize = 64 * 1024;

// =============================================================================
// Formatting limits
// =============================================================================

/// Maximum padding emitted for a single width or precision directive.
pub const MAX_FORMAT_PADDING: usize = 4_096;

/// Default precision for `%f`, `%e` and `%g` when none is given.
pub const DEFAULT_FLOAT_PRECISION: usize = 6;

// =============================================================================
// Logging and configuration
// =============================================================================

/// Log level used when neither RUST_LOG, --debug, nor config set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Exit code for a successful run.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for any failure, including the `error` built-in.
pub const EXIT_FAILURE: i32 = 1;

/// Status returned by the file shims on failure.
pub const STATUS_FAIL: i32 = -1;
