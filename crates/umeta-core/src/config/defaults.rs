//! Default values for umeta configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Scan Defaults
// ============================================================================

/// Directory scanned when neither the config nor the command line names one.
pub const DEFAULT_SOURCE_DIR: &str = ".";

/// Header extensions picked up by a scan (without leading dot).
pub const DEFAULT_EXTENSIONS: &[&str] = &["h"];

/// Directories never descended into.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
    // Version control
    ".git",
    ".svn",
    ".hg",
    // Engine build outputs
    "Binaries",
    "Intermediate",
    "Saved",
    "DerivedDataCache",
    // IDE/Editor
    ".idea",
    ".vscode",
    ".vs",
];

/// Honor `.gitignore` files while walking.
pub const DEFAULT_RESPECT_GITIGNORE: bool = true;

// ============================================================================
// Output Defaults
// ============================================================================

/// Base directory for emitted records.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Subdirectory of the data dir holding failure records.
pub const DEFAULT_FAIL_DIR: &str = "fail";

/// Finished containers.
pub const DEFAULT_CONTAINERS_FILE: &str = "UClasses.json";

/// Failed containers, under the fail dir.
pub const DEFAULT_FAILED_CONTAINERS_FILE: &str = "UClasses.json";

/// Failed properties, under the fail dir.
pub const DEFAULT_FAILED_PROPERTIES_FILE: &str = "UProperty.json";

/// Failed functions, under the fail dir.
pub const DEFAULT_FAILED_FUNCTIONS_FILE: &str = "UFunction.json";

// ============================================================================
// Config File Locations
// ============================================================================

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "umeta.toml";

/// Directory under the user config dir.
pub const USER_CONFIG_DIR: &str = "umeta";

/// File name inside [`USER_CONFIG_DIR`].
pub const USER_CONFIG_FILE: &str = "config.toml";

// ============================================================================
// Environment Variables
// ============================================================================

pub const ENV_SOURCE_DIR: &str = "UMETA_SOURCE_DIR";

/// Comma-separated list, e.g. `h,hpp`.
pub const ENV_EXTENSIONS: &str = "UMETA_EXTENSIONS";

pub const ENV_DATA_DIR: &str = "UMETA_DATA_DIR";
