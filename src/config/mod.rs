mod loader;
mod merge;
mod model;
mod presets;

pub use loader::{
    CONFIG_FILE_NAME, ConfigLoader, FileConfigLoader, FileSystem, LoadResult, RealFileSystem,
    parse_config,
};
pub use merge::merge_configs;
pub use model::{DoctorConfig, IgnoreMatcher, Preset, RuleOptions, Severity};
pub use presets::{
    PRESET_TABLE, PresetRow, preset_map, preset_severity, resolve_severity,
};
