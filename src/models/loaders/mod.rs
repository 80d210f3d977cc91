pub mod toml_loader;

pub use toml_loader::{load_narration_script, parse_narration_script};
