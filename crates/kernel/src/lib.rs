pub mod settings;

pub use settings::{Environment, LogFormat, Settings};
