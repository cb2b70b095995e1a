#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod json_file;
pub mod memory;
pub mod settings;

pub use json_file::{FileError, JsonFileStorage};
pub use memory::MemoryStorage;
pub use settings::Settings;
