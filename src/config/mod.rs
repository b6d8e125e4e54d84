mod settings;

pub use settings::{Hotkeys, Settings};
