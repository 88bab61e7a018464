// Settings module

mod settings;

pub use settings::{Settings, SETTINGS_FILE_NAME};
