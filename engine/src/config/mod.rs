// Dashboard configuration: embedded defaults plus an optional JSON override.
pub mod settings;

pub use settings::DashboardSettings;
