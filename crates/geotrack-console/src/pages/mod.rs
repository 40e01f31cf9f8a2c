//! Per-page record stores and the upload form orchestration.

mod report;
mod settings;
mod upload;

pub use report::ReportPage;
pub use settings::SettingsPage;
pub use upload::UploadPage;
