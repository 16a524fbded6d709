//! Presentation rules shared by the terminal dashboard, the headless mode and `snapshot`.

pub mod format;
pub mod html;
pub mod rows;

pub use rows::{AgentDirectory, CustomerRow, PortfolioStats, build_rows};
