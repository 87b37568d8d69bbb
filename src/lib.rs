pub mod app;
pub mod config;
pub mod errors;
pub mod games;
pub mod handlers;
pub mod models;
pub mod state;
pub mod ui;
pub mod upstream;
pub mod wire;

pub use app::router;
pub use config::Settings;
pub use games::get_games_data;
pub use state::AppState;
pub use upstream::{HttpNhlApi, NhlApi};
