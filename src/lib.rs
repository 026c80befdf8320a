pub mod app;
pub mod clock;
pub mod config;
pub mod errors;
pub mod goal;
pub mod handlers;
pub mod ledger;
pub mod messages;
pub mod models;
pub mod state;
pub mod storage;
pub mod store;
pub mod tips;
pub mod ui;

pub use app::router;
pub use clock::{Clock, FixedClock, LocalClock};
pub use config::Config;
pub use goal::{GoalTracker, Progress};
pub use ledger::{DailyLedger, DateKey};
pub use state::AppState;
pub use storage::load_data;
pub use store::KeyValueStore;
