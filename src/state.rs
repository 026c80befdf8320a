use crate::clock::Clock;
use crate::goal::GoalTracker;
use crate::ledger::DailyLedger;
use crate::models::AppData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub ledger: DailyLedger,
    pub goals: GoalTracker,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData, clock: Arc<dyn Clock>) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            ledger: DailyLedger::new(clock),
            goals: GoalTracker,
        }
    }
}
