pub const INTAKE_SAVED: &str = "Water intake updated!";
pub const GOAL_SAVED: &str = "Goal saved!";
pub const GOAL_ACHIEVED: &str = "Goal achieved \u{1f389}";

pub fn intake_message(liters: f64) -> String {
    if liters > 0.0 {
        format!("Today's water intake: {liters:.2} liters")
    } else {
        "No water intake recorded for today yet.".to_string()
    }
}

pub fn summary(liters: f64, goal: f64, percent: f64) -> String {
    format!("You have consumed {liters:.2} L of {goal:.2} L ({percent:.0}%).")
}
