use rand::seq::SliceRandom;
use rand::Rng;

pub const TIPS: [&str; 10] = [
    "Drink plenty of water throughout the day.",
    "Take the stairs instead of the elevator.",
    "Aim for at least 30 minutes of physical activity daily.",
    "Stretch your body after waking up.",
    "Prioritize consistency over intensity for long-term progress.",
    "Include both cardio and strength training in your routine.",
    "Get enough sleep to help your muscles recover.",
    "Don\u{2019}t skip your warm-up or cool-down.",
    "Listen to your body and rest when needed.",
    "Plan your workouts in advance to stay on track.",
];

pub fn random_tip<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    TIPS.choose(rng).copied().unwrap_or(TIPS[0])
}
