/// Backend origin. Empty means same origin, which is how the Flask server hosts the client.
pub const API_BASE: &str = match option_env!("FITQUEST_API_BASE") {
    Some(base) => base,
    None => "",
};

pub const SESSION_STORAGE_KEY: &str = "currentUser";

pub const HISTORY_LIMIT: usize = 10;
pub const DEFAULT_XP_FOR_NEXT_LEVEL: u32 = 100;

// Reward toasts
pub const TOAST_FIRST_DELAY_MS: u32 = 500;
pub const TOAST_STAGGER_MS: u32 = 1000;
pub const TOAST_VISIBLE_MS: u32 = 4000;
pub const TOAST_FADE_MS: u32 = 500;
pub const TOAST_ENTER_MS: u32 = 10;

pub const MASCOT_CELEBRATE_MS: u32 = 3000;
pub const FRIEND_MESSAGE_CLEAR_MS: u32 = 3000;

pub const EQUIPMENT_CHOICES: [&str; 4] = ["None", "Dumbbells", "Barbell", "Pull-up Bar"];
pub const GOAL_CHOICES: [&str; 3] = ["General Fitness", "Build Strength", "Lose Weight"];

pub const CONNECTIVITY_MESSAGE: &str = "Could not connect to the server. Please try again later.";
pub const NETWORK_ERROR_MESSAGE: &str = "A network error occurred.";
