mod auth;
mod catalog;
mod dashboard;
mod friends;
mod planner;
mod profile;
mod quests;

pub use auth::{Login, Register};
pub use catalog::Catalog;
pub use dashboard::Dashboard;
pub use friends::Friends;
pub use profile::Profile;
pub use quests::Quests;
