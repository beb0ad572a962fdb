use serde::{Deserialize, Serialize};

/// Logged-in user as returned by `/api/login` and kept in localStorage.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionRecord {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub goals: Option<String>,
    #[serde(rename = "available_equipment", alias = "equipment", default)]
    pub equipment: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub muscle_group: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub equipment: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

pub type Workout = Vec<Exercise>;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Badge {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserStats {
    pub username: String,
    pub level: u32,
    pub xp: u32,
    #[serde(default)]
    pub xp_needed_for_next_level: Option<u32>,
    #[serde(default)]
    pub streak_count: Option<u32>,
    #[serde(default)]
    pub unlocked_badges: Option<Vec<Badge>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Quest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reward_xp: u32,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct QuestBoard {
    #[serde(default)]
    pub daily: Option<Vec<Quest>>,
    #[serde(default)]
    pub weekly: Option<Vec<Quest>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutLogEntry {
    pub date: String,
    #[serde(default)]
    pub workout: Vec<Exercise>,
    #[serde(default)]
    pub xp_gained: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CompletionResult {
    pub xp_gained: u32,
    #[serde(default)]
    pub leveled_up: bool,
    #[serde(default)]
    pub newly_completed_quests: Option<Vec<Quest>>,
    #[serde(default)]
    pub newly_earned_badges: Option<Vec<Badge>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PendingRequest {
    pub id: u64,
    pub username: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Friend {
    pub username: String,
    #[serde(default)]
    pub level: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct FriendsData {
    #[serde(default)]
    pub pending_requests: Option<Vec<PendingRequest>>,
    #[serde(default)]
    pub friends: Option<Vec<Friend>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub weekly_xp: u32,
}

/// Body of `{ "message": ... }` replies (friend actions, auth errors).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct MessageReply {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FriendAction {
    Accept,
    Decline,
}

impl FriendAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendAction::Accept => "accept",
            FriendAction::Decline => "decline",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AppView {
    Login { just_registered: bool },
    Register,
    Dashboard,
    Catalog,
    Profile,
    Quests,
    Friends,
}

/// State of one data container on a page.
#[derive(Clone, Debug, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Ready(T),
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_record_reads_backend_login_shape() {
        let json = r#"{"id": 3, "username": "ana", "goals": "Build Strength", "available_equipment": ["None", "Dumbbells"]}"#;
        let session: SessionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(session.id, 3);
        assert_eq!(session.equipment, vec!["None", "Dumbbells"]);

        // Written back under the backend's field name so /api/workout can read it
        let out = serde_json::to_value(&session).unwrap();
        assert!(out.get("available_equipment").is_some());
    }

    #[test]
    fn session_record_accepts_short_equipment_name() {
        let json = r#"{"id": 1, "username": "bo", "equipment": ["Barbell"]}"#;
        let session: SessionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(session.goals, None);
        assert_eq!(session.equipment, vec!["Barbell"]);
    }

    #[test]
    fn stats_tolerate_missing_optional_fields() {
        let stats: UserStats = serde_json::from_str(r#"{"username": "ana", "level": 2, "xp": 40}"#).unwrap();
        assert_eq!(stats.xp_needed_for_next_level, None);
        assert_eq!(stats.unlocked_badges, None);
    }

    #[test]
    fn completion_result_without_rewards() {
        let result: CompletionResult = serde_json::from_str(r#"{"xp_gained": 50, "leveled_up": false}"#).unwrap();
        assert_eq!(result.xp_gained, 50);
        assert!(result.newly_completed_quests.is_none());
    }
}
