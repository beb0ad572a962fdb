use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::config::{
    DEFAULT_XP_FOR_NEXT_LEVEL, HISTORY_LIMIT, TOAST_FIRST_DELAY_MS, TOAST_STAGGER_MS,
};
use crate::types::{CompletionResult, LeaderboardEntry, UserStats, WorkoutLogEntry};

// ============ HUD ============

/// Zero counts as missing; a level never needs 0 XP.
pub fn xp_needed(needed: Option<u32>) -> u32 {
    match needed {
        Some(n) if n > 0 => n,
        _ => DEFAULT_XP_FOR_NEXT_LEVEL,
    }
}

pub fn xp_percentage(xp: u32, needed: Option<u32>) -> f64 {
    let pct = xp as f64 * 100.0 / xp_needed(needed) as f64;
    pct.min(100.0)
}

#[derive(Clone, Debug, PartialEq)]
pub struct HudView {
    pub username: String,
    pub level: u32,
    pub xp_text: String,
    pub xp_percent: f64,
    pub streak_text: String,
}

impl From<&UserStats> for HudView {
    fn from(stats: &UserStats) -> Self {
        let needed = xp_needed(stats.xp_needed_for_next_level);
        Self {
            username: stats.username.clone(),
            level: stats.level,
            xp_text: format!("{} / {} XP", stats.xp, needed),
            xp_percent: xp_percentage(stats.xp, stats.xp_needed_for_next_level),
            streak_text: format!("🔥 {} Days", stats.streak_count.unwrap_or(0)),
        }
    }
}

// ============ HISTORY ============

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryItem {
    pub date: String,
    pub exercise_count: usize,
    pub exercise_names: String,
    pub xp_gained: u32,
}

/// Accepts RFC 3339, naive ISO timestamps and bare dates; anything else is shown verbatim.
pub fn format_log_date(raw: &str) -> String {
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|dt| dt.date())
                .ok()
        })
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok());

    match date {
        Some(d) => d.format("%B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Newest first, capped. The backend returns the log oldest first.
pub fn history_items(log: &[WorkoutLogEntry]) -> Vec<HistoryItem> {
    log.iter()
        .rev()
        .take(HISTORY_LIMIT)
        .map(|entry| HistoryItem {
            date: format_log_date(&entry.date),
            exercise_count: entry.workout.len(),
            exercise_names: entry
                .workout
                .iter()
                .map(|ex| ex.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            xp_gained: entry.xp_gained,
        })
        .collect()
}

// ============ LEADERBOARD ============

#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub username: String,
    pub weekly_xp: u32,
    pub is_current_user: bool,
}

pub fn leaderboard_rows(entries: &[LeaderboardEntry], current_user_id: u64) -> Vec<LeaderboardRow> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| LeaderboardRow {
            rank: i + 1,
            username: entry.username.clone(),
            weekly_xp: entry.weekly_xp,
            is_current_user: entry.id == current_user_id,
        })
        .collect()
}

// ============ REWARDS ============

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Quest,
    Badge,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Quest => "quest",
            ToastKind::Badge => "badge",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledToast {
    pub text: String,
    pub kind: ToastKind,
    pub appear_at_ms: u32,
}

/// Quests first, then badges, each one stagger step after the previous.
pub fn reward_toasts(result: &CompletionResult) -> Vec<ScheduledToast> {
    let quests = result
        .newly_completed_quests
        .iter()
        .flatten()
        .map(|q| (format!("Quest Complete: {}", q.title), ToastKind::Quest));
    let badges = result
        .newly_earned_badges
        .iter()
        .flatten()
        .map(|b| (format!("Badge Unlocked: {}", b.name), ToastKind::Badge));

    quests
        .chain(badges)
        .enumerate()
        .map(|(i, (text, kind))| ScheduledToast {
            text,
            kind,
            appear_at_ms: TOAST_FIRST_DELAY_MS + i as u32 * TOAST_STAGGER_MS,
        })
        .collect()
}

// ============ MASCOT ============

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MascotMood {
    Idle,
    Working,
    Celebrating,
}

impl MascotMood {
    pub fn image(&self) -> &'static str {
        match self {
            MascotMood::Idle => "assets/images/mascot-idle.png",
            MascotMood::Working => "assets/images/mascot-working.png",
            MascotMood::Celebrating => "assets/images/mascot-celebrating.png",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            MascotMood::Idle => "Ready for a workout!",
            MascotMood::Working => "Let's get it done!",
            MascotMood::Celebrating => "Amazing work!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Badge, Exercise, Quest};

    fn exercise(name: &str) -> Exercise {
        Exercise {
            name: name.into(),
            description: String::new(),
            muscle_group: None,
            difficulty: None,
            equipment: None,
            video_url: None,
        }
    }

    fn quest(title: &str) -> Quest {
        Quest { title: title.into(), description: String::new(), reward_xp: 20, completed: true }
    }

    #[test]
    fn xp_percentage_caps_at_full() {
        assert_eq!(xp_percentage(50, Some(200)), 25.0);
        assert_eq!(xp_percentage(250, Some(200)), 100.0);
        assert_eq!(xp_percentage(0, Some(200)), 0.0);
    }

    #[test]
    fn xp_needed_defaults_when_absent_or_zero() {
        assert_eq!(xp_percentage(40, None), 40.0);
        assert_eq!(xp_percentage(40, Some(0)), 40.0);
        assert_eq!(xp_needed(Some(0)), 100);
    }

    #[test]
    fn hud_text() {
        let stats = UserStats {
            username: "ana".into(),
            level: 3,
            xp: 120,
            xp_needed_for_next_level: None,
            streak_count: Some(4),
            unlocked_badges: None,
        };
        let hud = HudView::from(&stats);
        assert_eq!(hud.xp_text, "120 / 100 XP");
        assert_eq!(hud.xp_percent, 100.0);
        assert_eq!(hud.streak_text, "🔥 4 Days");
    }

    #[test]
    fn history_keeps_ten_newest_first() {
        let log: Vec<WorkoutLogEntry> = (1..=15)
            .map(|day| WorkoutLogEntry {
                date: format!("2024-03-{:02}", day),
                workout: vec![exercise("Squats")],
                xp_gained: day,
            })
            .collect();

        let items = history_items(&log);
        assert_eq!(items.len(), 10);
        let xp: Vec<u32> = items.iter().map(|i| i.xp_gained).collect();
        assert_eq!(xp, vec![15, 14, 13, 12, 11, 10, 9, 8, 7, 6]);
        assert_eq!(items[0].date, "March 15, 2024");
    }

    #[test]
    fn history_joins_exercise_names() {
        let log = vec![WorkoutLogEntry {
            date: "2024-01-05T18:30:00.123456".into(),
            workout: vec![exercise("Push-ups"), exercise("Plank")],
            xp_gained: 50,
        }];
        let items = history_items(&log);
        assert_eq!(items[0].date, "January 5, 2024");
        assert_eq!(items[0].exercise_count, 2);
        assert_eq!(items[0].exercise_names, "Push-ups, Plank");
    }

    #[test]
    fn unparsable_dates_pass_through() {
        assert_eq!(format_log_date("yesterday"), "yesterday");
        assert_eq!(format_log_date("2024-07-09T08:00:00+02:00"), "July 9, 2024");
    }

    #[test]
    fn leaderboard_marks_current_user() {
        let entries = vec![
            LeaderboardEntry { id: 8, username: "bo".into(), weekly_xp: 500 },
            LeaderboardEntry { id: 3, username: "ana".into(), weekly_xp: 200 },
        ];
        let rows = leaderboard_rows(&entries, 3);
        assert_eq!(rows[0].rank, 1);
        assert!(!rows[0].is_current_user);
        assert_eq!(rows[1].rank, 2);
        assert!(rows[1].is_current_user);
    }

    #[test]
    fn toasts_follow_quests_then_badges() {
        let result = CompletionResult {
            xp_gained: 60,
            leveled_up: false,
            newly_completed_quests: Some(vec![quest("A"), quest("B")]),
            newly_earned_badges: Some(vec![Badge {
                name: "C".into(),
                description: String::new(),
                image_url: String::new(),
            }]),
        };

        let toasts = reward_toasts(&result);
        let texts: Vec<&str> = toasts.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Quest Complete: A", "Quest Complete: B", "Badge Unlocked: C"]);
        assert_eq!(toasts[2].kind, ToastKind::Badge);
        assert!(toasts.windows(2).all(|w| w[0].appear_at_ms < w[1].appear_at_ms));
        assert_eq!(toasts[0].appear_at_ms, TOAST_FIRST_DELAY_MS);
    }

    #[test]
    fn no_rewards_no_toasts() {
        let result = CompletionResult {
            xp_gained: 10,
            leveled_up: true,
            newly_completed_quests: None,
            newly_earned_badges: Some(vec![]),
        };
        assert!(reward_toasts(&result).is_empty());
    }
}
