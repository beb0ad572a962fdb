use futures::future::try_join;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::config::{API_BASE, CONNECTIVITY_MESSAGE};
use crate::types::{
    CompletionResult, Exercise, FriendAction, FriendsData, LeaderboardEntry, MessageReply,
    QuestBoard, SessionRecord, UserStats, WorkoutLogEntry,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("failed to encode request: {0}")]
    Encode(String),
    #[error("browser error: {0}")]
    Browser(String),
}

impl ApiError {
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message: Some(m), .. } => Some(m.as_str()),
            _ => None,
        }
    }

    /// Server text if there is one, the connectivity notice for network
    /// failures, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { message: Some(m), .. } => m.clone(),
            ApiError::Network(_) => CONNECTIVITY_MESSAGE.to_string(),
            _ => fallback.to_string(),
        }
    }
}

fn browser_err(e: JsValue) -> ApiError {
    ApiError::Browser(format!("{:?}", e))
}

// ============ ENDPOINTS ============

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
    pub body: Option<String>,
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub goals: String,
    pub equipment: Vec<String>,
}

#[derive(Serialize)]
struct CompleteWorkoutBody<'a> {
    #[serde(rename = "userId")]
    user_id: u64,
    workout: &'a [Exercise],
}

#[derive(Serialize)]
struct FriendRequestBody<'a> {
    username_to_add: &'a str,
}

#[derive(Serialize)]
struct RespondBody {
    requester_id: u64,
    action: &'static str,
}

impl Endpoint {
    fn get(path: String) -> Self {
        Self { method: Method::Get, path, body: None }
    }

    fn post<B: Serialize + ?Sized>(path: String, body: &B) -> Result<Self, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(Self { method: Method::Post, path, body: Some(body) })
    }

    pub fn login(username: &str, password: &str) -> Result<Self, ApiError> {
        Self::post("/api/login".into(), &Credentials { username, password })
    }

    pub fn register(registration: &Registration) -> Result<Self, ApiError> {
        Self::post("/api/register".into(), registration)
    }

    pub fn user_stats(user_id: u64) -> Self {
        Self::get(format!("/api/user/{}/stats", user_id))
    }

    pub fn history(user_id: u64) -> Self {
        Self::get(format!("/api/user/{}/history", user_id))
    }

    pub fn quests(user_id: u64) -> Self {
        Self::get(format!("/api/user/{}/quests", user_id))
    }

    /// Blank filter lists the whole catalog.
    pub fn exercises(equipment: &str) -> Self {
        if equipment.is_empty() {
            Self::get("/api/exercises".into())
        } else {
            Self::get(format!("/api/exercises?equipment={}", urlencoding::encode(equipment)))
        }
    }

    pub fn generate_workout(session: &SessionRecord) -> Result<Self, ApiError> {
        Self::post("/api/workout".into(), session)
    }

    pub fn complete_workout(user_id: u64, workout: &[Exercise]) -> Result<Self, ApiError> {
        Self::post("/api/workout/complete".into(), &CompleteWorkoutBody { user_id, workout })
    }

    pub fn friends(user_id: u64) -> Self {
        Self::get(format!("/api/user/{}/friends", user_id))
    }

    pub fn friend_request(user_id: u64, username: &str) -> Result<Self, ApiError> {
        Self::post(
            format!("/api/user/{}/friends/request", user_id),
            &FriendRequestBody { username_to_add: username },
        )
    }

    pub fn respond_to_request(user_id: u64, requester_id: u64, action: FriendAction) -> Result<Self, ApiError> {
        Self::post(
            format!("/api/user/{}/friends/respond", user_id),
            &RespondBody { requester_id, action: action.as_str() },
        )
    }

    pub fn leaderboard() -> Self {
        Self::get("/api/leaderboard".into())
    }
}

// ============ TRANSPORT ============

/// Non-2xx is always an error; its `{message}` body, if any, rides along.
pub fn decode_response<T: DeserializeOwned>(status: u16, raw: &str) -> Result<T, ApiError> {
    if !(200..=299).contains(&status) {
        let message = serde_json::from_str::<MessageReply>(raw)
            .ok()
            .and_then(|reply| reply.message);
        return Err(ApiError::Status { status, message });
    }
    serde_json::from_str(raw).map_err(|e| ApiError::Decode(e.to_string()))
}

async fn send(endpoint: &Endpoint) -> Result<(u16, String), ApiError> {
    let window = web_sys::window().ok_or_else(|| ApiError::Browser("no window".into()))?;

    let headers = Headers::new().map_err(browser_err)?;
    headers.set("Content-Type", "application/json").map_err(browser_err)?;

    let opts = RequestInit::new();
    opts.set_method(endpoint.method.as_str());
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = &endpoint.body {
        opts.set_body(&JsValue::from_str(body));
    }
    opts.set_headers(&JsValue::from(&headers));

    let url = format!("{}{}", API_BASE, endpoint.path);
    let request = Request::new_with_str_and_init(&url, &opts).map_err(browser_err)?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ApiError::Network(format!("{:?}", e)))?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| ApiError::Browser("fetch did not yield a Response".into()))?;

    let text = JsFuture::from(resp.text().map_err(browser_err)?)
        .await
        .map_err(|e| ApiError::Network(format!("{:?}", e)))?;

    Ok((resp.status(), text.as_string().unwrap_or_default()))
}

pub async fn fetch_json<T: DeserializeOwned>(endpoint: &Endpoint) -> Result<T, ApiError> {
    let (status, raw) = send(endpoint).await?;
    decode_response(status, &raw)
}

// ============ OPERATIONS ============

pub async fn login(username: &str, password: &str) -> Result<SessionRecord, ApiError> {
    fetch_json(&Endpoint::login(username, password)?).await
}

pub async fn register(registration: &Registration) -> Result<MessageReply, ApiError> {
    fetch_json(&Endpoint::register(registration)?).await
}

pub async fn fetch_stats(user_id: u64) -> Result<UserStats, ApiError> {
    fetch_json(&Endpoint::user_stats(user_id)).await
}

pub async fn fetch_quests(user_id: u64) -> Result<QuestBoard, ApiError> {
    fetch_json(&Endpoint::quests(user_id)).await
}

pub async fn fetch_exercises(equipment: &str) -> Result<Vec<Exercise>, ApiError> {
    fetch_json(&Endpoint::exercises(equipment)).await
}

pub async fn generate_workout(session: &SessionRecord) -> Result<Vec<Exercise>, ApiError> {
    fetch_json(&Endpoint::generate_workout(session)?).await
}

pub async fn complete_workout(user_id: u64, workout: &[Exercise]) -> Result<CompletionResult, ApiError> {
    fetch_json(&Endpoint::complete_workout(user_id, workout)?).await
}

/// Stats and history, fetched together.
pub async fn fetch_profile(user_id: u64) -> Result<(UserStats, Vec<WorkoutLogEntry>), ApiError> {
    let stats_ep = Endpoint::user_stats(user_id);
    let history_ep = Endpoint::history(user_id);
    try_join(fetch_json(&stats_ep), fetch_json(&history_ep)).await
}

/// Friends and the weekly leaderboard, fetched together.
pub async fn fetch_social(user_id: u64) -> Result<(FriendsData, Vec<LeaderboardEntry>), ApiError> {
    let friends_ep = Endpoint::friends(user_id);
    let leaderboard_ep = Endpoint::leaderboard();
    try_join(fetch_json(&friends_ep), fetch_json(&leaderboard_ep)).await
}

pub async fn send_friend_request(user_id: u64, username: &str) -> Result<MessageReply, ApiError> {
    fetch_json(&Endpoint::friend_request(user_id, username)?).await
}

pub async fn respond_to_request(user_id: u64, requester_id: u64, action: FriendAction) -> Result<MessageReply, ApiError> {
    fetch_json(&Endpoint::respond_to_request(user_id, requester_id, action)?).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn body(ep: &Endpoint) -> Value {
        serde_json::from_str(ep.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn user_scoped_paths() {
        assert_eq!(Endpoint::user_stats(4).path, "/api/user/4/stats");
        assert_eq!(Endpoint::history(4).path, "/api/user/4/history");
        assert_eq!(Endpoint::quests(4).path, "/api/user/4/quests");
        assert_eq!(Endpoint::friends(4).path, "/api/user/4/friends");
        assert_eq!(Endpoint::leaderboard().method, Method::Get);
    }

    #[test]
    fn exercise_filter_only_when_set() {
        assert_eq!(Endpoint::exercises("").path, "/api/exercises");
        assert_eq!(Endpoint::exercises("Dumbbells").path, "/api/exercises?equipment=Dumbbells");
        assert_eq!(Endpoint::exercises("Pull-up Bar").path, "/api/exercises?equipment=Pull-up%20Bar");
    }

    #[test]
    fn completion_body_uses_camel_case_user_id() {
        let workout = vec![Exercise {
            name: "Push-ups".into(),
            description: String::new(),
            muscle_group: None,
            difficulty: None,
            equipment: None,
            video_url: None,
        }];
        let ep = Endpoint::complete_workout(9, &workout).unwrap();
        assert_eq!(ep.method, Method::Post);
        let v = body(&ep);
        assert_eq!(v["userId"], 9);
        assert_eq!(v["workout"][0]["name"], "Push-ups");
    }

    #[test]
    fn friend_bodies() {
        let req = Endpoint::friend_request(2, "sam").unwrap();
        assert_eq!(req.path, "/api/user/2/friends/request");
        assert_eq!(body(&req)["username_to_add"], "sam");

        let resp = Endpoint::respond_to_request(2, 5, FriendAction::Decline).unwrap();
        assert_eq!(resp.path, "/api/user/2/friends/respond");
        assert_eq!(body(&resp)["requester_id"], 5);
        assert_eq!(body(&resp)["action"], "decline");
    }

    #[test]
    fn error_status_carries_server_message() {
        let err = decode_response::<SessionRecord>(401, r#"{"message": "Invalid username or password."}"#).unwrap_err();
        assert_eq!(err.server_message(), Some("Invalid username or password."));
        assert_eq!(err.user_message("An error occurred."), "Invalid username or password.");
    }

    #[test]
    fn error_status_ignores_body_content() {
        // A 500 with a perfectly valid payload is still a failure
        let err = decode_response::<Vec<LeaderboardEntry>>(500, "[]").unwrap_err();
        assert_eq!(err, ApiError::Status { status: 500, message: None });
        assert_eq!(err.user_message("fallback"), "fallback");
    }

    #[test]
    fn network_failure_maps_to_connectivity_text() {
        let err = ApiError::Network("TypeError: Failed to fetch".into());
        assert_eq!(err.user_message("unused"), CONNECTIVITY_MESSAGE);
    }

    #[test]
    fn local_codec_failures_use_fallback_text() {
        for err in [ApiError::Encode("key must be a string".into()), ApiError::Decode("eof".into())] {
            assert_eq!(err.server_message(), None);
            assert_eq!(err.user_message("Something went wrong."), "Something went wrong.");
        }
    }

    #[test]
    fn success_decodes_payload() {
        let entries: Vec<LeaderboardEntry> =
            decode_response(200, r#"[{"id": 1, "username": "ana", "weekly_xp": 300}]"#).unwrap();
        assert_eq!(entries[0].weekly_xp, 300);
        assert!(matches!(decode_response::<UserStats>(200, "{}"), Err(ApiError::Decode(_))));
    }
}
