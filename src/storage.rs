use crate::config::SESSION_STORAGE_KEY;
use crate::types::SessionRecord;

pub fn get_local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Missing and corrupt records both read as "not logged in".
pub fn parse_session(json: &str) -> Option<SessionRecord> {
    serde_json::from_str(json).ok()
}

pub fn load_session() -> Option<SessionRecord> {
    let storage = get_local_storage()?;
    let json = storage.get_item(SESSION_STORAGE_KEY).ok()??;
    parse_session(&json)
}

pub fn save_session(session: &SessionRecord) -> Result<(), String> {
    let storage = get_local_storage().ok_or("No localStorage")?;
    let json = serde_json::to_string(session).map_err(|e| e.to_string())?;
    storage
        .set_item(SESSION_STORAGE_KEY, &json)
        .map_err(|_| "Failed to save session".to_string())
}

pub fn clear_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(SESSION_STORAGE_KEY);
    }
}
