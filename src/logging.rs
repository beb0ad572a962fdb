// Thin wrappers over the browser console so every log line carries its area.

pub fn info(area: &str, msg: &str) {
    web_sys::console::log_1(&format!("[{}] {}", area, msg).into());
}

pub fn error(area: &str, msg: &str) {
    web_sys::console::error_1(&format!("[{}] {}", area, msg).into());
}
