mod api;
mod app;
mod components;
mod config;
mod logging;
mod pages;
mod storage;
mod types;
mod view_model;

use wasm_bindgen::prelude::*;
use leptos::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logging::info("app", "starting");
    mount_to_body(app::App);
}
