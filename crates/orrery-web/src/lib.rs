pub mod runner;

pub use runner::OrreryRunner;

use std::cell::RefCell;

use orrery::glam::Vec3;
use orrery::{BodyId, InputEvent};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<OrreryRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the live runner, or return `fallback` before `orrery_init`.
fn with_runner<R>(fallback: R, f: impl FnOnce(&mut OrreryRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            log::warn!("orrery not initialized, call orrery_init() first");
            fallback
        }
    })
}

fn body_index(id: Option<BodyId>) -> i32 {
    id.map_or(-1, |b| b.0 as i32)
}

/// Build the scene from a catalog JSON string.
#[wasm_bindgen]
pub fn orrery_init(catalog_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let mut runner = OrreryRunner::from_json(catalog_json, seed).map_err(|e| {
        log::error!("catalog rejected: {}", e);
        JsValue::from_str(&e.to_string())
    })?;
    runner.init();
    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
    log::info!("orrery: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn orrery_tick(dt: f32) {
    with_runner((), |r| r.tick(dt));
}

#[wasm_bindgen]
pub fn orrery_set_camera(px: f32, py: f32, pz: f32, tx: f32, ty: f32, tz: f32, fov_y_deg: f32) {
    with_runner((), |r| r.set_camera(Vec3::new(px, py, pz), Vec3::new(tx, ty, tz), fov_y_deg));
}

#[wasm_bindgen]
pub fn orrery_resize(width: f32, height: f32) {
    with_runner((), |r| r.resize(width, height));
}

#[wasm_bindgen]
pub fn orrery_pointer_down(x: f32, y: f32) {
    with_runner((), |r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn orrery_pointer_move(x: f32, y: f32) {
    with_runner((), |r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn orrery_pointer_up(x: f32, y: f32) {
    with_runner((), |r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn orrery_zoom(delta: f32) {
    with_runner((), |r| r.push_input(InputEvent::Zoom { delta }));
}

#[wasm_bindgen]
pub fn orrery_custom_event(kind: u32, a: f32, b: f32, c: f32) {
    with_runner((), |r| r.push_input(InputEvent::Custom { kind, a, b, c }));
}

// ---- Queries ----

/// Body under a viewport pixel, or -1.
#[wasm_bindgen]
pub fn orrery_pick(x: f32, y: f32) -> i32 {
    with_runner(-1, |r| body_index(r.pick_screen(x, y)))
}

/// Currently selected body, or -1.
#[wasm_bindgen]
pub fn orrery_selected() -> i32 {
    with_runner(-1, |r| body_index(r.system().selected()))
}

#[wasm_bindgen]
pub fn orrery_body_id(name: &str) -> i32 {
    with_runner(-1, |r| body_index(r.system().body_id(name)))
}

#[wasm_bindgen]
pub fn orrery_body_name(id: u32) -> Option<String> {
    with_runner(None, |r| r.system().name_of(BodyId(id)).map(str::to_string))
}

/// `[x, y, z]` of a body, or nothing for an unknown name.
#[wasm_bindgen]
pub fn orrery_body_position(name: &str) -> Option<Vec<f32>> {
    with_runner(None, |r| r.system().world_position(name).map(|p| p.to_array().to_vec()))
}

/// `[id, x, y, z]` per body, for the mini-map.
#[wasm_bindgen]
pub fn orrery_positions() -> Vec<f32> {
    with_runner(Vec::new(), |r| {
        r.system()
            .positions()
            .iter()
            .flat_map(|p| [p.body.0 as f32, p.position.x, p.position.y, p.position.z])
            .collect()
    })
}

/// Distance between two named bodies, NaN if either is unknown.
#[wasm_bindgen]
pub fn orrery_distance_between(a: &str, b: &str) -> f32 {
    with_runner(f32::NAN, |r| r.system().distance_between(a, b).unwrap_or(f32::NAN))
}

#[wasm_bindgen]
pub fn orrery_set_time_scale(scale: f32) {
    with_runner((), |r| r.system_mut().set_time_scale(scale));
}

/// Returns the new paused state.
#[wasm_bindgen]
pub fn orrery_toggle_pause() -> bool {
    with_runner(false, |r| r.system_mut().toggle_pause())
}

/// Pending texture loads as JSON. Each request is returned once.
#[wasm_bindgen]
pub fn orrery_texture_requests() -> String {
    with_runner(String::from("[]"), |r| r.texture_requests_json())
}

#[wasm_bindgen]
pub fn orrery_view_proj() -> Vec<f32> {
    with_runner(Vec::new(), |r| r.view_proj())
}

// ---- Buffer accessors ----

#[wasm_bindgen]
pub fn orrery_instances_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.instances_ptr())
}

#[wasm_bindgen]
pub fn orrery_instance_count() -> u32 {
    with_runner(0, |r| r.instance_count())
}

#[wasm_bindgen]
pub fn orrery_opaque_split() -> u32 {
    with_runner(0, |r| r.opaque_split())
}

#[wasm_bindgen]
pub fn orrery_trail_positions_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.trail_positions_ptr())
}

#[wasm_bindgen]
pub fn orrery_trail_colors_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.trail_colors_ptr())
}

#[wasm_bindgen]
pub fn orrery_trail_sizes_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.trail_sizes_ptr())
}

#[wasm_bindgen]
pub fn orrery_trail_count() -> u32 {
    with_runner(0, |r| r.trail_count())
}

#[wasm_bindgen]
pub fn orrery_belt_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.belt_ptr())
}

#[wasm_bindgen]
pub fn orrery_belt_count() -> u32 {
    with_runner(0, |r| r.belt_count())
}

#[wasm_bindgen]
pub fn orrery_starfield_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.starfield_ptr())
}

#[wasm_bindgen]
pub fn orrery_starfield_count() -> u32 {
    with_runner(0, |r| r.starfield_count())
}

#[wasm_bindgen]
pub fn orrery_orbit_lines_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.orbit_lines_ptr())
}

#[wasm_bindgen]
pub fn orrery_orbit_lines_len() -> u32 {
    with_runner(0, |r| r.orbit_lines_len())
}
