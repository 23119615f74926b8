use orrery::glam::{Vec2, Vec3};
use orrery::{
    BodyId, Camera3D, Catalog, Gesture, InputEvent, InputQueue, OrreryConfig, PointerTracker, RenderBuffer,
    SolarSystem,
};

/// UI command codes carried by `InputEvent::Custom`.
pub const CUSTOM_SET_SPEED: u32 = 2;
pub const CUSTOM_TOGGLE_PAUSE: u32 = 3;
pub const CUSTOM_SELECT: u32 = 4;
pub const CUSTOM_ZOOM: u32 = 5;
pub const CUSTOM_RESET_VIEW: u32 = 6;
pub const CUSTOM_RESIZE: u32 = 99;

/// Camera rotation per dragged pixel (radians).
const ROTATE_PER_PIXEL: f32 = 0.005;
/// Distance factor per zoom step.
const ZOOM_STEP: f32 = 1.15;

/// Owns the simulation plus the browser-facing state around it: camera,
/// pending input, pointer gestures and the per-frame render buffer.
pub struct OrreryRunner {
    system: SolarSystem,
    camera: Camera3D,
    home: Camera3D,
    input: InputQueue,
    pointer: PointerTracker,
    render_buffer: RenderBuffer,
    viewport: Vec2,
    /// Orbit polylines flattened as `[body_id, n, x, y, z, ...]` per path.
    orbit_lines: Vec<f32>,
    initialized: bool,
}

impl OrreryRunner {
    pub fn new(system: SolarSystem) -> Self {
        let camera = Camera3D::default();
        let orbit_lines = system
            .orbit_paths()
            .iter()
            .flat_map(|path| {
                [path.body.0 as f32, path.points.len() as f32]
                    .into_iter()
                    .chain(path.points.iter().flat_map(|p| p.to_array()))
            })
            .collect();
        Self {
            system,
            camera,
            home: camera,
            input: InputQueue::new(),
            pointer: PointerTracker::new(),
            render_buffer: RenderBuffer::new(),
            viewport: Vec2::new(1280.0, 720.0),
            orbit_lines,
            initialized: false,
        }
    }

    /// Parse `json` and build the system. When the catalog carries no config,
    /// procedural generation is seeded with `seed`.
    pub fn from_json(json: &str, seed: u64) -> Result<Self, serde_json::Error> {
        let catalog = Catalog::from_json(json)?;
        let config = catalog.config.clone().unwrap_or(OrreryConfig {
            seed,
            ..OrreryConfig::default()
        });
        Ok(Self::new(SolarSystem::with_config(&catalog, config)))
    }

    /// Build the first frame. Call once after construction.
    pub fn init(&mut self) {
        self.system.build_render_buffer(&mut self.render_buffer);
        self.initialized = true;
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Apply pending input, advance the simulation and rebuild the render buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }
        for event in self.input.drain() {
            self.handle(event);
        }
        self.system.update(dt);
        self.system.build_render_buffer(&mut self.render_buffer);
    }

    fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => self.pointer.down(Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => {
                if let Some(Gesture::Drag { delta }) = self.pointer.moved(Vec2::new(x, y)) {
                    self.camera.orbit(-delta.x * ROTATE_PER_PIXEL, delta.y * ROTATE_PER_PIXEL);
                }
            }
            InputEvent::PointerUp { x, y } => {
                if let Some(Gesture::Click { at }) = self.pointer.up(Vec2::new(x, y)) {
                    let hit = self.pick_screen(at.x, at.y);
                    log::debug!("click at ({}, {}) -> {:?}", at.x, at.y, hit);
                    self.system.select(hit);
                }
            }
            InputEvent::Zoom { delta } => self.zoom(delta),
            InputEvent::Custom { kind, a, b, .. } => match kind {
                CUSTOM_SET_SPEED => self.system.set_time_scale(a),
                CUSTOM_TOGGLE_PAUSE => {
                    self.system.toggle_pause();
                }
                CUSTOM_SELECT => {
                    let body = (a >= 0.0).then(|| BodyId(a as u32));
                    self.system.select(body);
                }
                CUSTOM_ZOOM => self.zoom(a),
                CUSTOM_RESET_VIEW => {
                    self.camera = Camera3D { aspect: self.camera.aspect, ..self.home };
                }
                CUSTOM_RESIZE => self.resize(a, b),
                other => log::warn!("unknown custom event {}", other),
            },
        }
    }

    fn zoom(&mut self, delta: f32) {
        if delta > 0.0 {
            self.camera.zoom(1.0 / ZOOM_STEP);
        } else if delta < 0.0 {
            self.camera.zoom(ZOOM_STEP);
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Vec2::new(width, height);
            self.camera.resize(width, height);
        }
    }

    pub fn set_camera(&mut self, position: Vec3, target: Vec3, fov_y_deg: f32) {
        self.camera.position = position;
        self.camera.target = target;
        if fov_y_deg.is_finite() && fov_y_deg > 1.0 && fov_y_deg < 179.0 {
            self.camera.fov_y = fov_y_deg.to_radians();
        }
        self.home = self.camera;
    }

    /// Body under a viewport pixel, without changing the selection.
    pub fn pick_screen(&self, x: f32, y: f32) -> Option<BodyId> {
        let ndc = Camera3D::screen_to_ndc(Vec2::new(x, y), self.viewport);
        self.system.pick(&self.camera, ndc)
    }

    pub fn system(&self) -> &SolarSystem {
        &self.system
    }

    pub fn system_mut(&mut self) -> &mut SolarSystem {
        &mut self.system
    }

    pub fn camera(&self) -> &Camera3D {
        &self.camera
    }

    /// Pending texture loads as JSON: `[{"node": 3, "path": "earth.jpg"}, ...]`.
    pub fn texture_requests_json(&mut self) -> String {
        let requests: Vec<serde_json::Value> = self
            .system
            .take_texture_requests()
            .into_iter()
            .map(|t| serde_json::json!({ "node": t.node.0, "path": t.path }))
            .collect();
        serde_json::Value::Array(requests).to_string()
    }

    // ---- Pointer accessors for host-side reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn opaque_split(&self) -> u32 {
        self.render_buffer.opaque_split
    }

    pub fn trail_positions_ptr(&self) -> *const f32 {
        self.render_buffer.trail_positions_ptr()
    }

    pub fn trail_colors_ptr(&self) -> *const f32 {
        self.render_buffer.trail_colors_ptr()
    }

    pub fn trail_sizes_ptr(&self) -> *const f32 {
        self.render_buffer.trail_sizes_ptr()
    }

    pub fn trail_count(&self) -> u32 {
        self.render_buffer.trail_count()
    }

    pub fn belt_ptr(&self) -> *const f32 {
        self.system.belt().cloud.as_floats().as_ptr()
    }

    pub fn belt_count(&self) -> u32 {
        self.system.belt().cloud.len() as u32
    }

    pub fn starfield_ptr(&self) -> *const f32 {
        self.system.starfield().cloud.as_floats().as_ptr()
    }

    pub fn starfield_count(&self) -> u32 {
        self.system.starfield().cloud.len() as u32
    }

    pub fn orbit_lines_ptr(&self) -> *const f32 {
        self.orbit_lines.as_ptr()
    }

    pub fn orbit_lines_len(&self) -> u32 {
        self.orbit_lines.len() as u32
    }

    pub fn view_proj(&self) -> Vec<f32> {
        self.camera.view_proj().to_cols_array().to_vec()
    }
}
