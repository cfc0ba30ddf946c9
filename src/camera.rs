// camera.rs — view angles and pointer/wheel/key camera control

pub const PITCH_LIMIT: f32 = 90.0;
pub const MIN_FOV: f32 = 30.0;
pub const MAX_FOV: f32 = 90.0;
pub const DEFAULT_FOV: f32 = 90.0;

/// Wheel angle units per notch, the unit `on_wheel` expects.
pub const WHEEL_UNITS_PER_LINE: f32 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            fov: DEFAULT_FOV,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone)]
pub struct CameraController {
    view: ViewState,
    anchor: Option<Point>,
    pub drag_sensitivity: f32,
    pub wheel_sensitivity: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(0.1, 0.1)
    }
}

impl CameraController {
    pub fn new(drag_sensitivity: f32, wheel_sensitivity: f32) -> Self {
        Self {
            view: ViewState::default(),
            anchor: None,
            drag_sensitivity,
            wheel_sensitivity,
        }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn on_drag_start(&mut self, pos: Point) {
        self.anchor = Some(pos);
    }

    /// Grab-style look: dragging right turns the view left. Returns whether
    /// the view changed.
    pub fn on_drag_move(&mut self, pos: Point) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };
        let dx = (pos.x - anchor.x) * self.drag_sensitivity;
        let dy = (pos.y - anchor.y) * self.drag_sensitivity;

        // yaw stays unbounded; the rotation is periodic
        self.view.yaw -= dx;
        self.view.pitch = clamp_pitch(self.view.pitch - dy);
        self.anchor = Some(pos);
        dx != 0.0 || dy != 0.0
    }

    pub fn on_drag_end(&mut self) {
        self.anchor = None;
    }

    /// Zooms by `delta` wheel units (positive = away from the user = zoom in).
    /// Returns true when fov changed and the projection must be rebuilt.
    pub fn on_wheel(&mut self, delta: f32) -> bool {
        let before = self.view.fov;
        self.view.fov = clamp_fov(self.view.fov - delta * self.wheel_sensitivity);
        self.view.fov != before
    }

    pub fn on_key_yaw(&mut self, step: f32) {
        self.view.yaw += step;
    }

    /// Back to the startup orientation. Returns true if fov changed.
    pub fn reset(&mut self) -> bool {
        let fov_changed = self.view.fov != DEFAULT_FOV;
        self.view = ViewState::default();
        fov_changed
    }
}

fn clamp_pitch(pitch: f32) -> f32 {
    if pitch.is_nan() {
        return 0.0;
    }
    pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
}

fn clamp_fov(fov: f32) -> f32 {
    if fov.is_nan() {
        return DEFAULT_FOV;
    }
    fov.clamp(MIN_FOV, MAX_FOV)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;

    fn dragging() -> CameraController {
        let mut cam = CameraController::default();
        cam.on_drag_start(Point::new(100.0, 100.0));
        cam
    }

    #[test]
    fn starts_looking_forward_at_max_fov() {
        let cam = CameraController::default();
        assert_eq!(cam.view(), ViewState { yaw: 0.0, pitch: 0.0, fov: 90.0 });
        assert!(!cam.is_dragging());
    }

    #[test]
    fn drag_right_and_down_decreases_yaw_and_pitch() {
        let mut cam = dragging();
        assert!(cam.on_drag_move(Point::new(150.0, 120.0)));
        let v = cam.view();
        assert!((v.yaw - -5.0).abs() < 1e-5);
        assert!((v.pitch - -2.0).abs() < 1e-5);
    }

    #[test]
    fn drag_deltas_are_relative_to_last_position() {
        let mut cam = dragging();
        cam.on_drag_move(Point::new(110.0, 100.0));
        cam.on_drag_move(Point::new(120.0, 100.0));
        assert!((cam.view().yaw - -2.0).abs() < 1e-5);
    }

    #[test]
    fn move_without_drag_start_is_ignored() {
        let mut cam = CameraController::default();
        assert!(!cam.on_drag_move(Point::new(500.0, 500.0)));
        assert_eq!(cam.view(), ViewState::default());
    }

    #[test]
    fn move_after_drag_end_is_ignored() {
        let mut cam = dragging();
        cam.on_drag_end();
        cam.on_drag_move(Point::new(0.0, 0.0));
        assert_eq!(cam.view(), ViewState::default());
    }

    #[test]
    fn pitch_stays_clamped_for_any_drag() {
        let mut cam = dragging();
        let moves = [
            (100.0, -1.0e6),
            (100.0, 1.0e6),
            (100.0, 37.0),
            (-4000.0, -2500.0),
            (100.0, f32::MAX),
            (100.0, f32::MIN),
        ];
        for (x, y) in moves {
            cam.on_drag_move(Point::new(x, y));
            let pitch = cam.view().pitch;
            assert!((-90.0..=90.0).contains(&pitch), "pitch {pitch}");
        }
    }

    #[test]
    fn yaw_is_not_wrapped() {
        let mut cam = dragging();
        cam.on_drag_move(Point::new(100.0 - 5000.0, 100.0));
        assert!((cam.view().yaw - 500.0).abs() < 1e-3);
    }

    #[test]
    fn wheel_forward_zooms_in() {
        let mut cam = CameraController::default();
        assert!(cam.on_wheel(WHEEL_UNITS_PER_LINE));
        assert!((cam.view().fov - 78.0).abs() < 1e-5);
    }

    #[test]
    fn fov_stays_clamped_for_any_wheel() {
        let mut cam = CameraController::default();
        for delta in [1.0e9, -1.0e9, 120.0, -120.0, 3.5, f32::MAX, f32::MIN] {
            cam.on_wheel(delta);
            let fov = cam.view().fov;
            assert!((30.0..=90.0).contains(&fov), "fov {fov}");
        }
    }

    #[test]
    fn wheel_at_limit_reports_no_change() {
        let mut cam = CameraController::default();
        assert!(!cam.on_wheel(-120.0));
        assert_eq!(cam.view().fov, 90.0);
    }

    #[test]
    fn key_yaw_works_while_not_dragging() {
        let mut cam = CameraController::default();
        cam.on_key_yaw(10.0);
        cam.on_key_yaw(10.0);
        cam.on_key_yaw(-10.0);
        assert_eq!(cam.view().yaw, 10.0);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut cam = dragging();
        cam.on_drag_move(Point::new(0.0, 0.0));
        cam.on_wheel(240.0);
        assert!(cam.reset());
        assert_eq!(cam.view(), ViewState::default());
        assert!(!cam.reset());
    }
}
