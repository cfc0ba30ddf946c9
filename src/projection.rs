// projection.rs — perspective projection and sphere orientation

use crate::camera::ViewState;
use glam::{Mat4, Vec4};

pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 1000.0;

/// Seam alignment for the Y-polar mesh built by `mesh::build_sphere`: moves
/// the image centre column (u = 0.5, mesh -X) to the forward -Z axis. Any
/// change to the mesh's longitude origin or u direction changes this value.
pub const SEAM_CORRECTION_DEG: f32 = -90.0;

/// Perspective parameters. The matrix is always derived, never stored, so the
/// parameters read back are exactly the ones that built it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    fov: f32,
    aspect: f32,
}

impl Projection {
    pub fn new(fov: f32, aspect: f32) -> Self {
        Self { fov, aspect }
    }

    pub fn set(&mut self, fov: f32, aspect: f32) {
        self.fov = fov;
        self.aspect = aspect;
    }

    /// Vertical field of view in degrees.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Right-handed perspective with wgpu's 0..1 depth range.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, Z_NEAR, Z_FAR)
    }

    /// Recovers `(fov, aspect)` from a matrix built by [`Projection::matrix`].
    pub fn params_from_matrix(m: &Mat4) -> (f32, f32) {
        let focal = m.y_axis.y;
        let fov = (2.0 * (1.0 / focal).atan()).to_degrees();
        let aspect = focal / m.x_axis.x;
        (fov, aspect)
    }
}

/// Sphere rotation for a view: pitch about X, then yaw about Y, then the seam
/// correction.
pub fn model_matrix(view: &ViewState) -> Mat4 {
    Mat4::from_rotation_x(view.pitch.to_radians())
        * Mat4::from_rotation_y(view.yaw.to_radians())
        * Mat4::from_rotation_y(SEAM_CORRECTION_DEG.to_radians())
}

/// Full clip transform; the camera sits at the origin looking down -Z.
pub fn view_projection(projection: &Projection, view: &ViewState) -> Mat4 {
    projection.matrix() * model_matrix(view)
}

/// Clip-space position of a model-space direction, for diagnostics and tests.
pub fn project_direction(projection: &Projection, view: &ViewState, dir: [f32; 3]) -> Vec4 {
    view_projection(projection, view) * Vec4::new(dir[0], dir[1], dir[2], 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const EPS: f32 = 1e-4;

    #[test]
    fn matrix_round_trips_parameters() {
        for (fov, aspect) in [(90.0, 16.0 / 9.0), (30.0, 1.0), (57.3, 0.5), (45.0, 2.4)] {
            let p = Projection::new(fov, aspect);
            let (f, a) = Projection::params_from_matrix(&p.matrix());
            assert!((f - fov).abs() < EPS, "fov {f} vs {fov}");
            assert!((a - aspect).abs() < EPS, "aspect {a} vs {aspect}");
            assert_eq!((p.fov(), p.aspect()), (fov, aspect));
        }
    }

    #[test]
    fn set_replaces_both_parameters() {
        let mut p = Projection::new(90.0, 1.0);
        p.set(60.0, 1.5);
        assert_eq!(p, Projection::new(60.0, 1.5));
    }

    #[test]
    fn image_centre_faces_forward_at_rest() {
        let model = model_matrix(&ViewState::default());
        // u = 0.5 lies on mesh -X
        let forward = model.transform_vector3(Vec3::new(-1.0, 0.0, 0.0));
        assert!((forward - Vec3::new(0.0, 0.0, -1.0)).length() < EPS);
    }

    #[test]
    fn seam_is_behind_the_viewer_at_rest() {
        let model = model_matrix(&ViewState::default());
        // u = 0 / 1 lies on mesh +X
        let seam = model.transform_vector3(Vec3::X);
        assert!((seam - Vec3::Z).length() < EPS);
    }

    #[test]
    fn positive_yaw_moves_forward_content_left() {
        let view = ViewState { yaw: 30.0, ..ViewState::default() };
        let p = model_matrix(&view).transform_vector3(Vec3::new(-1.0, 0.0, 0.0));
        assert!(p.x < 0.0 && p.z < 0.0);
    }

    #[test]
    fn negative_pitch_moves_forward_content_down() {
        let view = ViewState { pitch: -30.0, ..ViewState::default() };
        let p = model_matrix(&view).transform_vector3(Vec3::new(-1.0, 0.0, 0.0));
        assert!(p.y < 0.0);
    }

    #[test]
    fn forward_projects_to_screen_centre() {
        let proj = Projection::new(90.0, 16.0 / 9.0);
        let clip = project_direction(&proj, &ViewState::default(), [-1.0, 0.0, 0.0]);
        assert!(clip.w > 0.0);
        assert!((clip.x / clip.w).abs() < EPS);
        assert!((clip.y / clip.w).abs() < EPS);
        let depth = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&depth));
    }
}
