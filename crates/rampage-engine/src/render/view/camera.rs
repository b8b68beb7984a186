use glam::{Mat4 as Transform, Vec3};
use rampage_contract::matrix::{pixel_ortho, to_wire};
use rampage_contract::{Mat4, Uniforms};

use crate::coords::Viewport;

const DEFAULT_FOV_Y: f32 = std::f32::consts::FRAC_PI_3;
const DEFAULT_NEAR: f32 = 0.05;
const DEFAULT_FAR: f32 = 100.0;

/// First-person camera state used to fill a frame's [`Uniforms`].
///
/// Yaw is measured around +Y; zero looks down -Z.
///
/// The projection needs `0 < near < far` and a field of view strictly between
/// 0 and π. Fields are public, so [`Camera::clip`] repairs values outside that
/// range before they reach the matrix: a non-finite or non-positive `near`
/// falls back to the default, `far` is pushed past `near`, and `fov_y` is
/// clamped to 1°..=179°.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub position: [f32; 3],
    pub yaw: f32,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            yaw: 0.0,
            fov_y: DEFAULT_FOV_Y,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }
}

impl Camera {
    /// `(fov_y, near, far)` as used by [`Camera::projection_matrix`].
    pub fn clip(&self) -> (f32, f32, f32) {
        let fov_y = if self.fov_y.is_finite() {
            self.fov_y.clamp(1f32.to_radians(), 179f32.to_radians())
        } else {
            DEFAULT_FOV_Y
        };
        let near = if self.near.is_finite() && self.near > 0.0 { self.near } else { DEFAULT_NEAR };
        let far = if self.far.is_finite() && self.far > near {
            self.far
        } else {
            (near * 2.0).max(DEFAULT_FAR)
        };
        (fov_y, near, far)
    }

    /// World → view transform.
    pub fn view(&self) -> Transform {
        Transform::from_rotation_y(-self.yaw) * Transform::from_translation(-Vec3::from(self.position))
    }

    pub fn projection(&self, viewport: Viewport) -> Transform {
        let (fov_y, near, far) = self.clip();
        Transform::perspective_rh(fov_y, viewport.aspect(), near, far)
    }

    pub fn view_matrix(&self) -> Mat4 {
        to_wire(self.view())
    }

    pub fn projection_matrix(&self, viewport: Viewport) -> Mat4 {
        to_wire(self.projection(viewport))
    }

    /// Uniform block for one frame: perspective projection, this camera's view
    /// as the model-view matrix, and the viewport's pixel-space ortho.
    pub fn uniforms(&self, viewport: Viewport) -> Uniforms {
        Uniforms::from_transforms(self.projection(viewport), self.view(), overlay_transform(viewport))
    }
}

fn overlay_transform(viewport: Viewport) -> Transform {
    if viewport.is_valid() {
        pixel_ortho(viewport.width, viewport.height)
    } else {
        pixel_ortho(1.0, 1.0)
    }
}

/// Maps logical pixels (top-left origin, +Y down) to NDC.
///
/// An invalid viewport maps a 1×1 pixel area so the matrix stays finite.
pub fn overlay_ortho(viewport: Viewport) -> Mat4 {
    to_wire(overlay_transform(viewport))
}
