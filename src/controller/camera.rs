use glam::{Mat4, Vec3};

const MOVEMENT_SPEED: f32 = 2.5;
const MOUSE_SENSITIVITY: f32 = 0.1;
// Orbit/rotate/tilt/roll gestures run at 1.5x the base sensitivity.
const ANGULAR_GAIN: f32 = 1.5;
const PAN_GAIN: f32 = 0.01;
const ZOOM_STEP: f32 = 0.5;
const PITCH_LIMIT_DEG: f32 = 89.0;
const DEFAULT_YAW_DEG: f32 = -90.0;
const DEFAULT_ORBIT_DISTANCE: f32 = 3.0;

/// Free-fly nudge directions for keyboard movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Forward,
    Backward,
    Left,
    Right,
}

/// Orbit camera: the eye position is always derived from a pivot point, an
/// orbit distance, and yaw/pitch/roll angles (degrees). The orthonormal
/// front/right/up triad is recomputed from the angles after every angular
/// gesture; `world_up` is a fixed reference and is never rolled.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    position: Vec3,
    target: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    roll: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    orbit_distance: f32,
    movement_speed: f32,
    mouse_sensitivity: f32,
}

impl OrbitCamera {
    pub fn new(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32, roll: f32) -> Self {
        let target = Vec3::ZERO;
        let mut camera = Self {
            position,
            target,
            world_up,
            yaw,
            pitch,
            roll,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            orbit_distance: (position - target).length(),
            movement_speed: MOVEMENT_SPEED,
            mouse_sensitivity: MOUSE_SENSITIVITY,
        };
        camera.update_vectors();
        camera.recenter_eye();
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn roll(&self) -> f32 {
        self.roll
    }

    pub fn orbit_distance(&self) -> f32 {
        self.orbit_distance
    }

    /// Restore the canonical framing: looking down -Z at the origin from
    /// three units out. Called when a new model is loaded so the camera
    /// always frames the origin regardless of prior session state.
    pub fn reset_orientation(&mut self) {
        self.yaw = DEFAULT_YAW_DEG;
        self.pitch = 0.0;
        self.roll = 0.0;
        self.world_up = Vec3::Y;
        self.front = Vec3::NEG_Z;
        self.right = Vec3::X;
        self.up = Vec3::Y;
        self.target = Vec3::ZERO;
        self.orbit_distance = DEFAULT_ORBIT_DISTANCE;
        self.update_vectors();
        self.recenter_eye();
    }

    /// Move the pivot without moving the eye; the orbit distance is
    /// re-measured from the current eye so the view does not jump.
    pub fn set_orbit_target(&mut self, target: Vec3) {
        self.target = target;
        self.orbit_distance = (self.position - self.target).length();
    }

    /// Free-fly nudge along front/right. Mutates the eye only: the orbit
    /// invariant stays suspended until the next angular gesture recenters
    /// the eye (known divergence, see the module tests).
    pub fn keyboard_pan(&mut self, direction: PanDirection, dt: f32) {
        let velocity = self.movement_speed * dt;
        match direction {
            PanDirection::Forward => self.position += self.front * velocity,
            PanDirection::Backward => self.position -= self.front * velocity,
            PanDirection::Left => self.position -= self.right * velocity,
            PanDirection::Right => self.position += self.right * velocity,
        }
    }

    /// Canonical angular gesture: both axes of the pointer delta drive
    /// yaw and pitch.
    pub fn orbit(&mut self, dx: f32, dy: f32, constrain_pitch: bool) {
        self.apply_angular(dx, dy, constrain_pitch);
    }

    /// Yaw-only variant of the orbit gesture.
    pub fn rotate(&mut self, dx: f32, constrain_pitch: bool) {
        self.apply_angular(dx, 0.0, constrain_pitch);
    }

    /// Pitch-only variant of the orbit gesture.
    pub fn tilt(&mut self, dy: f32, constrain_pitch: bool) {
        self.apply_angular(0.0, dy, constrain_pitch);
    }

    fn apply_angular(&mut self, dx: f32, dy: f32, constrain_pitch: bool) {
        let sensitivity = self.mouse_sensitivity * ANGULAR_GAIN;
        self.yaw += dx * sensitivity;
        self.pitch += dy * sensitivity;
        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
        }
        self.update_vectors();
        self.recenter_eye();
    }

    /// Roll about the view axis. The basis is recomputed but the eye is
    /// deliberately left alone: roll changes orientation around `front`
    /// without moving the camera.
    pub fn roll_by(&mut self, dx: f32) {
        self.roll = wrap_half_turn(self.roll + dx * self.mouse_sensitivity * ANGULAR_GAIN);
        self.update_vectors();
    }

    /// Dolly the eye along the view direction and re-measure the orbit
    /// distance. This moves the camera, not the field of view.
    pub fn zoom(&mut self, scroll_delta: f32) {
        self.position += self.front * (scroll_delta * ZOOM_STEP);
        self.orbit_distance = (self.position - self.target).length();
    }

    /// Slide the pivot in the view plane. Pan speed scales with the orbit
    /// distance so a distant camera covers more world units per pixel.
    /// The only gesture that mutates `target`.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let sensitivity = self.mouse_sensitivity * PAN_GAIN;
        self.target -= self.right * (dx * sensitivity * self.orbit_distance);
        self.target -= self.up * (dy * sensitivity * self.orbit_distance);
        self.recenter_eye();
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Replace the full orbit pose in one step, e.g. when restoring a
    /// session snapshot. Goes through the same clamp/wrap and basis
    /// recomputation as the gestures so the invariants hold afterwards.
    pub fn set_pose(&mut self, yaw: f32, pitch: f32, roll: f32, target: Vec3, orbit_distance: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
        self.roll = wrap_half_turn(roll);
        self.target = target;
        self.orbit_distance = orbit_distance.max(0.0);
        self.update_vectors();
        self.recenter_eye();
    }

    /// Recompute the orthonormal front/right/up triad from yaw/pitch/roll.
    /// Right/up are first built against the fixed world-up reference, then
    /// rotated about `front` by the roll angle.
    fn update_vectors(&mut self) {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();

        let right_flat = self.front.cross(self.world_up);
        if right_flat.length_squared() < 1e-10 {
            // Front is (nearly) parallel to world-up: the cross product is
            // degenerate, so hold the previous right/up instead of
            // normalizing toward NaN.
            return;
        }
        let right_no_roll = right_flat.normalize();
        let up_no_roll = right_no_roll.cross(self.front).normalize();

        let (roll_sin, roll_cos) = self.roll.to_radians().sin_cos();
        self.right = (right_no_roll * roll_cos + up_no_roll * roll_sin).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    fn recenter_eye(&mut self) {
        self.position = self.target - self.front * self.orbit_distance;
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y, DEFAULT_YAW_DEG, 0.0, 0.0)
    }
}

/// Wrap an angle in degrees into (-180, 180]. Full modulo, so per-call
/// deltas of 360 or more still land in range.
fn wrap_half_turn(degrees: f32) -> f32 {
    let wrapped = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::{wrap_half_turn, OrbitCamera, PanDirection};
    use glam::Vec3;

    const EPSILON: f32 = 1e-5;

    fn assert_orthonormal(camera: &OrbitCamera) {
        assert!((camera.front().length() - 1.0).abs() < EPSILON);
        assert!((camera.right().length() - 1.0).abs() < EPSILON);
        assert!((camera.up().length() - 1.0).abs() < EPSILON);
        assert!(camera.front().dot(camera.right()).abs() < EPSILON);
        assert!(camera.front().dot(camera.up()).abs() < EPSILON);
        assert!(camera.right().dot(camera.up()).abs() < EPSILON);
    }

    fn assert_orbit_invariant(camera: &OrbitCamera) {
        let expected = camera.target() - camera.front() * camera.orbit_distance();
        assert!(
            (camera.position() - expected).length() < EPSILON,
            "eye {:?} != target - front * distance {:?}",
            camera.position(),
            expected
        );
    }

    #[test]
    fn basis_stays_orthonormal_over_gesture_sequences() {
        let mut camera = OrbitCamera::default();
        assert_orthonormal(&camera);
        for step in 0..200 {
            let dx = ((step * 7) % 23) as f32 - 11.0;
            let dy = ((step * 13) % 17) as f32 - 8.0;
            match step % 4 {
                0 => camera.orbit(dx, dy, true),
                1 => camera.rotate(dx, true),
                2 => camera.tilt(dy, true),
                _ => camera.roll_by(dx),
            }
            assert_orthonormal(&camera);
        }
    }

    #[test]
    fn orbit_invariant_holds_after_angular_gestures_zoom_and_pan() {
        let mut camera = OrbitCamera::default();
        camera.orbit(12.0, -7.0, true);
        assert_orbit_invariant(&camera);
        camera.rotate(30.0, true);
        assert_orbit_invariant(&camera);
        camera.tilt(-15.0, true);
        assert_orbit_invariant(&camera);
        camera.zoom(2.0);
        assert_orbit_invariant(&camera);
        camera.pan(5.0, -3.0);
        assert_orbit_invariant(&camera);
    }

    #[test]
    fn keyboard_pan_suspends_orbit_invariant_until_next_angular_gesture() {
        let mut camera = OrbitCamera::default();
        camera.keyboard_pan(PanDirection::Right, 0.5);
        let expected = camera.target() - camera.front() * camera.orbit_distance();
        // Known divergence: the eye drifts off the orbit sphere.
        assert!((camera.position() - expected).length() > 1e-3);
        camera.orbit(1.0, 0.0, true);
        assert_orbit_invariant(&camera);
    }

    #[test]
    fn roll_does_not_move_the_eye() {
        let mut camera = OrbitCamera::default();
        camera.orbit(20.0, 10.0, true);
        let eye_before = camera.position();
        camera.roll_by(40.0);
        assert!((camera.position() - eye_before).length() < EPSILON);
        assert_orthonormal(&camera);
    }

    #[test]
    fn roll_wraps_into_half_turn_range() {
        let mut camera = OrbitCamera::default();
        // 170 degrees at base sensitivity 0.1 and gain 1.5.
        camera.roll_by(170.0 / 0.15);
        assert!((camera.roll() - 170.0).abs() < 1e-3);
        camera.roll_by(20.0 / 0.15);
        assert!((camera.roll() + 170.0).abs() < 1e-3, "roll = {}", camera.roll());
    }

    #[test]
    fn wrap_half_turn_handles_full_turn_deltas() {
        assert!((wrap_half_turn(190.0) + 170.0).abs() < 1e-4);
        assert!((wrap_half_turn(-190.0) - 170.0).abs() < 1e-4);
        assert!((wrap_half_turn(550.0) + 170.0).abs() < 1e-4);
        assert!((wrap_half_turn(180.0) - 180.0).abs() < 1e-4);
        assert!(wrap_half_turn(360.0).abs() < 1e-4);
    }

    #[test]
    fn constrained_pitch_clamps_at_89_degrees() {
        let mut camera = OrbitCamera::default();
        camera.tilt(10_000.0, true);
        assert!((camera.pitch() - 89.0).abs() < EPSILON);
        camera.tilt(-100_000.0, true);
        assert!((camera.pitch() + 89.0).abs() < EPSILON);
        assert_orthonormal(&camera);
    }

    #[test]
    fn unconstrained_tilt_at_the_pole_holds_previous_basis() {
        let mut camera = OrbitCamera::default();
        let right_before = camera.right();
        let up_before = camera.up();
        // Drive pitch to exactly 90: front becomes parallel to world-up.
        camera.tilt(90.0 / 0.15, false);
        assert!((camera.pitch() - 90.0).abs() < 1e-3);
        assert!(camera.front().is_finite());
        assert!(camera.right().is_finite());
        assert!(camera.up().is_finite());
        assert!((camera.right() - right_before).length() < EPSILON);
        assert!((camera.up() - up_before).length() < EPSILON);
    }

    #[test]
    fn pan_scales_with_orbit_distance() {
        let mut near = OrbitCamera::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Y, -90.0, 0.0, 0.0);
        let mut far = OrbitCamera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Y, -90.0, 0.0, 0.0);
        let near_target = near.target();
        let far_target = far.target();
        near.pan(4.0, 2.0);
        far.pan(4.0, 2.0);
        let near_move = (near.target() - near_target).length();
        let far_move = (far.target() - far_target).length();
        assert!(near_move > 0.0);
        assert!((far_move / near_move - 10.0).abs() < 1e-3);
    }

    #[test]
    fn pan_preserves_orbit_distance() {
        let mut camera = OrbitCamera::default();
        camera.orbit(25.0, -10.0, true);
        let distance = camera.orbit_distance();
        camera.pan(10.0, -6.0);
        assert!((camera.orbit_distance() - distance).abs() < EPSILON);
        assert_orbit_invariant(&camera);
    }

    #[test]
    fn zoom_dollies_along_front_and_remeasures_distance() {
        let mut camera = OrbitCamera::default();
        let before = camera.orbit_distance();
        camera.zoom(1.0);
        assert!((camera.orbit_distance() - (before - 0.5)).abs() < EPSILON);
        assert_orbit_invariant(&camera);
    }

    #[test]
    fn set_orbit_target_keeps_the_eye_in_place() {
        let mut camera = OrbitCamera::default();
        let eye = camera.position();
        camera.set_orbit_target(Vec3::new(2.0, 1.0, -1.0));
        assert!((camera.position() - eye).length() < EPSILON);
        let expected = (camera.position() - camera.target()).length();
        assert!((camera.orbit_distance() - expected).abs() < EPSILON);
    }

    #[test]
    fn reset_orientation_is_idempotent() {
        let mut camera = OrbitCamera::default();
        camera.orbit(123.0, -45.0, true);
        camera.roll_by(80.0);
        camera.zoom(3.0);
        camera.reset_orientation();
        let first = camera;
        camera.reset_orientation();
        assert_eq!(first.yaw(), camera.yaw());
        assert_eq!(first.pitch(), camera.pitch());
        assert_eq!(first.roll(), camera.roll());
        assert_eq!(first.position(), camera.position());
        assert_eq!(first.target(), camera.target());
        assert_eq!(first.orbit_distance(), camera.orbit_distance());
        assert_orbit_invariant(&camera);
        assert_orthonormal(&camera);
    }

    #[test]
    fn view_matrix_places_the_origin_ahead_of_the_eye() {
        let camera = OrbitCamera::default();
        let view = camera.view_matrix();
        let origin_in_view = view.transform_point3(Vec3::ZERO);
        // Default framing: origin three units down the view -Z axis.
        assert!((origin_in_view - Vec3::new(0.0, 0.0, -3.0)).length() < 1e-4);
    }
}
