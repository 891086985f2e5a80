//! Consumers of a shared pose must agree on the TCP position

use cncsim_core::{GlMatrixTarget, MachineState, Pose, TracePose};
use glam::{DMat4, DVec3};

struct Renderer {
    markers: Vec<[f64; 4]>,
    matrices: Vec<[f32; 16]>,
}

impl GlMatrixTarget for Renderer {
    fn mult_matrix(&mut self, matrix: &[f32; 16]) {
        self.matrices.push(*matrix);
    }
}

fn render(renderer: &mut Renderer, pose: &Pose) {
    let marker = pose.transform_point(&[0.0, 0.0, 0.0, 1.0]).unwrap();
    renderer.markers.push(marker.to_array());
    pose.apply_to_gl(renderer);
}

fn material_point(pose: &Pose) -> [f64; 4] {
    pose.transform_point(&[0.0, 0.0, 0.0, 1.0]).unwrap().to_array()
}

#[test]
fn test_identity_pose_consumers_agree() {
    let pose = Pose::identity();
    let mut renderer = Renderer {
        markers: Vec::new(),
        matrices: Vec::new(),
    };

    render(&mut renderer, &pose);
    let material = material_point(&pose);

    assert_eq!(renderer.markers[0], material);
    assert_eq!(material, [0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_repeated_calls_are_identical() {
    let pose = Pose::new(
        DMat4::from_rotation_x(0.3) * DMat4::from_translation(DVec3::new(12.0, -7.5, 40.0)),
    );
    let first = material_point(&pose);
    let second = material_point(&pose);
    assert_eq!(first, second);

    let mut renderer = Renderer {
        markers: Vec::new(),
        matrices: Vec::new(),
    };
    render(&mut renderer, &pose);
    render(&mut renderer, &pose);
    assert_eq!(renderer.markers[0], renderer.markers[1]);
    assert_eq!(renderer.matrices[0], renderer.matrices[1]);
    assert_eq!(renderer.markers[0], first);
}

#[test]
fn test_tracepose_matches_renderer_marker() {
    let state = MachineState::new(5.0, 6.0, 7.0, 2.0);
    let pose = Pose::new(DMat4::from_translation(DVec3::new(5.0, 6.0, 5.0)));
    let entry = TracePose::capture(&state, &pose);
    let marker = material_point(&pose);
    assert_eq!(entry.tcp_position_mcs, [marker[0], marker[1], marker[2]]);
}
