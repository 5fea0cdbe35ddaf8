//! Shape generation for the bird and pipes
//!
//! All coordinates are screen pixels (origin top-left, y down); the pipeline
//! converts to NDC.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::sim::state::{Bird, GameState, Pipe};

/// Pipe border thickness in pixels
const PIPE_EDGE: f32 = 3.0;

/// Two triangles from four corners (clockwise from top-left)
fn quad(corners: [Vec2; 4], color: [f32; 4]) -> [Vertex; 6] {
    let [a, b, c, d] = corners.map(|p| Vertex::new(p.x, p.y, color));
    [a, b, c, a, c, d]
}

/// Axis-aligned filled rectangle
pub fn rect(top_left: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    rotated_rect(top_left, top_left, size, 0.0, color)
}

/// Rectangle rotated by `angle_deg` (clockwise on screen) around `pivot`
pub fn rotated_rect(
    pivot: Vec2,
    top_left: Vec2,
    size: Vec2,
    angle_deg: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let rot = Vec2::from_angle(angle_deg.to_radians());
    let corners = [
        top_left,
        top_left + Vec2::new(size.x, 0.0),
        top_left + size,
        top_left + Vec2::new(0.0, size.y),
    ]
    .map(|p| pivot + rot.rotate(p - pivot));
    quad(corners, color).to_vec()
}

/// Bird sprite: body, wing, eye and beak, all rotated around the anchor
pub fn bird(bird: &Bird) -> Vec<Vertex> {
    let origin = bird.top_left();
    let s = bird.size;
    // Parts in fractions of sprite size: (offset, size, color)
    let parts = [
        (Vec2::new(0.0, 0.1), Vec2::new(0.8, 0.8), colors::BIRD_BODY),
        (Vec2::new(0.05, 0.45), Vec2::new(0.35, 0.25), colors::BIRD_WING),
        (Vec2::new(0.5, 0.2), Vec2::new(0.22, 0.22), colors::BIRD_EYE),
        (Vec2::new(0.61, 0.27), Vec2::new(0.08, 0.1), colors::BIRD_PUPIL),
        (Vec2::new(0.72, 0.48), Vec2::new(0.28, 0.18), colors::BIRD_BEAK),
    ];

    let mut vertices = Vec::with_capacity(parts.len() * 6);
    for (offset, size, color) in parts {
        vertices.extend(rotated_rect(
            bird.pos,
            origin + offset * s,
            size * s,
            bird.angle,
            color,
        ));
    }
    vertices
}

/// Pipe segment: dark border with a lighter fill
pub fn pipe(pipe: &Pipe) -> Vec<Vertex> {
    let mut vertices = rect(pipe.pos, pipe.size, colors::PIPE_EDGE);
    let inset = Vec2::splat(PIPE_EDGE);
    vertices.extend(rect(
        pipe.pos + inset,
        (pipe.size - inset * 2.0).max(Vec2::ZERO),
        colors::PIPE_FILL,
    ));
    vertices
}

/// Everything drawn in one frame, back to front
pub fn scene(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(state.pipes.len() * 12 + 30);
    for p in state.pipes.iter().filter(|p| p.alive) {
        vertices.extend(pipe(p));
    }
    vertices.extend(bird(&state.bird));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_rect_corners() {
        let v = rect(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), [1.0; 4]);
        assert_eq!(v.len(), 6);
        assert_eq!(v[0].position, [10.0, 20.0]);
        assert_eq!(v[2].position, [40.0, 60.0]);
    }

    #[test]
    fn test_rotation_is_clockwise_on_screen() {
        // Unit square to the right of the pivot, rotated 90° lands below it
        let v = rotated_rect(Vec2::ZERO, Vec2::ZERO, Vec2::new(10.0, 0.0), 90.0, [1.0; 4]);
        let [x, y] = v[1].position;
        assert!(x.abs() < 1e-4);
        assert!((y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_scene_vertex_count() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        assert_eq!(scene(&state).len(), 30);

        state.pipes.push(Pipe {
            pos: Vec2::new(400.0, 10.0),
            vel_x: -200.0,
            size: Vec2::new(50.0, 50.0),
            alive: true,
        });
        assert_eq!(scene(&state).len(), 42);
    }
}
