//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in pixel space
//! (origin top-left, y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Push a filled axis-aligned rectangle (two triangles)
pub fn push_rect(out: &mut Vec<Vertex>, pos: Vec2, size: Vec2, color: [f32; 4]) {
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);

    out.push(Vertex::new(x0, y0, color));
    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x0, y1, color));

    out.push(Vertex::new(x0, y1, color));
    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x1, y1, color));
}

/// Push a rectangle outline whose stroke lies inside the given bounds
pub fn push_rect_outline(
    out: &mut Vec<Vertex>,
    pos: Vec2,
    size: Vec2,
    width: f32,
    color: [f32; 4],
) {
    // Stroke wider than half the box is just a filled box
    let width = width.min(size.x / 2.0).min(size.y / 2.0);
    if width <= 0.0 {
        return;
    }

    // Top and bottom span the full width; sides fill the gap between them
    push_rect(out, pos, Vec2::new(size.x, width), color);
    push_rect(
        out,
        Vec2::new(pos.x, pos.y + size.y - width),
        Vec2::new(size.x, width),
        color,
    );
    let side = Vec2::new(width, size.y - 2.0 * width);
    push_rect(out, Vec2::new(pos.x, pos.y + width), side, color);
    push_rect(out, Vec2::new(pos.x + size.x - width, pos.y + width), side, color);
}

/// Push a filled circle
pub fn push_circle(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    color: [f32; 4],
    segments: u32,
) {
    let segments = segments.max(3);
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(vertices: &[Vertex]) -> (Vec2, Vec2) {
        let mut min = Vec2::splat(f32::MAX);
        let mut max = Vec2::splat(f32::MIN);
        for v in vertices {
            let p = Vec2::from(v.position);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }

    #[test]
    fn test_rect_covers_bounds() {
        let mut vertices = Vec::new();
        push_rect(&mut vertices, Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), [1.0; 4]);
        assert_eq!(vertices.len(), 6);
        assert_eq!(bounds(&vertices), (Vec2::new(10.0, 20.0), Vec2::new(40.0, 60.0)));
    }

    #[test]
    fn test_degenerate_rect_is_empty() {
        let mut vertices = Vec::new();
        push_rect(&mut vertices, Vec2::ZERO, Vec2::new(0.0, 10.0), [1.0; 4]);
        assert!(vertices.is_empty());
    }

    #[test]
    fn test_outline_is_four_bars_inside_bounds() {
        let pos = Vec2::new(272.0, 437.0);
        let size = Vec2::new(56.0, 56.0);
        let mut vertices = Vec::new();
        push_rect_outline(&mut vertices, pos, size, 3.0, [1.0; 4]);
        assert_eq!(vertices.len(), 24);
        assert_eq!(bounds(&vertices), (pos, pos + size));
    }

    #[test]
    fn test_circle_triangle_count() {
        let mut vertices = Vec::new();
        push_circle(&mut vertices, Vec2::new(5.0, 5.0), 2.0, [1.0; 4], 12);
        assert_eq!(vertices.len(), 36);
        let (min, max) = bounds(&vertices);
        assert!((min.x - 3.0).abs() < 1e-4 && (max.x - 7.0).abs() < 1e-4);
    }
}
