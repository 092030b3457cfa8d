//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Two triangles covering a rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(r.left, r.top, color),
        Vertex::new(r.right, r.top, color),
        Vertex::new(r.left, r.bottom, color),
        Vertex::new(r.left, r.bottom, color),
        Vertex::new(r.right, r.top, color),
        Vertex::new(r.right, r.bottom, color),
    ]
}

/// Hollow rectangle; the border grows inward
pub fn rect_outline(r: &Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(r.width() / 2.0).min(r.height() / 2.0);
    let edges = [
        Rect::new(r.left, r.top, r.right, r.top + t),
        Rect::new(r.left, r.bottom - t, r.right, r.bottom),
        Rect::new(r.left, r.top + t, r.left + t, r.bottom - t),
        Rect::new(r.right - t, r.top + t, r.right, r.bottom - t),
    ];
    edges.iter().flat_map(|e| rect(e, color)).collect()
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Heart glyph filling a `size` x `size` box: two lobes and a point
pub fn heart(center: Vec2, size: f32, color: [f32; 4]) -> Vec<Vertex> {
    let lobe_r = size / 4.0;
    let lobe_y = center.y - size / 4.0;
    let mut vertices = circle(Vec2::new(center.x - lobe_r, lobe_y), lobe_r, color, 12);
    vertices.extend(circle(Vec2::new(center.x + lobe_r, lobe_y), lobe_r, color, 12));

    // Point, screen y grows downward
    vertices.push(Vertex::new(center.x - size / 2.0, lobe_y, color));
    vertices.push(Vertex::new(center.x + size / 2.0, lobe_y, color));
    vertices.push(Vertex::new(center.x, center.y + size / 2.0, color));
    vertices
}
