//! Debug drawing of object outlines.

use crate::object::TilemapObject;
use crate::tilemap::Tilemap;
use lyon::path::iterator::PathIterator;
use lyon::path::PathEvent;
use macroquad::prelude::*;

const FLATTEN_TOLERANCE: f32 = 0.5;

/// Outline every object of every group with immediate-mode lines.
///
/// `origin` is where the map's top-left corner lands on screen.
pub fn draw_objects_debug<L, G>(map: &Tilemap<L, G>, origin: Vec2, color: Color) {
    for group in map.object_groups() {
        for object in group.all_objects() {
            draw_object_outline(object, origin, color);
        }
    }
}

pub fn draw_object_outline(object: &TilemapObject, origin: Vec2, color: Color) {
    let base = origin + object.position();
    // poly points are stored y-up, screen space is y-down
    let flip = if object.points().is_some() { -1.0 } else { 1.0 };
    let to_screen = |x: f32, y: f32| base + vec2(x, y * flip);

    for event in object.path().iter().flattened(FLATTEN_TOLERANCE) {
        let (from, to) = match event {
            PathEvent::Line { from, to } => (from, to),
            PathEvent::End {
                last,
                first,
                close: true,
            } => (last, first),
            _ => continue,
        };
        let a = to_screen(from.x, from.y);
        let b = to_screen(to.x, to.y);
        draw_line(a.x, a.y, b.x, b.y, 1.0, color);
    }
}
