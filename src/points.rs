use macroquad::prelude::*;

/// Parse a TMX point list such as `"0,0 -80,80 -80,160"`.
///
/// One point per whitespace-separated token. `y` is negated since TMX's
/// y axis points down and ours points up. Malformed numbers become `0.0`
/// instead of failing; an empty string yields no points.
pub fn parse_point_string(s: &str) -> Vec<Vec2> {
    s.split_whitespace().map(parse_point).collect()
}

fn parse_point(token: &str) -> Vec2 {
    let mut parts = token.splitn(2, ',');
    let x = lenient_f32(parts.next().unwrap_or(""));
    let y = lenient_f32(parts.next().unwrap_or(""));
    vec2(x, -y)
}

/// Parse a float, falling back to `0.0`.
pub(crate) fn lenient_f32(s: &str) -> f32 {
    s.trim().parse().unwrap_or(0.0)
}
