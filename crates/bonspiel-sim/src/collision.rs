use bonspiel_core::stone::Vec2;

/// True iff two stone centers are closer than one stone diameter.
pub fn stones_overlap(a: Vec2, b: Vec2, stone_radius: f32) -> bool {
    let diameter = 2.0 * stone_radius;
    (b - a).length_sq() < diameter * diameter
}

/// Equal-mass elastic collision along the center-to-center normal.
///
/// Tangential components pass through unchanged; normal components
/// exchange according to the restitution `e`. Returns None when the pair
/// needs no resolution: separating (relative normal velocity <= 0) or a
/// degenerate zero-length normal (identical centers).
pub fn resolve(
    p1: Vec2,
    v1: Vec2,
    p2: Vec2,
    v2: Vec2,
    restitution: f32,
) -> Option<(Vec2, Vec2)> {
    let normal = (p2 - p1).normalized()?;

    let v1n = v1.dot(normal);
    let v2n = v2.dot(normal);

    // Only resolve approaching pairs.
    if v1n - v2n <= 0.0 {
        return None;
    }

    let t1 = v1 - normal * v1n;
    let t2 = v2 - normal * v2n;

    let e = restitution;
    let v1n_after = v1n * (1.0 - e) * 0.5 + v2n * (1.0 + e) * 0.5;
    let v2n_after = v1n * (1.0 + e) * 0.5 + v2n * (1.0 - e) * 0.5;

    Some((t1 + normal * v1n_after, t2 + normal * v2n_after))
}

/// Push two overlapping stones apart along the center-to-center axis by
/// half the overlap each. No-op when not overlapping, or when the
/// centers coincide and no axis exists.
pub fn separate(p1: Vec2, p2: Vec2, stone_radius: f32) -> (Vec2, Vec2) {
    let delta = p2 - p1;
    let dist = delta.length();
    let min_dist = 2.0 * stone_radius;

    if dist >= min_dist {
        return (p1, p2);
    }
    let Some(axis) = delta.normalized() else {
        return (p1, p2);
    };

    let push = (min_dist - dist) * 0.5;
    (p1 - axis * push, p2 + axis * push)
}
