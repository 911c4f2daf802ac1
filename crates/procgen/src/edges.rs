//! Wireframe edge lists from indexed triangles.

use std::collections::HashSet;

/// How shared edges between neighboring triangles are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgeMode {
    /// Three edges per triangle; interior edges appear twice.
    #[default]
    All,
    /// Each undirected edge once, in order of first appearance.
    Unique,
}

/// Edge pairs `(a, b), (b, c), (c, a)` for every triangle, in face order.
pub fn extract_edges(faces: &[[u32; 3]], mode: EdgeMode) -> Vec<[u32; 2]> {
    let all = faces
        .iter()
        .flat_map(|&[a, b, c]| [[a, b], [b, c], [c, a]]);

    match mode {
        EdgeMode::All => all.collect(),
        EdgeMode::Unique => {
            let mut seen = HashSet::with_capacity(faces.len() * 3 / 2);
            all.filter(|&[a, b]| seen.insert((a.min(b), a.max(b))))
                .collect()
        }
    }
}
