//! Triangle strip generation
//!
//! Greedy stripifier over an edge-adjacency map. Faces are treated as
//! unordered vertex sets: a strip may flip the winding of a face it absorbs,
//! but every input triangle is emitted exactly once.

use std::collections::HashMap;

use log::debug;

use super::{GeometrySegment, Model, Triangle, TriangleStrip};

/// Summary of a stripification pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StripStats {
    /// Segments visited
    pub segments: usize,
    /// Input triangles
    pub triangles: usize,
    /// Strips produced
    pub strips: usize,
    /// Total indices across all strips
    pub indices: usize,
}

impl StripStats {
    fn record(&mut self, segment: &GeometrySegment) {
        self.segments += 1;
        self.triangles += segment.triangles.len();
        self.strips += segment.triangle_strips.len();
        self.indices += segment.triangle_strips.iter().map(Vec::len).sum::<usize>();
    }
}

/// Undirected edge -> triangles using it, in input order
struct EdgeAdjacency {
    edges: HashMap<(u32, u32), Vec<usize>>,
}

impl EdgeAdjacency {
    fn new(triangles: &[Triangle]) -> Self {
        let mut edges: HashMap<(u32, u32), Vec<usize>> = HashMap::with_capacity(triangles.len() * 3);

        for (index, &[a, b, c]) in triangles.iter().enumerate() {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                let users = edges.entry(edge_key(u, v)).or_default();
                if users.last() != Some(&index) {
                    users.push(index);
                }
            }
        }

        Self { edges }
    }

    /// Lowest-index unvisited triangle sharing edge `u`-`v`
    fn next_unvisited(&self, u: u32, v: u32, visited: &[bool]) -> Option<usize> {
        self.edges
            .get(&edge_key(u, v))?
            .iter()
            .copied()
            .find(|&index| !visited[index])
    }
}

fn edge_key(u: u32, v: u32) -> (u32, u32) {
    if u <= v { (u, v) } else { (v, u) }
}

/// The vertex of `triangle` left after removing one `u` and one `v`
fn third_vertex(triangle: Triangle, u: u32, v: u32) -> Option<u32> {
    let mut remaining = triangle.to_vec();
    for vertex in [u, v] {
        let position = remaining.iter().position(|&candidate| candidate == vertex)?;
        remaining.swap_remove(position);
    }
    remaining.first().copied()
}

/// Build strips covering `triangles`
///
/// Starts from the lowest unvisited triangle, picks the rotation whose
/// trailing edge has an unvisited neighbour, then keeps appending the third
/// vertex of the lowest-index neighbour across the trailing edge. Output is
/// deterministic for identical input.
pub fn create_segment_triangle_strips(triangles: &[Triangle]) -> Vec<TriangleStrip> {
    let adjacency = EdgeAdjacency::new(triangles);
    let mut visited = vec![false; triangles.len()];
    let mut strips = Vec::new();

    for start in 0..triangles.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;

        let [a, b, c] = triangles[start];
        let rotations = [[a, b, c], [b, c, a], [c, a, b]];
        let first = rotations
            .into_iter()
            .find(|&[_, v, w]| adjacency.next_unvisited(v, w, &visited).is_some())
            .unwrap_or(rotations[0]);

        let mut strip = first.to_vec();

        loop {
            let (u, v) = (strip[strip.len() - 2], strip[strip.len() - 1]);
            let Some(next) = adjacency.next_unvisited(u, v, &visited) else {
                break;
            };
            let Some(w) = third_vertex(triangles[next], u, v) else {
                break;
            };

            visited[next] = true;
            strip.push(w);
        }

        strips.push(strip);
    }

    strips
}

/// Decode a strip back into triangles, undoing the alternating winding
pub fn expand_triangle_strip(strip: &[u32]) -> Vec<Triangle> {
    strip
        .windows(3)
        .enumerate()
        .map(|(i, window)| {
            if i % 2 == 0 {
                [window[0], window[1], window[2]]
            } else {
                [window[1], window[0], window[2]]
            }
        })
        .collect()
}

/// Populate `triangle_strips` on every segment of every model
pub fn create_models_triangle_strips(mut models: Vec<Model>) -> Vec<Model> {
    let mut stats = StripStats::default();

    for segment in models.iter_mut().flat_map(|model| model.geometry.iter_mut().flatten()) {
        segment.triangle_strips = create_segment_triangle_strips(&segment.triangles);
        stats.record(segment);
    }

    debug!(
        "Stripified {} segments: {} triangles -> {} strips ({} indices)",
        stats.segments, stats.triangles, stats.strips, stats.indices
    );
    models
}

/// Fallback when stripification is disabled: one 3-index strip per triangle
pub fn assign_independent_strips(mut models: Vec<Model>) -> Vec<Model> {
    for segment in models.iter_mut().flat_map(|model| model.geometry.iter_mut().flatten()) {
        segment.triangle_strips = segment.triangles.iter().map(|triangle| triangle.to_vec()).collect();
    }
    models
}
