//! 4-connected component labelling (breadth-first flood fill).

use std::collections::VecDeque;

use super::Region;
use crate::geom::Bounds;
use crate::mask::Mask;

/// Offsets tried from each dequeued pixel: right, left, down, up.
const NEIGHBORS: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Group solid pixels into maximal edge-connected islands.
///
/// Seeds are found in raster order; ids follow discovery order. Pixels are
/// marked visited when enqueued, so each is processed exactly once.
/// Diagonal contact does not connect.
pub fn label(mask: &Mask) -> Vec<Region> {
    let width = mask.width() as usize;
    let mut visited = vec![false; mask.cells().len()];
    let mut queue: VecDeque<(u32, u32)> = VecDeque::new();
    let mut regions = Vec::new();

    for (x0, y0) in mask.solid_pixels() {
        let start = y0 as usize * width + x0 as usize;
        if visited[start] {
            continue;
        }

        visited[start] = true;
        queue.clear();
        queue.push_back((x0, y0));

        let mut pixels = Vec::new();
        let mut bounds = Bounds::default();

        while let Some((x, y)) = queue.pop_front() {
            pixels.push((x, y));
            bounds.include(x, y);

            for &(dx, dy) in &NEIGHBORS {
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if !mask.get(nx, ny) {
                    continue;
                }
                let idx = ny as usize * width + nx as usize;
                if visited[idx] {
                    continue;
                }
                visited[idx] = true;
                queue.push_back((nx as u32, ny as u32));
            }
        }

        regions.push(Region {
            id: regions.len(),
            bounds: bounds.to_rect(),
            pixels,
        });
    }

    regions
}
