//! Diamond-square midpoint displacement over a [`HeightMap`].
//!
//! Levels run from `size = n` down to unit squares. Each level reads only
//! heights written by larger levels, so the passes must stay in this order.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::heightmap::HeightMap;

/// Default roughness: lower = smoother, higher = spikier.
pub const DEFAULT_ROUGHNESS: f32 = 0.28;

/// Source of random displacement samples in `[-1, 1]`.
pub trait Displacement {
    fn next_unit(&mut self) -> f32;
}

impl<D: Displacement + ?Sized> Displacement for &mut D {
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}

/// Always returns 0: every point becomes the plain average of its neighbors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroDisplacement;

impl Displacement for ZeroDisplacement {
    fn next_unit(&mut self) -> f32 {
        0.0
    }
}

/// Uniform samples from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngDisplacement<R> {
    rng: R,
}

impl<R: Rng> RngDisplacement<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDisplacement<StdRng> {
    /// Reproducible source: the same seed always yields the same terrain.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Non-reproducible source seeded from the OS.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Displacement for RngDisplacement<R> {
    fn next_unit(&mut self) -> f32 {
        self.rng.gen_range(-1.0f32..=1.0)
    }
}

/// Diamond-square height synthesizer.
#[derive(Debug, Clone, Copy)]
pub struct DiamondSquare {
    /// Displacement scale per unit of sub-square size.
    pub roughness: f32,
}

impl Default for DiamondSquare {
    fn default() -> Self {
        Self {
            roughness: DEFAULT_ROUGHNESS,
        }
    }
}

impl DiamondSquare {
    pub fn new(roughness: f32) -> Self {
        Self { roughness }
    }

    /// Seed height for a map of resolution `n`: `n / 2`.
    pub fn seed_height(resolution: usize) -> f32 {
        resolution as f32 / 2.0
    }

    /// Set the four domain corners to the seed height and return it.
    pub fn seed_corners(heights: &mut HeightMap) -> f32 {
        let n = heights.side().saturating_sub(1);
        let h0 = Self::seed_height(n);
        for (row, col) in [(0, 0), (0, n), (n, 0), (n, n)] {
            heights.set(row, col, h0);
        }
        h0
    }

    /// Full pass: seed corners, subdivide, then remap to `[-1, 1]`.
    pub fn run<D: Displacement>(&self, heights: &mut HeightMap, source: &mut D) {
        let h0 = Self::seed_corners(heights);
        self.subdivide(heights, source);
        Self::remap(heights, h0);
    }

    /// Run every diamond and square level, largest first.
    ///
    /// Heights are left in the working range around `[0, 2 * h0]`.
    pub fn subdivide<D: Displacement>(&self, heights: &mut HeightMap, source: &mut D) {
        let n = heights.side().saturating_sub(1);
        let mut size = n;

        while size / 2 >= 1 {
            let half = size / 2;
            let scale = self.roughness * size as f32;
            log::debug!("diamond-square level: size={} scale={:.3}", size, scale);

            for row in (half..n).step_by(size) {
                for col in (half..n).step_by(size) {
                    let offset = source.next_unit() * scale;
                    Self::diamond_step(heights, row, col, half, offset);
                }
            }

            for row in (0..=n).step_by(half) {
                for col in ((row + half) % size..=n).step_by(size) {
                    let offset = source.next_unit() * scale;
                    Self::square_step(heights, row, col, half, offset);
                }
            }

            size = half;
        }
    }

    /// Center of a square: average of its four corners plus `offset`.
    fn diamond_step(heights: &mut HeightMap, row: usize, col: usize, half: usize, offset: f32) {
        let (r0, r1) = (row.checked_sub(half), Some(row + half));
        let (c0, c1) = (col.checked_sub(half), Some(col + half));
        if let Some(avg) = Self::average(heights, [(r0, c0), (r0, c1), (r1, c0), (r1, c1)]) {
            heights.set(row, col, avg + offset);
        }
    }

    /// Midpoint of a diamond: average of its in-bounds orthogonal neighbors plus `offset`.
    ///
    /// Points on the domain edge have only three neighbors and average those.
    fn square_step(heights: &mut HeightMap, row: usize, col: usize, half: usize, offset: f32) {
        let around = [
            (row.checked_sub(half), Some(col)),
            (Some(row), Some(col + half)),
            (Some(row + half), Some(col)),
            (Some(row), col.checked_sub(half)),
        ];
        if let Some(avg) = Self::average(heights, around) {
            heights.set(row, col, avg + offset);
        }
    }

    /// Mean of the in-bounds cells, `None` if there are none.
    fn average(heights: &HeightMap, cells: [(Option<usize>, Option<usize>); 4]) -> Option<f32> {
        let (sum, count) = cells
            .into_iter()
            .filter_map(|(r, c)| heights.get(r?, c?))
            .fold((0.0, 0u32), |(s, c), h| (s + h, c + 1));
        (count > 0).then(|| sum / count as f32)
    }

    /// Map working heights `[0, 2 * h0]` to `[-1, 1]` via `z / h0 - 1`, clamped.
    pub fn remap(heights: &mut HeightMap, h0: f32) {
        if h0 <= 0.0 {
            return;
        }
        heights.map_in_place(|z| (z / h0 - 1.0).clamp(-1.0, 1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of samples, then zeros.
    struct Sequence {
        samples: Vec<f32>,
        next: usize,
    }

    impl Sequence {
        fn new(samples: &[f32]) -> Self {
            Self {
                samples: samples.to_vec(),
                next: 0,
            }
        }
    }

    impl Displacement for Sequence {
        fn next_unit(&mut self) -> f32 {
            let v = self.samples.get(self.next).copied().unwrap_or(0.0);
            self.next += 1;
            v
        }
    }

    struct Counting(usize);

    impl Displacement for Counting {
        fn next_unit(&mut self) -> f32 {
            self.0 += 1;
            0.0
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn corners_seeded_to_half_resolution() {
        for n in [2usize, 4, 16, 128] {
            let mut map = HeightMap::new(n + 1);
            let h0 = DiamondSquare::seed_corners(&mut map);
            assert_eq!(h0, n as f32 / 2.0);
            for (r, c) in [(0, 0), (0, n), (n, 0), (n, n)] {
                assert_eq!(map[(r, c)], h0);
            }
            assert_eq!(map[(n / 2, n / 2)], 0.0);
        }
    }

    #[test]
    fn zero_displacement_gives_flat_terrain() {
        let mut map = HeightMap::new(5);
        DiamondSquare::default().run(&mut map, &mut ZeroDisplacement);
        assert!(map.as_slice().iter().all(|&z| approx(z, 0.0)));
    }

    #[test]
    fn zero_displacement_keeps_working_heights_at_seed() {
        let mut map = HeightMap::new(9);
        let h0 = DiamondSquare::seed_corners(&mut map);
        DiamondSquare::default().subdivide(&mut map, &mut ZeroDisplacement);
        assert!(map.as_slice().iter().all(|&z| approx(z, h0)));
    }

    #[test]
    fn hand_computed_n4_with_single_center_kick() {
        // n = 4, h0 = 2. First level: size 4, scale 0.28 * 4 = 1.12.
        // Only the first draw (the center diamond) is non-zero.
        let mut map = HeightMap::new(5);
        let h0 = DiamondSquare::seed_corners(&mut map);
        DiamondSquare::default().subdivide(&mut map, &mut Sequence::new(&[1.0]));

        let center = 2.0 + 1.12;
        assert!(approx(map[(2, 2)], center));

        // Edge midpoints average three neighbors: two corners and the center.
        let edge = (2.0 + 2.0 + center) / 3.0;
        for (r, c) in [(0, 2), (2, 0), (2, 4), (4, 2)] {
            assert!(approx(map[(r, c)], edge), "({}, {}) = {}", r, c, map[(r, c)]);
        }

        // Second level diamond at (1, 1): corners (0,0), (0,2), (2,0), (2,2).
        let quarter = (2.0 + edge + edge + center) / 4.0;
        assert!(approx(map[(1, 1)], quarter));

        let q13 = (edge + 2.0 + center + edge) / 4.0;
        assert!(approx(map[(1, 3)], q13));

        // Interior square point (1, 2): neighbors (0,2), (1,3), (2,2), (1,1).
        let p12 = (edge + q13 + center + quarter) / 4.0;
        assert!(approx(map[(1, 2)], p12));

        DiamondSquare::remap(&mut map, h0);
        assert!(approx(map[(2, 2)], center / h0 - 1.0));
        assert!(approx(map[(0, 0)], 0.0));
    }

    #[test]
    fn every_non_corner_point_draws_once() {
        for n in [2usize, 4, 8, 32] {
            let mut map = HeightMap::new(n + 1);
            let mut counter = Counting(0);
            DiamondSquare::default().run(&mut map, &mut counter);
            assert_eq!(counter.0, (n + 1) * (n + 1) - 4);
        }
    }

    #[test]
    fn same_seed_same_heights() {
        let mut a = HeightMap::new(33);
        let mut b = HeightMap::new(33);
        DiamondSquare::default().run(&mut a, &mut RngDisplacement::seeded(98765));
        DiamondSquare::default().run(&mut b, &mut RngDisplacement::seeded(98765));
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_different_heights() {
        let mut a = HeightMap::new(33);
        let mut b = HeightMap::new(33);
        DiamondSquare::default().run(&mut a, &mut RngDisplacement::seeded(11111));
        DiamondSquare::default().run(&mut b, &mut RngDisplacement::seeded(22222));
        assert_ne!(a, b);
    }

    #[test]
    fn final_heights_within_unit_range() {
        for seed in 0..20 {
            let mut map = HeightMap::new(65);
            DiamondSquare::default().run(&mut map, &mut RngDisplacement::seeded(seed));
            let (lo, hi) = map.min_max();
            assert!(lo >= -1.0 && hi <= 1.0, "seed {} range [{}, {}]", seed, lo, hi);
        }
    }

    #[test]
    fn extreme_draws_are_clamped() {
        struct Max;
        impl Displacement for Max {
            fn next_unit(&mut self) -> f32 {
                1.0
            }
        }
        let mut map = HeightMap::new(17);
        DiamondSquare::new(1.0).run(&mut map, &mut Max);
        let (lo, hi) = map.min_max();
        assert!(lo >= -1.0);
        assert_eq!(hi, 1.0);
    }

    #[test]
    fn non_power_of_two_does_not_panic() {
        for side in [4usize, 6, 7, 10, 13] {
            let mut map = HeightMap::new(side);
            DiamondSquare::default().run(&mut map, &mut RngDisplacement::seeded(7));
            assert!(map.as_slice().iter().all(|z| z.is_finite()));
        }
    }

    #[test]
    fn rng_samples_stay_in_unit_interval() {
        let mut source = RngDisplacement::seeded(42);
        for _ in 0..1000 {
            let v = source.next_unit();
            assert!((-1.0..=1.0).contains(&v));
        }
    }
}
