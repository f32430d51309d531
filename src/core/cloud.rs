//! Point cloud generation
//!
//! - Palette: the three accent colors and their selection thresholds
//! - PointCloud: fixed positions + parallel vertex colors

use rand::Rng;

// ============================================================================
// Palette
// ============================================================================

/// Accent colors as normalized RGB
pub mod palette {
    pub const INDIGO: [f32; 3] = [0.39, 0.4, 0.95];
    pub const CYAN: [f32; 3] = [0.02, 0.71, 0.83];
    pub const GREEN: [f32; 3] = [0.06, 0.73, 0.51];

    pub const ALL: [[f32; 3]; 3] = [INDIGO, CYAN, GREEN];

    /// Rolls below this pick indigo
    pub const INDIGO_BELOW: f32 = 0.5;
    /// Rolls below this (and not indigo) pick cyan, the rest green
    pub const CYAN_BELOW: f32 = 0.8;

    /// Map a uniform roll in [0, 1) to a palette color (50/30/20 split)
    pub fn pick(roll: f32) -> [f32; 3] {
        if roll < INDIGO_BELOW {
            INDIGO
        } else if roll < CYAN_BELOW {
            CYAN
        } else {
            GREEN
        }
    }
}

// ============================================================================
// PointCloud
// ============================================================================

/// Fixed set of colored points. Built once, never mutated afterwards;
/// only the field's aggregate transform changes over time.
#[derive(Clone, Debug)]
pub struct PointCloud {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
}

impl PointCloud {
    /// Sample `count` points uniformly inside a cube of edge `extent`
    /// centred on the origin, each with a palette color.
    pub fn generate<R: Rng>(count: usize, extent: f32, rng: &mut R) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);

        for _ in 0..count {
            let mut axis = || (rng.gen::<f32>() - 0.5) * extent;
            positions.push([axis(), axis(), axis()]);
            colors.push(palette::pick(rng.gen::<f32>()));
        }

        Self { positions, colors }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// Iterate (position, color) pairs in creation order
    pub fn iter(&self) -> impl Iterator<Item = (&[f32; 3], &[f32; 3])> {
        self.positions.iter().zip(self.colors.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bounds_and_palette() {
        let mut rng = StdRng::seed_from_u64(7);
        let cloud = PointCloud::generate(1500, 15.0, &mut rng);

        assert_eq!(cloud.len(), 1500);
        for (pos, color) in cloud.iter() {
            for &c in pos {
                assert!((-7.5..=7.5).contains(&c), "coordinate {} out of range", c);
            }
            assert!(palette::ALL.contains(color), "unexpected color {:?}", color);
        }
    }

    #[test]
    fn test_equal_lengths_for_any_count() {
        let mut rng = StdRng::seed_from_u64(1);
        for count in [0, 1, 2, 17, 1500, 4096] {
            let cloud = PointCloud::generate(count, 15.0, &mut rng);
            assert_eq!(cloud.positions().len(), count);
            assert_eq!(cloud.colors().len(), count);
        }
        assert!(PointCloud::generate(0, 15.0, &mut rng).is_empty());
    }

    #[test]
    fn test_palette_thresholds() {
        assert_eq!(palette::pick(0.0), palette::INDIGO);
        assert_eq!(palette::pick(0.4999), palette::INDIGO);
        assert_eq!(palette::pick(0.5), palette::CYAN);
        assert_eq!(palette::pick(0.7999), palette::CYAN);
        assert_eq!(palette::pick(0.8), palette::GREEN);
        assert_eq!(palette::pick(0.9999), palette::GREEN);
    }

    #[test]
    fn test_color_mix_roughly_matches_weights() {
        let mut rng = StdRng::seed_from_u64(42);
        let cloud = PointCloud::generate(20_000, 15.0, &mut rng);
        let share = |target: [f32; 3]| {
            cloud.colors().iter().filter(|&&c| c == target).count() as f32 / 20_000.0
        };
        assert!((share(palette::INDIGO) - 0.5).abs() < 0.03);
        assert!((share(palette::CYAN) - 0.3).abs() < 0.03);
        assert!((share(palette::GREEN) - 0.2).abs() < 0.03);
    }

    #[test]
    fn test_same_seed_same_cloud() {
        let a = PointCloud::generate(64, 15.0, &mut StdRng::seed_from_u64(3));
        let b = PointCloud::generate(64, 15.0, &mut StdRng::seed_from_u64(3));
        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.colors(), b.colors());
    }
}
