use ordered_float::OrderedFloat;
use rand::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub const MIN_POINTS: usize = 100;
pub const MAX_POINTS: usize = 10000;

// below this count the rayon fan-out costs more than the draws themselves
const PARALLEL_THRESHOLD: usize = 4096;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub max: f32,
    pub selected: bool,
}

impl Point {
    pub fn sample(rng: &mut impl Rng) -> Point {
        let (x, y) = (rng.gen::<f32>(), rng.gen::<f32>());
        Point {
            x,
            y,
            max: x.max(y),
            selected: false,
        }
    }
}

/// Clamped inputs for a generation. `target_value` is the R^2 whose root is
/// being approximated, `num_points` the batch size. Construction and the
/// adjust methods clamp, so a `Parameters` can always be fed to `generate`
/// as-is.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    target_value: f32,
    num_points: usize,
}

impl Parameters {
    pub fn new(target_value: f32, num_points: usize) -> Parameters {
        Parameters {
            target_value: target_value.clamp(0.0, 1.0),
            num_points: num_points.clamp(MIN_POINTS, MAX_POINTS),
        }
    }

    pub fn target_value(&self) -> f32 {
        self.target_value
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    pub fn adjust_target(&mut self, delta: f32) {
        self.target_value = (self.target_value + delta).clamp(0.0, 1.0);
    }

    pub fn adjust_points(&mut self, delta: isize) {
        let n = self.num_points as isize + delta;
        self.num_points = (n.max(0) as usize).clamp(MIN_POINTS, MAX_POINTS);
    }

    pub fn generate(&self) -> Generation {
        generate(self.target_value, self.num_points)
    }
}

impl Default for Parameters {
    fn default() -> Parameters {
        Parameters::new(0.5, 1000)
    }
}

#[derive(Clone, Debug)]
pub struct Generation {
    /// points ordered ascending by `max`, with `selected` set on the leading
    /// fraction
    pub points: Vec<Point>,
    pub approximated_sqrt: f32,
    pub actual_sqrt: f32,
}

impl Generation {
    pub fn selected_count(&self) -> usize {
        self.points.iter().filter(|p| p.selected).count()
    }
}

/// Draws `num_points` uniform (x, y) pairs, orders them by max(x, y), and
/// marks the leading `target_value` fraction as selected. The max at the
/// cutoff rank approximates sqrt(target_value).
///
/// Inputs are assumed pre-clamped (see `Parameters`); this routine performs
/// no validation of its own. The cutoff rank is inclusive, so the selected
/// count is floor(num_points * target_value) + 1 — that off-by-one is part
/// of the observable contract. A cutoff past the end of the batch (e.g.
/// target_value = 1.0, or an empty batch) yields an approximation of 0.0
/// rather than an error.
pub fn generate(target_value: f32, num_points: usize) -> Generation {
    let mut points: Vec<Point> = if num_points >= PARALLEL_THRESHOLD {
        (0..num_points)
            .into_par_iter()
            .map_init(thread_rng, |rng, _| Point::sample(rng))
            .collect()
    } else {
        let mut rng = thread_rng();
        (0..num_points).map(|_| Point::sample(&mut rng)).collect()
    };

    points.sort_by_key(|p| OrderedFloat(p.max));

    let cutoff_index = (num_points as f32 * target_value).floor() as usize;
    for (rank, point) in points.iter_mut().enumerate() {
        point.selected = rank <= cutoff_index;
    }

    let approximated_sqrt = points.get(cutoff_index).map_or(0.0, |p| p.max);

    Generation {
        points,
        approximated_sqrt,
        actual_sqrt: target_value.sqrt(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_well_formed(gen: &Generation, num_points: usize) {
        assert_eq!(gen.points.len(), num_points);
        for p in &gen.points {
            assert!((0.0..=1.0).contains(&p.x));
            assert!((0.0..=1.0).contains(&p.y));
            assert_eq!(p.max, p.x.max(p.y));
        }
        for pair in gen.points.windows(2) {
            assert!(pair[0].max <= pair[1].max);
        }
    }

    #[test]
    fn test_batch_shape() {
        for &(target, n) in &[(0.0, 100), (0.25, 500), (0.5, 100), (0.9, 2000), (1.0, 1000)] {
            let gen = generate(target, n);
            assert_well_formed(&gen, n);
        }
    }

    #[test]
    fn test_selected_count() {
        for &(target, n) in &[(0.0, 1000), (0.3, 100), (0.5, 100), (0.77, 5000), (1.0, 1000)] {
            let gen = generate(target, n);
            let expected = ((n as f32 * target).floor() as usize + 1).min(n);
            assert_eq!(gen.selected_count(), expected, "target {} n {}", target, n);
            // selection is a prefix of the ordering
            let boundary = gen.points.iter().position(|p| !p.selected).unwrap_or(n);
            assert_eq!(boundary, expected);
        }
    }

    #[test]
    fn test_approximation_is_cutoff_max() {
        let gen = generate(0.5, 100);
        assert_eq!(gen.selected_count(), 51);
        assert_eq!(gen.approximated_sqrt, gen.points[50].max);
        assert!((gen.actual_sqrt - 0.7071).abs() < 0.0001);
    }

    #[test]
    fn test_target_zero() {
        let gen = generate(0.0, 1000);
        assert_eq!(gen.selected_count(), 1);
        assert_eq!(gen.approximated_sqrt, gen.points[0].max);
        assert_eq!(gen.actual_sqrt, 0.0);
    }

    #[test]
    fn test_target_one() {
        // cutoff index lands one past the end, so every point is selected
        // and the approximation falls back to 0.0
        let gen = generate(1.0, 1000);
        assert_eq!(gen.selected_count(), 1000);
        assert_eq!(gen.approximated_sqrt, 0.0);
        assert_eq!(gen.actual_sqrt, 1.0);
    }

    #[test]
    fn test_convergence() {
        // order statistics of max(u1, u2) put the target_value quantile at
        // sqrt(target_value); with 10000 points a single run should land
        // well within 0.05 of 0.5
        let gen = generate(0.25, 10000);
        assert!(
            (gen.approximated_sqrt - 0.5).abs() < 0.05,
            "approximated {} too far from 0.5",
            gen.approximated_sqrt
        );
    }

    #[test]
    fn test_fresh_batches() {
        let a = generate(0.5, 1000);
        let b = generate(0.5, 1000);
        // same distribution, different draws
        assert_ne!(a.points, b.points);
    }

    #[test]
    fn test_serde_roundtrip() {
        let params = Parameters::new(0.25, 2500);
        let encoded = serde_json::to_string(&params).unwrap();
        let decoded: Parameters = serde_json::from_str(&encoded).unwrap();
        assert_eq!(params, decoded);

        let gen = generate(0.25, 100);
        let encoded = serde_json::to_string(&gen.points).unwrap();
        let decoded: Vec<Point> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(gen.points, decoded);
    }

    #[test]
    fn test_parameter_clamping() {
        let p = Parameters::new(1.5, 50);
        assert_eq!(p.target_value(), 1.0);
        assert_eq!(p.num_points(), MIN_POINTS);

        let p = Parameters::new(-0.2, 1_000_000);
        assert_eq!(p.target_value(), 0.0);
        assert_eq!(p.num_points(), MAX_POINTS);

        let mut p = Parameters::default();
        p.adjust_target(10.0);
        assert_eq!(p.target_value(), 1.0);
        p.adjust_points(-100_000);
        assert_eq!(p.num_points(), MIN_POINTS);
    }
}
