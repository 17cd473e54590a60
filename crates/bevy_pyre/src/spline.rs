use bevy::color::Srgba;

/// Interpolation function used by a [`LinearSpline`]: `(fraction, from, to) -> value`.
pub type LerpFn<V> = fn(f32, &V, &V) -> V;

/// A piecewise-linear lookup table over a scalar domain.
///
/// Control points are stored in insertion order and are expected to be added with
/// non-decreasing `t`; nothing is re-sorted. Values are blended by the injected
/// [`LerpFn`], so the same table type drives scalars and colours alike.
///
/// Outside the covered range the spline extrapolates flat: any `t` at or before the
/// first point yields the first value, any `t` at or past the last point yields the
/// last value.
///
/// ```
/// use bevy_pyre::spline::LinearSpline;
///
/// let mut alpha = LinearSpline::scalar();
/// alpha.add_point(0.0, 0.0);
/// alpha.add_point(0.1, 1.0);
/// alpha.add_point(1.0, 0.0);
///
/// assert_eq!(alpha.get(0.05), 0.5);
/// assert_eq!(alpha.get(2.0), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct LinearSpline<V> {
    points: Vec<(f32, V)>,
    lerp: LerpFn<V>,
}

impl<V: Clone> LinearSpline<V> {
    /// Creates an empty spline blending values with `lerp`.
    pub fn new(lerp: LerpFn<V>) -> Self {
        Self {
            points: Vec::new(),
            lerp,
        }
    }

    /// Creates a spline from an ordered list of `(t, value)` control points.
    pub fn from_points(lerp: LerpFn<V>, points: impl IntoIterator<Item = (f32, V)>) -> Self {
        Self {
            points: points.into_iter().collect(),
            lerp,
        }
    }

    /// Appends a control point.
    pub fn add_point(&mut self, t: f32, value: V) {
        self.points.push((t, value));
    }

    /// The control points, in insertion order.
    pub fn points(&self) -> &[(f32, V)] {
        &self.points
    }

    /// Number of control points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no control point has been added yet.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Evaluates the spline at `t`.
    ///
    /// # Panics
    ///
    /// Panics if the spline has no control points.
    pub fn get(&self, t: f32) -> V {
        let Some((first_t, first_value)) = self.points.first() else {
            panic!("LinearSpline::get called on a spline with no control points");
        };

        if t <= *first_t {
            return first_value.clone();
        }

        let last = self.points.len() - 1;
        let mut p1 = 0;
        while p1 < last && self.points[p1 + 1].0 <= t {
            p1 += 1;
        }
        let p2 = (p1 + 1).min(last);

        let (t1, v1) = &self.points[p1];
        if p1 == p2 {
            return v1.clone();
        }

        let (t2, v2) = &self.points[p2];
        (self.lerp)((t - t1) / (t2 - t1), v1, v2)
    }
}

impl LinearSpline<f32> {
    /// Creates an empty spline over plain `f32` values.
    pub fn scalar() -> Self {
        Self::new(lerp_scalar)
    }
}

impl LinearSpline<Srgba> {
    /// Creates an empty spline over colours, blended channel by channel.
    pub fn colour() -> Self {
        Self::new(lerp_colour)
    }
}

/// Linear blend between two scalars.
pub fn lerp_scalar(t: f32, a: &f32, b: &f32) -> f32 {
    a + t * (b - a)
}

/// Linear blend between two colours, per channel in the colour's stored (sRGB) space.
pub fn lerp_colour(t: f32, a: &Srgba, b: &Srgba) -> Srgba {
    Srgba::new(
        lerp_scalar(t, &a.red, &b.red),
        lerp_scalar(t, &a.green, &b.green),
        lerp_scalar(t, &a.blue, &b.blue),
        lerp_scalar(t, &a.alpha, &b.alpha),
    )
}
