//! Time-based easing functions for scroll animations.
//!
//! Every easing follows the `(t, b, c, d) -> position` convention: `t` is
//! the elapsed time, `b` the start position, `c` the signed distance and `d`
//! the total duration.  A well-behaved easing returns `b` at `t == 0` and
//! `b + c` at `t == d`; this is not enforced, the animator snaps to the exact
//! end position on completion anyway.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::rc::Rc;

/// Signature of a custom easing function.
pub type EasingFn = dyn Fn(f64, f64, f64, f64) -> f64;

/// A pluggable easing function.
///
/// The built-in presets can be named in a config file (see
/// [`parse_easing`]); [`Easing::Custom`] wraps an arbitrary closure.
#[derive(Clone, Default)]
pub enum Easing {
    /// Quadratic ease-in-out: accelerates as `t²` for the first half and
    /// decelerates symmetrically for the second.
    #[default]
    EaseInOutQuad,
    /// Constant velocity.
    Linear,
    /// Cubic ease-out: fast start, slow landing.
    EaseOutCubic,
    /// CSS-like `cubic-bezier(x1, y1, x2, y2)` with endpoints `(0,0)` and
    /// `(1,1)`.
    CubicBezier(f64, f64, f64, f64),
    /// Caller-supplied `(t, b, c, d) -> position`.
    Custom(Rc<EasingFn>),
}

impl Easing {
    /// CSS `ease` == `cubic-bezier(0.25, 0.1, 0.25, 1.0)`.
    pub const EASE: Easing = Easing::CubicBezier(0.25, 0.10, 0.25, 1.00);

    /// Wrap a closure as a custom easing.
    pub fn custom(f: impl Fn(f64, f64, f64, f64) -> f64 + 'static) -> Self {
        Easing::Custom(Rc::new(f))
    }

    /// Position at elapsed time `t` of a move from `b` by `c` over `d` ms.
    ///
    /// With `d == 0` the polynomial presets divide by zero and yield NaN;
    /// callers must not sample a finished animation.
    pub fn apply(&self, t: f64, b: f64, c: f64, d: f64) -> f64 {
        match self {
            Easing::EaseInOutQuad => ease_in_out_quad(t, b, c, d),
            Easing::Linear => c * t / d + b,
            Easing::EaseOutCubic => {
                let t = t / d - 1.0;
                c * (t * t * t + 1.0) + b
            }
            Easing::CubicBezier(x1, y1, x2, y2) => {
                b + c * bezier_progress(t / d, *x1, *y1, *x2, *y2)
            }
            Easing::Custom(f) => f(t, b, c, d),
        }
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Custom(_) => write!(f, "Custom(..)"),
            other => write!(f, "{}", other),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::EaseInOutQuad => write!(f, "ease-in-out-quad"),
            Easing::Linear => write!(f, "linear"),
            Easing::EaseOutCubic => write!(f, "ease-out-cubic"),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "cubic-bezier({}, {}, {}, {})", x1, y1, x2, y2)
            }
            Easing::Custom(_) => write!(f, "custom"),
        }
    }
}

/// Quadratic ease-in-out in `(t, b, c, d)` form.
pub fn ease_in_out_quad(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t + b;
    }
    let t = t - 1.0;
    -c / 2.0 * (t * (t - 2.0) - 1.0) + b
}

/// Eased progress in `[0,1]` of a CSS-like cubic Bézier at normalized time `u`.
///
/// Control points are (0,0), (x1,y1), (x2,y2), (1,1).  `u` is clamped to
/// `[0,1]`, so overshooting the duration lands exactly on `1.0`.
pub fn bezier_progress(u: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    // Polynomial coefficients for x(s) and y(s) with fixed endpoints:
    // B(s) = ((a*s + b)*s + c)*s
    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    #[inline]
    fn sample_curve(a: f64, b: f64, c: f64, s: f64) -> f64 {
        ((a * s + b) * s + c) * s
    }

    // Solve x(s) = u for s in [0,1]
    fn solve_s_for_x(u: f64, ax: f64, bx: f64, cx: f64) -> f64 {
        // Newton-Raphson
        let mut s = u;
        for _ in 0..8 {
            let x = sample_curve(ax, bx, cx, s) - u;
            if x.abs() < 1e-7 {
                return s;
            }
            let dx = (3.0 * ax * s + 2.0 * bx) * s + cx;
            if dx.abs() < 1e-7 {
                break;
            }
            s -= x / dx;
            if !(0.0..=1.0).contains(&s) {
                break;
            }
        }

        // Bisection fallback
        let mut lo = 0.0;
        let mut hi = 1.0;
        s = u;
        for _ in 0..32 {
            let x = sample_curve(ax, bx, cx, s);
            if (x - u).abs() < 1e-9 {
                return s;
            }
            if x < u {
                lo = s;
            } else {
                hi = s;
            }
            s = 0.5 * (lo + hi);
        }
        s
    }

    let u = u.clamp(0.0, 1.0);
    if u == 0.0 || u == 1.0 {
        return u;
    }
    let s = solve_s_for_x(u, ax, bx, cx);
    sample_curve(ay, by, cy, s)
}

/// Parse an easing name (case-insensitive; accepts `"ease-in-out-quad"`,
/// `"ease_out_cubic"`, `"EaseInOutQuad"`, `"cubic-bezier(0.4, 0, 0.2, 1)"`,
/// etc.).
pub fn parse_easing(s: &str) -> Option<Easing> {
    let normalized: String = s
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '_' { '-' } else { c })
        .flat_map(|c| c.to_lowercase())
        .collect();

    if let Some(args) = normalized
        .strip_prefix("cubic-bezier(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let points: Vec<f64> = args
            .split(',')
            .map(str::parse)
            .collect::<Result<_, _>>()
            .ok()?;
        return match points.as_slice() {
            // x control points must stay inside [0,1] for x(s) to be monotonic
            [x1, y1, x2, y2] if (0.0..=1.0).contains(x1) && (0.0..=1.0).contains(x2) => {
                Some(Easing::CubicBezier(*x1, *y1, *x2, *y2))
            }
            _ => None,
        };
    }

    match normalized.as_str() {
        "ease-in-out-quad" | "easeinoutquad" => Some(Easing::EaseInOutQuad),
        "linear" => Some(Easing::Linear),
        "ease-out-cubic" | "easeoutcubic" => Some(Easing::EaseOutCubic),
        "ease" => Some(Easing::EASE),
        "ease-in" | "easein" => Some(Easing::CubicBezier(0.42, 0.0, 1.0, 1.0)),
        "ease-out" | "easeout" => Some(Easing::CubicBezier(0.0, 0.0, 0.58, 1.0)),
        "ease-in-out" | "easeinout" => Some(Easing::CubicBezier(0.42, 0.0, 0.58, 1.0)),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for Easing {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_easing(&s).ok_or_else(|| DeError::custom(format!("invalid easing: {:?}", s)))
    }
}

impl Serialize for Easing {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn presets() -> Vec<Easing> {
        vec![
            Easing::EaseInOutQuad,
            Easing::Linear,
            Easing::EaseOutCubic,
            Easing::EASE,
            Easing::CubicBezier(0.42, 0.0, 0.58, 1.0),
        ]
    }

    #[test]
    fn presets_hit_both_endpoints() {
        for e in presets() {
            assert!(close(e.apply(0.0, 200.0, 150.0, 400.0), 200.0), "{} at t=0", e);
            assert!(close(e.apply(400.0, 200.0, 150.0, 400.0), 350.0), "{} at t=d", e);
        }
    }

    #[test]
    fn presets_handle_negative_distance() {
        for e in presets() {
            assert!(close(e.apply(0.0, 500.0, -300.0, 1000.0), 500.0), "{}", e);
            assert!(close(e.apply(1000.0, 500.0, -300.0, 1000.0), 200.0), "{}", e);
        }
    }

    #[test]
    fn quad_is_symmetric_around_midpoint() {
        let mid = ease_in_out_quad(500.0, 0.0, 100.0, 1000.0);
        assert!(close(mid, 50.0));
        let quarter = ease_in_out_quad(250.0, 0.0, 100.0, 1000.0);
        let three_quarters = ease_in_out_quad(750.0, 0.0, 100.0, 1000.0);
        assert!(close(quarter, 12.5));
        assert!(close(three_quarters, 87.5));
    }

    #[test]
    fn quad_slope_is_continuous_at_midpoint() {
        let h = 1e-3;
        let left = (ease_in_out_quad(500.0, 0.0, 100.0, 1000.0)
            - ease_in_out_quad(500.0 - h, 0.0, 100.0, 1000.0))
            / h;
        let right = (ease_in_out_quad(500.0 + h, 0.0, 100.0, 1000.0)
            - ease_in_out_quad(500.0, 0.0, 100.0, 1000.0))
            / h;
        assert!((left - right).abs() < 1e-3, "left {} right {}", left, right);
    }

    #[test]
    fn presets_are_monotonic() {
        for e in presets() {
            let mut prev = f64::MIN;
            for i in 0..=20 {
                let v = e.apply(i as f64 * 50.0, 0.0, 100.0, 1000.0);
                assert!(v >= prev - 1e-9, "{} not monotonic at step {}", e, i);
                prev = v;
            }
        }
    }

    #[test]
    fn bezier_clamps_past_duration() {
        assert!(close(bezier_progress(1.3, 0.25, 0.1, 0.25, 1.0), 1.0));
        assert!(close(bezier_progress(-0.2, 0.25, 0.1, 0.25, 1.0), 0.0));
    }

    #[test]
    fn custom_easing_is_called_with_tbcd() {
        let e = Easing::custom(|t, b, c, d| b + c * (t / d).sqrt());
        assert!(close(e.apply(250.0, 10.0, 100.0, 1000.0), 60.0));
    }

    #[test]
    fn parse_named_presets() {
        assert!(matches!(parse_easing("ease-in-out-quad"), Some(Easing::EaseInOutQuad)));
        assert!(matches!(parse_easing("EaseInOutQuad"), Some(Easing::EaseInOutQuad)));
        assert!(matches!(parse_easing(" Linear "), Some(Easing::Linear)));
        assert!(matches!(parse_easing("ease_out_cubic"), Some(Easing::EaseOutCubic)));
        assert!(matches!(parse_easing("ease"), Some(Easing::CubicBezier(..))));
        assert!(parse_easing("bounce").is_none());
    }

    #[test]
    fn parse_cubic_bezier() {
        match parse_easing("cubic-bezier(0.4, 0, 0.2, 1)") {
            Some(Easing::CubicBezier(x1, y1, x2, y2)) => {
                assert_eq!((x1, y1, x2, y2), (0.4, 0.0, 0.2, 1.0));
            }
            other => panic!("unexpected {:?}", other),
        }
        // y may overshoot, x may not
        assert!(parse_easing("cubic-bezier(0.3, -0.5, 0.7, 1.5)").is_some());
        assert!(parse_easing("cubic-bezier(1.5, 0, 0.2, 1)").is_none());
        assert!(parse_easing("cubic-bezier(0.4, 0, 0.2)").is_none());
    }

    #[test]
    fn serde_uses_display_names() {
        let e: Easing = serde_json::from_str(r#""ease-out-cubic""#).unwrap();
        assert!(matches!(e, Easing::EaseOutCubic));
        assert_eq!(serde_json::to_string(&Easing::Linear).unwrap(), r#""linear""#);
        assert!(serde_json::from_str::<Easing>(r#""wobble""#).is_err());
    }
}
