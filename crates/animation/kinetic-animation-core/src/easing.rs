//! Easing functions: progress in [0, 1] → eased progress.
//!
//! Back and Elastic overshoot outside [0, 1]; every other builtin maps 0 → 0
//! and 1 → 1. Callers may plug in their own curve via [`Easing::Custom`] or
//! register named curves in an [`EasingRegistry`].

use std::collections::BTreeMap;
use std::f32::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

/// Signature of a caller-supplied easing curve.
pub type EaseFn = fn(f32) -> f32;

pub const DEFAULT_BACK_OVERSHOOT: f32 = 1.70158;
pub const DEFAULT_ELASTIC_AMPLITUDE: f32 = 1.0;
pub const DEFAULT_ELASTIC_PERIOD: f32 = 0.3;
pub const DEFAULT_ELASTIC_IN_OUT_PERIOD: f32 = 0.45;

const BOUNCE_COEFF: f32 = 7.5625;
const BOUNCE_DIV: f32 = 2.75;
const TAU: f32 = 2.0 * PI;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InSine,
    OutSine,
    InOutSine,
    InExpo,
    OutExpo,
    InOutExpo,
    InCirc,
    OutCirc,
    InOutCirc,
    InBack { overshoot: f32 },
    OutBack { overshoot: f32 },
    InOutBack { overshoot: f32 },
    InElastic { amplitude: f32, period: f32 },
    OutElastic { amplitude: f32, period: f32 },
    InOutElastic { amplitude: f32, period: f32 },
    InBounce,
    OutBounce,
    InOutBounce,
    /// CSS-style timing curve with control points (x1, y1, x2, y2).
    CubicBezier(f32, f32, f32, f32),
    #[serde(skip)]
    Custom(EaseFn),
}

/// Builtins compare by variant and parameters. `Custom` curves compare by
/// function address, which is only a hint: the same function may have several
/// addresses across codegen units, and distinct functions may share one.
impl PartialEq for Easing {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Easing::Custom(a), Easing::Custom(b)) => *a as usize == *b as usize,
            _ => {
                std::mem::discriminant(self) == std::mem::discriminant(other)
                    && self.params() == other.params()
            }
        }
    }
}

impl Easing {
    /// Numeric parameters of the curve, zero-padded.
    fn params(&self) -> [f32; 4] {
        match *self {
            Easing::InBack { overshoot }
            | Easing::OutBack { overshoot }
            | Easing::InOutBack { overshoot } => [overshoot, 0.0, 0.0, 0.0],
            Easing::InElastic { amplitude, period }
            | Easing::OutElastic { amplitude, period }
            | Easing::InOutElastic { amplitude, period } => [amplitude, period, 0.0, 0.0],
            Easing::CubicBezier(x1, y1, x2, y2) => [x1, y1, x2, y2],
            _ => [0.0; 4],
        }
    }

    pub const fn in_back() -> Self {
        Easing::InBack {
            overshoot: DEFAULT_BACK_OVERSHOOT,
        }
    }

    pub const fn out_back() -> Self {
        Easing::OutBack {
            overshoot: DEFAULT_BACK_OVERSHOOT,
        }
    }

    pub const fn in_out_back() -> Self {
        Easing::InOutBack {
            overshoot: DEFAULT_BACK_OVERSHOOT,
        }
    }

    pub const fn in_elastic() -> Self {
        Easing::InElastic {
            amplitude: DEFAULT_ELASTIC_AMPLITUDE,
            period: DEFAULT_ELASTIC_PERIOD,
        }
    }

    pub const fn out_elastic() -> Self {
        Easing::OutElastic {
            amplitude: DEFAULT_ELASTIC_AMPLITUDE,
            period: DEFAULT_ELASTIC_PERIOD,
        }
    }

    pub const fn in_out_elastic() -> Self {
        Easing::InOutElastic {
            amplitude: DEFAULT_ELASTIC_AMPLITUDE,
            period: DEFAULT_ELASTIC_IN_OUT_PERIOD,
        }
    }

    /// Apply the easing function to a progress value (0.0 to 1.0).
    pub fn apply(&self, t: f32) -> f32 {
        match *self {
            Easing::Linear => t,
            Easing::InQuad => t * t,
            Easing::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::InCubic => t * t * t,
            Easing::OutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::InQuart => t.powi(4),
            Easing::OutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Easing::InQuint => t.powi(5),
            Easing::OutQuint => 1.0 - (1.0 - t).powi(5),
            Easing::InOutQuint => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
                }
            }
            Easing::InSine => 1.0 - (t * FRAC_PI_2).cos(),
            Easing::OutSine => (t * FRAC_PI_2).sin(),
            Easing::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Easing::InExpo => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    2f32.powf(10.0 * (t - 1.0))
                }
            }
            Easing::OutExpo => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            Easing::InOutExpo => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    2f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    1.0 - 2f32.powf(-20.0 * t + 10.0) / 2.0
                }
            }
            Easing::InCirc => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            Easing::OutCirc => (1.0 - (t - 1.0) * (t - 1.0)).max(0.0).sqrt(),
            Easing::InOutCirc => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).max(0.0).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).max(0.0).sqrt() + 1.0) / 2.0
                }
            }
            Easing::InBack { overshoot: s } => t * t * ((s + 1.0) * t - s),
            Easing::OutBack { overshoot: s } => {
                let u = t - 1.0;
                u * u * ((s + 1.0) * u + s) + 1.0
            }
            Easing::InOutBack { overshoot } => {
                let s = overshoot * 1.525;
                let u = t * 2.0;
                if u < 1.0 {
                    0.5 * (u * u * ((s + 1.0) * u - s))
                } else {
                    let u = u - 2.0;
                    0.5 * (u * u * ((s + 1.0) * u + s) + 2.0)
                }
            }
            Easing::InElastic { amplitude, period } => elastic_in(t, amplitude, period),
            Easing::OutElastic { amplitude, period } => elastic_out(t, amplitude, period),
            Easing::InOutElastic { amplitude, period } => elastic_in_out(t, amplitude, period),
            Easing::InBounce => 1.0 - bounce_out(1.0 - t),
            Easing::OutBounce => bounce_out(t),
            Easing::InOutBounce => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) * 0.5
                } else {
                    bounce_out(2.0 * t - 1.0) * 0.5 + 0.5
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, x1, y1, x2, y2),
            Easing::Custom(f) => f(t),
        }
    }

    /// Look up a builtin curve by its conventional name (`"easeInOutCubic"`).
    pub fn from_name(name: &str) -> Option<Self> {
        let easing = match name {
            "linear" => Easing::Linear,
            "easeInQuad" => Easing::InQuad,
            "easeOutQuad" => Easing::OutQuad,
            "easeInOutQuad" => Easing::InOutQuad,
            "easeInCubic" => Easing::InCubic,
            "easeOutCubic" => Easing::OutCubic,
            "easeInOutCubic" => Easing::InOutCubic,
            "easeInQuart" => Easing::InQuart,
            "easeOutQuart" => Easing::OutQuart,
            "easeInOutQuart" => Easing::InOutQuart,
            "easeInQuint" => Easing::InQuint,
            "easeOutQuint" => Easing::OutQuint,
            "easeInOutQuint" => Easing::InOutQuint,
            "easeInSine" => Easing::InSine,
            "easeOutSine" => Easing::OutSine,
            "easeInOutSine" => Easing::InOutSine,
            "easeInExpo" => Easing::InExpo,
            "easeOutExpo" => Easing::OutExpo,
            "easeInOutExpo" => Easing::InOutExpo,
            "easeInCirc" => Easing::InCirc,
            "easeOutCirc" => Easing::OutCirc,
            "easeInOutCirc" => Easing::InOutCirc,
            "easeInBack" => Easing::in_back(),
            "easeOutBack" => Easing::out_back(),
            "easeInOutBack" => Easing::in_out_back(),
            "easeInElastic" => Easing::in_elastic(),
            "easeOutElastic" => Easing::out_elastic(),
            "easeInOutElastic" => Easing::in_out_elastic(),
            "easeInBounce" => Easing::InBounce,
            "easeOutBounce" => Easing::OutBounce,
            "easeInOutBounce" => Easing::InOutBounce,
            _ => return None,
        };
        Some(easing)
    }
}

pub const BUILTIN_NAMES: [&str; 31] = [
    "linear",
    "easeInQuad",
    "easeOutQuad",
    "easeInOutQuad",
    "easeInCubic",
    "easeOutCubic",
    "easeInOutCubic",
    "easeInQuart",
    "easeOutQuart",
    "easeInOutQuart",
    "easeInQuint",
    "easeOutQuint",
    "easeInOutQuint",
    "easeInSine",
    "easeOutSine",
    "easeInOutSine",
    "easeInExpo",
    "easeOutExpo",
    "easeInOutExpo",
    "easeInCirc",
    "easeOutCirc",
    "easeInOutCirc",
    "easeInBack",
    "easeOutBack",
    "easeInOutBack",
    "easeInElastic",
    "easeOutElastic",
    "easeInOutElastic",
    "easeInBounce",
    "easeOutBounce",
    "easeInOutBounce",
];

/// Smallest elastic period; zero, negative or NaN periods are raised to it.
pub const MIN_ELASTIC_PERIOD: f32 = 1e-3;

/// Amplitude, period and phase shift shared by the elastic family.
/// Amplitudes below 1 are raised to 1.
#[inline]
fn elastic_params(amplitude: f32, period: f32) -> (f32, f32, f32) {
    let a = amplitude.max(1.0);
    let p = period.max(MIN_ELASTIC_PERIOD);
    let s = p / TAU * (1.0 / a).asin();
    (a, p, s)
}

fn elastic_in(t: f32, amplitude: f32, period: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let (a, period, s) = elastic_params(amplitude, period);
    let u = t - 1.0;
    -(a * 2f32.powf(10.0 * u) * ((u - s) * TAU / period).sin())
}

fn elastic_out(t: f32, amplitude: f32, period: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let (a, period, s) = elastic_params(amplitude, period);
    a * 2f32.powf(-10.0 * t) * ((t - s) * TAU / period).sin() + 1.0
}

fn elastic_in_out(t: f32, amplitude: f32, period: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let (a, period, s) = elastic_params(amplitude, period);
    let u = t * 2.0 - 1.0;
    if u < 0.0 {
        -0.5 * (a * 2f32.powf(10.0 * u) * ((u - s) * TAU / period).sin())
    } else {
        a * 2f32.powf(-10.0 * u) * ((u - s) * TAU / period).sin() * 0.5 + 1.0
    }
}

fn bounce_out(t: f32) -> f32 {
    if t < 1.0 / BOUNCE_DIV {
        BOUNCE_COEFF * t * t
    } else if t < 2.0 / BOUNCE_DIV {
        let u = t - 1.5 / BOUNCE_DIV;
        BOUNCE_COEFF * u * u + 0.75
    } else if t < 2.5 / BOUNCE_DIV {
        let u = t - 2.25 / BOUNCE_DIV;
        BOUNCE_COEFF * u * u + 0.9375
    } else {
        let u = t - 2.625 / BOUNCE_DIV;
        BOUNCE_COEFF * u * u + 0.984375
    }
}

/// Cubic Bezier basis function
#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Given control points (x1, y1, x2, y2) and an input t in [0,1],
/// compute the eased y by inverting the x bezier via binary search.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    // Bezier(0,0,1,1) is exactly linear
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..24 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}

/// Named easing lookup, pre-populated with every builtin.
#[derive(Debug, Clone)]
pub struct EasingRegistry {
    entries: BTreeMap<String, Easing>,
}

impl Default for EasingRegistry {
    fn default() -> Self {
        let entries = BUILTIN_NAMES
            .iter()
            .filter_map(|name| Easing::from_name(name).map(|e| (name.to_string(), e)))
            .collect();
        Self { entries }
    }
}

impl EasingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a named curve.
    pub fn register(&mut self, name: impl Into<String>, easing: Easing) -> Option<Easing> {
        self.entries.insert(name.into(), easing)
    }

    pub fn get(&self, name: &str) -> Option<Easing> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
