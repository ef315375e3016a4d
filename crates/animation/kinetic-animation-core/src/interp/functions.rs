//! Interpolation helpers:
//! - lerp_f32 / lerp_vec2 (component-wise)
//! - interpolate (per-category blend of two raw values)
//! - finalize (exact value to hold once progress reaches 1)

use kinetic_api_core::shape::{classify, record_leaf, Category};
use kinetic_api_core::{Rgba, Value};

use crate::error::TweenError;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec2(a: [f32; 2], b: [f32; 2], t: f32) -> [f32; 2] {
    [lerp_f32(a[0], b[0], t), lerp_f32(a[1], b[1], t)]
}

fn unsupported(start: &Value, end: &Value) -> TweenError {
    TweenError::UnsupportedValueType {
        detail: format!("cannot blend {:?} with {:?}", start.kind(), end.kind()),
    }
}

fn parse_color(s: &str) -> Result<Rgba, TweenError> {
    Rgba::parse(s).map_err(|e| TweenError::UnsupportedValueType {
        detail: e.to_string(),
    })
}

/// Blend `start` → `end` at eased progress `t` under `category`.
pub fn interpolate(
    category: Category,
    start: &Value,
    end: &Value,
    t: f32,
) -> Result<Value, TweenError> {
    match (category, start, end) {
        (Category::Scalar, Value::Float(a), Value::Float(b)) => Ok(Value::Float(lerp_f32(*a, *b, t))),
        (Category::Vector2, Value::Vec2(a), Value::Vec2(b)) => Ok(Value::Vec2(lerp_vec2(*a, *b, t))),
        (Category::Color, Value::Text(a), Value::Text(b)) => {
            let blended = Rgba::lerp(parse_color(a)?, parse_color(b)?, t);
            Ok(Value::Text(blended.to_string()))
        }
        (Category::NumericList | Category::PointList, Value::List(a), Value::List(b)) => {
            if a.len() != b.len() {
                return Err(TweenError::ShapeMismatch {
                    detail: format!("list lengths differ ({} vs {})", a.len(), b.len()),
                });
            }
            let item = if category == Category::PointList {
                Category::Vector2
            } else {
                Category::Scalar
            };
            a.iter()
                .zip(b.iter())
                .map(|(x, y)| interpolate(item, x, y, t))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List)
        }
        (Category::Record, Value::Record(a), Value::Record(b)) => {
            let mut out = a.clone();
            for (key, slot) in out.iter_mut() {
                let Some(target) = b.get(key) else {
                    continue;
                };
                match (record_leaf(slot), record_leaf(target)) {
                    (Some(la), Some(lb)) if la == lb => {
                        *slot = interpolate(la, slot, target, t)?;
                    }
                    _ => {}
                }
            }
            Ok(Value::Record(out))
        }
        _ => Err(unsupported(start, end)),
    }
}

/// The value a binding must hold once progress reaches 1. Records merge so
/// that every key of `end` is set while keys only present in `start` remain.
pub fn finalize(category: Category, start: &Value, end: &Value) -> Value {
    match (category, start, end) {
        (Category::Record, Value::Record(a), Value::Record(b)) => {
            let mut merged = a.clone();
            for (key, value) in b.iter() {
                merged.insert(key.clone(), value.clone());
            }
            Value::Record(merged)
        }
        _ => end.clone(),
    }
}

/// Classify and validate a start/end pair, returning the shared category.
pub fn category_for(start: &Value, end: &Value) -> Result<Category, TweenError> {
    use kinetic_api_core::shape::{check_compatible, Incompatibility};

    let (Some(sc), Some(ec)) = (classify(start), classify(end)) else {
        return Err(unsupported(start, end));
    };
    check_compatible(start, sc, end, ec).map_err(|inc| match inc {
        Incompatibility::Category { start, end } => TweenError::UnsupportedValueType {
            detail: format!("start is {start:?}, end is {end:?}"),
        },
        Incompatibility::Length { start, end } => TweenError::ShapeMismatch {
            detail: format!("list lengths differ ({start} vs {end})"),
        },
    })
}
