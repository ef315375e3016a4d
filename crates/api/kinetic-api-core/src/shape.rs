//! Shape classification: which interpolation category a raw value belongs to,
//! and whether two values are structurally compatible.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::value::Value;

/// Interpolation category of a raw value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Scalar,
    Vector2,
    Color,
    PointList,
    NumericList,
    Record,
}

/// Category plus the structural detail needed to compare two values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", content = "data")]
pub enum Shape {
    Scalar,
    Vector2,
    Color,
    PointList { len: usize },
    NumericList { len: usize },
    Record { keys: Vec<String> },
}

/// Why two shapes cannot be interpolated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Incompatibility {
    /// Endpoints classify to different categories.
    Category { start: Category, end: Category },
    /// Same list category, different lengths.
    Length { start: usize, end: usize },
}

/// Classify a raw value. Total over `Value`; `None` means unclassifiable.
pub fn classify(value: &Value) -> Option<Category> {
    match value {
        Value::Float(_) => Some(Category::Scalar),
        Value::Vec2(_) => Some(Category::Vector2),
        Value::Text(s) if Rgba::is_color(s) => Some(Category::Color),
        Value::List(items) => {
            if items.iter().all(|v| matches!(v, Value::Float(_))) {
                Some(Category::NumericList)
            } else if items.iter().all(|v| matches!(v, Value::Vec2(_))) {
                Some(Category::PointList)
            } else {
                None
            }
        }
        Value::Record(_) => Some(Category::Record),
        Value::Text(_) | Value::Bool(_) => None,
    }
}

/// Leaf category of a record member, if it animates (number or color).
pub fn record_leaf(value: &Value) -> Option<Category> {
    match classify(value) {
        Some(c @ (Category::Scalar | Category::Color)) => Some(c),
        _ => None,
    }
}

impl Shape {
    pub fn of(value: &Value) -> Option<Shape> {
        let shape = match (classify(value)?, value) {
            (Category::Scalar, _) => Shape::Scalar,
            (Category::Vector2, _) => Shape::Vector2,
            (Category::Color, _) => Shape::Color,
            (Category::PointList, Value::List(items)) => Shape::PointList { len: items.len() },
            (Category::NumericList, Value::List(items)) => Shape::NumericList { len: items.len() },
            (Category::Record, Value::Record(map)) => Shape::Record {
                keys: map.keys().cloned().collect(),
            },
            _ => return None,
        };
        Some(shape)
    }

    pub fn category(&self) -> Category {
        match self {
            Shape::Scalar => Category::Scalar,
            Shape::Vector2 => Category::Vector2,
            Shape::Color => Category::Color,
            Shape::PointList { .. } => Category::PointList,
            Shape::NumericList { .. } => Category::NumericList,
            Shape::Record { .. } => Category::Record,
        }
    }
}

/// Check that `start` and `end` can be interpolated, returning their shared
/// category. Both values must already classify. Records are always
/// compatible: members missing on one side, or shared members whose leaf
/// categories differ, are simply not blended.
pub fn check_compatible(
    start: &Value,
    start_cat: Category,
    end: &Value,
    end_cat: Category,
) -> Result<Category, Incompatibility> {
    if start_cat != end_cat {
        return Err(Incompatibility::Category {
            start: start_cat,
            end: end_cat,
        });
    }
    match (start, end) {
        (Value::List(a), Value::List(b)) if a.len() != b.len() => Err(Incompatibility::Length {
            start: a.len(),
            end: b.len(),
        }),
        _ => Ok(start_cat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_covers_every_kind() {
        assert_eq!(classify(&Value::f(1.0)), Some(Category::Scalar));
        assert_eq!(classify(&Value::vec2(1.0, 2.0)), Some(Category::Vector2));
        assert_eq!(classify(&Value::text("#fff")), Some(Category::Color));
        assert_eq!(classify(&Value::text("hello")), None);
        assert_eq!(classify(&Value::Bool(true)), None);
        assert_eq!(
            classify(&Value::list([Value::f(1.0), Value::f(2.0)])),
            Some(Category::NumericList)
        );
        assert_eq!(
            classify(&Value::list([Value::vec2(0.0, 0.0)])),
            Some(Category::PointList)
        );
        assert_eq!(classify(&Value::list([])), Some(Category::NumericList));
        assert_eq!(
            classify(&Value::list([Value::f(1.0), Value::vec2(0.0, 0.0)])),
            None
        );
        assert_eq!(
            classify(&Value::record([("a", Value::Bool(false))])),
            Some(Category::Record)
        );
    }

    #[test]
    fn shape_reports_lengths_and_keys() {
        let v = Value::list([Value::vec2(0.0, 0.0), Value::vec2(1.0, 1.0)]);
        assert_eq!(Shape::of(&v), Some(Shape::PointList { len: 2 }));
        let r = Value::record([("x", Value::f(0.0)), ("fill", Value::text("#000"))]);
        assert_eq!(
            Shape::of(&r),
            Some(Shape::Record {
                keys: vec!["x".into(), "fill".into()]
            })
        );
        assert_eq!(Shape::of(&Value::Bool(true)), None);
    }

    #[test]
    fn compatibility_rules() {
        let a = Value::list([Value::f(0.0)]);
        let b = Value::list([Value::f(0.0), Value::f(1.0)]);
        assert_eq!(
            check_compatible(&a, Category::NumericList, &b, Category::NumericList),
            Err(Incompatibility::Length { start: 1, end: 2 })
        );
        assert!(matches!(
            check_compatible(&Value::f(0.0), Category::Scalar, &Value::vec2(0.0, 0.0), Category::Vector2),
            Err(Incompatibility::Category { .. })
        ));

        let ra = Value::record([("x", Value::f(0.0)), ("only_a", Value::f(1.0))]);
        let rb = Value::record([("x", Value::f(5.0)), ("only_b", Value::text("#fff"))]);
        assert_eq!(
            check_compatible(&ra, Category::Record, &rb, Category::Record),
            Ok(Category::Record)
        );

        // A shared member that changes type is not blended, so it does not
        // make the records incompatible.
        let rc = Value::record([("x", Value::text("#fff"))]);
        assert_eq!(
            check_compatible(&ra, Category::Record, &rc, Category::Record),
            Ok(Category::Record)
        );
    }
}
