//! Generation parameters and branch rules
//!
//! [`TreeParams`] fixes the shape (height) and seed (root value) of one build;
//! a [`BranchRule`] derives each child's value from its parent's.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::number::Number;

/// Height used when none is given
pub const DEFAULT_HEIGHT: u32 = 3;

/// Root value used when none is given
pub const DEFAULT_ROOT: i128 = 11;

/// Validated, immutable parameters for one build
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeParams {
    height: u32,
    root: Number,
}

impl TreeParams {
    /// Validate a height and root value.
    ///
    /// Fails with [`Error::InvalidArgument`] for a negative height or one that
    /// does not fit in a `u32`.
    pub fn new(height: i64, root: impl Into<Number>) -> Result<Self> {
        if height < 0 {
            return Err(Error::invalid_argument(
                "height",
                format!("must not be negative, got {}", height),
            ));
        }
        let height = u32::try_from(height)
            .map_err(|_| Error::invalid_argument("height", format!("{} is too large", height)))?;
        Ok(TreeParams {
            height,
            root: root.into(),
        })
    }

    /// Validate untyped arguments, as received from JSON or a command line.
    ///
    /// The height must be a non-negative integer (`2.5` and `-1` are
    /// rejected) and the root must be a number.
    pub fn from_json(height: &Value, root: &Value) -> Result<Self> {
        let height = match height {
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(h), _) => h,
                (None, Some(_)) => {
                    return Err(Error::invalid_argument("height", format!("{} is too large", n)))
                }
                (None, None) => {
                    return Err(Error::invalid_argument(
                        "height",
                        format!("must be an integer, got {}", n),
                    ))
                }
            },
            other => {
                return Err(Error::invalid_argument(
                    "height",
                    format!("must be an integer, got {}", other),
                ))
            }
        };
        let root = Number::from_json("root", root)?;
        TreeParams::new(height, root)
    }

    /// Parse raw text arguments.
    ///
    /// Each argument is read as JSON; text that is not valid JSON is treated
    /// as a string and therefore rejected.
    pub fn parse(height: &str, root: &str) -> Result<Self> {
        TreeParams::from_json(&parse_arg(height), &parse_arg(root))
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn root(&self) -> Number {
        self.root
    }

    /// Same root, different height
    pub fn with_height(self, height: u32) -> Self {
        TreeParams { height, ..self }
    }
}

impl Default for TreeParams {
    fn default() -> Self {
        TreeParams {
            height: DEFAULT_HEIGHT,
            root: Number::Int(DEFAULT_ROOT),
        }
    }
}

fn parse_arg(raw: &str) -> Value {
    let trimmed = raw.trim();
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_owned()))
}

/// Computes child values from a parent value.
///
/// Implementations must be pure: builders call them in different orders and
/// rely on getting the same values back.
pub trait BranchRule {
    fn left(&self, parent: Number) -> Number;
    fn right(&self, parent: Number) -> Number;
}

impl<B: BranchRule + ?Sized> BranchRule for &B {
    fn left(&self, parent: Number) -> Number {
        (**self).left(parent)
    }

    fn right(&self, parent: Number) -> Number {
        (**self).right(parent)
    }
}

/// Default rule: left is `x²`, right is `2 + x²`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Squares;

impl BranchRule for Squares {
    fn left(&self, parent: Number) -> Number {
        parent.squared()
    }

    fn right(&self, parent: Number) -> Number {
        Number::Int(2) + parent.squared()
    }
}

/// A rule built from two closures
#[derive(Debug, Clone, Copy)]
pub struct FnRule<L, R> {
    left: L,
    right: R,
}

impl<L, R> FnRule<L, R>
where
    L: Fn(Number) -> Number,
    R: Fn(Number) -> Number,
{
    pub fn new(left: L, right: R) -> Self {
        FnRule { left, right }
    }
}

impl<L, R> BranchRule for FnRule<L, R>
where
    L: Fn(Number) -> Number,
    R: Fn(Number) -> Number,
{
    fn left(&self, parent: Number) -> Number {
        (self.left)(parent)
    }

    fn right(&self, parent: Number) -> Number {
        (self.right)(parent)
    }
}

/// Named rules selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// `x²` and `2 + x²`
    #[default]
    Squares,
    /// `2x` and `2x + 1` (heap numbering when the root is 1)
    Heap,
    /// `x - 1` and `x + 1`
    Offset,
}

impl BranchRule for Preset {
    fn left(&self, parent: Number) -> Number {
        match self {
            Preset::Squares => Squares.left(parent),
            Preset::Heap => Number::Int(2) * parent,
            Preset::Offset => parent - Number::Int(1),
        }
    }

    fn right(&self, parent: Number) -> Number {
        match self {
            Preset::Squares => Squares.right(parent),
            Preset::Heap => Number::Int(2) * parent + Number::Int(1),
            Preset::Offset => parent + Number::Int(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let params = TreeParams::default();
        assert_eq!(params.height(), 3);
        assert_eq!(params.root(), Number::Int(11));
    }

    #[test]
    fn test_negative_height_rejected() {
        let err = TreeParams::new(-1, 5).unwrap_err();
        assert_eq!(err.argument(), "height");
    }

    #[test]
    fn test_oversized_height_rejected() {
        assert!(TreeParams::new(i64::from(u32::MAX) + 1, 5).is_err());
        assert!(TreeParams::from_json(&json!(u64::MAX), &json!(5)).is_err());
    }

    #[test]
    fn test_from_json_validation() {
        assert!(TreeParams::from_json(&json!(2), &json!(5)).is_ok());
        assert!(TreeParams::from_json(&json!(0), &json!(0.5)).is_ok());

        let fractional = TreeParams::from_json(&json!(2.5), &json!(5)).unwrap_err();
        assert_eq!(fractional.argument(), "height");
        let negative = TreeParams::from_json(&json!(-1), &json!(5)).unwrap_err();
        assert_eq!(negative.argument(), "height");
        let text_height = TreeParams::from_json(&json!("3"), &json!(5)).unwrap_err();
        assert_eq!(text_height.argument(), "height");
        let text_root = TreeParams::from_json(&json!(2), &json!("x")).unwrap_err();
        assert_eq!(text_root.argument(), "root");
    }

    #[test]
    fn test_parse_raw_arguments() {
        let params = TreeParams::parse("4", " 1.5 ").unwrap();
        assert_eq!(params.height(), 4);
        assert_eq!(params.root(), Number::Float(1.5));

        assert_eq!(TreeParams::parse("2.5", "5").unwrap_err().argument(), "height");
        assert_eq!(TreeParams::parse("2", "x").unwrap_err().argument(), "root");
        assert_eq!(TreeParams::parse("two", "5").unwrap_err().argument(), "height");
    }

    #[test]
    fn test_squares_rule() {
        assert_eq!(Squares.left(Number::Int(11)), Number::Int(121));
        assert_eq!(Squares.right(Number::Int(11)), Number::Int(123));
    }

    #[test]
    fn test_fn_rule_and_presets() {
        let rule = FnRule::new(|x: Number| x * Number::Int(3), |x: Number| x + Number::Int(7));
        assert_eq!(rule.left(Number::Int(2)), Number::Int(6));
        assert_eq!(rule.right(Number::Int(2)), Number::Int(9));

        assert_eq!(Preset::Heap.left(Number::Int(1)), Number::Int(2));
        assert_eq!(Preset::Heap.right(Number::Int(1)), Number::Int(3));
        assert_eq!(Preset::Offset.left(Number::Int(0)), Number::Int(-1));
        assert_eq!(Preset::Squares.right(Number::Int(11)), Number::Int(123));
    }
}
