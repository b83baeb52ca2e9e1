//! Input complexity estimation.
//!
//! Structured values score by breadth, nesting depth and the number of
//! nested children; text scores by length; everything else sits at a
//! fixed baseline.

use motif_core::InputValue;

/// Complexity above which an input counts as "complex" / "nuanced".
pub const COMPLEXITY_THRESHOLD: f32 = 0.7;

const FIELD_WEIGHT: f32 = 0.1;
const DEPTH_WEIGHT: f32 = 0.3;
const NESTED_WEIGHT: f32 = 0.2;
const TEXT_SCALE: f32 = 100.0;
const BASELINE: f32 = 0.3;

/// Score an input's structural or textual complexity (0.0 - 1.0).
pub fn input_complexity(input: &InputValue) -> f32 {
    match input {
        InputValue::Record(_) | InputValue::List(_) => {
            let fields = input.children().count() as f32;
            let nested = input.children().filter(|c| c.is_structured()).count() as f32;
            let depth = nesting_depth(input, 0) as f32;
            (fields * FIELD_WEIGHT + depth * DEPTH_WEIGHT + nested * NESTED_WEIGHT).min(1.0)
        }
        InputValue::Text(s) => (s.chars().count() as f32 / TEXT_SCALE).min(1.0),
        _ => BASELINE,
    }
}

/// Depth below `value`: each structured child one level deeper than its
/// container; a value with no structured children stays at `current`.
fn nesting_depth(value: &InputValue, current: usize) -> usize {
    value
        .children()
        .filter(|child| child.is_structured())
        .map(|child| nesting_depth(child, current + 1))
        .fold(current, usize::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn c(v: serde_json::Value) -> f32 {
        input_complexity(&v.into())
    }

    #[test]
    fn test_empty_record_is_zero() {
        assert_eq!(c(json!({})), 0.0);
        assert_eq!(c(json!([])), 0.0);
    }

    #[test]
    fn test_flat_record_counts_fields() {
        // 3 fields, depth 0, no nested
        assert!((c(json!({"a": 1, "b": "x", "c": true})) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_nested_record() {
        // 2 fields * 0.1 + depth 2 * 0.3 + 1 nested * 0.2 = 1.0
        let v = json!({"a": 1, "b": {"c": {"d": 1}}});
        assert!((c(v) - 1.0).abs() < 1e-6);

        // 1 field * 0.1 + depth 1 * 0.3 + 1 nested * 0.2
        assert!((c(json!({"a": {}})) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_depth_enters_lists() {
        assert_eq!(nesting_depth(&json!({"a": [{"b": 1}]}).into(), 0), 2);
        assert_eq!(nesting_depth(&json!({"a": 1}).into(), 0), 0);
    }

    #[test]
    fn test_text_scales_with_length() {
        assert_eq!(c(json!("")), 0.0);
        assert!((c(json!("a".repeat(50))) - 0.5).abs() < 1e-6);
        assert_eq!(c(json!("a".repeat(500))), 1.0);
    }

    #[test]
    fn test_scalars_use_baseline() {
        assert_eq!(c(json!(42)), BASELINE);
        assert_eq!(c(json!(null)), BASELINE);
        assert_eq!(c(json!(false)), BASELINE);
    }

    #[test]
    fn test_capped_at_one() {
        let wide: serde_json::Map<String, serde_json::Value> =
            (0..30).map(|i| (format!("k{}", i), json!(i))).collect();
        assert_eq!(c(serde_json::Value::Object(wide)), 1.0);
    }
}
