//! Diff generation for audit logging
//!
//! Produces a short description of what changed between two JSON states.
//! Nested objects are walked so a plan edit reads as
//! `pricingModel.plans[1].price: "79" -> "99"` rather than a whole-array swap.

use serde_json::Value;

/// Longest string shown in full before truncation
const MAX_STRING_LEN: usize = 50;

/// Generate a human-readable diff between two JSON values
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let mut changes = Vec::new();
    collect_changes(before, after, "", &mut changes);

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn collect_changes(before: &Value, after: &Value, prefix: &str, changes: &mut Vec<String>) {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            for (key, before_val) in before_obj {
                let path = join_path(prefix, key);
                match after_obj.get(key) {
                    Some(after_val) => collect_changes(before_val, after_val, &path, changes),
                    None => changes.push(format!("{}: {} -> (removed)", path, format_value(before_val))),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!(
                        "{}: (added) -> {}",
                        join_path(prefix, key),
                        format_value(after_val)
                    ));
                }
            }
        }
        // Same length: element-wise; otherwise only the size change is reported
        (Value::Array(before_arr), Value::Array(after_arr))
            if before_arr.len() == after_arr.len() =>
        {
            for (i, (b, a)) in before_arr.iter().zip(after_arr).enumerate() {
                collect_changes(b, a, &format!("{}[{}]", prefix, i), changes);
            }
        }
        _ if before != after => {
            let change = format!("{} -> {}", format_value(before), format_value(after));
            if prefix.is_empty() {
                changes.push(change);
            } else {
                changes.push(format!("{}: {}", prefix, change));
            }
        }
        _ => {}
    }
}

/// Format a JSON value for human-readable display
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > MAX_STRING_LEN => {
            let head: String = s.chars().take(MAX_STRING_LEN - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flag_change() {
        let before = json!({"email": "a@b.co", "stripeConnected": false});
        let after = json!({"email": "a@b.co", "stripeConnected": true});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "stripeConnected: false -> true");
    }

    #[test]
    fn test_nested_plan_price_change() {
        let before = json!({"pricingModel": {"type": "manual", "plans": [{"price": "29"}, {"price": "79"}]}});
        let after = json!({"pricingModel": {"type": "manual", "plans": [{"price": "29"}, {"price": "99"}]}});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "pricingModel.plans[1].price: \"79\" -> \"99\"");
    }

    #[test]
    fn test_array_length_change_is_summarized() {
        let before = json!({"plans": [1, 2, 3]});
        let after = json!({"plans": [1, 2, 3, 4]});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "plans: [3 items] -> [4 items]");
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"name": "Pro", "limit": "10"});
        let after = json!({"name": "Pro", "trialDays": 14});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("limit: \"10\" -> (removed)"));
        assert!(diff.contains("trialDays: (added) -> 14"));
    }

    #[test]
    fn test_null_to_object() {
        let before = json!({"pricingModel": null});
        let after = json!({"pricingModel": {"type": "imported", "plans": []}});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "pricingModel: null -> {2 fields}");
    }

    #[test]
    fn test_no_changes() {
        let value = json!({"name": "Basic", "features": [{"name": "Core Features"}]});
        assert!(generate_diff(&value, &value).is_none());
    }

    #[test]
    fn test_long_string_truncation() {
        let before = json!({"note": "a".repeat(100)});
        let after = json!({"note": "short"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("...\""));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!(null)), "null");
        assert_eq!(format_value(&json!(true)), "true");
        assert_eq!(format_value(&json!("Pro")), "\"Pro\"");
        assert_eq!(format_value(&json!([1, 2, 3])), "[3 items]");
        assert_eq!(format_value(&json!({"a": 1, "b": 2})), "{2 fields}");
    }
}
