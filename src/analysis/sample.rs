use serde::Serialize;
use serde_json::{Map, Value};

use crate::json::truncate_chars;

/// Reduced view of a marker record for display
///
/// Only descriptive, geometry and styling fields are kept. A field present
/// in the source with a `null` value stays `Some(Value::Null)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarkerSample {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<Value>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctype: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ytop: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ybottom: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillopacity: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dim: Option<Value>,
    /// Description, truncated when it is a string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<Value>,
}

impl MarkerSample {
    /// Project a marker record onto the displayed fields
    pub fn project(record: &Map<String, Value>, desc_len: usize) -> Self {
        let field = |name: &str| record.get(name).cloned();

        let desc = record.get("desc").map(|desc| match desc {
            Value::String(text) => Value::String(truncate_chars(text, desc_len)),
            other => other.clone(),
        });

        MarkerSample {
            id: field("id"),
            label: field("label"),
            set: field("set"),
            msg: field("msg"),
            kind: field("type"),
            ctype: field("ctype"),
            x: field("x"),
            z: field("z"),
            y: field("y"),
            ytop: field("ytop"),
            ybottom: field("ybottom"),
            weight: field("weight"),
            opacity: field("opacity"),
            color: field("color"),
            fillopacity: field("fillopacity"),
            fillcolor: field("fillcolor"),
            icon: field("icon"),
            dim: field("dim"),
            desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn project(value: Value, desc_len: usize) -> MarkerSample {
        MarkerSample::project(value.as_object().unwrap(), desc_len)
    }

    #[test]
    fn test_projection_keeps_allowed_fields_only() {
        let sample = project(
            json!({
                "id": "town_1",
                "label": "Spawn",
                "x": [0, 10, 10],
                "z": [0, 0, 10],
                "ytop": 64,
                "ybottom": 64,
                "color": "#FF0000",
                "markup": false,
                "secret": "drop me"
            }),
            200,
        );
        let rendered = serde_json::to_value(&sample).unwrap();
        assert_eq!(
            rendered,
            json!({
                "id": "town_1",
                "label": "Spawn",
                "x": [0, 10, 10],
                "z": [0, 0, 10],
                "ytop": 64,
                "ybottom": 64,
                "color": "#FF0000"
            })
        );
    }

    #[test]
    fn test_field_order_follows_projection() {
        let sample = project(json!({"icon": "house", "type": "icon", "id": 7}), 200);
        let text = serde_json::to_string(&sample).unwrap();
        assert_eq!(text, r#"{"id":7,"type":"icon","icon":"house"}"#);
    }

    #[test]
    fn test_null_field_kept_as_null() {
        let sample = project(json!({"label": null}), 200);
        assert_eq!(sample.label, Some(Value::Null));
        assert_eq!(serde_json::to_string(&sample).unwrap(), r#"{"label":null}"#);
    }

    #[test]
    fn test_desc_truncated_when_string() {
        let sample = project(json!({"desc": "d".repeat(250)}), 200);
        let desc = sample.desc.unwrap();
        let text = desc.as_str().unwrap();
        assert_eq!(text.chars().count(), 200);
        assert!(text.ends_with("..."));
    }

    #[test]
    fn test_desc_non_string_kept() {
        let sample = project(json!({"desc": {"html": "<b>"}}), 5);
        assert_eq!(sample.desc, Some(json!({"html": "<b>"})));
    }

    #[test]
    fn test_empty_record() {
        assert_eq!(project(json!({}), 200), MarkerSample::default());
    }
}
