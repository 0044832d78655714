//! JSON wire formats emitted by the model.
//!
//! The types here mirror the payloads field for field. Every field that may be
//! absent is an `Option` so that validation can report each missing field
//! instead of failing on the first; unknown fields are ignored. Fields whose
//! damage only costs a default (labels, states, connection ends) are kept as
//! raw [`Value`]s and checked during validation.

use serde::Deserialize;
use serde_json::Value;

pub(crate) const GENERATE_IMAGE_ACTION: &str = "generate_image";

/// `{ "action": "generate_image", "prompt": "..." }`
#[derive(Debug, Deserialize)]
pub(crate) struct ImageDirectiveWire {
    action: String,
    prompt: String,
}

impl ImageDirectiveWire {
    /// Reads an image directive out of `value`, if it has that shape.
    pub(crate) fn from_value(value: &Value) -> Option<Self> {
        Self::deserialize(value)
            .ok()
            .filter(|directive| directive.action == GENERATE_IMAGE_ACTION)
    }

    pub(crate) fn into_prompt(self) -> String {
        self.prompt
    }
}

/// Top-level diagram payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DiagramWire {
    pub(crate) diagram_type: Option<String>,
    pub(crate) width: Option<f64>,
    pub(crate) height: Option<f64>,
    pub(crate) components: Vec<ComponentWire>,
    /// Decoded one by one with [`ConnectionWire::from_value`].
    pub(crate) connections: Vec<Value>,
}

impl DiagramWire {
    /// The duck-typed check: any object with both `components` and
    /// `connections` is meant to be a diagram.
    pub(crate) fn is_diagram_shaped(value: &Value) -> bool {
        value.get("components").is_some() && value.get("connections").is_some()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ComponentWire {
    pub(crate) id: Option<String>,
    #[serde(rename = "type")]
    pub(crate) type_name: Option<String>,
    pub(crate) x: Option<f64>,
    pub(crate) y: Option<f64>,
    pub(crate) label: Option<Value>,
    pub(crate) state: Option<Value>,
    pub(crate) width: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConnectionWire {
    pub(crate) from: Option<Value>,
    pub(crate) to: Option<Value>,
}

impl ConnectionWire {
    /// Reads a connection entry. `None` when the entry is not an object.
    pub(crate) fn from_value(value: &Value) -> Option<Self> {
        value.as_object()?;
        Self::deserialize(value).ok()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_image_directive_shape() {
        let value = json!({"action": "generate_image", "prompt": "a red barn"});
        let directive = ImageDirectiveWire::from_value(&value).unwrap();
        assert_eq!(directive.into_prompt(), "a red barn");
    }

    #[test]
    fn test_image_directive_ignores_extra_fields() {
        let value = json!({"action": "generate_image", "prompt": "p", "size": "1024x1024"});
        assert!(ImageDirectiveWire::from_value(&value).is_some());
    }

    #[test]
    fn test_image_directive_rejects_other_actions_and_bad_prompts() {
        assert!(ImageDirectiveWire::from_value(&json!({"action": "draw", "prompt": "p"})).is_none());
        assert!(
            ImageDirectiveWire::from_value(&json!({"action": "generate_image", "prompt": 7}))
                .is_none()
        );
        assert!(ImageDirectiveWire::from_value(&json!({"action": "generate_image"})).is_none());
        assert!(ImageDirectiveWire::from_value(&json!("generate_image")).is_none());
    }

    #[test]
    fn test_diagram_shape_is_duck_typed() {
        assert!(DiagramWire::is_diagram_shaped(
            &json!({"components": [], "connections": []})
        ));
        assert!(DiagramWire::is_diagram_shaped(
            &json!({"components": 1, "connections": null})
        ));
        assert!(!DiagramWire::is_diagram_shaped(&json!({"components": []})));
        assert!(!DiagramWire::is_diagram_shaped(&json!([1, 2, 3])));
    }

    #[test]
    fn test_diagram_wire_optional_fields() {
        let value = json!({
            "width": 200,
            "height": 100,
            "components": [{"id": "b1", "type": "battery", "x": 50, "y": 50, "extra": true}],
            "connections": [{"from": "b1.positive"}]
        });
        let wire = DiagramWire::deserialize(&value).unwrap();

        assert!(wire.diagram_type.is_none());
        assert_eq!(wire.width, Some(200.0));
        assert!(wire.components[0].label.is_none());

        let connection = ConnectionWire::from_value(&wire.connections[0]).unwrap();
        assert_eq!(connection.from, Some(json!("b1.positive")));
        assert!(connection.to.is_none());
    }

    #[test]
    fn test_connection_entries_must_be_objects() {
        assert!(ConnectionWire::from_value(&json!("b1.positive -> r1.in")).is_none());
        assert!(ConnectionWire::from_value(&json!(null)).is_none());

        let connection = ConnectionWire::from_value(&json!({"from": 3, "to": "r1.in"})).unwrap();
        assert_eq!(connection.from, Some(json!(3)));
    }
}
