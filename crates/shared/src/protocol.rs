use serde::{Deserialize, Serialize};

/// Input from the UI collaborator to a control session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ControlRequest {
    TouchBegan { x: f64, y: f64 },
    TouchMoved { x: f64, y: f64 },
    TouchEnded,
    SelectColor { well: usize },
    StartMotion,
    StopMotion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_use_tagged_snake_case_json() {
        let raw = r#"{"type":"touch_moved","payload":{"x":12.5,"y":-3.0}}"#;
        let request: ControlRequest = serde_json::from_str(raw).expect("parse");
        assert_eq!(request, ControlRequest::TouchMoved { x: 12.5, y: -3.0 });

        let encoded = serde_json::to_string(&ControlRequest::StartMotion).expect("encode");
        assert_eq!(encoded, r#"{"type":"start_motion"}"#);
    }

    #[test]
    fn select_color_carries_well_index() {
        let raw = r#"{"type":"select_color","payload":{"well":4}}"#;
        let request: ControlRequest = serde_json::from_str(raw).expect("parse");
        assert_eq!(request, ControlRequest::SelectColor { well: 4 });
    }
}
