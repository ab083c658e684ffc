//! Structured messages sent from a test case to its host runner

use serde::{Deserialize, Serialize};

/// A message forwarded to the runner collaborator
///
/// The wire form uses adjacent tagging, so an external-command request
/// serializes as `{"type":"external_command","payload":{"command":...}}`.
/// Transport and dispatch are the runner's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum RunnerMessage {
    /// Request execution of an external command by the host runner
    ExternalCommand { command: String },
}

impl RunnerMessage {
    /// The wire marker for this message kind
    pub fn kind(&self) -> &'static str {
        match self {
            RunnerMessage::ExternalCommand { .. } => "external_command",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_external_command_wire_form() {
        let message = RunnerMessage::ExternalCommand {
            command: "reboot controller".to_string(),
        };
        let wire = serde_json::to_value(&message).unwrap();
        assert_eq!(
            wire,
            json!({"type": "external_command", "payload": {"command": "reboot controller"}})
        );

        let parsed: RunnerMessage = serde_json::from_value(wire).unwrap();
        assert_eq!(parsed, message);
        assert_eq!(parsed.kind(), "external_command");
    }
}
