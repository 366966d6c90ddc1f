use thiserror::Error;
use wasm_bindgen::JsValue;

/// Everything that can stop the viewer.
///
/// Start-up variants are reported to the user and abort `start`;
/// `InvalidStackOperation` is a logic error that halts the frame loop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewerError {
    #[error("could not initialise the graphics context: {0}")]
    ContextUnavailable(String),

    #[error("shader compilation failed: {0}")]
    ShaderCompile(String),

    #[error("shader program link failed: {0}")]
    ShaderLink(String),

    #[error("invalid matrix stack operation: pop on an empty stack")]
    InvalidStackOperation,
}

impl From<ViewerError> for JsValue {
    fn from(err: ViewerError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_backend_log() {
        let err = ViewerError::ShaderCompile("expected ';' at 3:14".to_string());
        assert!(err.to_string().contains("expected ';' at 3:14"));
    }

    #[test]
    fn test_stack_error_message() {
        let msg = ViewerError::InvalidStackOperation.to_string();
        assert!(msg.contains("empty"), "unexpected message: {}", msg);
    }
}
