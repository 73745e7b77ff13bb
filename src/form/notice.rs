//! User-facing notices emitted by the form.

use serde::Serialize;

/// A toast-style notification. Rendering is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormNotice {
    /// The intake request completed and the form was cleared.
    Submitted,
    /// Submission blocked by validation; nothing was sent.
    ValidationFailed { message: String },
    /// The intake request failed; the form was kept as is.
    SubmissionFailed { reason: String },
}

impl FormNotice {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Submitted => "Cadastro enviado com sucesso!",
            Self::ValidationFailed { .. } => "Erro de validação",
            Self::SubmissionFailed { .. } => "Erro ao enviar dados",
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Submitted => "Os dados foram enviados para processamento.",
            Self::ValidationFailed { message } => message,
            Self::SubmissionFailed { .. } => "Falha ao enviar os dados. Tente novamente.",
        }
    }

    /// Whether the notice should render as destructive.
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Submitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_flag() {
        assert!(!FormNotice::Submitted.is_error());
        assert!(FormNotice::ValidationFailed { message: "x".into() }.is_error());
        assert!(FormNotice::SubmissionFailed { reason: "x".into() }.is_error());
    }

    #[test]
    fn failure_description_hides_transport_detail() {
        let notice = FormNotice::SubmissionFailed {
            reason: "connection refused".into(),
        };
        assert_eq!(notice.description(), "Falha ao enviar os dados. Tente novamente.");
    }

    #[test]
    fn serializes_tagged() {
        let json = serde_json::to_value(FormNotice::ValidationFailed {
            message: "bad".into(),
        })
        .unwrap();
        assert_eq!(json["type"], "validation_failed");
        assert_eq!(json["message"], "bad");
    }
}
