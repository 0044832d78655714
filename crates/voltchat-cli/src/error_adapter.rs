//! Rendering of [`VoltchatError`]s as miette reports.
//!
//! Reply diagnostics carry byte spans into the captured reply, so each one
//! becomes its own report with the reply as source code. Every other error is
//! a single report without source.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceCode, SourceSpan};

use voltchat::VoltchatError;
use voltchat_parser::{
    Span,
    error::{Diagnostic, Severity},
};

/// One miette report.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A reply diagnostic, with the reply its labels point into.
    Diagnostic { diag: &'a Diagnostic, src: &'a str },
    /// Any error raised outside reply validation.
    Error(&'a VoltchatError),
}

impl<'a> Reportable<'a> {
    pub fn diagnostic(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self::Diagnostic { diag, src }
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Diagnostic { diag, .. } => f.write_str(diag.message()),
            Self::Error(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Diagnostic { .. } => None,
            Self::Error(err) => err.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Self::Diagnostic { diag, .. } => diag
                .code()
                .map(|code| Box::new(code) as Box<dyn fmt::Display>),
            Self::Error(err) => {
                error_code(err).map(|code| Box::new(code) as Box<dyn fmt::Display>)
            }
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        let Self::Diagnostic { diag, .. } = self else {
            return None;
        };
        Some(match diag.severity() {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let Self::Diagnostic { diag, .. } = self else {
            return None;
        };
        diag.help().map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match self {
            Self::Diagnostic { src, .. } => Some(src as &dyn SourceCode),
            Self::Error(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Self::Diagnostic { diag, .. } = self else {
            return None;
        };
        if diag.labels().is_empty() {
            return None;
        }
        Some(Box::new(diag.labels().iter().map(|label| {
            LabeledSpan::new_primary_with_span(
                Some(label.message().to_string()),
                span_to_miette(label.span()),
            )
        })))
    }
}

fn error_code(err: &VoltchatError) -> Option<&'static str> {
    match err {
        VoltchatError::Io(_) => Some("voltchat::io"),
        VoltchatError::Parse { .. } => None,
        VoltchatError::Export(_) => Some("voltchat::export"),
        VoltchatError::Chat(_) => Some("voltchat::chat"),
    }
}

fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Splits an error into reports: one per diagnostic for
/// [`VoltchatError::Parse`], a single one otherwise.
pub fn to_reportables(err: &VoltchatError) -> Vec<Reportable<'_>> {
    match err {
        VoltchatError::Parse { err: parse_err, src } => parse_err
            .diagnostics()
            .iter()
            .map(|diag| Reportable::diagnostic(diag, src))
            .collect(),
        _ => vec![Reportable::Error(err)],
    }
}

#[cfg(test)]
mod tests {
    use voltchat::chat::ChatError;
    use voltchat_parser::{
        classify_with_diagnostics,
        error::{ErrorCode, ParseError},
    };

    use super::*;

    #[test]
    fn test_parse_error_reports_each_diagnostic() {
        let diags = vec![
            Diagnostic::error("missing required field `components[0].x`")
                .with_code(ErrorCode::E200),
            Diagnostic::warning("connection references unknown component `r9`")
                .with_code(ErrorCode::E300)
                .with_help("this connection is not drawn"),
        ];
        let err = VoltchatError::new_parse_error(ParseError::from(diags), "{}");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 2);
        assert_eq!(
            reportables[0].to_string(),
            "missing required field `components[0].x`"
        );
        assert_eq!(reportables[0].code().unwrap().to_string(), "E200");
        assert_eq!(reportables[1].severity(), Some(miette::Severity::Warning));
        assert_eq!(
            reportables[1].help().unwrap().to_string(),
            "this connection is not drawn"
        );
        assert!(reportables[1].labels().is_none());
    }

    #[test]
    fn test_syntax_error_label_points_into_reply() {
        let reply = "Try this:\n```json\n{\"width\": 10,,}\n```\n";
        let (_, diagnostics) = classify_with_diagnostics(reply);
        let reportable = Reportable::diagnostic(&diagnostics[0], reply);

        assert!(reportable.source_code().is_some());
        let labels: Vec<_> = reportable.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());

        let start = labels[0].offset();
        assert_eq!(&reply[start..start + labels[0].len()], ",");
    }

    #[test]
    fn test_other_errors_have_namespaced_codes() {
        let err = VoltchatError::Chat(ChatError::TurnInProgress);

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        assert_eq!(
            reportables[0].to_string(),
            "Chat error: a turn is already in progress"
        );
        assert_eq!(reportables[0].code().unwrap().to_string(), "voltchat::chat");
        assert!(reportables[0].source_code().is_none());
        assert!(reportables[0].severity().is_none());
    }
}
