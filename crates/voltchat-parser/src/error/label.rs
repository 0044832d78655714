//! Labeled spans for diagnostic messages.

use crate::span::Span;

/// A message attached to the byte range of the reply where a problem is.
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
}

impl Label {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn shift(&mut self, offset: usize) {
        self.span = self.span.shift(offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_shift() {
        let mut label = Label::new(Span::new(10..20), "unexpected character");
        label.shift(5);
        assert_eq!(label.span(), Span::new(15..25));
        assert_eq!(label.message(), "unexpected character");
    }
}
