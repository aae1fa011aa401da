// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Classification of raw external values.

use simbridge_model::ExternalValue;

use crate::diagnostics::{DiagnosticsPort, TracingDiagnostics};
use crate::PrimitiveType;

/// Infers a [`PrimitiveType`] from an external value.
///
/// Text literals are tried in a fixed order: unsigned integer, signed
/// integer, real, boolean. The first parse that succeeds wins, so `"2"` is
/// an unsigned integer and `"-2"` a signed one. Text that parses as none of
/// them stays text; that fallback is expected and only traced.
#[derive(Debug, Clone, Default)]
pub struct ValueTypeResolver<D = TracingDiagnostics> {
    diagnostics: D,
}

impl<D: DiagnosticsPort> ValueTypeResolver<D> {
    /// Creates a resolver reporting to `diagnostics`.
    pub fn new(diagnostics: D) -> Self {
        Self { diagnostics }
    }

    /// Classifies a text literal and returns the parsed value alongside its
    /// type. Unparseable text is returned unchanged as [`ExternalValue::Text`],
    /// and so are the non-finite spellings `inf`, `infinity` and `nan`.
    pub fn resolve_from_text(&self, text: &str) -> (PrimitiveType, ExternalValue) {
        let trimmed = text.trim();

        if let Ok(value) = trimmed.parse::<u64>() {
            return (PrimitiveType::UnsignedInteger, ExternalValue::UnsignedInteger(value));
        }
        if let Ok(value) = trimmed.parse::<i64>() {
            return (PrimitiveType::Integer, ExternalValue::Integer(value));
        }
        if let Some(value) = trimmed.parse::<f64>().ok().filter(|v| v.is_finite()) {
            return (PrimitiveType::Real, ExternalValue::Real(value));
        }
        if let Some(value) = parse_bool(trimmed) {
            return (PrimitiveType::Boolean, ExternalValue::Boolean(value));
        }

        self.diagnostics
            .trace(&format!("value '{text}' resolved as Text"));
        (PrimitiveType::Text, ExternalValue::Text(text.to_owned()))
    }

    /// Returns the primitive type of a value. Text is resolved first, so the
    /// type of `"2"` is [`PrimitiveType::UnsignedInteger`], never `Text`.
    pub fn resolve_from_value(&self, value: &ExternalValue) -> PrimitiveType {
        match value {
            ExternalValue::Integer(_) => PrimitiveType::Integer,
            ExternalValue::UnsignedInteger(_) => PrimitiveType::UnsignedInteger,
            ExternalValue::Real(_) => PrimitiveType::Real,
            ExternalValue::Boolean(_) => PrimitiveType::Boolean,
            ExternalValue::Temporal(_) => PrimitiveType::Temporal,
            ExternalValue::Text(text) => self.resolve_from_text(text).0,
        }
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
