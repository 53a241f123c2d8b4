// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Conversions from IR error types to `Diagnostic`.

use crate::{Diagnostic, ToDiagnostic};
use plier_ir::{FoldError, FoldErrorKind, ParseError, TypeError, VerifyError, VerifyErrorKind};

// ============================================================================
// Type Errors
// ============================================================================

impl ToDiagnostic for TypeError {
    fn to_diagnostic(&self) -> Diagnostic {
        match self {
            TypeError::InvalidArgument => Diagnostic::error(self.to_string())
                .with_code("E0300")
                .with_note("the empty name is reserved for the undefined placeholder")
                .with_help("request the undefined placeholder instead of an empty name"),
        }
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

impl ToDiagnostic for ParseError {
    fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.to_string())
            .with_code("E0100")
            .with_primary(self.span, "type text is not accepted here");

        if let Some(ref hint) = self.hint {
            diag = diag.with_help(hint.as_str());
        }

        diag
    }
}

// ============================================================================
// Fold Errors
// ============================================================================

impl ToDiagnostic for FoldError {
    fn to_diagnostic(&self) -> Diagnostic {
        let label = match &self.kind {
            FoldErrorKind::ArgIndexOutOfRange { index, .. } => {
                format!("argument {} does not exist", index)
            }
            FoldErrorKind::ArgTypeMismatch { declared_ty, .. } => {
                format!("declared as `{}`", declared_ty)
            }
        };
        Diagnostic::error(self.kind.to_string())
            .with_code("E0310")
            .with_primary_opt(self.span, label)
            .with_note(format!("operation %{} was left in place", self.op.0))
    }
}

// ============================================================================
// Verify Errors
// ============================================================================

impl ToDiagnostic for VerifyError {
    fn to_diagnostic(&self) -> Diagnostic {
        let code = match &self.kind {
            VerifyErrorKind::OperandCount { .. } => "E0900",
            VerifyErrorKind::KeywordMismatch { .. } => "E0901",
            VerifyErrorKind::ParamOutOfRange { .. } => "E0902",
            VerifyErrorKind::UseBeforeDef { .. } => "E0903",
            VerifyErrorKind::UseOfErased { .. } => "E0904",
            VerifyErrorKind::InvalidArgs(_) => "E0310",
        };
        let location = match self.op {
            Some(op) => format!("in operation %{}", op.0),
            None => "in the return value".to_string(),
        };
        Diagnostic::error(self.kind.to_string())
            .with_code(code)
            .with_primary_opt(self.span, "emitted here")
            .with_note(location)
    }
}
