// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Canonicalization diagnostics rendered against the front-end source.

use plier_diagnostics::formatter::DiagnosticFormatter;
use plier_diagnostics::json::to_json_report;
use plier_diagnostics::ToDiagnostic;
use plier_ir::transform::{canonicalize, CanonicalizeConfig};
use plier_ir::{verify, Context, FunctionBuilder, Span, Type};

const SOURCE: &str = "def add(x, y):\n    return x + args[5]\n";

#[test]
fn invalid_args_points_at_source() {
    colored::control::set_override(false);
    let ctx = Context::new();
    let int = Type::py(&ctx, "int64").unwrap();

    let mut b = FunctionBuilder::new(&ctx, "add");
    b.add_param("x", int);
    b.add_param("y", int);
    b.set_span(Some(Span::new(26, 27)));
    let x = b.arg_typed(0, "x", int);
    b.set_span(Some(Span::new(30, 37)));
    let bad = b.arg_typed(5, "args", int);
    b.set_span(Some(Span::new(26, 37)));
    let sum = b.binop(x, bad, "+");
    b.ret(sum);
    let mut f = b.finish();

    let result = canonicalize(&ctx, &mut f, &CanonicalizeConfig::default());
    let diags: Vec<_> = result.errors.iter().map(|e| e.to_diagnostic()).collect();
    assert_eq!(diags.len(), 1);

    let text = DiagnosticFormatter::new(SOURCE)
        .with_file_name("add.py")
        .format(&diags[0]);
    assert!(text.starts_with(
        "error[E0310]: invalid function args: index 5 is out of range for 2 parameter(s)"
    ));
    assert!(text.contains("--> add.py:2:16"));
    assert!(text.contains("argument 5 does not exist"));

    let report = to_json_report(&diags, SOURCE, "add.py", "canonicalize");
    assert!(!report.success);
    assert_eq!(report.diagnostics[0].labels[0].source_line, "    return x + args[5]");
}

#[test]
fn verifier_findings_convert() {
    let ctx = Context::new();
    let int = Type::py(&ctx, "int64").unwrap();
    let mut b = FunctionBuilder::new(&ctx, "f");
    b.arg_typed(0, "x", int);
    let f = b.finish();

    let errors = verify(&ctx, &f).unwrap_err();
    let diag = errors[0].to_diagnostic();
    assert_eq!(diag.code.map(|c| c.0), Some("E0310".to_string()));
    assert_eq!(diag.notes, vec!["in operation %0".to_string()]);
}
