//! Rendering of parse failures as source-annotated reports.

use ariadne::{Color, Fmt, Label, Report, ReportKind};
use tagjson::Span;

pub type DiagnosticReport<'a> = Report<'a, (&'a String, std::ops::Range<usize>)>;

/// `tagjson` spans are byte offsets while ariadne counts characters.
fn char_range(src: &str, span: Span) -> std::ops::Range<usize> {
    let lo = src[..span.lo].chars().count();
    let hi = lo + src[span.lo..span.hi].chars().count();
    if hi > lo {
        return lo..hi;
    }
    // Widen zero-width spans so the label has something to underline; at end of input that is
    // the last character.
    let total = src.chars().count();
    if lo < total {
        lo..lo + 1
    } else {
        total.saturating_sub(1)..total
    }
}

pub fn parse_error_report<'a>(
    path: &'a String,
    src: &str,
    err: &tagjson::Error,
) -> DiagnosticReport<'a> {
    match err {
        tagjson::Error::MalformedJson { span, reason } => {
            let range = char_range(src, *span);
            Report::build(ReportKind::Error, path, range.start)
                .with_message("malformed JSON")
                .with_label(
                    Label::new((path, range))
                        .with_message(reason)
                        .with_color(Color::Red),
                )
                .finish()
        }
        tagjson::Error::DepthExceeded { limit } => Report::build(ReportKind::Error, path, 0)
            .with_message(format!(
                "JSON nesting is deeper than the limit of {}",
                limit.fg(Color::Blue)
            ))
            .with_help("raise `max_depth` in the configuration if this document is legitimate")
            .finish(),
        other => Report::build(ReportKind::Error, path, 0)
            .with_message(other.to_string())
            .finish(),
    }
}
