//! Text shared by the bundled stenographers.

use std::io::{self, Write};

use colored::{ColoredString, Colorize};

use crate::summary::{SuiteStart, SuiteSummary};

/// Apply `style` to `text` when `color` is set.
pub fn paint(color: bool, text: &str, style: impl FnOnce(&str) -> ColoredString) -> String {
    if color {
        style(text).to_string()
    } else {
        text.to_owned()
    }
}

/// Write the `Running Suite` title and, unless `succinct`, the plan.
///
/// # Errors
///
/// Returns any error raised by `writer`.
pub fn write_suite_header<W: Write>(
    writer: &mut W,
    suite: &SuiteStart,
    color: bool,
    succinct: bool,
) -> io::Result<()> {
    let title = paint(color, &format!("Running Suite: {}", suite.description()), |t| {
        t.bold()
    });
    writeln!(writer, "{title}")?;
    if !succinct {
        writeln!(
            writer,
            "Will run {} of {} specs",
            suite.specs_to_run(),
            suite.total_specs()
        )?;
    }
    Ok(())
}

/// Write the closing tally, preceded by a blank line.
///
/// `show_flakes` appends the flaked count when any example needed a retry.
///
/// # Errors
///
/// Returns any error raised by `writer`.
pub fn write_summary<W: Write>(
    writer: &mut W,
    summary: &SuiteSummary,
    color: bool,
    show_flakes: bool,
) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "Ran {} of {} specs in {:.3}s",
        summary.ran(),
        summary.total(),
        summary.run_time().as_secs_f64()
    )?;
    let verdict = if summary.succeeded() {
        paint(color, "SUCCESS!", |t| t.green().bold())
    } else {
        paint(color, "FAIL!", |t| t.red().bold())
    };
    write!(
        writer,
        "{verdict} -- {} Passed | {} Failed | {} Pending | {} Skipped",
        summary.passed(),
        summary.failed(),
        summary.pending(),
        summary.skipped()
    )?;
    if show_flakes && summary.flaked() > 0 {
        write!(writer, " | {} Flaked", summary.flaked())?;
    }
    writeln!(writer)?;
    if summary.programmatic_focus() {
        writeln!(writer, "Focused specs narrowed this run.")?;
    }
    writer.flush()
}
