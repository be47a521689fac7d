//! A box-drawn text grid.

use std::io::{self, Write};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Align {
    Left,
    Right,
}

struct Rule {
    left: char,
    middle: &'static str,
    right: char,
}

const TOP: Rule = Rule {
    left: '┌',
    middle: "┬",
    right: '┐',
};
const BETWEEN: Rule = Rule {
    left: '├',
    middle: "┼",
    right: '┤',
};
const BOTTOM: Rule = Rule {
    left: '└',
    middle: "┴",
    right: '┘',
};

fn width(cell: &str) -> usize {
    cell.chars().count()
}

fn write_rule<W: Write>(out: &mut W, rule: &Rule, widths: &[usize]) -> io::Result<()> {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    writeln!(
        out,
        "{}{}{}",
        rule.left,
        segments.join(rule.middle),
        rule.right
    )
}

fn write_row<W: Write>(
    out: &mut W,
    cells: &[String],
    widths: &[usize],
    aligns: &[Align],
) -> io::Result<()> {
    write!(out, "│")?;
    for ((cell, &w), align) in cells.iter().zip(widths).zip(aligns) {
        match align {
            Align::Left => write!(out, " {cell:<w$} │")?,
            Align::Right => write!(out, " {cell:>w$} │")?,
        }
    }
    writeln!(out)
}

/// Writes `rows` as a grid with a rule between every row. Nothing is written when there is
/// neither a header nor any row.
pub(super) fn write<W: Write>(
    out: &mut W,
    header: Option<&[String]>,
    rows: &[Vec<String>],
    aligns: &[Align],
) -> io::Result<()> {
    if header.is_none() && rows.is_empty() {
        return Ok(());
    }

    let mut widths = vec![0; aligns.len()];
    for row in header.into_iter().chain(rows.iter().map(Vec::as_slice)) {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(width(cell));
        }
    }

    write_rule(out, &TOP, &widths)?;
    let mut first = true;
    for row in header.into_iter().chain(rows.iter().map(Vec::as_slice)) {
        if !first {
            write_rule(out, &BETWEEN, &widths)?;
        }
        first = false;
        write_row(out, row, &widths, aligns)?;
    }
    write_rule(out, &BOTTOM, &widths)
}
