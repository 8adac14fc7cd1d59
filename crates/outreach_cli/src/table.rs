//! Plain-text table rendering for `outreach list`.

use outreach_core::{ProfessorRecord, COLUMN_LABELS};

const GAP: &str = "  ";

/// Renders a header, a rule, and one line per record.
pub fn render(records: &[ProfessorRecord]) -> String {
    let rows = records
        .iter()
        .map(ProfessorRecord::cells)
        .collect::<Vec<_>>();

    let mut widths = COLUMN_LABELS.map(|label| label.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &COLUMN_LABELS, &widths);
    let rule = widths.map(|width| "-".repeat(width));
    push_line(&mut out, &rule.each_ref().map(String::as_str), &widths);
    for cells in &rows {
        push_line(&mut out, cells, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[&str; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(GAP);
    out.push_str(line.trim_end());
    out.push('\n');
}
