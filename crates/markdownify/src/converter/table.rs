//! Table converters and header-row detection.
//!
//! Markdown tables need a header row followed by a `---` separator. Rows are
//! rendered independently, so each `<tr>` decides from its own position
//! whether it is the header, needs a synthetic blank header, or is a plain
//! body row.

use crate::dom::NodeRef;

/// How a row is framed in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRole {
    /// First row acting as the header: emit it, then the separator.
    Header,
    /// First data row with no usable header: emit a blank header first.
    SyntheticHeader,
    /// Any other row.
    Body,
}

/// Cell counts of a row, including cells of nested tables.
fn count_cells(row: NodeRef<'_>) -> (usize, usize) {
    row.descendants().fold((0, 0), |(th, td), node| match node.name() {
        Some("th") => (th + 1, td),
        Some("td") => (th, td + 1),
        _ => (th, td),
    })
}

/// Classify a `<tr>`.
///
/// A row counts as a header when it has no `<td>`, or when it opens its
/// parent and that parent is not a `<tbody>` of a table with a `<thead>`.
/// Do not simplify these conditions: existing table output depends on them.
#[must_use]
pub fn row_role(row: NodeRef<'_>, td_count: usize) -> RowRole {
    let parent = row.parent();
    let parent_name = parent.and_then(|p| p.name());
    let no_previous = row.previous_sibling().is_none();
    let is_tbody = parent_name == Some("tbody");
    let table_lacks_thead = || {
        parent
            .and_then(|p| p.parent())
            .is_none_or(|table| !table.descendants().any(|node| node.is("thead")))
    };

    let is_headrow = td_count == 0 || (no_previous && !is_tbody) || (no_previous && is_tbody && table_lacks_thead());

    if is_headrow && no_previous {
        RowRole::Header
    } else if no_previous
        && (parent_name == Some("table") || (is_tbody && parent.is_some_and(|p| p.previous_sibling().is_none())))
    {
        RowRole::SyntheticHeader
    } else {
        RowRole::Body
    }
}

/// `| --- | --- |` for `columns` cells.
fn separator(columns: usize) -> String {
    let repeated = "--- | ".repeat(columns.saturating_sub(1));
    let last = if columns == 0 { "" } else { "---" };
    format!("| {repeated}{last} |\n")
}

pub(crate) fn convert_tr(el: NodeRef<'_>, text: &str, _as_inline: bool) -> String {
    let (th, td) = count_cells(el);
    let columns = th + td;
    match row_role(el, td) {
        RowRole::Header => format!("|{text}\n{}", separator(columns)),
        RowRole::SyntheticHeader => {
            let blank = " | ".repeat(columns.saturating_sub(1));
            format!("| {blank} |\n{}|{text}\n", separator(columns))
        }
        RowRole::Body => format!("|{text}\n"),
    }
}

pub(crate) fn convert_table(_el: NodeRef<'_>, text: &str, _as_inline: bool) -> String {
    format!("\n\n{text}\n")
}

pub(crate) fn convert_td(_el: NodeRef<'_>, text: &str, _as_inline: bool) -> String {
    format!(" {} |", text.trim())
}

pub(crate) fn convert_th(_el: NodeRef<'_>, text: &str, _as_inline: bool) -> String {
    format!(" {text} |")
}
