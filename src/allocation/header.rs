use crate::document::Element;
use crate::error::ExtractError;

pub const HEADER_SEPARATOR: &str = " - ";

const THEAD_TAG: &str = "THEAD";
const ROW_TAG: &str = "TR";
const HEADER_CELL_TAG: &str = "TH";
const COLSPAN_ATTR: &str = "COLSPAN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub label: String,
    pub colspan: usize,
}

impl HeaderCell {
    pub fn new(label: &str, colspan: usize) -> Self {
        Self {
            label: label.to_string(),
            colspan,
        }
    }
}

/// Reads the `TH` cells of every `THEAD/TR`. A table without a header region
/// yields no rows.
pub fn read_header_rows(table: &Element) -> Result<Vec<Vec<HeaderCell>>, ExtractError> {
    let Some(thead) = table.child(THEAD_TAG) else {
        return Ok(Vec::new());
    };

    thead
        .children_named(ROW_TAG)
        .enumerate()
        .map(|(row, tr)| {
            tr.children_named(HEADER_CELL_TAG)
                .enumerate()
                .map(|(cell, th)| {
                    Ok(HeaderCell {
                        label: th.text().to_string(),
                        colspan: parse_colspan(th.attr(COLSPAN_ATTR), row, cell)?,
                    })
                })
                .collect::<Result<Vec<_>, ExtractError>>()
        })
        .collect()
}

/// Widest span accepted for a single header cell.
pub const MAX_COLSPAN: usize = 1000;

/// Missing or non-numeric spans count as 1. Zero, negative and oversized
/// spans are rejected.
pub fn parse_colspan(raw: Option<&str>, row: usize, cell: usize) -> Result<usize, ExtractError> {
    let Some(value) = raw else {
        return Ok(1);
    };
    let invalid = || ExtractError::InvalidColspan {
        row,
        cell,
        value: value.to_string(),
    };

    let trimmed = value.trim();
    let digits = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(1);
    }
    match trimmed.parse::<i64>() {
        Ok(span) if span >= 1 => match usize::try_from(span) {
            Ok(span) if span <= MAX_COLSPAN => Ok(span),
            _ => Err(invalid()),
        },
        _ => Err(invalid()),
    }
}

/// Repeats each label `colspan` times, left to right.
pub fn expand_row(cells: &[HeaderCell]) -> Vec<&str> {
    cells
        .iter()
        .flat_map(|cell| std::iter::repeat(cell.label.as_str()).take(cell.colspan))
        .collect()
}

/// Collapses all header rows into one label per column. Rows are padded on
/// the right to the widest expanded row; at each column the non-empty labels
/// are joined top to bottom with [`HEADER_SEPARATOR`].
pub fn merge_header_rows(rows: &[Vec<HeaderCell>]) -> Vec<String> {
    let expanded: Vec<Vec<&str>> = rows.iter().map(|row| expand_row(row)).collect();
    let width = expanded.iter().map(Vec::len).max().unwrap_or(0);

    (0..width)
        .map(|column| {
            expanded
                .iter()
                .filter_map(|row| row.get(column).copied())
                .filter(|label| !label.is_empty())
                .collect::<Vec<_>>()
                .join(HEADER_SEPARATOR)
        })
        .collect()
}
