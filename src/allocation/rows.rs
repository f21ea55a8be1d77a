use crate::document::Element;

const TBODY_TAG: &str = "TBODY";
const ROW_TAG: &str = "TR";
const BODY_CELL_TAGS: &[&str] = &["TD", "TE", "TH"];

pub fn is_body_cell(tag: &str) -> bool {
    BODY_CELL_TAGS.contains(&tag)
}

/// Cell labels of one body row in document order. Column spans are not
/// expanded here.
pub fn row_cells(tr: &Element) -> Vec<String> {
    tr.elements()
        .filter(|cell| is_body_cell(&cell.tag))
        .map(|cell| cell.text().to_string())
        .collect()
}

/// Pads with empty strings or truncates so the row has exactly `width` cells.
pub fn fit_to_width(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.resize(width, String::new());
    row
}

/// Every `TBODY/TR` of the table, each forced to `width` cells. Empty rows
/// are kept.
pub fn normalize_body_rows(table: &Element, width: usize) -> Vec<Vec<String>> {
    let Some(tbody) = table.child(TBODY_TAG) else {
        return Vec::new();
    };
    tbody
        .children_named(ROW_TAG)
        .map(|tr| fit_to_width(row_cells(tr), width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_document;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_pads_short_rows() {
        assert_eq!(
            fit_to_width(strings(&["c0", "c1"]), 4),
            strings(&["c0", "c1", "", ""])
        );
    }

    #[test]
    fn test_truncates_long_rows() {
        assert_eq!(
            fit_to_width(strings(&["a", "b", "c", "d", "e", "f"]), 4),
            strings(&["a", "b", "c", "d"])
        );
    }

    #[test]
    fn test_treats_td_te_th_alike() {
        let xml = r#"<TABLE><TBODY>
            <TR><TH>합계</TH><TE ALIGN="RIGHT"> 1,000 </TE><TD>10%</TD><SPAN>skip</SPAN></TR>
            <TR></TR>
            <TR><TD COLSPAN="3">spans are not expanded</TD></TR>
        </TBODY></TABLE>"#;
        let table = parse_document(xml.as_bytes()).unwrap();
        let rows = normalize_body_rows(&table, 3);
        assert_eq!(
            rows,
            vec![
                strings(&["합계", "1,000", "10%"]),
                strings(&["", "", ""]),
                strings(&["spans are not expanded", "", ""]),
            ]
        );
    }

    #[test]
    fn test_missing_tbody_has_no_rows() {
        let table = parse_document(b"<TABLE><THEAD/></TABLE>").unwrap();
        assert!(normalize_body_rows(&table, 2).is_empty());
    }
}
