use super::SectionQuery;
use crate::document::Element;
use crate::error::ExtractError;

/// Returns the first section, in document order, whose class attribute equals
/// `query.class` and whose title contains `query.title_substring` verbatim.
pub fn find_section<'a>(
    root: &'a Element,
    query: &SectionQuery,
) -> Result<&'a Element, ExtractError> {
    root.descendants()
        .filter(|element| element.tag == query.section_tag)
        .filter(|element| element.attr(&query.class_attr) == Some(query.class.as_str()))
        .find(|section| {
            section
                .child(&query.title_tag)
                .is_some_and(|title| title.text().contains(&query.title_substring))
        })
        .ok_or_else(|| ExtractError::SectionNotFound {
            tag: query.section_tag.clone(),
            class_attr: query.class_attr.clone(),
            class: query.class.clone(),
            title: query.title_substring.clone(),
        })
}

/// Picks the table at `query.table_index` among the direct table children of
/// the section's table group.
pub fn select_table<'a>(
    section: &'a Element,
    query: &SectionQuery,
) -> Result<&'a Element, ExtractError> {
    let group = section
        .child(&query.table_group_tag)
        .ok_or_else(|| ExtractError::TableGroupMissing {
            section_title: section
                .child(&query.title_tag)
                .map(|title| title.text().to_string())
                .unwrap_or_default(),
            group_tag: query.table_group_tag.clone(),
        })?;

    let tables: Vec<&Element> = group.children_named(&query.table_tag).collect();
    tables
        .get(query.table_index)
        .copied()
        .ok_or(ExtractError::InsufficientTables {
            found: tables.len(),
            index: query.table_index,
        })
}
