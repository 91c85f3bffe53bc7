use super::*;
use client_core::FilterValue;

fn rendered<T>(state: &LoadState<T>, table: &ProjectTable) -> String {
    let mut out = Vec::new();
    render(&mut out, state, table).expect("render");
    String::from_utf8(out).expect("utf8")
}

fn table() -> ProjectTable {
    let mut no_link = Project::new("Honey Processing", "Agro", "not quoted", "");
    no_link.pdf_url = None;
    ProjectTable::new(vec![
        Project::new("Masala Powder", "Food", 1250000u64, "https://example.invalid/masala.pdf"),
        no_link,
    ])
}

#[test]
fn loaded_table_lists_rows_and_footer() {
    let table = table();
    let output = rendered(&LoadState::Loaded(()), &table);

    assert!(output.contains("Categories: All, Food, Agro"));
    assert!(output.contains("Masala Powder"));
    assert!(output.contains("₹12,50,000.00"));
    assert!(output.contains("https://example.invalid/masala.pdf"));
    assert!(output.contains("₹NaN"));
    assert!(output.contains("(no link)"));
    assert!(output.contains("2 of 2 row(s) | Page 1 of 1 | Rows per page: 20"));
}

#[test]
fn failed_load_shows_error_and_no_rows() {
    let table = ProjectTable::new(Vec::<Project>::new());
    let output = rendered::<()>(
        &LoadState::Failed("request to http://localhost:5000/api/projects failed".into()),
        &table,
    );

    assert!(output.contains("!! Failed to load projects: request to"));
    assert!(output.contains("No results."));
    assert!(output.contains("0 of 0 row(s)"));
}

#[test]
fn empty_result_after_filtering_is_not_an_error() {
    let mut table = table();
    table
        .set_filter(ProjectColumn::Title, FilterValue::contains("Pottery"))
        .expect("filter");
    let output = rendered(&LoadState::Loaded(()), &table);

    assert!(!output.contains("Failed"));
    assert!(output.contains("No results."));
    assert!(output.contains("Title *"));
}

#[test]
fn sorted_column_is_marked() {
    let mut table = table();
    table.toggle_sort(ProjectColumn::Cost);
    table.toggle_sort(ProjectColumn::Cost);
    let output = rendered(&LoadState::Loaded(()), &table);
    assert!(output.contains("Cost (₹) v"));
}

#[test]
fn long_titles_are_truncated() {
    assert_eq!(pad("abcdef", 5), "ab...");
    assert_eq!(pad("abc", 5), "abc  ");
    assert_eq!(pad_left("₹1.00", 7), "  ₹1.00");
}
