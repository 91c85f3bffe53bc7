use super::*;

#[test]
fn parses_column_names() {
    assert_eq!("title".parse(), Ok(ProjectColumn::Title));
    assert_eq!(" Category ".parse(), Ok(ProjectColumn::Category));
    assert_eq!("COST".parse(), Ok(ProjectColumn::Cost));
    assert_eq!("pdfUrl".parse(), Ok(ProjectColumn::PdfUrl));
    assert_eq!(
        "budget".parse::<ProjectColumn>(),
        Err(TableError::UnknownColumn("budget".to_string()))
    );
}

#[test]
fn categories_are_distinct_in_first_seen_order() {
    let projects = vec![
        Project::new("A", "Service", 1u64, "a.pdf"),
        Project::new("B", "Food", 2u64, "b.pdf"),
        Project::new("C", "Service", 3u64, "c.pdf"),
        Project::new("D", "Manufacturing", 4u64, "d.pdf"),
        Project::new("E", "Food", 5u64, "e.pdf"),
    ];
    assert_eq!(
        categories(&projects),
        vec!["Service", "Food", "Manufacturing"]
    );
}

#[test]
fn categories_skip_records_without_a_category() {
    let projects = vec![
        Project::new("A", "", 1u64, "a.pdf"),
        Project::new("B", "Food", 2u64, "b.pdf"),
        Project::new("C", "", 3u64, "c.pdf"),
    ];
    assert_eq!(categories(&projects), vec!["Food"]);
}

#[test]
fn null_cost_has_no_text_or_amount() {
    let project: Project =
        serde_json::from_str(r#"{"title": "Pickles", "category": "Food", "cost": null}"#)
            .expect("json");
    assert_eq!(project.text(ProjectColumn::Cost), "");
    assert_eq!(project.number(ProjectColumn::Cost), None);
}

#[test]
fn cell_text_reflects_raw_values() {
    let mut project = Project::new("Dona Pattal", "Manufacturing", 185000u64, "dona.pdf");
    assert_eq!(project.text(ProjectColumn::Title), "Dona Pattal");
    assert_eq!(project.text(ProjectColumn::Cost), "185000");
    assert_eq!(project.text(ProjectColumn::PdfUrl), "dona.pdf");
    assert_eq!(project.number(ProjectColumn::Cost), Some(185000.0));
    assert_eq!(project.number(ProjectColumn::Title), None);

    project.pdf_url = None;
    project.cost = None;
    assert_eq!(project.text(ProjectColumn::PdfUrl), "");
    assert_eq!(project.text(ProjectColumn::Cost), "");
    assert_eq!(project.number(ProjectColumn::Cost), None);
}

#[test]
fn column_kinds() {
    assert_eq!(Project::filter_kind(ProjectColumn::Title), FilterKind::Text);
    assert_eq!(Project::filter_kind(ProjectColumn::Category), FilterKind::Exact);
    assert_eq!(Project::filter_kind(ProjectColumn::Cost), FilterKind::Range);
    assert_eq!(Project::sort_kind(ProjectColumn::Cost), Some(SortKind::Numeric));
    assert_eq!(Project::sort_kind(ProjectColumn::PdfUrl), None);
    assert_eq!(ProjectColumn::Cost.header(), "Cost (₹)");
}
