// Sprint 4: Advanced filtering - exact-date and range modes
//
// The dashboard runs in one of two filter modes; both must behave
// identically whether criteria come from pickers or the CLI.

use ritmo::filter::RowFilter;
use ritmo::row::TaskRow;

fn row(worker: &str, branch: &str, line: &str, date: &str) -> TaskRow {
    TaskRow {
        worker_id: worker.to_string(),
        worker_name: Some(worker.to_string()),
        branch_id: branch.to_string(),
        line: line.to_string(),
        team: None,
        volume_count: 1,
        visit_count: 1,
        date_started: date.to_string(),
        time_start: "08:00:00".to_string(),
        time_end: "09:00:00".to_string(),
    }
}

fn sample() -> Vec<TaskRow> {
    vec![
        row("JOAO SILVA", "101", "MERCEARIA", "2024-01-01"),
        row("MARIA SANTOS", "101", "FLV", "2024-01-02"),
        row("PEDRO OLIVEIRA", "102", "MERCEARIA", "2024-01-02"),
        row("ANA SOUZA", "464", "ALTO GIRO", "2024-01-03T07:00:00"),
        row("CARLOS LIMA", "102", "PERECIVEIS", "2024-01-05"),
    ]
}

#[test]
fn test_exact_date_mode_with_pickers() {
    let filter = RowFilter::all()
        .with_exact_date("2024-01-02")
        .with_branch("101")
        .with_line("all");

    let kept = filter.apply(&sample());
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].worker_name.as_deref(), Some("MARIA SANTOS"));
}

#[test]
fn test_exact_date_mode_line_picker_narrows() {
    let filter = RowFilter::all()
        .with_exact_date("2024-01-02")
        .with_branch("all")
        .with_line("MERCEARIA");

    let kept = filter.apply(&sample());
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].worker_name.as_deref(), Some("PEDRO OLIVEIRA"));
}

#[test]
fn test_range_mode_with_worker_search() {
    let filter = RowFilter::all()
        .with_date_range(Some("2024-01-01"), Some("2024-01-03"))
        .with_worker_contains("silva");

    let kept = filter.apply(&sample());
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].worker_name.as_deref(), Some("JOAO SILVA"));
}

#[test]
fn test_range_mode_includes_boundary_dates() {
    let filter = RowFilter::all().with_date_range(Some("2024-01-02"), Some("2024-01-05"));
    let kept = filter.apply(&sample());
    assert_eq!(kept.len(), 4);
}

#[test]
fn test_range_mode_truncates_timestamp_dates() {
    // The 2024-01-03 row stores a full timestamp; the range must still
    // catch it on the date prefix.
    let filter = RowFilter::all().with_date_range(Some("2024-01-03"), Some("2024-01-03"));
    let kept = filter.apply(&sample());
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].worker_name.as_deref(), Some("ANA SOUZA"));
}

#[test]
fn test_all_sentinels_keep_every_row() {
    let filter = RowFilter::all().with_branch("all").with_line("ALL");
    assert_eq!(filter.apply(&sample()).len(), sample().len());
}

#[test]
fn test_branch_string_normalization() {
    // Branch ids compare as normalized strings regardless of how the
    // store typed them.
    let numeric_branch: TaskRow =
        serde_json::from_str(r#"{"CODPRODUTIVO": 1, "NROEMPRESA": 101, "DTAINICIO": "2024-01-01"}"#)
            .unwrap();

    let filter = RowFilter::all().with_branch("101");
    assert!(filter.matches(&numeric_branch));
}

#[test]
fn test_worker_regex_mode() {
    let filter = RowFilter::all().with_worker_arg("/^(joao|maria)/").unwrap();
    let kept = filter.apply(&sample());
    assert_eq!(kept.len(), 2);
}

#[test]
fn test_filter_composes_all_predicates() {
    let filter = RowFilter::all()
        .with_date_range(Some("2024-01-01"), Some("2024-01-31"))
        .with_branch("102")
        .with_line("PERECIVEIS")
        .with_worker_contains("carlos");

    let kept = filter.apply(&sample());
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].worker_name.as_deref(), Some("CARLOS LIMA"));
}

#[test]
fn test_empty_input_stays_empty() {
    let filter = RowFilter::all().with_exact_date("2024-01-01");
    assert!(filter.apply(&[]).is_empty());
}

#[test]
fn test_survivor_order_is_input_order() {
    let filter = RowFilter::all().with_branch("102");
    let kept = filter.apply(&sample());
    let names: Vec<&str> = kept
        .iter()
        .filter_map(|r| r.worker_name.as_deref())
        .collect();
    assert_eq!(names, vec!["PEDRO OLIVEIRA", "CARLOS LIMA"]);
}
