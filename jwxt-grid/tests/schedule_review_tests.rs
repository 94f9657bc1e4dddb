//! End-to-end schedule review: parse → fill → check → summarize.

use jwxt_core::{CellStatus, TermCalendar, Weekday};
use jwxt_grammar::parse_time_string;
use jwxt_grid::{ConflictStatus, OccupancyGrid};

fn calendar() -> TermCalendar {
    TermCalendar::new("2025-2026 春", 16, 13)
}

#[test]
fn test_review_session() {
    let selected = parse_time_string("星期一第1-2节{1-16周};星期三第3-4节{1-8周}").unwrap();
    let pending = parse_time_string("星期五第6-7节{1周,3周,5周}").unwrap();

    let mut grid = OccupancyGrid::new(&calendar()).unwrap();
    assert_eq!(
        grid.check_conflict(&selected),
        ConflictStatus::Unknown,
        "unpopulated grid must not report clear"
    );

    grid.reset();
    grid.fill_all(&selected, CellStatus::Selected);
    grid.fill_all(&pending, CellStatus::Pending);

    let clash = parse_time_string("星期三第4-5节{7-10周}").unwrap();
    let free = parse_time_string("星期三第4-5节{9-16周}").unwrap();
    assert_eq!(grid.check_conflict(&clash), ConflictStatus::Conflict);
    assert_eq!(grid.check_conflict(&free), ConflictStatus::Clear);

    let weeks = grid.conflicting_cells(&clash);
    assert_eq!(
        weeks.iter().map(|c| c.week).collect::<Vec<_>>(),
        vec![7, 8]
    );

    assert_eq!(grid.summarize_weeks(Weekday::Wednesday, 3).to_string(), "1-8");
    assert_eq!(grid.summarize_weeks(Weekday::Friday, 6).to_string(), "1, 3, 5");
}

#[test]
fn test_hover_preview_then_rebuild() {
    let selected = parse_time_string("星期二第1-2节{1-16周(单)}").unwrap();
    let hover = parse_time_string("星期二第2-3节{2-4周}").unwrap();

    let mut grid = OccupancyGrid::new(&calendar()).unwrap();
    grid.reset();
    grid.fill_all(&selected, CellStatus::Selected);
    let before = grid.clone();

    {
        let preview = grid.preview(&hover);
        assert_eq!(preview.summarize_weeks(Weekday::Tuesday, 2).to_string(), "1-5, 7, 9, 11, 13, 15");
        assert_eq!(preview.summarize_weeks(Weekday::Tuesday, 3).to_string(), "2-4");
    }
    assert_eq!(grid, before);

    // Course list changed: rebuild wholesale.
    grid.invalidate();
    assert_eq!(grid.check_conflict(&hover), ConflictStatus::Unknown);
    grid.reset();
    assert_eq!(grid.check_conflict(&hover), ConflictStatus::Clear);
}
