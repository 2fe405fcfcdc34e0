#![cfg(feature = "serde")]

use poker_calc::charts::ChartBook;
use poker_calc::range::HandClass;

fn book() -> ChartBook {
    ChartBook::from_path(concat!(env!("CARGO_MANIFEST_DIR"), "/data/preflop_charts.json")).unwrap()
}

#[test]
fn bundled_charts_load() {
    let b = book();
    assert_eq!(b.positions(), ["BB", "BTN", "CO", "UTG"]);
    assert_eq!(b.actions("bb"), ["3bet_vs_BTN", "call_vs_BTN"]);
    assert_eq!(b.actions("UTG"), ["open"]);
}

#[test]
fn stored_totals_match_hands_and_notation() {
    let b = book();
    for pos in b.positions() {
        for action in b.actions(pos) {
            let chart = b.get(pos, action).unwrap();
            let range = b.range(pos, action).unwrap();
            assert_eq!(chart.total_combos, Some(chart.combo_count()), "{pos} {action}");
            assert_eq!(range.total_combos(), chart.combo_count(), "{pos} {action}");
            assert_eq!(chart.percentage, Some(range.percentage()), "{pos} {action}");
            let from_notation: Vec<HandClass> = range.hands();
            assert_eq!(from_notation, chart.hands, "{pos} {action}");
        }
    }
}

#[test]
fn hand_lookup() {
    let b = book();
    assert!(b.contains("AJo", "UTG", "open").unwrap());
    assert!(!b.contains("ATo", "UTG", "open").unwrap());
    assert!(b.contains("5Ao", "BTN", "open").unwrap());
    assert!(!b.contains("A6o", "BTN", "open").unwrap());
    assert!(b.contains("QQ", "BB", "3bet_vs_BTN").unwrap());
    assert!(!b.contains("QQ", "BB", "call_vs_BTN").unwrap());
}

#[test]
fn matrix_counts() {
    let grid = book().matrix("UTG", "open").unwrap();
    assert_eq!(grid.iter().flatten().filter(|&&x| x).count(), 16);
    assert!(grid[0][0] && grid[7][7]); // AA, 77
    assert!(!grid[8][8]); // 66
}
