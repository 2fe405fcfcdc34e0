use poker_calc::cards::{format_cards, parse_cards, Card};
use poker_calc::evaluator::Category;
use poker_calc::spot::Action;
use poker_calc::{analyze_spot, calculate_equity, compute_outs, evaluate_hand, parse_range, Engine, EngineConfig, Error};

#[test]
fn card_text_round_trips_for_the_whole_deck() {
    for card in (0..52).filter_map(Card::from_index) {
        let text = card.to_string();
        assert_eq!(text.parse::<Card>().unwrap(), card);
        assert_eq!(text.to_lowercase().parse::<Card>().unwrap(), card);
    }
    let cards = parse_cards("as KD, tc9C").unwrap();
    assert_eq!(format_cards(&cards), "As Kd Tc 9c");
}

#[test]
fn evaluate_reference_hands() {
    let e = evaluate_hand("As Ks", "Qs Js Ts").unwrap();
    assert_eq!(e.hand_class, Category::StraightFlush);
    assert_eq!(e.rank, 1);

    let e = evaluate_hand("7c 2d", "9h 5s 4c 3d Kh").unwrap();
    assert_eq!(e.hand_class, Category::HighCard);
    assert_eq!(e.description, format!("High Card (rank: {})", e.rank));
}

#[test]
fn equity_against_hand_and_range() {
    let engine = Engine::new(EngineConfig::default().with_seed(42));
    let vs_hand = engine.calculate_equity("As Ad", "Ks Kd", "", 20_000).unwrap();
    assert!((78.0..=85.5).contains(&vs_hand.hero_equity));

    let vs_range = engine.calculate_equity("As Ad", "KK+", "", 20_000).unwrap();
    // The remaining AA combo splits most of the time.
    assert!(vs_range.tie_rate > vs_hand.tie_rate);
}

#[test]
fn spot_and_outs() {
    let rec = analyze_spot("Ah Kh", "Qh Jh 2c", Some(100.0), Some(50.0), Some(500.0), None).unwrap();
    assert_eq!(rec.action, Action::Call);
    assert_eq!(rec.reasoning[0], "Equity (72.0%) exceeds pot odds requirement (33.3%)");

    let rec = analyze_spot("Ah Kh", "Qh Jh 2c", None, Some(50.0), None, None).unwrap();
    assert_eq!(rec.action, Action::AnalyzeOnly);

    let outs = compute_outs("9s 8s", "7s 6s 2c").unwrap();
    assert_eq!(outs.count(), 15);
}

#[test]
fn range_summary() {
    let s = parse_range("QQ+, AKs").unwrap();
    assert_eq!(s.notation, "QQ+, AKs");
    assert_eq!(s.hands, ["AA", "KK", "QQ", "AKs"]);
    assert_eq!(s.total_combos, 22);
    assert_eq!(s.combo_counts.pairs, 18);
    assert_eq!(s.combo_counts.suited, 4);
    assert_eq!(s.percentage, 1.7);
}

#[test]
fn five_error_kinds() {
    assert!(matches!(evaluate_hand("1s Kd", "2c 3c 4c"), Err(Error::InvalidCard(_))));
    assert!(matches!(evaluate_hand("Asd Kd", "2c 3c 4c"), Err(Error::InvalidCard(_))));
    assert!(matches!(calculate_equity("As Kd", "As Qd", "", 100), Err(Error::DuplicateCard(_))));
    assert!(matches!(calculate_equity("Qs Kd", "As As", "", 100), Err(Error::DuplicateCard(_))));
    assert_eq!(compute_outs("As Kd", "2c 3c 4c 5c 6c 7c").unwrap_err(), Error::InvalidBoardLength(6));
    assert!(matches!(parse_range("88-QQ"), Err(Error::InvalidRangeNotation(_))));
    assert!(matches!(calculate_equity("As Kd", "QQ", "", 0), Err(Error::InvalidInput(_))));
    assert!(matches!(
        analyze_spot("As Kd", "2c 3c 4c", Some(100.0), Some(-1.0), None, None),
        Err(Error::InvalidInput(_))
    ));
}

#[cfg(feature = "serde")]
#[test]
fn results_serialize_to_json() {
    let rec = analyze_spot("Ah Kh", "Qh Jh 2c", Some(100.0), Some(50.0), Some(500.0), None).unwrap();
    let json = serde_json::to_value(&rec).unwrap();
    assert_eq!(json["action"], "Call");
    assert_eq!(json["equity"], 72.0);
    assert_eq!(json["outs"]["by_category"]["Overcards"]["cards"].as_array().map(Vec::len), Some(6));
    assert_eq!(json["outs"]["by_category"]["FlushDraw"]["cards"].as_array().map(Vec::len), Some(9));

    let e = serde_json::to_value(evaluate_hand("As Ks", "Qs Js Ts").unwrap()).unwrap();
    assert_eq!(e["hand_class"], "StraightFlush");
    assert_eq!(e["rank"], 1);
}
