use poker_calc::cards::{parse_cards, Card};
use poker_calc::evaluator::{evaluate, evaluate_five, Category, Combinations};
use poker_calc::hand::{Board, HoleCards};
use std::collections::{BTreeMap, HashSet};

fn five(s: &str) -> [Card; 5] {
    let cards = parse_cards(s).unwrap();
    [cards[0], cards[1], cards[2], cards[3], cards[4]]
}

#[test]
fn each_category_from_five_cards() {
    let cases = [
        ("As Ks Qs Js Ts", Category::StraightFlush),
        ("9c 9d 9h 9s Ac", Category::FourOfAKind),
        ("3c 3d 3h Js Jc", Category::FullHouse),
        ("Kh Th 8h 6h 3h", Category::Flush),
        ("Ac 5c 4d 3h 2s", Category::Straight),
        ("Qc Qd Qh Ts 2c", Category::ThreeOfAKind),
        ("Kc Kd 4h 4s 9c", Category::TwoPair),
        ("8c 8d Ah 7s 2c", Category::Pair),
        ("Ac Jd 8h 6s 3c", Category::HighCard),
    ];
    for (cards, expected) in cases {
        assert_eq!(evaluate_five(&five(cards)).category, expected, "{cards}");
    }
}

#[test]
fn band_edges() {
    assert_eq!(evaluate_five(&five("As Ks Qs Js Ts")).strength(), 1);
    assert_eq!(evaluate_five(&five("5h 4h 3h 2h Ah")).strength(), 10);
    assert_eq!(evaluate_five(&five("Ac Ad Ah As Kc")).strength(), 11);
    assert_eq!(evaluate_five(&five("Ac Ad Ah Ks Kc")).strength(), 167);
    assert_eq!(evaluate_five(&five("Ah Kh Qh Jh 9h")).strength(), 323);
    assert_eq!(evaluate_five(&five("Ac Kd Qh Js Tc")).strength(), 1600);
    assert_eq!(evaluate_five(&five("Ac Ad Ah Ks Qc")).strength(), 1610);
    assert_eq!(evaluate_five(&five("Ac Ad Kh Ks Qc")).strength(), 2468);
    assert_eq!(evaluate_five(&five("Ac Ad Kh Qs Jc")).strength(), 3326);
    assert_eq!(evaluate_five(&five("Ac Kd Qh Js 9c")).strength(), 6186);
    assert_eq!(evaluate_five(&five("7c 5d 4h 3s 2c")).strength(), 7462);
}

#[test]
fn holdem_best_hand_uses_board() {
    let hole: HoleCards = "As Ks".parse().unwrap();
    let board: Board = "Qs Js Ts".parse().unwrap();
    let rank = evaluate(&hole, &board).unwrap();
    assert_eq!(rank.category, Category::StraightFlush);
    assert_eq!(rank.strength(), 1);

    let hole: HoleCards = "2c 7d".parse().unwrap();
    let board: Board = "Ah Kh Qh Jh Th".parse().unwrap();
    assert_eq!(evaluate(&hole, &board).unwrap().strength(), 1);
}

#[test]
fn straight_flush_beats_flush_on_same_suit() {
    let hole: HoleCards = "9h 8h".parse().unwrap();
    let board: Board = "7h 6h 5h Ah Kh".parse().unwrap();
    assert_eq!(evaluate(&hole, &board).unwrap().category, Category::StraightFlush);
}

/// Walks all 2,598,960 five-card hands.
#[test]
fn exhaustive_category_counts() {
    let deck: Vec<Card> = (0..52).filter_map(Card::from_index).collect();
    let mut counts: BTreeMap<Category, u32> = BTreeMap::new();
    let mut strengths = HashSet::new();
    for ix in Combinations::<5>::new(52) {
        let e = evaluate_five(&[deck[ix[0]], deck[ix[1]], deck[ix[2]], deck[ix[3]], deck[ix[4]]]);
        *counts.entry(e.category).or_default() += 1;
        strengths.insert(e.strength());
    }

    assert_eq!(strengths.len(), 7462);
    assert_eq!(strengths.iter().min(), Some(&1));
    assert_eq!(strengths.iter().max(), Some(&7462));

    let expected = [
        (Category::StraightFlush, 40),
        (Category::FourOfAKind, 624),
        (Category::FullHouse, 3_744),
        (Category::Flush, 5_108),
        (Category::Straight, 10_200),
        (Category::ThreeOfAKind, 54_912),
        (Category::TwoPair, 123_552),
        (Category::Pair, 1_098_240),
        (Category::HighCard, 1_302_540),
    ];
    for (category, n) in expected {
        assert_eq!(counts.get(&category).copied(), Some(n), "{category}");
    }
}
