use mpsz::*;

struct TestCase {
    desc: &'static str,
    notation: &'static str,
    closed: usize,
    melds: usize,
    total: usize,
}

const TESTDATA: &[TestCase] = &[
    TestCase {
        desc: "standard closed hand",
        notation: "123m456p789s11222z",
        closed: 14,
        melds: 0,
        total: 14,
    },
    TestCase {
        desc: "chi and pon",
        notation: "11z (123m<) (555p^)",
        closed: 2,
        melds: 2,
        total: 8,
    },
    TestCase {
        desc: "every kan shape",
        notation: "11m [2222p] (3333s>) (777+7z<)",
        closed: 2,
        melds: 3,
        total: 14,
    },
    TestCase {
        desc: "red fives mixed in",
        notation: "055m406p789s",
        closed: 9,
        melds: 0,
        total: 9,
    },
    TestCase {
        desc: "separators and pipes",
        notation: "123m_456p | 789s 11z",
        closed: 11,
        melds: 0,
        total: 11,
    },
    TestCase {
        desc: "self-drawn added kan",
        notation: "(111+1m)",
        closed: 0,
        melds: 1,
        total: 4,
    },
];

#[test]
fn parse_testdata() {
    for case in TESTDATA {
        let hand = parse_hand(case.notation)
            .unwrap_or_else(|err| panic!("failed to parse (case: {}): {err}", case.desc));

        assert_eq!(hand.closed_tiles.len(), case.closed, "closed (case: {})", case.desc);
        assert_eq!(hand.melds.len(), case.melds, "melds (case: {})", case.desc);
        assert_eq!(hand.total_tile_count(), case.total, "total (case: {})", case.desc);
    }
}

#[test]
fn meld_shapes_and_sources() {
    let hand = parse_hand("11z (123m<) (555p^) [7777z]").unwrap();

    assert_eq!(hand.melds[0].kind, MeldKind::Chi);
    assert_eq!(hand.melds[0].from, CallFrom::Left);
    assert_eq!(hand.melds[0].rotated, Some(0));

    assert_eq!(hand.melds[1].kind, MeldKind::Pon);
    assert_eq!(hand.melds[1].from, CallFrom::Across);
    assert_eq!(hand.melds[1].rotated, Some(1));

    assert_eq!(hand.melds[2].kind, MeldKind::KanClosed);
    assert_eq!(hand.melds[2].from, CallFrom::SelfDraw);
    assert_eq!(hand.melds[2].rotated, None);
}

#[test]
fn serializes_as_mpsz_strings() {
    let hand = parse_hand("12m (340s>)").unwrap();
    let json = serde_json::to_value(&hand).unwrap();

    assert_eq!(json["closed_tiles"], serde_json::json!(["1m", "2m"]));
    assert_eq!(json["melds"][0]["tiles"], serde_json::json!(["3s", "4s", "0s"]));
    assert_eq!(json["melds"][0]["kind"], "chi");
    assert_eq!(json["melds"][0]["from"], "right");
}

#[test]
fn full_block_roundtrip() {
    let block = parse_hand_block(
        "hand: 234m567p88s11z (123s<)\ntitle: Riichi nomi\ndora: 2m\nuradora: 7p\ndraw: 8s",
    )
    .unwrap();

    assert_eq!(block.title.as_deref(), Some("Riichi nomi"));
    assert_eq!(block.notation, "234m567p88s11z (123s<)");
    assert_eq!(block.hand.dora_indicators.len(), 1);
    assert_eq!(block.hand.uradora_indicators.len(), 1);
    assert_eq!(block.hand.draw_tile.map(|t| t.to_string()), Some("8s".to_owned()));
    assert_eq!(block.hand.total_tile_count(), 14);
}
