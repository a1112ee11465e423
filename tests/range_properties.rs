use proptest::prelude::*;
use range_equity::cards::Rank;
use range_equity::keys::HandKey;
use range_equity::range::Range;

prop_compose! {
    fn any_rank()(i in 0usize..13) -> Rank {
        Rank::DESC[i]
    }
}

fn by_strength(a: Rank, b: Rank) -> (Rank, Rank) {
    if a.strength() <= b.strength() {
        (a, b)
    } else {
        (b, a)
    }
}

proptest! {
    #[test]
    fn pair_range_is_inclusive_and_order_free(a in any_rank(), b in any_rank()) {
        let range = Range::parse(&format!("{a}{a}-{b}{b}")).unwrap();
        let reversed = Range::parse(&format!("{b}{b}-{a}{a}")).unwrap();
        prop_assert_eq!(&range, &reversed);

        let (hi, lo) = by_strength(a, b);
        prop_assert_eq!(range.len(), lo.strength() - hi.strength() + 1);
        for r in &Rank::DESC[hi.strength()..=lo.strength()] {
            prop_assert!(range.contains(HandKey::Pair(*r)));
        }
    }

    #[test]
    fn open_range_stays_between_anchor_and_given_low(
        a in any_rank(),
        b in any_rank(),
        suffix in prop_oneof![Just(""), Just("s"), Just("o")],
    ) {
        prop_assume!(a != b);
        let range = Range::parse(&format!("{a}{b}{suffix}+")).unwrap();
        let (anchor, low) = by_strength(a, b);

        prop_assert!(!range.contains(HandKey::pair(anchor)));
        for key in range.iter() {
            let (high, key_low) = match key {
                HandKey::Suited { high, low } | HandKey::Offsuit { high, low } => (high, low),
                HandKey::Pair(_) => return Err(TestCaseError::fail("open range produced a pair")),
            };
            prop_assert_eq!(high, anchor);
            prop_assert!(key_low.strength() > anchor.strength());
            prop_assert!(key_low.strength() <= low.strength());
        }

        let span = low.strength() - anchor.strength();
        let expected = if suffix.is_empty() { 2 * span } else { span };
        prop_assert_eq!(range.len(), expected);
    }

    #[test]
    fn colon_anywhere_is_fatal(
        prefix in "[AKQJT2-9so+, \\-]{0,16}",
        rest in "[AKQJT2-9so+, \\-]{0,16}",
    ) {
        let input = format!("{prefix}:{rest}");
        prop_assert!(Range::parse(&input).is_err());
    }

    #[test]
    fn parse_then_serialize_reaches_a_fixed_point(s in "[AKQJT2-9so+, \\-]{0,48}") {
        let first = Range::parse(&s).unwrap();
        let text = first.to_text();
        let second = Range::parse(&text).unwrap();
        prop_assert_eq!(&second, &first);
        prop_assert_eq!(second.to_text(), text);
    }

    #[test]
    fn canonical_text_round_trips_any_key_set(
        cells in prop::collection::vec((0usize..13, 0usize..13), 0..24),
    ) {
        let range: Range = cells
            .into_iter()
            .filter_map(|(row, col)| HandKey::from_grid(row, col))
            .collect();
        let reparsed = Range::parse(&range.to_text()).unwrap();
        prop_assert_eq!(reparsed, range);
    }
}
