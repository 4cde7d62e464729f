//! Property-based tests for the claimable byte reservoir.

use proptest::prelude::*;

use reservoir::Reservoir;

//
// -----------------------------------------------------------------------------
// Cursor invariants
// -----------------------------------------------------------------------------

proptest! {
    /// Interleaved writes and claims never push the claim cursor past the
    /// write cursor, and every claim returns bytes in arrival order.
    #[test]
    fn prop_interleaved_ops_hold_invariants(
        chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..16), 1..12),
        takes in prop::collection::vec(any::<prop::sample::Index>(), 1..12),
    ) {
        let mut res = Reservoir::new();
        let mut model: Vec<u8> = Vec::new();
        let mut consumed = 0usize;

        let mut takes = takes.into_iter();
        for chunk in &chunks {
            res.write(chunk);
            model.extend_from_slice(chunk);

            prop_assert_eq!(res.total_written(), model.len());
            prop_assert!(res.claimed() <= res.total_written());

            if let Some(take) = takes.next() {
                let amount = take.index(res.unclaimed() + 1);
                let got = res.claim(amount).to_vec();
                prop_assert_eq!(&got[..], &model[consumed..consumed + amount]);
                consumed += amount;

                prop_assert!(res.claimed() <= res.total_written());
                prop_assert_eq!(res.claimed(), consumed);
                prop_assert_eq!(res.unclaimed(), model.len() - consumed);
            }
        }
    }
}

proptest! {
    /// Draining the reservoir in arbitrary claim sizes reproduces the
    /// written bytes exactly once, in order.
    #[test]
    fn prop_drain_reproduces_input(
        data in prop::collection::vec(any::<u8>(), 0..256),
        takes in prop::collection::vec(1usize..32, 0..64),
    ) {
        let mut res = Reservoir::new();
        res.write(&data);

        let mut drained: Vec<u8> = Vec::new();
        for take in takes {
            let amount = take.min(res.unclaimed());
            drained.extend_from_slice(res.claim(amount));
        }
        let rest = res.unclaimed();
        drained.extend_from_slice(res.claim(rest));

        prop_assert_eq!(drained, data);
        prop_assert!(res.is_drained());
    }
}

proptest! {
    /// A failed-attempt pattern (check, then decline to claim) leaves the
    /// cursor exactly where it was.
    #[test]
    fn prop_unclaimed_check_is_pure(data in prop::collection::vec(any::<u8>(), 0..64)) {
        let mut res = Reservoir::new();
        res.write(&data);
        let before = (res.total_written(), res.claimed(), res.unclaimed());
        for _ in 0..3 {
            let _ = res.unclaimed();
        }
        prop_assert_eq!((res.total_written(), res.claimed(), res.unclaimed()), before);
    }
}
