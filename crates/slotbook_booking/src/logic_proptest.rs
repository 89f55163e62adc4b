//! Property tests for the slot-accounting functions.
//!
//! The invariant under test everywhere: whatever mutation runs, a day's hour
//! list stays catalogue-sorted and free of surprises like duplicate pushes.

use crate::logic::{claim_confirmed_hour, restore_denied_hour, restore_slot};
use proptest::prelude::*;
use slotbook_common::models::{HourBlock, HourCatalogue};

fn catalogue_labels() -> Vec<String> {
    slotbook_config::default_hour_catalogue()
}

fn is_catalogue_sorted(catalogue: &HourCatalogue, blocks: &[HourBlock]) -> bool {
    let positions: Vec<i64> = blocks
        .iter()
        .map(|b| catalogue.position(&b.hour).map(|p| p as i64).unwrap_or(-1))
        .collect();
    positions.windows(2).all(|w| w[0] <= w[1])
}

fn arb_hour_list() -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(catalogue_labels(), 0..=5).prop_shuffle()
}

fn arb_label() -> impl Strategy<Value = String> {
    prop::sample::select(catalogue_labels())
}

proptest! {
    #[test]
    fn confirm_never_leaves_the_confirmed_label_behind(
        labels in arb_hour_list(),
        confirmed in arb_label(),
    ) {
        let catalogue = HourCatalogue::default();
        let mut hours: Vec<HourBlock> =
            labels.iter().map(HourBlock::available).collect();

        claim_confirmed_hour(&mut hours, &confirmed, &catalogue);

        prop_assert!(hours.iter().all(|b| b.hour != confirmed));
        prop_assert!(is_catalogue_sorted(&catalogue, &hours));
    }

    #[test]
    fn confirm_on_a_list_that_empties_repopulates_the_rest(
        confirmed in arb_label(),
    ) {
        let catalogue = HourCatalogue::default();
        let mut hours = vec![HourBlock::available(confirmed.clone())];

        claim_confirmed_hour(&mut hours, &confirmed, &catalogue);

        prop_assert_eq!(hours.len(), catalogue.labels().len() - 1);
        prop_assert!(hours.iter().all(|b| b.enabled));
        prop_assert!(is_catalogue_sorted(&catalogue, &hours));
    }

    #[test]
    fn deny_is_idempotent(
        labels in arb_hour_list(),
        denied in arb_label(),
    ) {
        let catalogue = HourCatalogue::default();
        let mut once: Vec<HourBlock> =
            labels.iter().map(HourBlock::available).collect();

        restore_denied_hour(&mut once, &denied, &catalogue);
        let mut twice = once.clone();
        restore_denied_hour(&mut twice, &denied, &catalogue);

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn restore_never_duplicates_a_label(
        labels in arb_hour_list(),
        released in arb_label(),
    ) {
        let catalogue = HourCatalogue::default();
        let mut hours: Vec<HourBlock> =
            labels.iter().map(HourBlock::available).collect();

        restore_slot(&mut hours, &released, &catalogue);

        let count = hours.iter().filter(|b| b.hour == released).count();
        prop_assert_eq!(count, 1);
        prop_assert!(is_catalogue_sorted(&catalogue, &hours));
    }
}
