use super::common::*;
use crate::discovery::criteria::{SearchCriteria, SortMode};
use crate::discovery::domain::{BloodGroup, DonorRecord};
use crate::discovery::{filter_donors, sort_donors};

fn sorted(donors: &[DonorRecord], criteria: &SearchCriteria) -> Vec<String> {
    let mut refs: Vec<&DonorRecord> = donors.iter().collect();
    sort_donors(&mut refs, criteria);
    ids(&refs)
}

fn mode(sort_mode: SortMode) -> SearchCriteria {
    SearchCriteria {
        sort_mode,
        only_available: false,
        ..SearchCriteria::default()
    }
}

#[test]
fn relevance_puts_verified_then_available_first() {
    let donors = vec![
        flagged(donor("neither", "A", BloodGroup::OPositive), false, false),
        flagged(donor("available", "B", BloodGroup::OPositive), false, true),
        flagged(donor("verified", "C", BloodGroup::OPositive), true, false),
        flagged(donor("both", "D", BloodGroup::OPositive), true, true),
    ];

    assert_eq!(
        sorted(&donors, &mode(SortMode::Relevance)),
        vec!["both", "verified", "available", "neither"]
    );
}

#[test]
fn relevance_uses_location_score_after_flags() {
    let donors = vec![
        located(donor("elsewhere", "A", BloodGroup::OPositive), "Dhaka", "Dhamrai"),
        located(donor("local", "B", BloodGroup::OPositive), "Dhaka", "Savar"),
    ];
    let criteria = SearchCriteria {
        upazila: Some("Savar".to_string()),
        ..mode(SortMode::Relevance)
    };

    assert_eq!(sorted(&donors, &criteria), vec!["local", "elsewhere"]);
}

#[test]
fn relevance_ties_with_no_local_match_keep_input_order() {
    let donors = vec![
        flagged(donor("first", "Zara", BloodGroup::OPositive), true, true),
        flagged(donor("second", "Abid", BloodGroup::OPositive), true, true),
    ];
    let criteria = SearchCriteria {
        district: Some("Sylhet".to_string()),
        ..mode(SortMode::Relevance)
    };

    assert_eq!(sorted(&donors, &criteria), vec!["first", "second"]);
}

#[test]
fn nearest_ranks_by_score_then_verification() {
    let donors = vec![
        flagged(
            located(donor("far-verified", "A", BloodGroup::OPositive), "Sylhet", "Zakiganj"),
            true,
            true,
        ),
        located(donor("district", "B", BloodGroup::OPositive), "Dhaka", "Dhamrai"),
        located(donor("local", "C", BloodGroup::OPositive), "Dhaka", "Savar"),
        flagged(
            located(donor("district-verified", "D", BloodGroup::OPositive), "Dhaka", "Keraniganj"),
            true,
            true,
        ),
    ];
    let criteria = SearchCriteria {
        district: Some("Dhaka".to_string()),
        upazila: Some("Savar".to_string()),
        ..mode(SortMode::Nearest)
    };

    assert_eq!(
        sorted(&donors, &criteria),
        vec!["local", "district-verified", "district", "far-verified"]
    );
}

#[test]
fn newest_orders_by_registration_descending() {
    let mut old = donor("old", "A", BloodGroup::OPositive);
    old.created_at = timestamp("2022-01-01T00:00:00Z");
    let mut recent = donor("recent", "B", BloodGroup::OPositive);
    recent.created_at = timestamp("2024-05-20T00:00:00Z");
    let mut same_day_first = donor("tie-1", "C", BloodGroup::OPositive);
    same_day_first.created_at = timestamp("2023-06-01T00:00:00Z");
    let mut same_day_second = donor("tie-2", "D", BloodGroup::OPositive);
    same_day_second.created_at = timestamp("2023-06-01T00:00:00Z");

    let donors = vec![old, same_day_first, recent, same_day_second];

    assert_eq!(
        sorted(&donors, &mode(SortMode::Newest)),
        vec!["recent", "tie-1", "tie-2", "old"]
    );
}

#[test]
fn eligibility_puts_first_time_donors_ahead() {
    let mut recent = donor("recent", "A", BloodGroup::OPositive);
    recent.last_donation_date = Some(timestamp("2024-05-01T00:00:00Z"));
    let mut long_ago = donor("long-ago", "B", BloodGroup::OPositive);
    long_ago.last_donation_date = Some(timestamp("2021-02-10T00:00:00Z"));
    // Dated before the Unix epoch; still ranks after every first-time donor.
    let mut ancient = donor("ancient", "C", BloodGroup::OPositive);
    ancient.last_donation_date = Some(timestamp("1969-12-01T00:00:00Z"));
    let never_a = donor("never-a", "D", BloodGroup::OPositive);
    let never_b = donor("never-b", "E", BloodGroup::OPositive);

    let donors = vec![recent, never_a, long_ago, ancient, never_b];

    assert_eq!(
        sorted(&donors, &mode(SortMode::Eligibility)),
        vec!["never-a", "never-b", "ancient", "long-ago", "recent"]
    );
}

#[test]
fn name_sort_is_case_insensitive_and_stable() {
    let donors = vec![
        donor("z", "zahid", BloodGroup::OPositive),
        donor("b-upper", "Begum", BloodGroup::OPositive),
        donor("a", "alam", BloodGroup::OPositive),
        donor("b-lower", "begum", BloodGroup::OPositive),
        donor("nameless", "", BloodGroup::OPositive),
    ];

    assert_eq!(
        sorted(&donors, &mode(SortMode::Name)),
        vec!["nameless", "a", "b-upper", "b-lower", "z"]
    );
}

/// Two donors that disagree on every field a sort could wrongly fall back to:
/// id, name, blood group, upazila, registration, and last donation all order
/// the second donor ahead of the first.
fn tied_pair() -> (DonorRecord, DonorRecord) {
    let mut first = located(
        flagged(donor("z-first", "Zara Islam", BloodGroup::OPositive), true, true),
        "Chittagong",
        "Raozan",
    );
    first.created_at = timestamp("2023-01-01T00:00:00Z");
    first.last_donation_date = Some(timestamp("2024-04-01T00:00:00Z"));

    let mut second = located(
        flagged(donor("a-second", "Abdul Karim", BloodGroup::ANegative), true, true),
        "Chittagong",
        "Patiya",
    );
    second.created_at = timestamp("2024-05-01T00:00:00Z");
    second.last_donation_date = None;

    (first, second)
}

#[test]
fn relevance_ties_keep_input_order() {
    let (first, second) = tied_pair();
    let outsider = flagged(donor("m-outsider", "Mina", BloodGroup::OPositive), false, true);

    assert_eq!(
        sorted(&[outsider, first, second], &mode(SortMode::Relevance)),
        vec!["z-first", "a-second", "m-outsider"]
    );
}

#[test]
fn nearest_ties_keep_input_order() {
    let (first, mut second) = tied_pair();
    second.is_available = false;
    let outsider = flagged(donor("m-outsider", "Mina", BloodGroup::OPositive), true, true);
    let criteria = SearchCriteria {
        district: Some("Chittagong".to_string()),
        ..mode(SortMode::Nearest)
    };

    assert_eq!(
        sorted(&[outsider, first, second], &criteria),
        vec!["z-first", "a-second", "m-outsider"]
    );
}

#[test]
fn newest_ties_keep_input_order() {
    let (mut first, mut second) = tied_pair();
    first.created_at = timestamp("2024-02-02T08:00:00Z");
    second.created_at = first.created_at;
    second.is_verified = false;
    let mut outsider = donor("m-outsider", "Mina", BloodGroup::OPositive);
    outsider.created_at = timestamp("2024-06-01T00:00:00Z");

    assert_eq!(
        sorted(&[first, second, outsider], &mode(SortMode::Newest)),
        vec!["m-outsider", "z-first", "a-second"]
    );
}

#[test]
fn eligibility_ties_keep_input_order() {
    let (mut first, mut second) = tied_pair();
    first.last_donation_date = Some(timestamp("2024-01-10T00:00:00Z"));
    second.last_donation_date = first.last_donation_date;
    let outsider = donor("m-outsider", "Mina", BloodGroup::OPositive);

    assert_eq!(
        sorted(&[first, second, outsider], &mode(SortMode::Eligibility)),
        vec!["m-outsider", "z-first", "a-second"]
    );
}

#[test]
fn name_ties_keep_input_order() {
    let (mut first, mut second) = tied_pair();
    first.contact.name = "rahim uddin".to_string();
    second.contact.name = "Rahim Uddin".to_string();
    let outsider = donor("m-outsider", "Abir", BloodGroup::OPositive);

    assert_eq!(
        sorted(&[first, second, outsider], &mode(SortMode::Name)),
        vec!["m-outsider", "z-first", "a-second"]
    );
}

#[test]
fn every_mode_keeps_identical_donors_in_input_order() {
    let donors: Vec<DonorRecord> = (0..6)
        .map(|index| donor(&format!("same-{index}"), "Same Name", BloodGroup::OPositive))
        .collect();
    let expected: Vec<String> = donors.iter().map(|donor| donor.id.0.clone()).collect();

    for sort_mode in SortMode::ordered() {
        assert_eq!(sorted(&donors, &mode(sort_mode)), expected, "{sort_mode:?}");
    }
}

#[test]
fn repeated_ranking_is_deterministic() {
    let donors = roster();
    for sort_mode in SortMode::ordered() {
        let criteria = mode(sort_mode);
        let mut first = filter_donors(&donors, &criteria);
        sort_donors(&mut first, &criteria);
        let mut second = filter_donors(&donors, &criteria);
        sort_donors(&mut second, &criteria);

        assert_eq!(first, second, "{sort_mode:?}");
    }
}

#[test]
fn sorting_empty_slice_is_a_no_op() {
    let mut empty: Vec<&DonorRecord> = Vec::new();
    for sort_mode in SortMode::ordered() {
        sort_donors(&mut empty, &mode(sort_mode));
        assert!(empty.is_empty());
    }
}
