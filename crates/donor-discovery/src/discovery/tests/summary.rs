use super::common::*;
use crate::discovery::criteria::SearchCriteria;
use crate::discovery::domain::BloodGroup;
use crate::discovery::{rank_donors, DonorSummary};

#[test]
fn counts_cover_the_unfiltered_list() {
    let donors = vec![
        flagged(donor("d1", "A", BloodGroup::OPositive), true, true),
        flagged(donor("d2", "B", BloodGroup::APositive), true, true),
        flagged(donor("d3", "C", BloodGroup::APositive), false, true),
        flagged(donor("d4", "D", BloodGroup::BPositive), false, false),
        flagged(donor("d5", "E", BloodGroup::BPositive), false, false),
    ];
    let criteria = SearchCriteria {
        blood_group: Some(BloodGroup::OPositive),
        ..SearchCriteria::default()
    };

    let ranked = rank_donors(&donors, &criteria);

    assert_eq!(ranked.donors.len(), 1);
    assert_eq!(
        ranked.summary,
        DonorSummary {
            total: 5,
            available: 3,
            verified: 2,
            displayed: 1,
        }
    );
}

#[test]
fn empty_snapshot_produces_zeroed_summary() {
    let ranked = rank_donors(&[], &SearchCriteria::default());
    assert!(ranked.donors.is_empty());
    assert_eq!(ranked.summary, DonorSummary::default());
}

#[test]
fn report_projects_views_in_ranked_order() {
    let donors = roster();
    let criteria = SearchCriteria {
        district: Some("Chittagong".to_string()),
        ..SearchCriteria::default()
    };

    let ranked = rank_donors(&donors, &criteria);
    let before_gap_ends = chrono::NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
    let report = ranked.report(&criteria, before_gap_ends, &Default::default());

    assert_eq!(report.active_filters, 1);
    assert_eq!(report.summary.displayed, 3);
    let names: Vec<&str> = report.donors.iter().map(|view| view.name.as_str()).collect();
    assert_eq!(names, vec!["Ahmed Rahman", "Fatima Khan", "Rashida Begum"]);

    let ahmed = &report.donors[0];
    assert!(ahmed.nearby);
    assert_eq!(ahmed.score, 50);
    assert_eq!(ahmed.location, "Patiya, Chittagong");
    assert_eq!(ahmed.availability_label, "Available");
    assert_eq!(
        ahmed.next_eligible_date.map(|date| date.to_string()),
        Some("2024-05-10".to_string())
    );
    assert!(!ahmed.eligible_today);
    assert_eq!(ahmed.days_remaining, 9);
    assert!(report.donors[1].eligible_today);
    assert_eq!(report.donors[1].days_remaining, 0);
}
