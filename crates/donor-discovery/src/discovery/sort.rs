use std::cmp::Reverse;

use super::criteria::{SearchCriteria, SortMode};
use super::domain::DonorRecord;
use super::scoring::relevance_score;

/// Orders donors in place according to `criteria.sort_mode`.
///
/// Every branch is a stable sort: donors with equal keys keep their input order.
pub fn sort_donors(donors: &mut [&DonorRecord], criteria: &SearchCriteria) {
    match criteria.sort_mode {
        SortMode::Relevance => donors.sort_by_cached_key(|donor| {
            (
                Reverse(donor.is_verified),
                Reverse(donor.is_available),
                Reverse(relevance_score(donor, criteria)),
            )
        }),
        SortMode::Nearest => donors.sort_by_cached_key(|donor| {
            (
                Reverse(relevance_score(donor, criteria)),
                Reverse(donor.is_verified),
            )
        }),
        SortMode::Newest => donors.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        // `None` orders before any `Some`, so first-time donors lead.
        SortMode::Eligibility => donors.sort_by_key(|donor| donor.last_donation_date),
        SortMode::Name => donors.sort_by_cached_key(|donor| donor.contact.name.to_lowercase()),
    }
}
