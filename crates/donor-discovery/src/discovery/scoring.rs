use super::criteria::SearchCriteria;
use super::domain::DonorRecord;

const UPAZILA_MATCH: u32 = 100;
const DISTRICT_MATCH: u32 = 50;
const VERIFIED_DEFAULT: u32 = 20;
const AVAILABLE_DEFAULT: u32 = 30;

/// Additive ranking priority used by the score-based sort modes.
///
/// Location matches dominate. Status flags only contribute when the searcher
/// has not narrowed by district or upazila.
pub fn relevance_score(donor: &DonorRecord, criteria: &SearchCriteria) -> u32 {
    let mut score = 0;

    if criteria
        .upazila_filter()
        .is_some_and(|upazila| upazila == donor.upazila)
    {
        score += UPAZILA_MATCH;
    }

    if criteria
        .district_filter()
        .is_some_and(|district| district == donor.district)
    {
        score += DISTRICT_MATCH;
    }

    if !criteria.narrows_location() {
        if donor.is_verified {
            score += VERIFIED_DEFAULT;
        }
        if donor.is_available {
            score += AVAILABLE_DEFAULT;
        }
    }

    score
}

/// Whether the donor sits in the district or upazila the searcher asked for.
pub fn location_match(donor: &DonorRecord, criteria: &SearchCriteria) -> bool {
    criteria
        .district_filter()
        .is_some_and(|district| district == donor.district)
        || criteria
            .upazila_filter()
            .is_some_and(|upazila| upazila == donor.upazila)
}
