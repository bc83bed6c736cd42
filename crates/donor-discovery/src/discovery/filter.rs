use super::criteria::SearchCriteria;
use super::domain::DonorRecord;

/// Returns the donors satisfying every active predicate, in input order.
pub fn filter_donors<'a>(donors: &'a [DonorRecord], criteria: &SearchCriteria) -> Vec<&'a DonorRecord> {
    let query = criteria.text_query().map(str::to_lowercase);

    donors
        .iter()
        .filter(|donor| admits(donor, criteria, query.as_deref()))
        .collect()
}

/// Flag checks run before string comparisons; the free-text query runs last.
pub(crate) fn admits(donor: &DonorRecord, criteria: &SearchCriteria, query: Option<&str>) -> bool {
    if criteria.only_available && !donor.is_available {
        return false;
    }
    if criteria.only_verified && !donor.is_verified {
        return false;
    }
    if criteria
        .blood_group
        .is_some_and(|group| group != donor.blood_group)
    {
        return false;
    }
    if criteria
        .district_filter()
        .is_some_and(|district| district != donor.district)
    {
        return false;
    }
    if criteria
        .upazila_filter()
        .is_some_and(|upazila| upazila != donor.upazila)
    {
        return false;
    }

    match query {
        Some(needle) => matches_query(donor, needle),
        None => true,
    }
}

/// `needle` must already be lowercased.
fn matches_query(donor: &DonorRecord, needle: &str) -> bool {
    donor.contact.name.to_lowercase().contains(needle)
        || donor.contact.phone.contains(needle)
        || donor.blood_group.label().to_lowercase().contains(needle)
        || donor.district.to_lowercase().contains(needle)
}
