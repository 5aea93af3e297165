use crate::domain::model::DomainCount;

/// Sorts `domains` and collapses equal neighbours into (domain, count) pairs.
///
/// The result is strictly increasing by domain (byte order) and the counts
/// add up to `domains.len()`.
pub fn domain_count(mut domains: Vec<String>) -> Vec<DomainCount> {
    domains.sort_unstable();

    let mut counts = Vec::new();
    let mut domains = domains.into_iter();
    let Some(mut current) = domains.next() else {
        return counts;
    };
    let mut count = 1;

    for domain in domains {
        if domain == current {
            count += 1;
        } else {
            counts.push(DomainCount::new(std::mem::replace(&mut current, domain), count));
            count = 1;
        }
    }
    counts.push(DomainCount::new(current, count));

    counts
}
