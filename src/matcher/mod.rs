//! Use-case relevance ranking over extracted endpoints.

use crate::models::ApiEndpoint;

/// Keywords must be at least this long; shorter tokens ("the", "get", "a")
/// carry no signal.
const MIN_KEYWORD_LEN: usize = 4;

/// Filter and order endpoints by relevance to a free-text use case.
///
/// Scoring is substring matching of the use-case keywords against a blob of
/// path + description + method, one point per keyword. Zero-score endpoints
/// are dropped; ties keep extraction order. When the use case has no
/// qualifying keywords the input comes back unchanged.
///
/// Advisory only: callers may fall back to the unranked list when the
/// result is empty.
pub fn match_endpoints_to_use_case(endpoints: &[ApiEndpoint], use_case: &str) -> Vec<ApiEndpoint> {
    let keywords: Vec<String> = use_case
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.len() >= MIN_KEYWORD_LEN)
        .map(str::to_string)
        .collect();

    if keywords.is_empty() {
        return endpoints.to_vec();
    }

    let mut scored: Vec<(usize, &ApiEndpoint)> = endpoints
        .iter()
        .map(|endpoint| {
            let blob = format!(
                "{} {} {}",
                endpoint.path, endpoint.description, endpoint.method
            )
            .to_lowercase();
            let score = keywords
                .iter()
                .filter(|keyword| blob.contains(keyword.as_str()))
                .count();
            (score, endpoint)
        })
        .collect();

    // sort_by is stable, so equal scores keep extraction order
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .filter(|(score, _)| *score > 0)
        .map(|(_, endpoint)| endpoint.clone())
        .collect()
}
