//! Word matching behind [`Collection::text_search`](crate::Collection::text_search).

use std::collections::BTreeSet;

/// Lowercased words of `text`, split on anything that is not alphanumeric.
pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
}

/// Distinct query words, in sorted order.
pub fn query_terms(query: &str) -> BTreeSet<String> {
    words(query).collect()
}

/// Number of query terms that occur as a word in any of `fields`.
pub fn score(terms: &BTreeSet<String>, fields: &[&str]) -> usize {
    if terms.is_empty() {
        return 0;
    }
    let present: BTreeSet<String> = fields.iter().flat_map(|field| words(*field)).collect();
    terms.intersection(&present).count()
}
