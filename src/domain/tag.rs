use regex::Regex;

/// Whether a tag looks like a release (dot-separated numbers only)
pub fn is_release_tag(tag: &str) -> bool {
    if let Ok(re) = Regex::new(r"^([0-9]+\.)+[0-9]+$") {
        return re.is_match(tag);
    }
    false
}

/// Numeric components of a release tag, used for ordering
fn sort_key(tag: &str) -> Vec<u64> {
    tag.split('.')
        .map(|part| part.parse::<u64>().unwrap_or(u64::MAX))
        .collect()
}

/// Pick the highest release tag, comparing components numerically
///
/// Non-release tags (e.g. `v1.0`, `nightly`) are ignored.
pub fn latest_release_tag<I, S>(tags: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|t| t.as_ref().to_string())
        .filter(|t| is_release_tag(t))
        .max_by(|a, b| sort_key(a).cmp(&sort_key(b)))
}
