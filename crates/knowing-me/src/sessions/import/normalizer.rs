/// Collapse a question label for matching: strip a UTF-8 BOM, lowercase,
/// and squeeze runs of whitespace or underscores into single spaces so pack
/// keys and display texts both resolve.
pub(crate) fn normalize(raw: &str) -> String {
    let cleaned = raw.trim_start_matches('\u{feff}');
    cleaned
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(raw: &str) -> String {
    normalize(raw)
}
