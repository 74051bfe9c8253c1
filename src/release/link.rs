//! RFC 8288 `Link` header parsing for API pagination.

/// Returns the target of the `rel="next"` entry in a `Link` header, if any.
///
/// GitHub sends entries like `<https://api.github.com/...&page=2>; rel="next"`.
/// Relation values may be unquoted or carry several space-separated relations.
#[must_use]
pub fn next_page_url(link_header: &str) -> Option<String> {
    link_header.split(',').find_map(|entry| {
        let (target, params) = parse_link_entry(entry)?;
        params
            .iter()
            .any(|(key, value)| {
                key.eq_ignore_ascii_case("rel")
                    && value
                        .split_ascii_whitespace()
                        .any(|rel| rel.eq_ignore_ascii_case("next"))
            })
            .then(|| target.to_string())
    })
}

fn parse_link_entry(entry: &str) -> Option<(&str, Vec<(&str, &str)>)> {
    let entry = entry.trim();
    let rest = entry.strip_prefix('<')?;
    let (target, params) = rest.split_once('>')?;
    let params = params
        .split(';')
        .filter_map(|param| {
            let (key, value) = param.trim().split_once('=')?;
            Some((key.trim(), value.trim().trim_matches('"')))
        })
        .collect();
    Some((target.trim(), params))
}
