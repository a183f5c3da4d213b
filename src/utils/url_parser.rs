/// Host part of an endpoint URL, used to label where estimates come from.
pub fn hostname_from_url(u: &str) -> String {
    let s = u.trim();
    let s = match s.find("://") {
        Some(idx) => &s[idx + 3..],
        None => s,
    };
    s.split(['/', '?']).next().unwrap_or_default().to_string()
}
