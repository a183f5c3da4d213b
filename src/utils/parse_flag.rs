/// Interpret an on/off setting such as `CARBONLENS_CONCURRENT`.
///
/// Blank or missing values fall back to `default`; anything other than
/// `1`, `true`, `yes` or `on` is off.
pub fn parse_flag(value: Option<&str>, default: bool) -> bool {
    let Some(raw) = value else {
        return default;
    };
    match raw.trim().to_lowercase().as_str() {
        "" => default,
        t => matches!(t, "1" | "true" | "yes" | "on"),
    }
}
