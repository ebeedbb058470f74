/// Current UTC time as an RFC 3339 string, the format the backend stores
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Today's UTC date as `YYYY-MM-DD`
pub fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}
