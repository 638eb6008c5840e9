/// Semester ordinals
///
/// Converts a human-readable "<Season> <Year>" label into an integer that
/// sorts chronologically: any later year outranks any earlier year, and
/// within a year Winter < Spring < Summer < Fall.

/// Rank of each recognised season within a year
const SEASONS: [(&str, i64); 4] = [("Winter", 1), ("Spring", 2), ("Summer", 3), ("Fall", 4)];

/// Compute the sortable ordinal of a semester label
///
/// - Absent or empty labels return 0, before every real semester.
/// - Unknown seasons rank 0 within their year ("Foo 2023" -> 20230).
/// - A year without leading digits counts as year 0.
pub fn ordinal(label: Option<&str>) -> i64 {
    let label = match label {
        Some(label) if !label.is_empty() => label,
        _ => return 0,
    };

    let (season, year) = match label.split_once(' ') {
        Some((season, year)) => (season, Some(year)),
        None => (label, None),
    };

    let rank = season_rank(season);
    let year = year.and_then(parse_leading_int).unwrap_or(0);

    year.saturating_mul(10).saturating_add(rank)
}

fn season_rank(season: &str) -> i64 {
    SEASONS
        .iter()
        .find(|(name, _)| *name == season)
        .map(|(_, rank)| *rank)
        .unwrap_or(0)
}

/// Parse leading decimal digits the way a lenient integer reader would:
/// "2023", " 2023", "2023b" and "+2023" all give 2023.
fn parse_leading_int(token: &str) -> Option<i64> {
    let token = token.trim_start();
    let (negative, rest) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let value: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -value } else { value })
}
