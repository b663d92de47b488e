/// Characters accepted as pattern delimiters (`/re/`, `#re#`, `~re~`).
const DELIMITERS: [char; 3] = ['/', '#', '~'];

/// Trailing flags understood after a closing delimiter.
const FLAGS: &str = "imsxu";

/// Turn a user pattern into regex source.
///
/// Blank patterns yield `None`. Delimited patterns such as `/.*\/p$/i` lose
/// their delimiters and their flags become an inline group (`(?i)`); `u` is
/// accepted and dropped. Anything else is used verbatim.
pub(super) fn normalize_pattern(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    match strip_delimiters(trimmed) {
        Some((body, flags)) => {
            let inline: String = flags.chars().filter(|c| *c != 'u').collect();
            if inline.is_empty() {
                Some(body.to_string())
            } else {
                Some(format!("(?{inline}){body}"))
            }
        }
        None => Some(trimmed.to_string()),
    }
}

fn strip_delimiters(pattern: &str) -> Option<(&str, &str)> {
    let delimiter = pattern.chars().next().filter(|c| DELIMITERS.contains(c))?;
    let close = pattern.rfind(delimiter)?;
    if close == 0 {
        return None;
    }
    let flags = &pattern[close + 1..];
    if !flags.chars().all(|c| FLAGS.contains(c)) {
        return None;
    }
    let body = &pattern[1..close];
    if body.is_empty() {
        return None;
    }
    Some((body, flags))
}
