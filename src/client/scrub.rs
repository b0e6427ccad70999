use std::borrow::Cow;

const MAX_ERROR_CHARS: usize = 200;

/// Markers followed by a credential-like value.
const MARKERS: [&str; 10] = [
    "Authorization: Bearer ",
    "authorization: bearer ",
    "Bearer ",
    "\"token\":\"",
    "\"access_token\":\"",
    "\"password\":\"",
    "\"confirm_password\":\"",
    "token=",
    "password=",
    "eyJ",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+' | '/' | '=')
}

fn token_end(input: &str, from: usize) -> usize {
    let mut end = from;
    for (i, c) in input[from..].char_indices() {
        if is_secret_char(c) {
            end = from + i + c.len_utf8();
        } else {
            break;
        }
    }
    end
}

fn scrub_after_marker(scrubbed: &mut String, marker: &str) {
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let start = search_from + rel;
        let content_start = start + marker.len();
        let end = token_end(scrubbed, content_start);

        // Bare marker without a value.
        if end == content_start {
            search_from = content_start;
            continue;
        }

        let keep = if marker == "eyJ" { start } else { content_start };
        scrubbed.replace_range(keep..end, "[REDACTED]");
        search_from = keep + "[REDACTED]".len();
    }
}

/// Redact bearer tokens, JWTs and passwords from server-provided text.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    if !MARKERS.iter().any(|marker| input.contains(marker)) {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for marker in MARKERS {
        scrub_after_marker(&mut scrubbed, marker);
    }
    Cow::Owned(scrubbed)
}

/// Scrub secrets and cap the length of a message shown to the user.
pub fn sanitize_message(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input.trim());

    if scrubbed.chars().count() <= MAX_ERROR_CHARS {
        return scrubbed.into_owned();
    }

    let scrubbed = scrubbed.as_ref();
    let mut end = MAX_ERROR_CHARS;
    while end > 0 && !scrubbed.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}...", &scrubbed[..end])
}
