use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Lowercases, trims and collapses runs of whitespace.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Identity of a track across providers: normalized title and artist.
pub fn track_key(title: &str, artist: &str) -> (String, String) {
    (normalize(title), normalize(artist))
}

/// Parses an ISO-8601 duration such as `PT1H3M25S` into milliseconds.
///
/// Only the day and time designators YouTube emits are understood.
pub fn parse_iso8601_duration(value: &str) -> Option<u64> {
    let rest = value.strip_prefix('P')?;
    let mut total_secs: u64 = 0;
    let mut number = String::new();
    let mut in_time = false;
    let mut seen_any = false;

    for c in rest.chars() {
        match c {
            'T' => in_time = true,
            '0'..='9' => number.push(c),
            unit => {
                let n: u64 = number.parse().ok()?;
                number.clear();
                let factor = match (unit, in_time) {
                    ('D', false) => 86_400,
                    ('W', false) => 604_800,
                    ('H', true) => 3_600,
                    ('M', true) => 60,
                    ('S', true) => 1,
                    _ => return None,
                };
                total_secs += n * factor;
                seen_any = true;
            }
        }
    }

    if !number.is_empty() || !seen_any {
        return None;
    }

    Some(total_secs * 1000)
}

/// Formats milliseconds as `m:ss`.
pub fn format_duration(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}
