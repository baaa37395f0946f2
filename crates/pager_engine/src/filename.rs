use sha2::{Digest, Sha256};

const MAX_STEM_LEN: usize = 80;

/// Deterministic, filesystem-safe snapshot name for a listing URL:
/// `{host_and_path}--{short_hash(url)}.html`.
pub fn snapshot_filename(endpoint: &str) -> String {
    let stem = sanitize(strip_scheme(endpoint));
    let hash = short_hash(endpoint);
    format!("{stem}--{hash}.html")
}

fn strip_scheme(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    // Query strings vary per page and do not belong in the name.
    rest.split(['?', '#']).next().unwrap_or(rest)
}

fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_underscore = false;
    for c in input.chars() {
        let mapped = if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
            c
        } else {
            '_'
        };
        if mapped == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(mapped);
            prev_underscore = false;
        }
    }
    let mut stem = out.trim_matches(['_', '.', '-']).to_string();
    if stem.is_empty() {
        stem = "listing".to_string();
    }
    stem.truncate(MAX_STEM_LEN);
    stem
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
