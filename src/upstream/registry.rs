//! Canonicalization of configured upstream base URLs.

const MANIFEST_SUFFIX: &str = "/manifest.json";

/// Normalizes a raw upstream list into canonical base URLs.
///
/// Each entry is trimmed, has one trailing `/manifest.json` stripped (case
/// insensitive) and loses trailing slashes. Empty results are dropped and
/// duplicates collapse to their first occurrence, so configured order is
/// preserved. The function is idempotent: feeding its output back in yields
/// the same list.
pub fn normalize_bases(raw: &[String]) -> Vec<String> {
    let mut bases: Vec<String> = Vec::new();
    for entry in raw {
        let base = canonical_base(entry);
        if base.is_empty() {
            continue;
        }
        if !bases.contains(&base) {
            bases.push(base);
        }
    }
    bases
}

fn canonical_base(raw: &str) -> String {
    let mut base = raw.trim().trim_end_matches('/');
    // Strip to a fixed point so normalizing an already normalized value is
    // a no-op even for inputs like `x/manifest.json/manifest.json`.
    loop {
        let stripped = strip_manifest_suffix(base).trim_end_matches('/');
        if stripped == base {
            return base.to_string();
        }
        base = stripped;
    }
}

fn strip_manifest_suffix(base: &str) -> &str {
    let split = base.len().saturating_sub(MANIFEST_SUFFIX.len());
    if base.len() >= MANIFEST_SUFFIX.len()
        && base.is_char_boundary(split)
        && base[split..].eq_ignore_ascii_case(MANIFEST_SUFFIX)
    {
        &base[..split]
    } else {
        base
    }
}
