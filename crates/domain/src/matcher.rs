//! Query-name matching against record names.
//!
//! Wildcards are suffix matches on the raw string, not on label boundaries:
//! `*foo.test.com` matches `evilfoo.test.com`, and `*.test.com` matches
//! `a.b.test.com` but not `test.com`.

/// Lower-cases `name` and strips a single trailing dot.
pub fn normalize_name(name: &str) -> String {
    let trimmed = name.strip_suffix('.').unwrap_or(name);
    trimmed.to_lowercase()
}

/// Whether `qname` is covered by the record name `rule`.
pub fn matches(qname: &str, rule: &str) -> bool {
    let qname = normalize_name(qname);
    let rule = normalize_name(rule);

    if qname == rule {
        return true;
    }

    match rule.strip_prefix('*') {
        Some(suffix) => qname.ends_with(suffix),
        None => false,
    }
}

/// Exact comparison after normalisation; wildcards are compared literally.
pub fn same_name(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}
