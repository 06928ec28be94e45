//! Title normalization

/// Substring rewrites applied in order to the lowercased title.
///
/// Each rule sees the output of the rules before it.
const TITLE_REWRITES: &[(&str, &str)] = &[
    ("senior", "sr"),
    ("jr.", "jr"),
    ("junior", "jr"),
    ("software developer", "software engineer"),
];

/// Normalizes a job title
///
/// Lowercases the trimmed title, applies the rewrite table in order, then
/// capitalizes each whitespace-separated word.
///
/// # Example
///
/// ```
/// use job_harvest::extract::normalize_title;
///
/// assert_eq!(normalize_title("Senior Software Developer"), "Sr Software Engineer");
/// ```
pub fn normalize_title(title: &str) -> String {
    let mut normalized = title.trim().to_lowercase();
    for (from, to) in TITLE_REWRITES {
        normalized = normalized.replace(from, to);
    }

    normalized
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
