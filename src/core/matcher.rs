//! Case-insensitive matching for command arguments.
//!
//! Command names dispatch case-sensitively, but argument values (module
//! names, trigger tags) are user-facing identifiers and match with ASCII
//! case folding. Zero-dependency.

/// Case-insensitive ASCII equality.
///
/// # Examples
///
/// ```
/// use bevy_world_console::core::eq_ignore_case;
///
/// assert!(eq_ignore_case("j01_Town", "J01_TOWN"));
/// assert!(!eq_ignore_case("j01_town", "j02_town"));
/// ```
#[inline]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Case-insensitive ASCII prefix test.
pub fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Check whether any candidate equals `value`, ignoring ASCII case.
pub fn contains_ignore_case<'a, I>(candidates: I, value: &str) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    candidates.into_iter().any(|c| eq_ignore_case(c, value))
}

/// Filter candidates to those starting with `partial`, ignoring ASCII case.
///
/// Candidate order is preserved: completion lists mirror the order the
/// provider reported.
pub fn filter_prefix<'a, I>(partial: &str, candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .filter(|c| starts_with_ignore_case(c, partial))
        .map(|c| c.to_string())
        .collect()
}
