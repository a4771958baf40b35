//! Name validation rules for lists and todos.
//!
//! Pure predicates over the name under test and the names already present.
//! They run immediately before a store mutation; the store itself trusts its
//! callers and performs no validation of its own.

/// Maximum name length for lists and todos, in characters.
const NAME_MAX_CHARS: usize = 100;

/// Check a prospective list name against the names already in the store.
///
/// Returns a user-facing error message, or `None` when the name is valid.
/// Uniqueness is a case-sensitive exact match.
pub fn validate_list_name<'a, I>(name: &str, existing_names: I) -> Option<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    if !length_in_range(name) {
        Some("The list name must be between 1 and 100 characters")
    } else if is_taken(name, existing_names) {
        Some("The list name must be unique")
    } else {
        None
    }
}

/// Check a prospective todo name against the other todos of the same list.
pub fn validate_todo_name<'a, I>(name: &str, existing_names: I) -> Option<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    if !length_in_range(name) {
        Some("The todo name must be between 1 and 100 characters")
    } else if is_taken(name, existing_names) {
        Some("The todo name must be unique")
    } else {
        None
    }
}

fn length_in_range(name: &str) -> bool {
    (1..=NAME_MAX_CHARS).contains(&name.chars().count())
}

fn is_taken<'a, I>(name: &str, existing_names: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    existing_names.into_iter().any(|existing| existing == name)
}
