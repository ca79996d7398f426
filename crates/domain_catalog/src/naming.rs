//! Name normalization used by duplicate detection

/// Returns the normalized form of a name: surrounding whitespace removed, upper-cased
pub fn name_key(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Returns true when two names normalize to the same key
pub fn same_name(left: &str, right: &str) -> bool {
    name_key(left) == name_key(right)
}
