/// Case-insensitive label comparison used for category deduplication.
pub fn labels_match(left: &str, right: &str) -> bool {
    left.to_lowercase() == right.to_lowercase()
}
