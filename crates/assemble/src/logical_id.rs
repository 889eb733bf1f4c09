// Logical ids of synthesized resources are derived from their construct
// paths, such as `Destination/EventsRole/Resource`. The human-readable
// portion drops hidden components, and is suffixed with a digest of the
// full path so that distinct paths never collide.

/// Path components which are hidden entirely.
const HIDDEN_ID: &str = "Default";
/// Path components which are hidden from the human-readable portion only.
const HIDDEN_FROM_HUMAN_ID: &str = "Resource";
const PATH_SEP: &str = "/";
const HASH_LEN: usize = 8;
const MAX_HUMAN_LEN: usize = 240;
const MAX_ID_LEN: usize = 255;

/// Map a construct path into its deterministic template logical id.
///
/// Panics if `path` is empty after hidden components are removed.
pub fn logical_id(path: &[&str]) -> String {
    let path: Vec<&str> = path.iter().copied().filter(|c| *c != HIDDEN_ID).collect();
    assert!(!path.is_empty(), "construct path must have a visible component");

    // A single component is used as-is, sans punctuation.
    if let [component] = path.as_slice() {
        let candidate = remove_non_alphanumeric(component);
        if candidate.len() <= MAX_ID_LEN {
            return candidate;
        }
    }

    let mut human: String = remove_dupes(&path)
        .into_iter()
        .filter(|c| *c != HIDDEN_FROM_HUMAN_ID)
        .map(remove_non_alphanumeric)
        .collect();
    human.truncate(MAX_HUMAN_LEN);

    human + &path_hash(&path)
}

fn path_hash(path: &[&str]) -> String {
    let digest = md5::compute(path.join(PATH_SEP));
    let hex = format!("{digest:x}");
    hex[..HASH_LEN].to_ascii_uppercase()
}

// Remove components which are suffixes of their preceding component,
// such as `Bucket/Bucket` or `VpcSubnet/Subnet`.
fn remove_dupes<'a>(path: &[&'a str]) -> Vec<&'a str> {
    let mut out: Vec<&'a str> = Vec::with_capacity(path.len());

    for &component in path {
        match out.last() {
            Some(last) if last.ends_with(component) => (),
            _ => out.push(component),
        }
    }
    out
}

fn remove_non_alphanumeric(s: &str) -> String {
    s.chars().filter(char::is_ascii_alphanumeric).collect()
}
