//! Random fragment selection

use rand::seq::IndexedRandom;
use rand::Rng;
use thiserror::Error;

/// File extensions recognized as fragments when none are configured
pub const DEFAULT_EXTENSIONS: &[&str] = &["svg"];

/// Errors from picking a fragment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PickError {
    /// The layer has no eligible fragment files
    #[error("layer has no eligible fragments")]
    EmptyLayer,
}

/// Keep only file names carrying one of `extensions`, compared case-insensitively
pub fn fragment_candidates<S: AsRef<str>>(files: Vec<String>, extensions: &[S]) -> Vec<String> {
    files
        .into_iter()
        .filter(|name| has_fragment_extension(name, extensions))
        .collect()
}

/// Suffix match, so a bare `.svg` file name still counts as a fragment
fn has_fragment_extension<S: AsRef<str>>(name: &str, extensions: &[S]) -> bool {
    let name = name.to_ascii_lowercase();
    extensions.iter().any(|allowed| {
        let ext = allowed.as_ref().trim_start_matches('.').to_ascii_lowercase();
        name.strip_suffix(ext.as_str())
            .is_some_and(|rest| rest.ends_with('.'))
    })
}

/// Choose one candidate uniformly at random
pub fn pick<'a, R: Rng + ?Sized>(rng: &mut R, candidates: &'a [String]) -> Result<&'a str, PickError> {
    candidates
        .choose(rng)
        .map(String::as_str)
        .ok_or(PickError::EmptyLayer)
}
