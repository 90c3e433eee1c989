//! Majority vote over per-locale signatures of one key.

use std::collections::BTreeMap;

use crate::core::ResourceFile;

/// Outcome of a vote: the canonical signature, who holds it, and who does not.
#[derive(Debug)]
pub struct Consensus<'a, S> {
    pub majority: S,
    pub majority_files: Vec<&'a ResourceFile>,
    pub dissenters: Vec<(&'a ResourceFile, S)>,
}

/// Group files by signature and pick the canonical group.
///
/// The largest group wins. Among equally large groups the one holding the
/// root file wins, then the smallest signature. Returns `None` with fewer
/// than two participants.
pub fn find_consensus<'a, S>(votes: Vec<(&'a ResourceFile, S)>) -> Option<Consensus<'a, S>>
where
    S: Ord + Clone,
{
    if votes.len() < 2 {
        return None;
    }

    let mut groups: BTreeMap<S, Vec<&'a ResourceFile>> = BTreeMap::new();
    for (file, signature) in votes {
        groups.entry(signature).or_default().push(file);
    }

    let holds_root = |files: &[&ResourceFile]| files.iter().any(|f| f.is_root());
    // the reversed signature order makes the smallest signature win a tie
    let majority = groups
        .iter()
        .max_by(|(sig_a, files_a), (sig_b, files_b)| {
            files_a
                .len()
                .cmp(&files_b.len())
                .then(holds_root(files_a.as_slice()).cmp(&holds_root(files_b.as_slice())))
                .then(sig_b.cmp(sig_a))
        })
        .map(|(signature, _)| signature.clone())?;

    let majority_files = groups.remove(&majority).unwrap_or_default();
    let dissenters = groups
        .into_iter()
        .flat_map(|(signature, files)| {
            files
                .into_iter()
                .map(move |file| (file, signature.clone()))
        })
        .collect();

    Some(Consensus {
        majority,
        majority_files,
        dissenters,
    })
}
