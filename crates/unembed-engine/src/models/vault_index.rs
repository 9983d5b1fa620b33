use std::collections::BTreeMap;

use relative_path::{RelativePath, RelativePathBuf};

use crate::rewrite::{ResolvedTarget, Resolver};

/// Extension implied by a link that names a note by its bare name.
const NOTE_EXTENSION: &str = "md";

/// A file known to the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultEntry {
    pub relative_path: RelativePathBuf,
    pub target: ResolvedTarget,
}

/// In-memory index of every file in a vault, used to resolve link targets.
///
/// Uses BTreeMap so lookups that can match several files pick the same one
/// every time.
#[derive(Debug, Default, Clone)]
pub struct VaultIndex {
    files: BTreeMap<RelativePathBuf, VaultEntry>,
}

impl VaultIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single file to the index
    pub fn add_file(&mut self, relative_path: impl AsRef<RelativePath>) {
        let relative_path = relative_path.as_ref().normalize();
        let target = ResolvedTarget::from_path(relative_path.as_str());
        self.files.insert(
            relative_path.clone(),
            VaultEntry {
                relative_path,
                target,
            },
        );
    }

    /// Add multiple files in a batch
    pub fn add_files<P: AsRef<RelativePath>>(&mut self, paths: impl IntoIterator<Item = P>) {
        for path in paths {
            self.add_file(path);
        }
    }

    /// Remove a single file from the index
    ///
    /// Returns the removed entry if it existed
    pub fn remove_file(&mut self, relative_path: impl AsRef<RelativePath>) -> Option<VaultEntry> {
        self.files.remove(&relative_path.as_ref().normalize())
    }

    /// Get all files, sorted by path
    pub fn files(&self) -> impl Iterator<Item = &VaultEntry> {
        self.files.values()
    }

    pub fn contains(&self, relative_path: impl AsRef<RelativePath>) -> bool {
        self.files.contains_key(&relative_path.as_ref().normalize())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Finds the file a link points at, from the note at `context`.
    ///
    /// `#heading` and `|display` suffixes are ignored. Lookup order: relative
    /// to the linking note's folder, then from the vault root, then by
    /// trailing path anywhere in the vault (shallowest wins). Any link that
    /// misses literally may also name a `.md` note, dots in the name included.
    pub fn lookup(&self, link: &str, context: &str) -> Option<&VaultEntry> {
        let link = strip_link_suffixes(link);
        if link.is_empty() {
            return None;
        }

        let folder = RelativePath::new(context)
            .parent()
            .unwrap_or(RelativePath::new(""));
        let candidates = [folder.join_normalized(link), RelativePath::new(link).normalize()];
        for candidate in &candidates {
            if let Some(entry) = self.exact(candidate) {
                return Some(entry);
            }
        }

        self.by_trailing_path(link)
    }

    fn exact(&self, path: &RelativePath) -> Option<&VaultEntry> {
        self.files
            .get(path)
            .or_else(|| self.files.get(&as_note(path)))
    }

    fn by_trailing_path(&self, link: &str) -> Option<&VaultEntry> {
        let link = RelativePath::new(link).normalize();
        let note = as_note(&link);

        self.files
            .values()
            .filter(|entry| {
                ends_with_path(&entry.relative_path, &link)
                    || ends_with_path(&entry.relative_path, &note)
            })
            .min_by_key(|entry| entry.relative_path.components().count())
    }
}

impl Resolver for VaultIndex {
    fn resolve(&self, link_path: &str, context: &str) -> Option<ResolvedTarget> {
        self.lookup(link_path, context)
            .map(|entry| entry.target.clone())
    }
}

/// `path` with the note extension appended, so `v1.2 notes` names `v1.2 notes.md`.
fn as_note(path: &RelativePath) -> RelativePathBuf {
    RelativePathBuf::from(format!("{path}.{NOTE_EXTENSION}"))
}

/// Drops `#subpath` and `|display text` from a link and trims it.
fn strip_link_suffixes(link: &str) -> &str {
    let end = link.find(['#', '|']).unwrap_or(link.len());
    link[..end].trim().trim_start_matches('/')
}

/// Component-wise, ASCII case-insensitive suffix match.
fn ends_with_path(path: &RelativePath, suffix: &RelativePath) -> bool {
    let path: Vec<&str> = path.iter().collect();
    let suffix: Vec<&str> = suffix.iter().collect();
    if suffix.is_empty() || suffix.len() > path.len() {
        return false;
    }
    path[path.len() - suffix.len()..]
        .iter()
        .zip(&suffix)
        .all(|(a, b)| a.eq_ignore_ascii_case(b))
}
