use relative_path::RelativePath;

/// What a link target resolved to.
///
/// Produced by a [`Resolver`]; the engine only looks at these three fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub exists: bool,
    /// Lowercase extension without the leading dot; empty if the file has none.
    pub extension: String,
    /// Base name without extension, used to fill empty alt text.
    pub display_name: String,
}

impl ResolvedTarget {
    /// Describes an existing file at `path` (any `/`-separated relative path).
    pub fn from_path(path: &str) -> Self {
        let path = RelativePath::new(path);
        Self {
            exists: true,
            extension: path.extension().unwrap_or_default().to_lowercase(),
            display_name: path.file_stem().unwrap_or_default().to_owned(),
        }
    }
}

/// Maps a decoded link path to the resource it points at.
///
/// `context` identifies the document the link appears in, for relative
/// resolution. Implementations must be deterministic and side-effect free;
/// `None` means the target could not be located and the link is left alone.
pub trait Resolver {
    fn resolve(&self, link_path: &str, context: &str) -> Option<ResolvedTarget>;
}

impl<F> Resolver for F
where
    F: Fn(&str, &str) -> Option<ResolvedTarget>,
{
    fn resolve(&self, link_path: &str, context: &str) -> Option<ResolvedTarget> {
        self(link_path, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_path_splits_stem_and_lowercases_extension() {
        let target = ResolvedTarget::from_path("docs/Quarterly Report.PDF");
        assert!(target.exists);
        assert_eq!(target.extension, "pdf");
        assert_eq!(target.display_name, "Quarterly Report");
    }

    #[test]
    fn from_path_without_extension() {
        let target = ResolvedTarget::from_path("Makefile");
        assert_eq!(target.extension, "");
        assert_eq!(target.display_name, "Makefile");
    }

    #[test]
    fn from_path_keeps_inner_dots_in_stem() {
        let target = ResolvedTarget::from_path("archive.tar.gz");
        assert_eq!(target.extension, "gz");
        assert_eq!(target.display_name, "archive.tar");
    }

    #[test]
    fn closures_are_resolvers() {
        let resolver = |path: &str, _ctx: &str| Some(ResolvedTarget::from_path(path));
        let target = resolver.resolve("a/b.pdf", "note.md").unwrap();
        assert_eq!(target.display_name, "b");
    }
}
