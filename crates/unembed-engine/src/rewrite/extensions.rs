use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Extensions treated as images when no configuration overrides them.
pub const DEFAULT_IMAGE_EXTENSIONS: &str = "png,jpg,jpeg,gif,bmp,svg,webp,ico";

/// Case-insensitive set of file extensions that classify a target as an image.
///
/// Built once from a comma-separated configuration string and rebuilt by the
/// owner whenever that string changes. Entries are stored lowercased, without
/// surrounding whitespace; empty entries are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    extensions: BTreeSet<String>,
}

impl ExtensionSet {
    /// Parses a comma-separated list such as `"png, JPG,,webp"`.
    pub fn parse(list: &str) -> Self {
        let extensions = list
            .to_lowercase()
            .split(',')
            .map(str::trim)
            .filter(|ext| !ext.is_empty())
            .map(str::to_owned)
            .collect();
        Self { extensions }
    }

    /// True if the bare `extension` (no leading dot) is in the set, ignoring case.
    pub fn contains(&self, extension: &str) -> bool {
        self.extensions.contains(&extension.to_lowercase())
    }

    /// An empty or missing extension is never an image.
    pub fn is_image(&self, extension: &str) -> bool {
        !extension.is_empty() && self.contains(extension)
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Extensions in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self::parse(DEFAULT_IMAGE_EXTENSIONS)
    }
}

impl FromStr for ExtensionSet {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for ExtensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        f.write_str(&joined.join(","))
    }
}
