pub struct InlineEmbed;

impl InlineEmbed {
    pub const OPEN: &'static [u8; 2] = b"![";
    pub const ALT_CLOSE: u8 = b']';
    pub const TARGET_OPEN: u8 = b'(';
    pub const TARGET_CLOSE: u8 = b')';

    /// Plain markdown link, i.e. the embed without its `!`.
    pub fn demoted(alt_text: &str, target: &str) -> String {
        format!("[{alt_text}]({target})")
    }
}
