pub struct WikiEmbed;

impl WikiEmbed {
    pub const OPEN: &'static [u8; 3] = b"![[";
    pub const CLOSE: &'static [u8; 2] = b"]]";
    /// The target may contain anything except this byte.
    pub const TARGET_STOP: u8 = b']';

    /// Plain wiki link for `target`, i.e. the embed without its `!`.
    pub fn demoted(target: &str) -> String {
        format!("[[{target}]]")
    }
}
