pub mod vault_index;

pub use vault_index::{VaultEntry, VaultIndex};
