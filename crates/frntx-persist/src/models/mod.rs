pub mod assistant;
pub mod client;
pub mod merchant;
pub mod thread;

pub use assistant::AssistantRecord;
pub use client::ClientRecord;
pub use merchant::{MerchantFileRecord, MerchantPatch, MerchantRecord, NewMerchant};
pub use thread::ThreadRecord;
