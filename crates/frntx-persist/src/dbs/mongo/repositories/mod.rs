pub mod assistants;
pub mod clients;
pub mod merchants;
pub mod threads;

pub use assistants::AssistantMirrorRepository;
pub use clients::ClientRepository;
pub use merchants::MerchantRepository;
pub use threads::ThreadMirrorRepository;
