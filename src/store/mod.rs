pub mod changes;
pub mod supabase;

pub use changes::{ChangeEvent, ChangeFeed, PollingChangeFeed};
pub use supabase::SupabaseStore;

/// Collection names on the hosted backend.
pub const CAMPAIGNS: &str = "sorteio_cadastro";
pub const PARTICIPANTS: &str = "sorteio";
pub const LINKS: &str = "links_qr_code";
