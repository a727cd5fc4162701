pub mod copy;
pub mod message;
pub mod whatsapp;

pub use copy::{CopyTable, Locale};
pub use message::render_summary;
pub use whatsapp::{build_whatsapp_link, is_mobile_user_agent};
