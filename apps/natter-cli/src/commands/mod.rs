pub mod chat;
pub mod session;

pub use chat::{cmd_chat_create, cmd_chat_list, cmd_chat_members};
pub use session::{cmd_login, cmd_logout, cmd_whoami};
