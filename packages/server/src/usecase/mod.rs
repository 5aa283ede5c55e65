//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層（HTTP / WebSocket ハンドラ）から呼び出され、Domain 層を操作します。

pub mod connect_user;
pub mod disconnect_user;
pub mod error;
pub mod get_history;
pub mod get_inbox;
pub mod resolve_conversation;
pub mod send_message;

pub use connect_user::ConnectUserUseCase;
pub use disconnect_user::DisconnectUserUseCase;
pub use error::{HistoryError, InboxError, ResolveError, SendMessageError};
pub use get_history::GetHistoryUseCase;
pub use get_inbox::{GetInboxUseCase, InboxEntry};
pub use resolve_conversation::ResolveConversationUseCase;
pub use send_message::SendMessageUseCase;
