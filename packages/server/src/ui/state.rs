//! Server state and connection wiring.

use serde::Deserialize;
use std::sync::Arc;

use crate::{
    delivery::MessageDispatcher,
    domain::{ConversationRepository, UserDirectory},
    presence::ConnectionRegistry,
};

/// Query parameters for the WebSocket handshake.
///
/// The user id is optional by design: a connection without a resolvable id
/// is accepted by the transport but excluded from presence tracking.
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub user_id: Option<String>,
}

/// Shared application state
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn ConversationRepository>,
    /// 外部ユーザーサービスへの境界
    pub users: Arc<dyn UserDirectory>,
    /// プロセス全体の接続レジストリ（起動時に 1 度だけ構築）
    pub registry: Arc<ConnectionRegistry>,
    /// リアルタイム配送
    pub dispatcher: Arc<MessageDispatcher>,
}
