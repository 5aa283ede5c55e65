//! UseCase: 接続解除処理
//!
//! 接続をレジストリから取り除き、ユーザーがオフラインになった場合のみ
//! プレゼンスの変化を通知します。重複した切断イベントは無害です。

use std::sync::Arc;

use uuid::Uuid;

use crate::{delivery::MessageDispatcher, domain::UserId, presence::ConnectionRegistry};

/// 接続解除のユースケース
pub struct DisconnectUserUseCase {
    /// 接続レジストリ
    registry: Arc<ConnectionRegistry>,
    /// プレゼンス通知の配送
    dispatcher: Arc<MessageDispatcher>,
}

impl DisconnectUserUseCase {
    /// 新しい DisconnectUserUseCase を作成
    pub fn new(registry: Arc<ConnectionRegistry>, dispatcher: Arc<MessageDispatcher>) -> Self {
        Self {
            registry,
            dispatcher,
        }
    }

    /// 接続解除を実行
    ///
    /// 最後の接続が消えた場合だけスナップショットをブロードキャストする。
    pub fn execute(&self, user_id: &UserId, connection_id: Uuid) {
        if self.registry.unregister(user_id, connection_id) {
            self.dispatcher.broadcast_presence();
        }
    }
}
