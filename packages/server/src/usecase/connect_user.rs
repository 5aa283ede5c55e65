//! UseCase: 接続登録処理
//!
//! 接続をレジストリに登録し、プレゼンスの変化を通知します。
//! レジストリ操作はインメモリのみで、ストレージ I/O を待ちません。

use std::sync::Arc;

use crate::{
    delivery::MessageDispatcher,
    domain::UserId,
    presence::{ConnectionHandle, ConnectionRegistry},
};

/// 接続登録のユースケース
pub struct ConnectUserUseCase {
    /// 接続レジストリ
    registry: Arc<ConnectionRegistry>,
    /// プレゼンス通知の配送
    dispatcher: Arc<MessageDispatcher>,
}

impl ConnectUserUseCase {
    /// 新しい ConnectUserUseCase を作成
    pub fn new(registry: Arc<ConnectionRegistry>, dispatcher: Arc<MessageDispatcher>) -> Self {
        Self {
            registry,
            dispatcher,
        }
    }

    /// 接続登録を実行
    ///
    /// 初回接続ならスナップショットが変化するので全接続へブロードキャスト。
    /// 2 台目以降はスナップショットが変わらないため、新しい接続にだけ
    /// 現在のスナップショットを直接送る。
    pub fn execute(&self, user_id: &UserId, handle: ConnectionHandle) {
        let sender = handle.sender.clone();
        let came_online = self.registry.register(user_id, handle);
        if came_online {
            self.dispatcher.broadcast_presence();
        } else {
            self.dispatcher.send_snapshot_to(&sender);
        }
    }
}
