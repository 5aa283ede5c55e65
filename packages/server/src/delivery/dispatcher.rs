//! Best-effort push delivery over live connections.
//!
//! A message is "sent" once persisted; whether anyone received it live is
//! invisible to the sender. Dispatch therefore runs as a detached task and
//! every push failure is logged and dropped. An offline recipient is the
//! normal case, not an error: they catch up through history and inbox pulls.

use std::sync::Arc;

use crate::{
    domain::Message,
    infrastructure::dto::{
        http::MessageDto,
        websocket::{NewMessageEvent, OnlineUsersEvent},
    },
    presence::{ConnectionRegistry, ConnectionSender},
};

/// Pushes wire events to live connections found in the registry.
pub struct MessageDispatcher {
    registry: Arc<ConnectionRegistry>,
}

impl MessageDispatcher {
    /// Create a dispatcher over the given registry.
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Push a freshly persisted message to every connection the recipient
    /// holds. Fire-and-forget: callers must invoke this only after the
    /// message is durable, and never wait on the outcome.
    pub fn dispatch(&self, message: &Message) {
        let event = NewMessageEvent::new(MessageDto::from(message));
        let payload = match serde_json::to_string(&event) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("failed to serialize message push: {}", e);
                return;
            }
        };

        let registry = Arc::clone(&self.registry);
        let recipient_id = message.recipient_id.clone();
        let message_id = message.id.clone();
        tokio::spawn(async move {
            let senders = registry.lookup(&recipient_id);
            if senders.is_empty() {
                tracing::debug!(
                    "recipient '{}' is offline; message '{}' waits for the next history pull",
                    recipient_id,
                    message_id
                );
                return;
            }

            let mut delivered = 0usize;
            for sender in &senders {
                if sender.send(payload.clone()).is_ok() {
                    delivered += 1;
                } else {
                    tracing::warn!("stale connection for '{}'; push skipped", recipient_id);
                }
            }
            tracing::debug!(
                "pushed message '{}' to {}/{} connections of '{}'",
                message_id,
                delivered,
                senders.len(),
                recipient_id
            );
        });
    }

    /// Broadcast the current presence snapshot to every live connection.
    pub fn broadcast_presence(&self) {
        let event = OnlineUsersEvent::new(self.registry.snapshot());
        match serde_json::to_string(&event) {
            Ok(payload) => self.registry.broadcast(&payload),
            Err(e) => tracing::error!("failed to serialize presence snapshot: {}", e),
        }
    }

    /// Push the current presence snapshot to a single connection. Used for a
    /// registration that did not change the snapshot (second device), which
    /// still needs to learn the current set.
    pub fn send_snapshot_to(&self, sender: &ConnectionSender) {
        let event = OnlineUsersEvent::new(self.registry.snapshot());
        match serde_json::to_string(&event) {
            Ok(payload) => {
                if sender.send(payload).is_err() {
                    tracing::warn!("failed to push presence snapshot to a fresh connection");
                }
            }
            Err(e) => tracing::error!("failed to serialize presence snapshot: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConversationIdFactory, MessageBody, MessageIdFactory, Timestamp, UserId},
        presence::ConnectionHandle,
    };
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn message(sender: &str, recipient: &str, body: &str) -> Message {
        Message::new(
            MessageIdFactory::generate().unwrap(),
            ConversationIdFactory::generate().unwrap(),
            user(sender),
            user(recipient),
            MessageBody::new(body.to_string()).unwrap(),
            Timestamp::new(1000),
        )
    }

    async fn recv_json(rx: &mut mpsc::UnboundedReceiver<String>) -> serde_json::Value {
        let payload = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("timed out waiting for push")
            .expect("channel closed");
        serde_json::from_str(&payload).expect("push payload must be JSON")
    }

    #[tokio::test]
    async fn test_dispatch_to_online_recipient() {
        // テスト項目: オンラインの受信者の全接続にメッセージが届く
        // given (前提条件):
        let registry = Arc::new(ConnectionRegistry::new());
        let dispatcher = MessageDispatcher::new(registry.clone());
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        registry.register(&user("u2"), ConnectionHandle::new(tx_a, 0));
        registry.register(&user("u2"), ConnectionHandle::new(tx_b, 0));

        // when (操作):
        dispatcher.dispatch(&message("u1", "u2", "hi"));

        // then (期待する結果): 両方の接続に同じイベントが届く
        for rx in [&mut rx_a, &mut rx_b] {
            let event = recv_json(rx).await;
            assert_eq!(event["type"], "new-message");
            assert_eq!(event["message"]["sender_id"], "u1");
            assert_eq!(event["message"]["recipient_id"], "u2");
            assert_eq!(event["message"]["message"], "hi");
        }
    }

    #[tokio::test]
    async fn test_dispatch_to_offline_recipient_is_noop() {
        // テスト項目: オフラインの受信者への配送は何も起こさない（エラーではない）
        // given (前提条件):
        let registry = Arc::new(ConnectionRegistry::new());
        let dispatcher = MessageDispatcher::new(registry.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();
        registry.register(&user("u3"), ConnectionHandle::new(tx, 0));

        // when (操作): u2 はオフライン
        dispatcher.dispatch(&message("u1", "u2", "hi"));

        // then (期待する結果): 無関係な u3 には届かない
        let result = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_dispatch_survives_stale_connection() {
        // テスト項目: 失効した接続への送信失敗が他の接続への配送を妨げない
        // given (前提条件):
        let registry = Arc::new(ConnectionRegistry::new());
        let dispatcher = MessageDispatcher::new(registry.clone());
        let (tx_stale, rx_stale) = mpsc::unbounded_channel();
        let (tx_live, mut rx_live) = mpsc::unbounded_channel();
        registry.register(&user("u2"), ConnectionHandle::new(tx_stale, 0));
        registry.register(&user("u2"), ConnectionHandle::new(tx_live, 0));
        drop(rx_stale);

        // when (操作):
        dispatcher.dispatch(&message("u1", "u2", "still delivered"));

        // then (期待する結果):
        let event = recv_json(&mut rx_live).await;
        assert_eq!(event["message"]["message"], "still delivered");
    }

    #[tokio::test]
    async fn test_broadcast_presence() {
        // テスト項目: プレゼンス一式が全接続にブロードキャストされる
        // given (前提条件):
        let registry = Arc::new(ConnectionRegistry::new());
        let dispatcher = MessageDispatcher::new(registry.clone());
        let (tx_u1, mut rx_u1) = mpsc::unbounded_channel();
        let (tx_u2, mut rx_u2) = mpsc::unbounded_channel();
        registry.register(&user("u1"), ConnectionHandle::new(tx_u1, 0));
        registry.register(&user("u2"), ConnectionHandle::new(tx_u2, 0));

        // when (操作):
        dispatcher.broadcast_presence();

        // then (期待する結果):
        for rx in [&mut rx_u1, &mut rx_u2] {
            let event = recv_json(rx).await;
            assert_eq!(event["type"], "online-users");
            assert_eq!(event["users"], serde_json::json!(["u1", "u2"]));
        }
    }

    #[tokio::test]
    async fn test_send_snapshot_to_single_connection() {
        // テスト項目: 単一接続へのスナップショット送信
        // given (前提条件):
        let registry = Arc::new(ConnectionRegistry::new());
        let dispatcher = MessageDispatcher::new(registry.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();
        registry.register(&user("u1"), ConnectionHandle::new(tx.clone(), 0));

        // when (操作):
        dispatcher.send_snapshot_to(&tx);

        // then (期待する結果):
        let event = recv_json(&mut rx).await;
        assert_eq!(event["type"], "online-users");
        assert_eq!(event["users"], serde_json::json!(["u1"]));
    }
}
