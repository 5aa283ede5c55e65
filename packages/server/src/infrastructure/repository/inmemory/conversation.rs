//! InMemory ConversationRepository 実装
//!
//! ドメイン層が定義する ConversationRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! 1 つの Mutex がストア全体を保護するため、会話作成（正規化ペアの
//! 一意性チェック + 挿入）とメッセージ追記（メッセージ永続化 +
//! 会話のシーケンス/最終更新時刻の更新）はそれぞれ単一のクリティカル
//! セクションで原子的に行われます。DBMS 実装時は、ペアの一意性制約と
//! トランザクションで同じ契約を満たす必要があります。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tsunagu_shared::time::now_unix_millis;

use crate::domain::{
    Conversation, ConversationRepository, Message, MessageIdFactory, RepositoryError,
    value_object::{ConversationId, MessageBody, ParticipantPair, Timestamp, UserId},
};

#[derive(Default)]
struct StoreInner {
    /// conversation id → conversation
    conversations: HashMap<String, Conversation>,
    /// canonical pair key → conversation id（ペア一意性制約）
    pair_index: HashMap<String, String>,
    /// conversation id → 追記順のメッセージログ
    messages: HashMap<String, Vec<Message>>,
}

/// インメモリ ConversationRepository 実装
pub struct InMemoryConversationRepository {
    inner: Arc<Mutex<StoreInner>>,
}

impl InMemoryConversationRepository {
    /// 新しい空のストアを作成
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner::default())),
        }
    }
}

impl Default for InMemoryConversationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn find_by_participants(
        &self,
        pair: &ParticipantPair,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .pair_index
            .get(&pair.key())
            .and_then(|conversation_id| inner.conversations.get(conversation_id))
            .cloned())
    }

    async fn create(&self, conversation: Conversation) -> Result<Conversation, RepositoryError> {
        let mut inner = self.inner.lock().await;
        let key = conversation.participants.key();
        if inner.pair_index.contains_key(&key) {
            return Err(RepositoryError::DuplicateConversation(key));
        }

        let conversation_id = conversation.id.as_str().to_string();
        inner.pair_index.insert(key, conversation_id.clone());
        inner.messages.insert(conversation_id.clone(), Vec::new());
        inner
            .conversations
            .insert(conversation_id, conversation.clone());
        Ok(conversation)
    }

    async fn conversations_for(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Conversation>, RepositoryError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .conversations
            .values()
            .filter(|conversation| conversation.participants.contains(user_id))
            .cloned()
            .collect())
    }

    async fn append_message(
        &self,
        conversation_id: &ConversationId,
        sender_id: UserId,
        recipient_id: UserId,
        body: MessageBody,
    ) -> Result<Message, RepositoryError> {
        let mut inner = self.inner.lock().await;
        let StoreInner {
            conversations,
            messages,
            ..
        } = &mut *inner;

        let conversation = conversations
            .get_mut(conversation_id.as_str())
            .ok_or_else(|| {
                RepositoryError::ConversationNotFound(conversation_id.as_str().to_string())
            })?;
        let log = messages
            .entry(conversation_id.as_str().to_string())
            .or_default();

        // 会話内のタイムスタンプは狭義単調増加。時計が巻き戻っても
        // 直前のメッセージ + 1ms を下回らない。
        let now = now_unix_millis();
        let created_at = match log.last() {
            Some(previous) if now <= previous.created_at.value() => {
                Timestamp::new(previous.created_at.value() + 1)
            }
            _ => Timestamp::new(now),
        };

        let id = MessageIdFactory::generate()
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        let message = Message::new(
            id,
            conversation_id.clone(),
            sender_id,
            recipient_id,
            body,
            created_at,
        );

        log.push(message.clone());
        conversation.record_message(message.id.clone(), created_at);
        Ok(message)
    }

    async fn history(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, RepositoryError> {
        let inner = self.inner.lock().await;
        if !inner.conversations.contains_key(conversation_id.as_str()) {
            return Err(RepositoryError::ConversationNotFound(
                conversation_id.as_str().to_string(),
            ));
        }
        Ok(inner
            .messages
            .get(conversation_id.as_str())
            .cloned()
            .unwrap_or_default())
    }

    async fn last_message(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<Message>, RepositoryError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .messages
            .get(conversation_id.as_str())
            .and_then(|log| log.last())
            .cloned())
    }
}
