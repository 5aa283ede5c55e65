//! UseCase: 受信箱取得処理
//!
//! ユーザーが参加する全会話を、相手と最新メッセージ付きで
//! 最終アクティビティの降順に返します。

use std::sync::Arc;

use crate::domain::{Conversation, ConversationRepository, Message, UserId};

use super::error::InboxError;

/// 受信箱の 1 行: 会話とそのプレビュー情報
#[derive(Debug, Clone)]
pub struct InboxEntry {
    /// 会話本体
    pub conversation: Conversation,
    /// 相手の参加者
    pub other_participant: UserId,
    /// 最新メッセージ（まだ無い場合は None）
    pub last_message: Option<Message>,
}

/// 受信箱取得のユースケース
pub struct GetInboxUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ConversationRepository>,
}

impl GetInboxUseCase {
    /// 新しい GetInboxUseCase を作成
    pub fn new(repository: Arc<dyn ConversationRepository>) -> Self {
        Self { repository }
    }

    /// 受信箱取得を実行
    ///
    /// # Arguments
    ///
    /// * `user_id` - 受信箱の持ち主のユーザー ID（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<InboxEntry>)` - 最終アクティビティ降順の会話リスト
    /// * `Err(InboxError)` - 取得失敗
    pub async fn execute(&self, user_id: UserId) -> Result<Vec<InboxEntry>, InboxError> {
        let conversations = self
            .repository
            .conversations_for(&user_id)
            .await
            .map_err(|e| InboxError::Storage(e.to_string()))?;

        let mut entries = Vec::with_capacity(conversations.len());
        for conversation in conversations {
            let Some(other_participant) = conversation.other_participant(&user_id).cloned()
            else {
                continue;
            };
            let last_message = self
                .repository
                .last_message(&conversation.id)
                .await
                .map_err(|e| InboxError::Storage(e.to_string()))?;
            entries.push(InboxEntry {
                conversation,
                other_participant,
                last_message,
            });
        }

        entries.sort_by(|a, b| {
            b.conversation
                .last_activity_at
                .cmp(&a.conversation.last_activity_at)
        });
        Ok(entries)
    }
}
