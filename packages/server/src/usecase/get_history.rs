//! UseCase: 会話履歴取得処理
//!
//! 閲覧では会話を作成しません。会話が無ければ空の履歴を返します。

use std::sync::Arc;

use crate::domain::{
    ConversationRepository, Message, UserId, value_object::ParticipantPair,
};

use super::error::HistoryError;

/// 会話履歴取得のユースケース
pub struct GetHistoryUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ConversationRepository>,
}

impl GetHistoryUseCase {
    /// 新しい GetHistoryUseCase を作成
    pub fn new(repository: Arc<dyn ConversationRepository>) -> Self {
        Self { repository }
    }

    /// 会話履歴取得を実行
    ///
    /// # Arguments
    ///
    /// * `user_id` - 閲覧者のユーザー ID（Domain Model）
    /// * `other_user_id` - 相手のユーザー ID（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Message>)` - 追記順のメッセージ列（会話が無ければ空）
    /// * `Err(HistoryError)` - 取得失敗
    pub async fn execute(
        &self,
        user_id: UserId,
        other_user_id: UserId,
    ) -> Result<Vec<Message>, HistoryError> {
        let pair = ParticipantPair::new(user_id, other_user_id)
            .map_err(|e| HistoryError::InvalidParticipants(e.to_string()))?;

        let Some(conversation) = self
            .repository
            .find_by_participants(&pair)
            .await
            .map_err(|e| HistoryError::Storage(e.to_string()))?
        else {
            return Ok(Vec::new());
        };

        self.repository
            .history(&conversation.id)
            .await
            .map_err(|e| HistoryError::Storage(e.to_string()))
    }
}
