//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージ送信処理（会話解決 → 永続化 → ベストエフォート配送）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：永続化成功後にのみ配送が行われる
//! - 受信者がオフラインでも送信は成功する（耐久性は配送と独立）
//! - 永続化失敗時は送信全体が失敗し、部分的な状態が残らない
//!
//! ### どのような状況を想定しているか
//! - 正常系：オンライン受信者への送信と配送、オフライン受信者への送信
//! - 異常系：自分自身への送信、未知ユーザーへの送信、ストレージ障害
//! - エッジケース：送信者の返り値は配送結果に依存しない

use std::sync::Arc;

use crate::{
    delivery::MessageDispatcher,
    domain::{
        ConversationRepository, Message, UserDirectory, UserId, value_object::MessageBody,
    },
};

use super::{error::SendMessageError, resolve_conversation::ResolveConversationUseCase};

/// メッセージ送信のユースケース
///
/// 解決 → 追記 → 配送を順に実行します。配送は detached task として
/// 起動されるだけで、返り値の正しさには関与しません。
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ConversationRepository>,
    /// 外部ユーザーサービスへの境界
    users: Arc<dyn UserDirectory>,
    /// 永続化済みメッセージのリアルタイム配送
    dispatcher: Arc<MessageDispatcher>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn ConversationRepository>,
        users: Arc<dyn UserDirectory>,
        dispatcher: Arc<MessageDispatcher>,
    ) -> Self {
        Self {
            repository,
            users,
            dispatcher,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `sender_id` - 送信者のユーザー ID（Domain Model）
    /// * `recipient_id` - 受信者のユーザー ID（Domain Model）
    /// * `body` - メッセージ本文（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(Message)` - 永続化されたメッセージ
    /// * `Err(SendMessageError)` - 送信失敗（部分的な状態は残らない）
    pub async fn execute(
        &self,
        sender_id: UserId,
        recipient_id: UserId,
        body: MessageBody,
    ) -> Result<Message, SendMessageError> {
        let resolver =
            ResolveConversationUseCase::new(self.repository.clone(), self.users.clone());
        let conversation = resolver
            .execute(sender_id.clone(), recipient_id.clone())
            .await?;

        let message = self
            .repository
            .append_message(&conversation.id, sender_id, recipient_id, body)
            .await
            .map_err(|e| SendMessageError::Storage(e.to_string()))?;

        // 永続化が完了したメッセージだけを配送する。配送は待たない。
        self.dispatcher.dispatch(&message);

        Ok(message)
    }
}
