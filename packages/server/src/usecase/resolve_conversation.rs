//! UseCase: 会話解決処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ResolveConversationUseCase::execute() メソッド
//! - ペアに対する会話の検索・新規作成（find-or-create）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：任意のペアに対して会話は常に 1 つだけ
//! - 同時 resolve の競合で二重作成されないことを保証
//! - 参加者バリデーション（自分自身・未知ユーザー）を保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：初回 resolve での作成、2 回目以降の再利用
//! - 異常系：自分自身とのペア、未知ユーザー
//! - エッジケース：同一ペアへの同時 resolve（作成競合の敗者が再取得）

use std::sync::Arc;

use tsunagu_shared::time::now_unix_millis;

use crate::domain::{
    Conversation, ConversationIdFactory, ConversationRepository, RepositoryError,
    UserDirectory, UserId, value_object::{ParticipantPair, Timestamp},
};

use super::error::ResolveError;

/// 会話解決のユースケース
///
/// 2 人の参加者の正規化ペアに対して、既存の会話を返すか、無ければ
/// 原子的に作成します。
pub struct ResolveConversationUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ConversationRepository>,
    /// 外部ユーザーサービスへの境界
    users: Arc<dyn UserDirectory>,
}

impl ResolveConversationUseCase {
    /// 新しい ResolveConversationUseCase を作成
    pub fn new(repository: Arc<dyn ConversationRepository>, users: Arc<dyn UserDirectory>) -> Self {
        Self { repository, users }
    }

    /// 会話解決を実行
    ///
    /// # Arguments
    ///
    /// * `a` - 参加者の一方（Domain Model）
    /// * `b` - 参加者のもう一方（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(Conversation)` - ペアに対する唯一の会話
    /// * `Err(ResolveError)` - 解決失敗
    pub async fn execute(&self, a: UserId, b: UserId) -> Result<Conversation, ResolveError> {
        let pair = ParticipantPair::new(a.clone(), b.clone())
            .map_err(|_| ResolveError::SelfConversation)?;

        for user_id in [&a, &b] {
            let known = self
                .users
                .exists(user_id)
                .await
                .map_err(|e| ResolveError::Storage(e.to_string()))?;
            if !known {
                return Err(ResolveError::UnknownUser(user_id.as_str().to_string()));
            }
        }

        if let Some(existing) = self
            .repository
            .find_by_participants(&pair)
            .await
            .map_err(|e| ResolveError::Storage(e.to_string()))?
        {
            return Ok(existing);
        }

        let id = ConversationIdFactory::generate()
            .map_err(|e| ResolveError::Storage(e.to_string()))?;
        let conversation = Conversation::new(id, pair.clone(), Timestamp::new(now_unix_millis()));

        match self.repository.create(conversation).await {
            Ok(created) => Ok(created),
            // 作成競合に敗れた側: 相手が先に挿入したので再取得して返す
            Err(RepositoryError::DuplicateConversation(_)) => self
                .repository
                .find_by_participants(&pair)
                .await
                .map_err(|e| ResolveError::Storage(e.to_string()))?
                .ok_or_else(|| {
                    ResolveError::Storage(
                        "conversation missing after duplicate-create".to_string(),
                    )
                }),
            Err(e) => Err(ResolveError::Storage(e.to_string())),
        }
    }
}
