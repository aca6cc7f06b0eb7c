//! UseCase テスト用のヘルパー

use std::sync::Arc;

use hiroba_shared::time::FixedClock;

use crate::{
    domain::{QuizId, QuizRecord, UserId, UserRecord, Username},
    infrastructure::{
        catalog::InMemoryQuizCatalog, message_pusher::WebSocketMessagePusher,
        repository::InMemoryLobbyRepository,
    },
};

/// テスト用の固定時刻
pub const NOW: i64 = 1_700_000_000_000;

/// クイズ 42（作成者 7）とユーザー 7, 9, 11 を持つカタログ
pub async fn seeded_catalog() -> Arc<InMemoryQuizCatalog> {
    let catalog = InMemoryQuizCatalog::new();
    catalog
        .insert_quiz(QuizRecord {
            id: QuizId::new(42),
            title: "Capitals".to_string(),
            creator_user_id: UserId::new(7),
        })
        .await;
    for (id, name) in [(7, "alice"), (9, "bob"), (11, "carol")] {
        catalog
            .insert_user(UserRecord {
                id: UserId::new(id),
                username: Username::new(name.to_string()).unwrap(),
            })
            .await;
    }
    Arc::new(catalog)
}

pub fn repository() -> Arc<InMemoryLobbyRepository> {
    Arc::new(InMemoryLobbyRepository::new())
}

pub fn pusher() -> Arc<WebSocketMessagePusher> {
    Arc::new(WebSocketMessagePusher::new())
}

pub fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(NOW))
}
