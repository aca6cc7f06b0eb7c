//! InMemory QuizCatalog 実装
//!
//! クイズとユーザーを HashMap に保持します。
//! 起動時に `--catalog` で渡された JSON ファイルから読み込めます。
//!
//! ```json
//! {
//!   "quizzes": [{ "id": 42, "title": "Capitals", "creator_user_id": 7 }],
//!   "users": [{ "id": 7, "username": "alice" }]
//! }
//! ```

use std::{collections::HashMap, path::Path};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::domain::{
    CatalogError, QuizCatalog, QuizId, QuizRecord, UserId, UserRecord, Username, ValueObjectError,
};

/// シード読み込みのエラー
#[derive(Debug, thiserror::Error)]
pub enum CatalogSeedError {
    #[error("failed to read catalog seed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog seed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid catalog seed: {0}")]
    Invalid(#[from] ValueObjectError),
}

/// クイズのシード
#[derive(Debug, Clone, Deserialize)]
pub struct QuizSeed {
    pub id: i64,
    pub title: String,
    pub creator_user_id: i64,
}

/// ユーザーのシード
#[derive(Debug, Clone, Deserialize)]
pub struct UserSeed {
    pub id: i64,
    pub username: String,
}

/// カタログのシード
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub quizzes: Vec<QuizSeed>,
    #[serde(default)]
    pub users: Vec<UserSeed>,
}

impl CatalogSeed {
    /// JSON ファイルからシードを読み込む
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogSeedError> {
        let raw = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// インメモリ QuizCatalog 実装
#[derive(Default)]
pub struct InMemoryQuizCatalog {
    quizzes: RwLock<HashMap<QuizId, QuizRecord>>,
    users: RwLock<HashMap<UserId, UserRecord>>,
}

impl InMemoryQuizCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// シードからカタログを構築
    pub fn from_seed(seed: CatalogSeed) -> Result<Self, CatalogSeedError> {
        let quizzes = seed
            .quizzes
            .into_iter()
            .map(|quiz| {
                let id = QuizId::new(quiz.id);
                let record = QuizRecord {
                    id,
                    title: quiz.title,
                    creator_user_id: UserId::new(quiz.creator_user_id),
                };
                (id, record)
            })
            .collect();

        let users = seed
            .users
            .into_iter()
            .map(|user| {
                let id = UserId::new(user.id);
                Ok((
                    id,
                    UserRecord {
                        id,
                        username: Username::new(user.username)?,
                    },
                ))
            })
            .collect::<Result<HashMap<_, _>, ValueObjectError>>()?;

        Ok(Self {
            quizzes: RwLock::new(quizzes),
            users: RwLock::new(users),
        })
    }

    /// クイズを追加（既存なら上書き）
    pub async fn insert_quiz(&self, record: QuizRecord) {
        self.quizzes.write().await.insert(record.id, record);
    }

    /// ユーザーを追加（既存なら上書き）
    pub async fn insert_user(&self, record: UserRecord) {
        self.users.write().await.insert(record.id, record);
    }
}

#[async_trait]
impl QuizCatalog for InMemoryQuizCatalog {
    async fn find_quiz(&self, quiz_id: QuizId) -> Result<QuizRecord, CatalogError> {
        self.quizzes
            .read()
            .await
            .get(&quiz_id)
            .cloned()
            .ok_or(CatalogError::QuizNotFound(quiz_id.value()))
    }

    async fn find_user(&self, user_id: UserId) -> Result<UserRecord, CatalogError> {
        self.users
            .read()
            .await
            .get(&user_id)
            .cloned()
            .ok_or(CatalogError::UserNotFound(user_id.value()))
    }
}
