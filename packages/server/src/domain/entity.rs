//! エンティティ定義
//!
//! Lobby はロビーのメンバーシップとステータスを保持し、
//! 参加・退出・開始の不変条件をここで検証します。


use super::{
    catalog::QuizRecord,
    error::LobbyError,
    value_object::{ConnectionId, QuizId, RoomKey, Timestamp, UserId, Username},
};

/// ロビーの参加者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// 参加者に紐づく接続（HTTP 経由の参加では None）
    pub connection_id: Option<ConnectionId>,
    pub user_id: UserId,
    pub username: Username,
}

impl Participant {
    pub fn new(connection_id: Option<ConnectionId>, user_id: UserId, username: Username) -> Self {
        Self {
            connection_id,
            user_id,
            username,
        }
    }
}

/// ロビーのステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobbyStatus {
    Waiting,
    Started,
}

/// Lobby 生成時の初期値
///
/// 既に Lobby が存在する場合は無視されます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyDefaults {
    pub quiz_id: QuizId,
    pub quiz_title: String,
    pub admin_id: UserId,
    pub created_at: Timestamp,
}

impl LobbyDefaults {
    /// クイズの参照結果から初期値を作る（admin はクイズ作成者）
    pub fn from_quiz(quiz: &QuizRecord, created_at: Timestamp) -> Self {
        Self {
            quiz_id: quiz.id,
            quiz_title: quiz.title.clone(),
            admin_id: quiz.creator_user_id,
            created_at,
        }
    }
}

/// 参加操作の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// 新規に参加者として追加された
    Joined,
    /// 既に同じ接続で参加済み（変更なし）
    AlreadyPresent,
    /// 既に参加済みのユーザーが新しい接続で再参加した
    Rebound { previous: Option<ConnectionId> },
}

/// セッション開始時の情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub room: RoomKey,
    pub quiz_id: QuizId,
    pub participants: Vec<Participant>,
    pub started_at: Timestamp,
}

/// ロビー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lobby {
    pub key: RoomKey,
    pub quiz_id: QuizId,
    pub quiz_title: String,
    /// クイズ作成者。生成後に変更されることはない
    pub admin_id: UserId,
    /// 参加順に並んだ参加者（user_id で一意）
    pub participants: Vec<Participant>,
    pub status: LobbyStatus,
    pub created_at: Timestamp,
    pub started_at: Option<Timestamp>,
}

impl Lobby {
    pub fn new(key: RoomKey, defaults: LobbyDefaults) -> Self {
        Self {
            key,
            quiz_id: defaults.quiz_id,
            quiz_title: defaults.quiz_title,
            admin_id: defaults.admin_id,
            participants: Vec::new(),
            status: LobbyStatus::Waiting,
            created_at: defaults.created_at,
            started_at: None,
        }
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn contains_user(&self, user_id: UserId) -> bool {
        self.participants.iter().any(|p| p.user_id == user_id)
    }

    pub fn is_admin(&self, user_id: UserId) -> bool {
        self.admin_id == user_id
    }

    /// 参加者を追加する
    ///
    /// 同じ `user_id` が既に参加している場合は重複させず、
    /// 接続が変わっていればその接続に付け替えます。
    pub fn join(&mut self, participant: Participant) -> Result<JoinOutcome, LobbyError> {
        if self.status != LobbyStatus::Waiting {
            return Err(LobbyError::InvalidState(
                "Quiz has already started".to_string(),
            ));
        }

        let Some(existing) = self
            .participants
            .iter_mut()
            .find(|p| p.user_id == participant.user_id)
        else {
            self.participants.push(participant);
            return Ok(JoinOutcome::Joined);
        };

        match participant.connection_id {
            Some(connection_id) if existing.connection_id.as_ref() != Some(&connection_id) => {
                let previous = existing.connection_id.replace(connection_id);
                existing.username = participant.username;
                Ok(JoinOutcome::Rebound { previous })
            }
            _ => Ok(JoinOutcome::AlreadyPresent),
        }
    }

    /// user_id で参加者を削除する
    pub fn leave_by_user(&mut self, user_id: UserId) -> Result<Participant, LobbyError> {
        let index = self
            .participants
            .iter()
            .position(|p| p.user_id == user_id)
            .ok_or_else(|| LobbyError::NotFound("User not in lobby".to_string()))?;
        Ok(self.participants.remove(index))
    }

    /// 接続 ID で参加者を削除する（切断時）
    ///
    /// 1 つの接続が複数の user_id で参加している場合もあるため、
    /// その接続に紐づく参加者をすべて取り除き、参加順で返します。
    pub fn leave_by_connection(&mut self, connection_id: &ConnectionId) -> Vec<Participant> {
        let (removed, kept) = std::mem::take(&mut self.participants)
            .into_iter()
            .partition(|p| p.connection_id.as_ref() == Some(connection_id));
        self.participants = kept;
        removed
    }

    /// セッションを開始する
    ///
    /// waiting -> started の一方向の遷移。開始後に参加者が減っても戻らない。
    pub fn start(&mut self, requester: UserId, at: Timestamp) -> Result<SessionInfo, LobbyError> {
        if !self.is_admin(requester) {
            return Err(LobbyError::Forbidden(
                "Only the quiz creator can start the quiz".to_string(),
            ));
        }
        if self.status == LobbyStatus::Started {
            return Err(LobbyError::InvalidState(
                "Quiz has already started".to_string(),
            ));
        }
        if self.participants.is_empty() {
            return Err(LobbyError::InvalidState(
                "Cannot start quiz with no participants".to_string(),
            ));
        }

        self.status = LobbyStatus::Started;
        self.started_at = Some(at);

        Ok(SessionInfo {
            room: self.key.clone(),
            quiz_id: self.quiz_id,
            participants: self.participants.clone(),
            started_at: at,
        })
    }
}
