//! Value Object 定義
//!
//! 生成時にバリデーションを行い、不正な値がドメインに入り込まないようにします。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// room id の最大長
const ROOM_ID_MAX_LENGTH: usize = 64;
/// username の最大長
const USERNAME_MAX_LENGTH: usize = 80;
/// メッセージ本文の最大長
const MESSAGE_CONTENT_MAX_LENGTH: usize = 2000;

fn non_empty(
    field: &'static str,
    value: String,
    max: usize,
) -> Result<String, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValueObjectError::Empty(field));
    }
    if trimmed.chars().count() > max {
        return Err(ValueObjectError::TooLong { field, max });
    }
    Ok(trimmed.to_string())
}

/// Room 識別子
///
/// 呼び出し側が指定する任意のトークン（クイズ ID の文字列表現など）か、
/// [`RoomCodeFactory`](super::RoomCodeFactory) が生成する 6 文字のコード。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        non_empty("room_id", value, ROOM_ID_MAX_LENGTH).map(Self)
    }

    /// 生成済みの room コードから作る（常に 6 文字の 16 進数）
    pub(super) fn from_generated(code: String) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// room id がクイズ ID として解釈できる場合はそれを返す
    pub fn as_quiz_id(&self) -> Option<QuizId> {
        self.0.parse::<i64>().ok().map(QuizId::new)
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoomId> for String {
    fn from(value: RoomId) -> Self {
        value.0
    }
}

impl From<QuizId> for RoomId {
    fn from(value: QuizId) -> Self {
        Self(value.value().to_string())
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Room の名前空間
///
/// 汎用の room（任意のトークン）とクイズ room（クイズ ID）は独立した名前空間で、
/// 同じ文字列でも別の Lobby を指します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoomNamespace {
    Room,
    Quiz,
}

impl fmt::Display for RoomNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Room => f.write_str("room"),
            Self::Quiz => f.write_str("quiz"),
        }
    }
}

/// Registry のキー（名前空間 + room id）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomKey {
    pub namespace: RoomNamespace,
    pub room_id: RoomId,
}

impl RoomKey {
    pub fn new(namespace: RoomNamespace, room_id: RoomId) -> Self {
        Self { namespace, room_id }
    }

    /// 汎用 room 名前空間のキー
    pub fn room(room_id: RoomId) -> Self {
        Self::new(RoomNamespace::Room, room_id)
    }

    /// クイズ room 名前空間のキー
    pub fn quiz(quiz_id: QuizId) -> Self {
        Self::new(RoomNamespace::Quiz, quiz_id.into())
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.room_id)
    }
}

/// クイズ ID（永続化コラボレーターの主キー）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuizId(i64);

impl QuizId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ユーザー ID（永続化コラボレーターの主キー）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 表示名
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        non_empty("username", value, USERNAME_MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// WebSocket 接続の識別子
///
/// 接続ごとにサーバー側で払い出され、切断時の参加者照合に使われます。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::Empty("connection_id"));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(ValueObjectError::InvalidIdentifier(value));
        }
        Ok(Self(value))
    }

    /// 新しい接続 ID を払い出す（UUID v4）
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// room に中継されるメッセージ本文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::Empty("message"));
        }
        if value.chars().count() > MESSAGE_CONTENT_MAX_LENGTH {
            return Err(ValueObjectError::TooLong {
                field: "message",
                max: MESSAGE_CONTENT_MAX_LENGTH,
            });
        }
        // 中継は verbatim なので trim しない
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MessageContent> for String {
    fn from(value: MessageContent) -> Self {
        value.0
    }
}

/// Unix タイムスタンプ（UTC, ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
