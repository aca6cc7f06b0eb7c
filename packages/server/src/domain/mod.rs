//! ドメイン層
//!
//! ロビー（Lobby）と参加者（Participant）のモデル、および
//! 外部コラボレーター（永続化・メッセージ送信）のインターフェースを定義します。

pub mod catalog;
pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod room_code;
pub mod value_object;

pub use catalog::{QuizCatalog, QuizRecord, UserRecord};
pub use entity::{JoinOutcome, Lobby, LobbyDefaults, LobbyStatus, Participant, SessionInfo};
pub use error::{CatalogError, LobbyError, MessagePushError, RepositoryError, ValueObjectError};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::LobbyRepository;
pub use room_code::{MAX_ROOM_CODE_ATTEMPTS, ROOM_CODE_LENGTH, RoomCodeFactory};
pub use value_object::{
    ConnectionId, MessageContent, QuizId, RoomId, RoomKey, RoomNamespace, Timestamp, UserId,
    Username,
};
