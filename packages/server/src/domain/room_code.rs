//! Room コード生成
//!
//! クイズ ID と高精度タイムスタンプを SHA-256 にかけ、
//! 先頭 6 桁の 16 進数を大文字にした人間が入力しやすいコードを作ります。

use sha2::{Digest, Sha256};

use super::value_object::{QuizId, RoomId};

/// room コードの長さ
pub const ROOM_CODE_LENGTH: usize = 6;

/// 衝突時に再生成する最大回数
pub const MAX_ROOM_CODE_ATTEMPTS: u32 = 5;

/// Room コードのファクトリ
pub struct RoomCodeFactory;

impl RoomCodeFactory {
    /// room コードを生成する
    ///
    /// `attempt` は衝突時の再生成でのみ 1 以上になり、入力に付加される。
    pub fn generate(quiz_id: QuizId, timestamp_nanos: i64, attempt: u32) -> RoomId {
        let seed = if attempt == 0 {
            format!("{}{}", quiz_id.value(), timestamp_nanos)
        } else {
            format!("{}{}#{}", quiz_id.value(), timestamp_nanos, attempt)
        };

        let digest = Sha256::digest(seed.as_bytes());
        let code: String = format!("{digest:x}")
            .chars()
            .take(ROOM_CODE_LENGTH)
            .collect::<String>()
            .to_uppercase();

        RoomId::from_generated(code)
    }
}
