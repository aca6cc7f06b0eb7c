//! QuizCatalog 実装
//!
//! - `inmemory`: JSON シードから読み込むインメモリ実装
//!
//! 本番のリレーショナルストアはロビーの外側にあり、ここでは扱いません。

pub mod inmemory;

pub use inmemory::{CatalogSeed, InMemoryQuizCatalog, QuizSeed, UserSeed};
