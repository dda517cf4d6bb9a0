//! 数据存储层
//!
//! 每个集合一个 JSON 文件 (`<data_dir>/<collection>.json`)，
//! 每次修改整体重写。
//!
//! - [`JsonStore`] - 单文件 JSON 读写 + 文件锁
//! - [`repository`] - 各集合的仓储

pub mod json_store;
pub mod repository;

pub use json_store::{JsonStore, StoreError, StoreResult};
pub use repository::{MenuRepository, OrderRepository, Repository, ReservationRepository};
