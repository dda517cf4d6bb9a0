//! 服务模块
//!
//! - [`image_upload`] - 菜品图片校验与保存
//! - [`qr`] - 二维码 PNG 生成

pub mod image_upload;
pub mod qr;

pub use image_upload::{ImageStore, UploadedFile};
