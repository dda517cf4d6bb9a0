use std::sync::Arc;

use crate::auth::SessionService;
use crate::core::Config;
use crate::db::{MenuRepository, OrderRepository, ReservationRepository};
use crate::services::ImageStore;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，每个请求克隆一份的成本极低。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | reservations | 订座仓储 (`reservations.json`) |
/// | orders | 订单仓储 (`orders.json`) |
/// | menu | 菜单仓储 (`menu.json`) |
/// | images | 菜品图片目录 |
/// | sessions | 管理员会话 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub reservations: ReservationRepository,
    pub orders: OrderRepository,
    pub menu: MenuRepository,
    pub images: ImageStore,
    pub sessions: Arc<SessionService>,
}

impl ServerState {
    /// 创建服务器状态 (不触碰文件系统)
    pub fn new(config: Config) -> Self {
        let reservations = ReservationRepository::new(&config.data_dir);
        let orders = OrderRepository::new(&config.data_dir);
        let menu = MenuRepository::new(&config.data_dir);
        let images = ImageStore::new(config.upload_dir(), config.max_upload_bytes);
        let sessions = Arc::new(SessionService::new(config.session.clone()));

        Self {
            config: Arc::new(config),
            reservations,
            orders,
            menu,
            images,
            sessions,
        }
    }

    /// 初始化服务器状态
    ///
    /// 先确保数据目录和上传目录存在，再创建状态
    pub fn initialize(config: &Config) -> std::io::Result<Self> {
        config.ensure_work_dir_structure()?;
        tracing::info!(
            data_dir = %config.data_dir.display(),
            upload_dir = %config.upload_dir().display(),
            "Work directories ready"
        );
        Ok(Self::new(config.clone()))
    }
}
