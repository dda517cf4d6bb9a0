use restaurant_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 日志)
    setup_environment()?;

    // 打印横幅
    print_banner();

    tracing::info!("🍽️  Restaurant server starting...");

    // 2. 加载配置
    let config = Config::from_env()?;

    // 3. 初始化服务器状态 (创建数据目录和上传目录)
    let state = ServerState::initialize(&config)?;

    // 4. 启动 HTTP 服务器
    let server = Server::new(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {:#}", e);
        return Err(e);
    }

    Ok(())
}
