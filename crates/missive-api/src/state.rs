//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the REST API and
//! WebSocket handlers. Services are generic over store/push/publish traits,
//! but AppState pins them to the concrete infra and in-process
//! implementations.

use std::path::PathBuf;
use std::sync::Arc;

use missive_core::block::BlockService;
use missive_core::event::LocalEventLog;
use missive_core::message::MessageService;
use missive_core::push::PushRouter;
use missive_infra::config::{load_app_config, resolve_data_dir};
use missive_infra::sqlite::block::SqliteBlockStore;
use missive_infra::sqlite::message::SqliteMessageStore;
use missive_infra::sqlite::pool::DatabasePool;
use missive_types::config::AppConfig;

/// Concrete type aliases for the service generics pinned to their
/// production implementations.
pub type ConcreteMessageService = MessageService<SqliteMessageStore, PushRouter, LocalEventLog>;

pub type ConcreteBlockService = BlockService<SqliteBlockStore>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub message_service: Arc<ConcreteMessageService>,
    pub block_service: Arc<ConcreteBlockService>,
    /// Shared with the message service; WebSocket handlers attach mailboxes
    /// and topic subscriptions here.
    pub push_router: PushRouter,
    /// Shared with the message service; event consumers subscribe here.
    pub event_log: LocalEventLog,
    pub config: AppConfig,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: load config, connect to the
    /// database, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_app_config(&data_dir).await;

        // config.toml may pin the database elsewhere; default lives in the
        // data directory.
        let db_url = match &config.database_url {
            Some(url) => url.clone(),
            None => format!(
                "sqlite://{}?mode=rwc",
                data_dir.join("missive.db").display()
            ),
        };
        let db_pool = DatabasePool::new(&db_url).await?;

        let push_router = PushRouter::with_buffers(config.mailbox_buffer, config.topic_buffer);
        let event_log = LocalEventLog::new(config.event_capacity);

        let message_service = MessageService::new(
            SqliteMessageStore::new(db_pool.clone()),
            push_router.clone(),
            event_log.clone(),
        );
        let block_service = BlockService::new(SqliteBlockStore::new(db_pool.clone()));

        Ok(Self {
            message_service: Arc::new(message_service),
            block_service: Arc::new(block_service),
            push_router,
            event_log,
            config,
            data_dir,
            db_pool,
        })
    }
}
