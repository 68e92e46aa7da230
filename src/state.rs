use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    auth::{
        jwt::JwtKeys,
        repo::{PgUsers, UserStore},
    },
    config::AppConfig,
    contact::repo::{ContactStore, PgContacts},
    db,
    memory::MemoryStore,
    study_plan::repo::{PgStudyPlan, StudyPlanStore},
    tasks::repo::{PgTasks, TaskStore},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub jwt: JwtKeys,
    pub users: Arc<dyn UserStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub study_plan: Arc<dyn StudyPlanStore>,
    pub contacts: Arc<dyn ContactStore>,
}

impl AppState {
    /// Connects to Postgres (running migrations) or falls back to the in-memory store.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        match config.database_url.clone() {
            Some(url) => {
                let pool = db::connect(&url).await?;
                db::migrate(&pool).await?;
                Ok(Self::postgres(config, pool))
            }
            None => {
                tracing::warn!("DATABASE_URL not set; using the in-memory store");
                Ok(Self::in_memory(config))
            }
        }
    }

    pub fn postgres(config: AppConfig, pool: PgPool) -> Self {
        Self {
            jwt: JwtKeys::from_config(&config.jwt),
            config: Arc::new(config),
            users: Arc::new(PgUsers::new(pool.clone())),
            tasks: Arc::new(PgTasks::new(pool.clone())),
            study_plan: Arc::new(PgStudyPlan::new(pool.clone())),
            contacts: Arc::new(PgContacts::new(pool)),
        }
    }

    pub fn in_memory(config: AppConfig) -> Self {
        let store = Arc::new(MemoryStore::default());
        Self {
            jwt: JwtKeys::from_config(&config.jwt),
            config: Arc::new(config),
            users: store.clone(),
            tasks: store.clone(),
            study_plan: store.clone(),
            contacts: store,
        }
    }

    pub fn fake() -> Self {
        Self::in_memory(AppConfig::for_tests())
    }
}
