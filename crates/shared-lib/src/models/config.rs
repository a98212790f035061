use color_eyre::eyre::{eyre, Context};
use color_eyre::{Help, Result};
use std::str::FromStr;
use std::sync::Arc;

/// 默认监听地址
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// 默认日志级别
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// 默认数据库连接池大小
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// 项目数据的存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL数据库，需要配置 `DATABASE_URL`
    Postgres,

    /// 进程内存储，进程退出后数据丢失，适合本地调试和测试
    Memory,
}

impl FromStr for StorageBackend {
    type Err = color_eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" | "mem" => Ok(StorageBackend::Memory),
            other => Err(eyre!("Unknown storage backend `{other}`"))
                .suggestion("STORAGE 只支持 `postgres` 或 `memory`"),
        }
    }
}

/// 程序配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 存储后端
    ///
    /// 可通过环境变量 `STORAGE` 强制指定，否则根据是否配置了 `DATABASE_URL` 自动选择
    pub storage: StorageBackend,

    /// postgresql数据库链接字符串
    pub postgresql_conn_str: Option<String>,

    /// 数据库连接池的最大连接数
    ///
    /// 可通过环境变量 `DB_MAX_CONNECTIONS` 来调整
    pub db_max_connections: u32,

    /// HTTP服务监听地址，环境变量 `BIND_ADDR`
    pub bind_addr: String,

    /// 允许跨域访问的来源，环境变量 `CORS_ORIGIN`
    ///
    /// 为空时允许任意来源
    pub cors_origin: Option<String>,

    /// `RUST_LOG` 未设置时使用的日志级别，环境变量 `LOG_LEVEL`
    pub log_level: String,
}

impl AppConfig {
    pub fn load() -> Result<Arc<AppConfig>> {
        // 加载.env文件中的数据注入到环境变量中，方便本地测试
        // 线上环境部署时会直接使用环境变量，不需要.env文件
        let _ = dotenvy::dotenv();

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        Ok(Arc::new(config))
    }

    /// 根据 `lookup` 提供的键值构造配置
    ///
    /// 空字符串等同于未设置。
    pub fn from_lookup<F>(lookup: F) -> Result<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let postgresql_conn_str = get("DATABASE_URL");

        let storage = match get("STORAGE") {
            Some(s) => s.parse::<StorageBackend>()?,
            None if postgresql_conn_str.is_some() => StorageBackend::Postgres,
            None => StorageBackend::Memory,
        };

        if storage == StorageBackend::Postgres && postgresql_conn_str.is_none() {
            return Err(eyre!("Can not load DATABASE_URL in environment"))
                .suggestion("设置 DATABASE_URL 环境变量，或者使用 STORAGE=memory");
        }

        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(s) => s
                .parse::<u32>()
                .wrap_err_with(|| format!("Invalid DB_MAX_CONNECTIONS `{s}`"))?,
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };
        // 连接池大小为0时所有请求都拿不到连接
        if db_max_connections == 0 {
            return Err(eyre!("DB_MAX_CONNECTIONS must be greater than 0"))
                .suggestion("把 DB_MAX_CONNECTIONS 设置为正整数，或者删除该变量使用默认值10");
        }

        Ok(AppConfig {
            storage,
            postgresql_conn_str,
            db_max_connections,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            cors_origin: get("CORS_ORIGIN"),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_to_memory_without_database_url() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.db_max_connections, DEFAULT_DB_MAX_CONNECTIONS);
        assert!(config.cors_origin.is_none());
    }

    #[test]
    fn test_database_url_selects_postgres() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/projects")]).unwrap();

        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.postgresql_conn_str.as_deref(), Some("postgres://localhost/projects"));
    }

    #[test]
    fn test_storage_override() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/projects"), ("STORAGE", "memory")]).unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
    }

    #[test]
    fn test_postgres_requires_database_url() {
        assert!(config_from(&[("STORAGE", "postgres")]).is_err());
        assert!(config_from(&[("STORAGE", "postgres"), ("DATABASE_URL", "  ")]).is_err());
    }

    #[test]
    fn test_invalid_values() {
        assert!(config_from(&[("STORAGE", "sqlite")]).is_err());
        assert!(config_from(&[("DB_MAX_CONNECTIONS", "many")]).is_err());
        assert!(config_from(&[("DB_MAX_CONNECTIONS", "0")]).is_err());
    }

    #[test]
    fn test_explicit_values() {
        let config = config_from(&[
            ("BIND_ADDR", "127.0.0.1:3001"),
            ("CORS_ORIGIN", "http://localhost:5173"),
            ("LOG_LEVEL", "debug"),
            ("DB_MAX_CONNECTIONS", "40"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:3001");
        assert_eq!(config.cors_origin.as_deref(), Some("http://localhost:5173"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.db_max_connections, 40);
    }
}
