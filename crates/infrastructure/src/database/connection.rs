use parking_lot::{Mutex, MutexGuard};
use rusqlite::{Connection, Transaction};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use super::DatabaseError;

/// Эксклюзивный доступ к соединению; освобождается в Drop на любом пути выхода
pub type ConnectionGuard<'a> = MutexGuard<'a, Connection>;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Владелец единственного SQLite соединения процесса
///
/// Пула нет: приложение однопоточное, а Mutex нужен чтобы провайдер был `Sync`
/// и мог жить в DI контейнере.
pub struct ConnectionProvider {
    conn: Mutex<Connection>,
    location: PathBuf,
}

impl ConnectionProvider {
    /// Открыть (или создать) файл базы данных, создавая родительские директории
    ///
    /// Любой отказ здесь - ошибка подключения (`DatabaseError::is_connection`).
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DatabaseError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| DatabaseError::Directory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path).map_err(|source| DatabaseError::Connection {
            path: path.to_path_buf(),
            source,
        })?;
        let provider = Self::configure(conn, path.to_path_buf())?;

        info!("Opened SQLite database: {}", path.display());
        Ok(provider)
    }

    /// Временная база в памяти для тестов
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let location = PathBuf::from(":memory:");
        let conn = Connection::open_in_memory().map_err(|source| DatabaseError::Connection {
            path: location.clone(),
            source,
        })?;
        Self::configure(conn, location)
    }

    fn configure(conn: Connection, location: PathBuf) -> Result<Self, DatabaseError> {
        let configured = conn
            .execute_batch("PRAGMA foreign_keys = ON;")
            .and_then(|_| conn.busy_timeout(BUSY_TIMEOUT));
        if let Err(source) = configured {
            return Err(DatabaseError::Connection {
                path: location,
                source,
            });
        }

        Ok(Self {
            conn: Mutex::new(conn),
            location,
        })
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Получить соединение на время жизни guard
    pub fn acquire(&self) -> ConnectionGuard<'_> {
        debug!("Acquiring connection to {}", self.location.display());
        self.conn.lock()
    }

    /// Выполнить `operation` в транзакции: commit на `Ok`, rollback на `Err`
    ///
    /// Rollback также происходит при панике - `Transaction` откатывается в Drop.
    pub fn with_transaction<T, E, F>(&self, operation: F) -> Result<T, E>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, E>,
        E: From<rusqlite::Error>,
    {
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        let value = operation(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}

impl std::fmt::Debug for ConnectionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionProvider")
            .field("location", &self.location)
            .finish()
    }
}
