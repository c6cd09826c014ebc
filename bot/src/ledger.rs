use anyhow::{anyhow, Context};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tegridy_execution::State;
use tegridy_types::Account;
use tracing::info;

/// SQLite-backed account store.
///
/// One connection is shared behind a mutex and every call runs on the blocking pool so the
/// async runtime never waits on disk I/O.
#[derive(Clone)]
pub struct SqliteLedger {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl SqliteLedger {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create ledger directory {}", parent.display()))?;
        }
        let conn = Connection::open(path).context("open ledger db")?;
        init_schema_sqlite(&conn)?;
        info!(path = %path.display(), "ledger opened");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn account_count(&self) -> anyhow::Result<u64> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))
                .context("count accounts")
        })
        .await
    }

    async fn with_conn<T, F>(&self, f: F) -> anyhow::Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> anyhow::Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|_| anyhow!("ledger connection poisoned"))?;
            f(&mut conn)
        })
        .await
        .context("ledger task failed")?
    }
}

impl State for SqliteLedger {
    async fn get(&self, user_id: &str) -> anyhow::Result<Option<Account>> {
        let user_id = user_id.to_string();
        self.with_conn(move |conn| load_account_sqlite(conn, &user_id))
            .await
    }

    async fn apply(&self, changes: Vec<Account>) -> anyhow::Result<()> {
        if changes.is_empty() {
            return Ok(());
        }
        self.with_conn(move |conn| write_accounts_sqlite(conn, &changes))
            .await
    }
}

fn init_schema_sqlite(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA synchronous=NORMAL;
         CREATE TABLE IF NOT EXISTS accounts (
             user_id TEXT PRIMARY KEY,
             balance INTEGER NOT NULL DEFAULT 0 CHECK (balance >= 0),
             last_daily INTEGER,
             total_earned INTEGER NOT NULL DEFAULT 0
         );",
    )
    .context("init ledger schema")?;
    Ok(())
}

fn load_account_sqlite(conn: &Connection, user_id: &str) -> anyhow::Result<Option<Account>> {
    conn.query_row(
        "SELECT user_id, balance, last_daily, total_earned FROM accounts WHERE user_id = ?",
        params![user_id],
        |row| {
            Ok(Account {
                user_id: row.get(0)?,
                balance: row.get(1)?,
                last_daily: row.get(2)?,
                total_earned: row.get(3)?,
            })
        },
    )
    .optional()
    .with_context(|| format!("load account {user_id}"))
}

fn write_accounts_sqlite(conn: &mut Connection, accounts: &[Account]) -> anyhow::Result<()> {
    // Dropping `tx` without commit rolls back every write in the batch.
    let tx = conn.transaction().context("begin ledger transaction")?;
    for account in accounts {
        tx.execute(
            "INSERT OR REPLACE INTO accounts (user_id, balance, last_daily, total_earned)
             VALUES (?, ?, ?, ?)",
            params![
                account.user_id,
                account.balance,
                account.last_daily,
                account.total_earned
            ],
        )
        .with_context(|| format!("write account {}", account.user_id))?;
    }
    tx.commit().context("commit ledger transaction")?;
    Ok(())
}
