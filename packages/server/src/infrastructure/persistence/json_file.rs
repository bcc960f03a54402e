//! JSON file Snapshot Store 実装
//!
//! データディレクトリ内の 3 つのファイルに読み書きします。
//!
//! - `messages.json`: staffId → メッセージ配列
//! - `playtime.json`: staffId → 日付 → 分
//! - `staffs.json`: staffId → メタデータ
//!
//! 書き込みは一時ファイルに書いてから rename するので、途中で落ちても
//! 中途半端なファイルは残りません。読み込みに失敗した場合は空のドキュメントを返します。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::{fs, sync::Mutex};

use crate::{
    domain::{MessageLog, PersistenceError, PlaytimeLedger, Roster, SnapshotStore},
    infrastructure::dto::{
        conversion::{
            messages_from_document, messages_to_document, playtime_from_document,
            playtime_to_document, roster_from_document, roster_to_document,
        },
        document::{MessagesDocument, PlaytimeDocument, RosterDocument},
    },
};

pub const MESSAGES_FILE: &str = "messages.json";
pub const PLAYTIME_FILE: &str = "playtime.json";
pub const ROSTER_FILE: &str = "staffs.json";

/// JSON ファイルを使った SnapshotStore 実装
pub struct JsonFileSnapshotStore {
    data_dir: PathBuf,
    /// 同じファイルへの書き込みが重ならないようにする
    write_lock: Mutex<()>,
}

impl JsonFileSnapshotStore {
    /// 新しい JsonFileSnapshotStore を作成（ディレクトリは最初の書き込み時に作成）
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_of(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    /// ファイルを読み込んでパースする。ファイルが無い場合は `Ok(None)`
    async fn read_document<T: DeserializeOwned>(
        &self,
        path: &Path,
    ) -> Result<Option<T>, PersistenceError> {
        let raw = match fs::read(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistenceError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_slice(&raw)
            .map(Some)
            .map_err(|source| PersistenceError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// 読み込み → ドメインへの変換
    ///
    /// ファイルが読めない・JSON として壊れている場合は空のドキュメントを返す。
    /// 不正なエントリ（空のスタッフ ID、日付でないキー）は変換時にそのエントリだけ読み飛ばす。
    async fn load_or_default<D, T, F>(&self, file: &str, convert: F) -> T
    where
        D: DeserializeOwned,
        T: Default,
        F: FnOnce(D) -> T,
    {
        let path = self.path_of(file);
        match self.read_document::<D>(&path).await {
            Ok(Some(document)) => {
                tracing::info!("Loaded {}", path.display());
                convert(document)
            }
            Ok(None) => {
                tracing::debug!("{} does not exist; starting empty", path.display());
                T::default()
            }
            Err(e) => {
                tracing::error!("Failed to load {}, starting empty: {}", path.display(), e);
                T::default()
            }
        }
    }

    /// pretty-print した JSON を一時ファイルに書き、rename で置き換える
    async fn write_document<T: Serialize>(
        &self,
        file: &str,
        document: &T,
    ) -> Result<(), PersistenceError> {
        let path = self.path_of(file);
        let body = serde_json::to_vec_pretty(document)?;
        let io_error = |source| PersistenceError::Io {
            path: path.clone(),
            source,
        };

        let _guard = self.write_lock.lock().await;

        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|source| PersistenceError::Io {
                path: self.data_dir.clone(),
                source,
            })?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, &body).await.map_err(io_error)?;
        fs::rename(&tmp_path, &path).await.map_err(io_error)?;

        tracing::debug!("Saved {} ({} bytes)", path.display(), body.len());
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for JsonFileSnapshotStore {
    async fn load_messages(&self) -> MessageLog {
        self.load_or_default::<MessagesDocument, _, _>(MESSAGES_FILE, messages_from_document)
            .await
    }

    async fn load_playtime(&self) -> PlaytimeLedger {
        self.load_or_default::<PlaytimeDocument, _, _>(PLAYTIME_FILE, playtime_from_document)
            .await
    }

    async fn load_roster(&self) -> Roster {
        self.load_or_default::<RosterDocument, _, _>(ROSTER_FILE, roster_from_document)
            .await
    }

    async fn save_messages(&self, messages: &MessageLog) -> Result<(), PersistenceError> {
        self.write_document(MESSAGES_FILE, &messages_to_document(messages))
            .await
    }

    async fn save_playtime(&self, playtime: &PlaytimeLedger) -> Result<(), PersistenceError> {
        self.write_document(PLAYTIME_FILE, &playtime_to_document(playtime))
            .await
    }

    async fn save_roster(&self, roster: &Roster) -> Result<(), PersistenceError> {
        self.write_document(ROSTER_FILE, &roster_to_document(roster))
            .await
    }
}
