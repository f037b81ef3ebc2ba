use crate::domain::model::{Bookmark, ExploreEvent};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use chrono::Utc;
use tokio::sync::Mutex;

pub const BOOKMARKS_FILE: &str = "bookmarks.json";

/// 收藏清單：依活動 id 去重，最新的排在最前面，每次變更都寫回 Storage
pub struct BookmarkStore<S: Storage> {
    storage: S,
    bookmarks: Mutex<Vec<Bookmark>>,
}

impl<S: Storage> BookmarkStore<S> {
    pub async fn load(storage: S) -> Result<Self> {
        let bookmarks = match storage.read_file(BOOKMARKS_FILE).await? {
            Some(data) if !data.is_empty() => serde_json::from_slice::<Vec<Bookmark>>(&data)?,
            _ => Vec::new(),
        };
        tracing::debug!("Loaded {} bookmarks", bookmarks.len());

        Ok(Self {
            storage,
            bookmarks: Mutex::new(bookmarks),
        })
    }

    pub async fn list(&self) -> Vec<Bookmark> {
        self.bookmarks.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.bookmarks.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.bookmarks.lock().await.is_empty()
    }

    pub async fn contains(&self, event_id: i64) -> bool {
        self.bookmarks
            .lock()
            .await
            .iter()
            .any(|b| b.event.id == event_id)
    }

    /// 已收藏時回傳 `false`，不重複加入
    pub async fn add(&self, event: ExploreEvent) -> Result<bool> {
        let mut bookmarks = self.bookmarks.lock().await;
        self.insert_locked(&mut bookmarks, event).await
    }

    pub async fn remove(&self, event_id: i64) -> Result<bool> {
        let mut bookmarks = self.bookmarks.lock().await;
        self.remove_locked(&mut bookmarks, event_id).await
    }

    /// 回傳切換後是否為收藏狀態
    pub async fn toggle(&self, event: ExploreEvent) -> Result<bool> {
        let mut bookmarks = self.bookmarks.lock().await;
        if bookmarks.iter().any(|b| b.event.id == event.id) {
            self.remove_locked(&mut bookmarks, event.id).await?;
            Ok(false)
        } else {
            self.insert_locked(&mut bookmarks, event).await
        }
    }

    pub async fn clear(&self) -> Result<()> {
        let mut bookmarks = self.bookmarks.lock().await;
        self.commit(&mut bookmarks, Vec::new()).await
    }

    async fn insert_locked(&self, bookmarks: &mut Vec<Bookmark>, event: ExploreEvent) -> Result<bool> {
        if bookmarks.iter().any(|b| b.event.id == event.id) {
            return Ok(false);
        }

        let (id, title) = (event.id, event.title.clone());
        let mut next = Vec::with_capacity(bookmarks.len() + 1);
        next.push(Bookmark {
            event,
            saved_at: Utc::now(),
        });
        next.extend(bookmarks.iter().cloned());

        self.commit(bookmarks, next).await?;
        tracing::info!("🔖 Bookmarked event {} ({})", id, title);
        Ok(true)
    }

    async fn remove_locked(&self, bookmarks: &mut Vec<Bookmark>, event_id: i64) -> Result<bool> {
        let next: Vec<Bookmark> = bookmarks
            .iter()
            .filter(|b| b.event.id != event_id)
            .cloned()
            .collect();
        if next.len() == bookmarks.len() {
            return Ok(false);
        }

        self.commit(bookmarks, next).await?;
        tracing::info!("🗑️ Removed bookmark for event {}", event_id);
        Ok(true)
    }

    // 寫入成功後才替換記憶體中的清單
    async fn commit(&self, bookmarks: &mut Vec<Bookmark>, next: Vec<Bookmark>) -> Result<()> {
        let data = serde_json::to_vec_pretty(&next)?;
        self.storage.write_file(BOOKMARKS_FILE, &data).await?;
        *bookmarks = next;
        Ok(())
    }
}
