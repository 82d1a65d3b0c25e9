//! File watching for live reload.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Quiet period after the last relevant event before it is delivered.
const DEBOUNCE: Duration = Duration::from_millis(100);

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    /// Catalog YAML was modified
    ContentModified(PathBuf),

    /// Image or stylesheet was modified
    AssetModified(PathBuf),

    /// File was created
    Created(PathBuf),

    /// File was deleted
    Deleted(PathBuf),

    /// Generic modification
    Modified(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            WatchEvent::ContentModified(p)
            | WatchEvent::AssetModified(p)
            | WatchEvent::Created(p)
            | WatchEvent::Deleted(p)
            | WatchEvent::Modified(p) => p,
        }
    }
}

/// File watcher for detecting changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Create a new file watcher for the given paths. Missing paths are skipped.
    ///
    /// Returns the watcher and a channel to receive events.
    pub fn new(
        paths: &[PathBuf],
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        for path in paths {
            if path.exists() {
                watcher
                    .watch(path, RecursiveMode::Recursive)
                    .map_err(std::io::Error::other)?;
            } else {
                tracing::debug!("Not watching missing path {}", path.display());
            }
        }

        std::thread::spawn(move || debounce(sync_rx, async_tx, DEBOUNCE));

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Forward classified events once `window` passes with no new relevant event.
///
/// Editors emit bursts per save (truncate, write, close). Events that classify
/// to nothing do not hold back the flush. Only the latest event per path is
/// kept, so the last write of a burst is the one delivered.
fn debounce(
    rx: mpsc::Receiver<notify::Event>,
    tx: async_mpsc::Sender<WatchEvent>,
    window: Duration,
) {
    let mut pending: Vec<WatchEvent> = Vec::new();
    let mut deadline: Option<Instant> = None;

    loop {
        let received = match deadline {
            Some(at) => rx.recv_timeout(at.saturating_duration_since(Instant::now())),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(event) => {
                for path in &event.paths {
                    if let Some(e) = classify_event(path, &event.kind) {
                        pending.retain(|p| p.path() != e.path());
                        pending.push(e);
                        deadline = Some(Instant::now() + window);
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                deadline = None;
                for e in pending.drain(..) {
                    if tx.blocking_send(e).is_err() {
                        return;
                    }
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                for e in pending.drain(..) {
                    let _ = tx.blocking_send(e);
                }
                return;
            }
        }
    }
}

/// Classify a notify event into a WatchEvent.
fn classify_event(path: &Path, kind: &notify::EventKind) -> Option<WatchEvent> {
    use notify::EventKind;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match kind {
        EventKind::Create(_) => Some(WatchEvent::Created(path.to_path_buf())),
        EventKind::Remove(_) => Some(WatchEvent::Deleted(path.to_path_buf())),
        EventKind::Modify(_) => match ext {
            "yaml" | "yml" => Some(WatchEvent::ContentModified(path.to_path_buf())),
            "png" | "jpg" | "jpeg" | "svg" | "webp" | "gif" | "css" => {
                Some(WatchEvent::AssetModified(path.to_path_buf()))
            }
            _ => Some(WatchEvent::Modified(path.to_path_buf())),
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, AccessMode, CreateKind, DataChange, ModifyKind};
    use notify::{Event, EventKind};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn classifies_by_extension() {
        let modify = EventKind::Modify(ModifyKind::Any);

        assert_eq!(
            classify_event(Path::new("content/catalog.yaml"), &modify),
            Some(WatchEvent::ContentModified(PathBuf::from("content/catalog.yaml")))
        );
        assert_eq!(
            classify_event(Path::new("assets/mms-logo.png"), &modify),
            Some(WatchEvent::AssetModified(PathBuf::from("assets/mms-logo.png")))
        );
        assert_eq!(
            classify_event(Path::new("notes.txt"), &EventKind::Create(CreateKind::File)),
            Some(WatchEvent::Created(PathBuf::from("notes.txt")))
        );
        assert_eq!(
            classify_event(Path::new("notes.txt"), &EventKind::Access(AccessKind::Any)),
            None
        );
    }

    fn event(kind: EventKind, path: &Path) -> Event {
        Event::new(kind).add_path(path.to_path_buf())
    }

    #[test]
    fn save_burst_delivers_one_content_change() {
        let path = PathBuf::from("content/catalog.yaml");
        let (tx, rx) = mpsc::channel();
        let (async_tx, mut async_rx) = async_mpsc::channel(10);

        // What inotify reports for one save of an existing file
        for kind in [
            EventKind::Access(AccessKind::Open(AccessMode::Any)),
            EventKind::Modify(ModifyKind::Data(DataChange::Any)),
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            EventKind::Access(AccessKind::Close(AccessMode::Write)),
        ] {
            tx.send(event(kind, &path)).unwrap();
        }

        let handle = std::thread::spawn(move || debounce(rx, async_tx, Duration::from_millis(20)));

        assert_eq!(
            async_rx.blocking_recv(),
            Some(WatchEvent::ContentModified(path))
        );

        drop(tx);
        handle.join().unwrap();
        assert_eq!(async_rx.blocking_recv(), None);
    }

    #[test]
    fn access_events_alone_deliver_nothing() {
        let (tx, rx) = mpsc::channel();
        let (async_tx, mut async_rx) = async_mpsc::channel(10);

        tx.send(event(
            EventKind::Access(AccessKind::Open(AccessMode::Any)),
            Path::new("content/catalog.yaml"),
        ))
        .unwrap();
        drop(tx);

        debounce(rx, async_tx, Duration::from_millis(20));

        assert_eq!(async_rx.blocking_recv(), None);
    }

    #[test]
    fn separate_paths_are_all_delivered() {
        let (tx, rx) = mpsc::channel();
        let (async_tx, mut async_rx) = async_mpsc::channel(10);
        let modify = EventKind::Modify(ModifyKind::Any);

        tx.send(event(modify, Path::new("content/catalog.yaml"))).unwrap();
        tx.send(event(modify, Path::new("assets/mms-logo.png"))).unwrap();
        drop(tx);

        debounce(rx, async_tx, Duration::from_millis(20));

        assert_eq!(
            async_rx.blocking_recv(),
            Some(WatchEvent::ContentModified(PathBuf::from("content/catalog.yaml")))
        );
        assert_eq!(
            async_rx.blocking_recv(),
            Some(WatchEvent::AssetModified(PathBuf::from("assets/mms-logo.png")))
        );
    }

    #[tokio::test]
    async fn editing_existing_catalog_reports_content_change() {
        let temp = tempdir().unwrap();
        let content_dir = temp.path().join("content");
        fs::create_dir_all(&content_dir).unwrap();
        let catalog = content_dir.join("catalog.yaml");
        fs::write(&catalog, "company: {}").unwrap();

        let (watcher, mut rx) = FileWatcher::new(&[content_dir.clone()]).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(&catalog, "company: { name: MMS }").unwrap();

        let received = tokio::time::timeout(Duration::from_secs(3), async {
            while let Some(event) = rx.recv().await {
                if matches!(event, WatchEvent::ContentModified(_)) {
                    return Some(event);
                }
            }
            None
        })
        .await;

        drop(watcher);

        let event = received
            .expect("timeout waiting for content change")
            .expect("channel closed before content change");
        assert_eq!(event.path().file_name(), catalog.file_name());
    }

    #[tokio::test]
    async fn watches_file_changes() {
        let temp = tempdir().unwrap();
        let test_file = temp.path().join("catalog.yaml");

        let (watcher, mut rx) = FileWatcher::new(&[temp.path().to_path_buf()]).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(&test_file, "company: {}").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;

        drop(watcher);

        assert!(event.is_ok(), "timeout waiting for file watch event");
        assert!(event.unwrap().is_some(), "channel should not be closed");
    }
}
