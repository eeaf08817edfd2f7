//! Config file watching for live settings reload.
//!
//! Watches the directories holding the config files (the files themselves may
//! not exist yet) and forwards changes to the watched files over a channel.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

/// Events from the file watcher
#[derive(Debug)]
pub enum WatcherEvent {
    ConfigFileChanged(PathBuf),
    WatcherError(notify::Error),
}

/// Keeps the underlying watcher alive; dropping it stops the events
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    watched_dirs: Vec<PathBuf>,
}

impl ConfigWatcher {
    /// Start watching the given config files
    pub fn start(files: &[PathBuf]) -> Result<(Self, mpsc::UnboundedReceiver<WatcherEvent>)> {
        let (tx, rx) = mpsc::unbounded_channel();

        let names: BTreeSet<OsString> = files
            .iter()
            .filter_map(|f| f.file_name().map(|n| n.to_os_string()))
            .collect();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    if let EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) =
                        event.kind
                    {
                        for path in event.paths {
                            let watched = path.file_name().is_some_and(|n| names.contains(n));
                            if watched {
                                let _ = tx.send(WatcherEvent::ConfigFileChanged(path));
                            }
                        }
                    }
                }
                Err(e) => {
                    let _ = tx.send(WatcherEvent::WatcherError(e));
                }
            },
            Config::default().with_poll_interval(Duration::from_secs(1)),
        )?;

        let dirs: BTreeSet<PathBuf> = files
            .iter()
            .filter_map(|f| f.parent().map(|p| p.to_path_buf()))
            .filter(|dir| dir.is_dir())
            .collect();

        for dir in &dirs {
            watcher.watch(dir, RecursiveMode::NonRecursive)?;
        }

        Ok((
            Self {
                _watcher: watcher,
                watched_dirs: dirs.into_iter().collect(),
            },
            rx,
        ))
    }

    pub fn watched_dirs(&self) -> &[PathBuf] {
        &self.watched_dirs
    }
}
