use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::config::SettingsLayers;
use crate::lsp::document::DocumentState;
use crate::lsp::handlers::{HandleCompletion, HandleConfiguration, HandleDiagnostics};
use crate::watcher::{ConfigWatcher, WatcherEvent};
use crate::Config;

/// The main LSP backend that holds state and implements the Language Server Protocol
#[derive(Clone)]
pub struct Backend {
    pub client: Client,
    pub documents: Arc<Mutex<HashMap<Url, DocumentState>>>,
    pub settings: Arc<RwLock<SettingsLayers>>,
    pub workspace_root: Arc<RwLock<Option<PathBuf>>>,
    pub config: Config,
    watcher: Arc<Mutex<Option<ConfigWatcher>>>,
}

impl Backend {
    pub fn new(client: Client, config: Config) -> Self {
        let settings = config.load_layers(None);

        Self {
            client,
            documents: Arc::new(Mutex::new(HashMap::new())),
            settings: Arc::new(RwLock::new(settings)),
            workspace_root: Arc::new(RwLock::new(None)),
            config,
            watcher: Arc::new(Mutex::new(None)),
        }
    }

    /// Watch config files and revalidate open documents when they change
    async fn start_config_watcher(&self) {
        let root = self.workspace_root.read().await.clone();
        let files = self.config.watched_files(root.as_deref());

        let (watcher, mut rx) = match ConfigWatcher::start(&files) {
            Ok(started) => started,
            Err(e) => {
                self.client
                    .log_message(
                        MessageType::WARNING,
                        format!("Config file watching disabled: {}", e),
                    )
                    .await;
                return;
            }
        };
        for dir in watcher.watched_dirs() {
            log::info!("Watching {} for config changes", dir.display());
        }
        *self.watcher.lock().await = Some(watcher);

        let backend = self.clone();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                match event {
                    WatcherEvent::ConfigFileChanged(path) => {
                        backend
                            .client
                            .log_message(
                                MessageType::INFO,
                                format!("Config file changed: {}", path.display()),
                            )
                            .await;
                        backend.reload_config_files().await;
                    }
                    WatcherEvent::WatcherError(e) => {
                        backend
                            .client
                            .log_message(
                                MessageType::ERROR,
                                format!("Config file watcher error: {}", e),
                            )
                            .await;
                    }
                }
            }
        });
    }
}

/// Workspace root from the initialize request, if it is a local path
fn workspace_root(params: &InitializeParams) -> Option<PathBuf> {
    if let Some(folder) = params.workspace_folders.as_ref().and_then(|f| f.first()) {
        return folder.uri.to_file_path().ok();
    }

    #[allow(deprecated)]
    let root_uri = params.root_uri.as_ref()?;
    root_uri.to_file_path().ok()
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(
        &self,
        params: InitializeParams,
    ) -> tower_lsp::jsonrpc::Result<InitializeResult> {
        let root = workspace_root(&params);
        {
            let fresh = self.config.load_layers(root.as_deref());
            self.settings.write().await.reload_files(fresh);
        }
        *self.workspace_root.write().await = root;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(true),
                    ..Default::default()
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "tdls".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "tdls initialized")
            .await;
        self.start_config_watcher().await;
    }

    async fn shutdown(&self) -> tower_lsp::jsonrpc::Result<()> {
        drop(self.watcher.lock().await.take());
        Ok(())
    }

    async fn completion(
        &self,
        params: CompletionParams,
    ) -> tower_lsp::jsonrpc::Result<Option<CompletionResponse>> {
        self.handle_completion(params).await
    }

    async fn completion_resolve(
        &self,
        item: CompletionItem,
    ) -> tower_lsp::jsonrpc::Result<CompletionItem> {
        self.handle_completion_resolve(item).await
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        let doc_state = DocumentState {
            content: params.text_document.text,
            version: Some(params.text_document.version),
        };

        let mut docs = self.documents.lock().await;
        docs.insert(uri.clone(), doc_state);
        drop(docs); // Release the lock before calling publish_diagnostics

        self.publish_diagnostics(uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        // Full sync: the last change carries the whole document
        if let Some(change) = params.content_changes.into_iter().last() {
            let doc_state = DocumentState {
                content: change.text,
                version: Some(params.text_document.version),
            };

            let mut docs = self.documents.lock().await;
            docs.insert(uri.clone(), doc_state);
            drop(docs);

            self.publish_diagnostics(uri).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents.lock().await.remove(&uri);

        self.client
            .log_message(MessageType::INFO, format!("{} closed.", uri))
            .await;
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        self.handle_did_change_configuration(params).await
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        self.handle_did_change_watched_files(params).await
    }
}
