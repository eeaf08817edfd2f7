use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::*;

use crate::config::{ClientSettings, PROJECT_CONFIG_FILE};
use crate::lsp::backend::Backend;
use crate::validation::engine::{validate_document, Severity};

/// Trait for handling completion requests
#[tower_lsp::async_trait]
pub trait HandleCompletion {
    async fn handle_completion(
        &self,
        params: CompletionParams,
    ) -> LspResult<Option<CompletionResponse>>;
    async fn handle_completion_resolve(&self, item: CompletionItem) -> LspResult<CompletionItem>;
}

/// Trait for handling diagnostics
#[tower_lsp::async_trait]
pub trait HandleDiagnostics {
    async fn publish_diagnostics(&self, uri: Url);
    async fn publish_all_diagnostics(&self);
    fn create_lsp_diagnostic(
        &self,
        validation_diagnostic: crate::validation::engine::Diagnostic,
    ) -> tower_lsp::lsp_types::Diagnostic;
}

/// Trait for handling settings changes
#[tower_lsp::async_trait]
pub trait HandleConfiguration {
    async fn handle_did_change_configuration(&self, params: DidChangeConfigurationParams);
    async fn handle_did_change_watched_files(&self, params: DidChangeWatchedFilesParams);
    async fn reload_config_files(&self);
}

#[tower_lsp::async_trait]
impl HandleCompletion for Backend {
    async fn handle_completion(
        &self,
        _params: CompletionParams,
    ) -> LspResult<Option<CompletionResponse>> {
        // No completion sources for dialogue scripts yet
        Ok(Some(CompletionResponse::Array(Vec::new())))
    }

    async fn handle_completion_resolve(&self, item: CompletionItem) -> LspResult<CompletionItem> {
        Ok(item)
    }
}

#[tower_lsp::async_trait]
impl HandleDiagnostics for Backend {
    /// Validate a document from scratch and publish the result, replacing stale diagnostics
    async fn publish_diagnostics(&self, uri: Url) {
        let doc_state = match self.documents.lock().await.get(&uri) {
            Some(state) => state.clone(),
            None => return,
        };

        let settings = self.settings.read().await.resolve();
        let validation_result =
            validate_document(&doc_state.content, settings.max_number_of_problems);
        log::debug!(
            "{}: {} error(s), {} warning(s)",
            uri,
            validation_result.error_count(),
            validation_result.warning_count()
        );

        let diagnostics = validation_result
            .diagnostics
            .into_iter()
            .map(|d| self.create_lsp_diagnostic(d))
            .collect();

        self.client
            .publish_diagnostics(uri, diagnostics, doc_state.version)
            .await;
    }

    async fn publish_all_diagnostics(&self) {
        let uris: Vec<Url> = self.documents.lock().await.keys().cloned().collect();
        for uri in uris {
            self.publish_diagnostics(uri).await;
        }
    }

    fn create_lsp_diagnostic(
        &self,
        validation_diagnostic: crate::validation::engine::Diagnostic,
    ) -> tower_lsp::lsp_types::Diagnostic {
        let severity = match validation_diagnostic.severity {
            Severity::Error => DiagnosticSeverity::ERROR,
            Severity::Warning => DiagnosticSeverity::WARNING,
        };
        let range = validation_diagnostic.range;

        tower_lsp::lsp_types::Diagnostic::new(
            Range::new(
                Position::new(range.start.line, range.start.character),
                Position::new(range.end.line, range.end.character),
            ),
            Some(severity),
            None,
            Some(validation_diagnostic.source.to_string()),
            validation_diagnostic.message,
            None,
            None,
        )
    }
}

#[tower_lsp::async_trait]
impl HandleConfiguration for Backend {
    async fn handle_did_change_configuration(&self, params: DidChangeConfigurationParams) {
        let client_limit = match ClientSettings::from_value(params.settings) {
            Ok(settings) => settings.max_number_of_problems(),
            Err(e) => {
                self.client
                    .log_message(MessageType::WARNING, format!("{:#}", e))
                    .await;
                None
            }
        };

        let settings = {
            let mut layers = self.settings.write().await;
            layers.client = client_limit;
            layers.resolve()
        };
        log::info!(
            "maxNumberOfProblems is now {}",
            settings.max_number_of_problems
        );

        self.publish_all_diagnostics().await;
    }

    async fn handle_did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        self.client
            .log_message(MessageType::INFO, "We received a file change event")
            .await;

        let config_changed = params.changes.iter().any(|change| {
            change
                .uri
                .to_file_path()
                .ok()
                .and_then(|path| path.file_name().map(|n| n == PROJECT_CONFIG_FILE))
                .unwrap_or(false)
        });

        if config_changed {
            self.reload_config_files().await;
        }
    }

    /// Re-read every config file layer and revalidate open documents
    async fn reload_config_files(&self) {
        let root = self.workspace_root.read().await.clone();
        let fresh = self.config.load_layers(root.as_deref());

        let settings = {
            let mut layers = self.settings.write().await;
            layers.reload_files(fresh);
            layers.resolve()
        };
        self.client
            .log_message(
                MessageType::INFO,
                format!(
                    "Settings reloaded (maxNumberOfProblems = {})",
                    settings.max_number_of_problems
                ),
            )
            .await;

        self.publish_all_diagnostics().await;
    }
}
