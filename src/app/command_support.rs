use crate::catalog::ToolCatalog;
use crate::config::{ExtractorKind, Settings};
use crate::invoker::CatalogToolInvoker;
use crate::orchestration::{ParameterExtractor, ToolParameterExtractor, WorkflowCoordinator};
use crate::provider::{
    CommandBackend, ExtractionBackend, HeuristicBackend, StructuredBackend, UnconfiguredBackend,
};
use crate::schema::{SchemaRegistry, StaticSchemaRegistry};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::sync::Arc;

/// Everything a command needs, wired from one `Settings`.
pub struct AppContext {
    pub settings: Settings,
    pub catalog: Arc<ToolCatalog>,
    pub coordinator: WorkflowCoordinator,
}

pub fn build_context(settings: Settings) -> Result<AppContext, String> {
    let catalog = Arc::new(settings.build_catalog().map_err(|err| err.to_string())?);
    let registry = StaticSchemaRegistry::builtin();

    let (backend, structured): (Arc<dyn ExtractionBackend>, Arc<dyn StructuredBackend>) =
        match settings.extractor.kind {
            ExtractorKind::Heuristic => {
                let backend: Arc<dyn ExtractionBackend> =
                    Arc::new(HeuristicBackend::for_schemas(registry.tools()));
                let structured: Arc<dyn StructuredBackend> = Arc::new(UnconfiguredBackend);
                (backend, structured)
            }
            ExtractorKind::Command => {
                let binary = settings
                    .extractor
                    .binary
                    .clone()
                    .ok_or_else(|| "`extractor.binary` is not configured".to_string())?;
                let command = Arc::new(
                    CommandBackend::new(binary)
                        .with_args(settings.extractor.args.clone())
                        .with_timeout(settings.extraction_timeout()),
                );
                let backend: Arc<dyn ExtractionBackend> = command.clone();
                let structured: Arc<dyn StructuredBackend> = command;
                (backend, structured)
            }
        };
    tracing::debug!(extractor = settings.extractor.kind.as_str(), "extraction backend ready");

    let schemas: Arc<dyn SchemaRegistry> = Arc::new(registry);
    let extractor = ParameterExtractor::new(backend)
        .with_max_candidates(settings.max_candidates)
        .with_fallback_tool(settings.fallback_tool.clone())
        .with_timeout(settings.extraction_timeout());
    let invoker = CatalogToolInvoker::new(Arc::clone(&catalog))
        .with_mock_mode(settings.mock_mode)
        .with_credentials(settings.credentials.clone());

    let coordinator = WorkflowCoordinator::new(extractor, Arc::clone(&schemas), Arc::new(invoker))
        .with_direct_extractor(ToolParameterExtractor::new(structured, schemas))
        .with_tool_timeout(settings.tool_timeout());

    Ok(AppContext {
        settings,
        catalog,
        coordinator,
    })
}

/// Inline JSON, or `-` to read it from stdin.
pub fn read_request<T: DeserializeOwned>(args: &[String], usage: &str) -> Result<T, String> {
    if args.is_empty() {
        return Err(format!("usage: {usage}"));
    }
    let raw = if args.len() == 1 && args[0] == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|err| format!("failed to read request from stdin: {err}"))?;
        buffer
    } else {
        args.join(" ")
    };
    serde_json::from_str(&raw).map_err(|err| format!("invalid request json: {err}"))
}

pub fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|err| err.to_string())
}
