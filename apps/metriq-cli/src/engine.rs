//! Prompt-to-summary pipeline.
//!
//! One prompt at a time: resolve (by the selected strategy), compile,
//! dispatch, summarize. The ontology snapshot is shared read-only; every
//! failure is reported to the caller and never ends the session.

use anyhow::{anyhow, bail};
use chrono::Utc;
use clap::ValueEnum;
use metriq_backend::{summarize, BackendClient};
use metriq_core::{CompiledQuery, MetricQuery};
use metriq_nlp::{compile, extract_time_window, validate_translation, HeuristicResolver};
use metriq_ontology::{Ontology, ProjectedContext};
use metriq_translator::{grounding_message, Translator};
use std::sync::Arc;
use tracing::{debug, info};

const DEFAULT_UNIT: &str = "ms";

/// Resolution strategy selected at the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResolverMode {
    /// Translator when configured, heuristic otherwise
    Auto,
    /// Deterministic keyword matching, no external calls
    Heuristic,
    /// Alias/service lookup through the ontology graph
    Ontology,
    /// External translator gated by ontology validation
    Llm,
}

/// A resolved query plus presentation hints.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub query: MetricQuery,
    pub unit: Option<String>,
}

/// Result of a fully processed prompt.
#[derive(Debug, Clone)]
pub struct PromptOutcome {
    pub compiled: CompiledQuery,
    pub summary: String,
}

pub struct Engine {
    ontology: Arc<Ontology>,
    mode: ResolverMode,
    heuristic: HeuristicResolver,
    backend: BackendClient,
    translator: Option<Box<dyn Translator>>,
}

impl Engine {
    pub fn new(
        ontology: Arc<Ontology>,
        mode: ResolverMode,
        backend: BackendClient,
        translator: Option<Box<dyn Translator>>,
    ) -> Self {
        let heuristic = HeuristicResolver::from_ontology(&ontology);
        Self {
            ontology,
            mode,
            heuristic,
            backend,
            translator,
        }
    }

    fn effective_mode(&self) -> ResolverMode {
        match self.mode {
            ResolverMode::Auto if self.translator.is_some() => ResolverMode::Llm,
            ResolverMode::Auto => ResolverMode::Heuristic,
            other => other,
        }
    }

    /// Resolves a prompt into a structured query using the selected
    /// strategy. Fails when no metric can be identified; a query with an
    /// empty metric name must never reach the backend.
    pub async fn resolve(&self, prompt: &str) -> anyhow::Result<Resolution> {
        let resolution = match self.effective_mode() {
            ResolverMode::Heuristic | ResolverMode::Auto => Resolution {
                query: self.heuristic.resolve(prompt),
                unit: None,
            },
            ResolverMode::Ontology => self.resolve_via_ontology(prompt)?,
            ResolverMode::Llm => self.resolve_via_translator(prompt).await?,
        };

        if !resolution.query.has_metric() {
            bail!("could not identify a metric in the prompt");
        }
        Ok(resolution)
    }

    fn resolve_via_ontology(&self, prompt: &str) -> anyhow::Result<Resolution> {
        let matched = self.ontology.match_prompt(prompt)?;
        let alias = matched
            .alias
            .ok_or_else(|| anyhow!("no known view alias mentioned in prompt"))?;
        let resolved = self.ontology.resolve_view(&matched.service, &alias)?;

        if let Some((team, owners)) = self.ontology.owning_team(&matched.service) {
            info!(service = %matched.service, %team, on_call = %owners.on_call, "resolved service");
        }

        let mut query = MetricQuery::new(resolved.metric_name, resolved.view.aggregation);
        match resolved.view.filter.as_deref().and_then(|f| f.split_once(':')) {
            Some((key, value)) => {
                query.filters.insert(key.to_string(), value.to_string());
            }
            None => {
                query
                    .filters
                    .insert("kube_deployment".to_string(), matched.service.clone());
            }
        }
        if let Some(window) = extract_time_window(&prompt.to_lowercase()) {
            query.time_window = window;
        }

        Ok(Resolution {
            unit: resolved.view.unit.clone(),
            query,
        })
    }

    async fn resolve_via_translator(&self, prompt: &str) -> anyhow::Result<Resolution> {
        let translator = self
            .translator
            .as_ref()
            .ok_or_else(|| anyhow!("no translator configured"))?;

        let grounding = ProjectedContext::project(&self.ontology).to_json()?;
        let output = translator
            .translate(&grounding_message(&grounding), prompt)
            .await?;
        debug!(%output, "raw translator output");

        let query = validate_translation(&output, &self.ontology)?;
        Ok(Resolution { query, unit: None })
    }

    /// Resolves, compiles, dispatches, and summarizes one prompt.
    pub async fn run_prompt(&self, prompt: &str) -> anyhow::Result<PromptOutcome> {
        let resolution = self.resolve(prompt).await?;
        let compiled = compile(&resolution.query, Utc::now());

        let result = self.backend.query(&compiled).await?;
        let summary = summarize(&result, resolution.unit.as_deref().unwrap_or(DEFAULT_UNIT));

        Ok(PromptOutcome { compiled, summary })
    }
}
