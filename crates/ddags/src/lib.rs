//! ddags - Model schema definition with single inheritance.
//!
//! Loading, validation and resolution of model snapshots. A snapshot lists
//! models and the inheritance edges between them; resolving a model yields
//! its effective attribute set, inherited attributes included.

pub mod config;

mod error;
mod session;

pub use ddags_core::{attribute, identifier, model};
pub use ddags_schema::{ErrorCode, SchemaError};

pub use error::DdagsError;
pub use session::SchemaSession;

use log::{debug, info, trace};

use ddags_schema::{
    AttributeValidator, InheritanceGraph, ModelRegistry, snapshot::RawModelSnapshot,
};

use config::AppConfig;
use identifier::ModelId;
use model::{InheritanceDefinition, ModelSnapshot, ResolvedModel};

/// Builder for loading model snapshots into resolvable sessions.
///
/// # Examples
///
/// ```rust
/// use ddags::{SchemaBuilder, config::AppConfig, identifier::ModelId};
///
/// let source = r#"{
///     "models": [
///         { "modelId": "animal", "name": "Animal", "attributes": [
///             { "name": "name", "type": { "kind": "primitive", "type": "STRING" } }
///         ] },
///         { "modelId": "dog", "name": "Dog", "attributes": [
///             { "name": "breed", "type": { "kind": "primitive", "type": "STRING" } }
///         ] }
///     ],
///     "inheritances": [ { "parentModelId": "animal", "childModelId": "dog" } ]
/// }"#;
///
/// let builder = SchemaBuilder::new(AppConfig::default());
/// let session = builder.parse(source).expect("Failed to load snapshot");
///
/// let dog = session.resolve(ModelId::new("dog")).expect("Failed to resolve");
/// assert_eq!(dog.attributes().len(), 2);
///
/// let json = builder.render_json(&[dog]).expect("Failed to render");
/// assert!(json.contains("breed"));
/// ```
#[derive(Default)]
pub struct SchemaBuilder {
    config: AppConfig,
}

impl SchemaBuilder {
    /// Create a new schema builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including validation and output settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a JSON snapshot into a session.
    ///
    /// The document is first read into the loosely typed wire mirror so that
    /// unknown attribute kinds are reported as typed schema errors. Checks
    /// then run in the same order as for [`build`](Self::build): every model
    /// is registered before any attribute is decoded, and each attribute has
    /// its name checked, then its type decoded, then its reference validated
    /// before the next one is looked at.
    ///
    /// # Errors
    ///
    /// Returns `DdagsError::Snapshot` for malformed JSON and
    /// `DdagsError::Schema` for any schema error.
    pub fn parse(&self, source: &str) -> Result<SchemaSession, DdagsError> {
        info!("Parsing snapshot");

        let raw: RawModelSnapshot = serde_json::from_str(source)?;
        trace!(raw:?; "Raw snapshot");

        let identities = raw.identities()?;
        debug!(models_count = identities.len(); "Model identities checked");

        let validate = self.config.validation().validate_on_load();
        let models = raw
            .models
            .iter()
            .map(|model| {
                if !validate {
                    return model.decode();
                }
                let owner = self.owner(model.model_id());
                let attributes =
                    AttributeValidator::validate_raw(&model.attributes, &identities, owner)?;
                Ok(model.with_attributes(attributes))
            })
            .collect::<Result<Vec<_>, SchemaError>>()?;

        let registry = ModelRegistry::from_models(models)?;
        self.finish(registry, &raw.decode_inheritances())
    }

    /// Load a typed snapshot into a session.
    ///
    /// Steps, in order:
    /// 1. Register every model (registry errors stop here).
    /// 2. Validate every model's attributes, if enabled. Running this after
    ///    registration lets references point at models declared later.
    /// 3. Build the inheritance graph and check it for cycles.
    ///
    /// # Errors
    ///
    /// Returns `DdagsError::Schema` with the first error encountered.
    pub fn build(&self, snapshot: ModelSnapshot) -> Result<SchemaSession, DdagsError> {
        let (models, inheritances) = snapshot.into_parts();

        let registry = ModelRegistry::from_models(models)?;
        debug!(models_count = registry.len(); "Models registered");

        if self.config.validation().validate_on_load() {
            for model in registry.list() {
                let owner = self.owner(model.model_id());
                AttributeValidator::validate(model.attributes(), &registry, owner)?;
            }
            debug!("Attributes validated");
        }

        self.finish(registry, &inheritances)
    }

    /// The owner passed to the validator, if self references are rejected.
    fn owner(&self, model_id: ModelId) -> Option<ModelId> {
        self.config
            .validation()
            .reject_self_references()
            .then_some(model_id)
    }

    fn finish(
        &self,
        registry: ModelRegistry,
        inheritances: &[InheritanceDefinition],
    ) -> Result<SchemaSession, DdagsError> {
        let graph = InheritanceGraph::from_definitions(inheritances)?;
        graph.detect_cycle()?;
        debug!(edges_count = graph.edge_count(); "Inheritance graph is acyclic");

        info!(
            models_count = registry.len(),
            edges_count = graph.edge_count();
            "Snapshot loaded"
        );
        Ok(SchemaSession::new(
            registry,
            graph,
            self.config.validation().clone(),
        ))
    }

    /// Render resolved models as a JSON array.
    ///
    /// Output is pretty-printed when `output.pretty` is set.
    ///
    /// # Errors
    ///
    /// Returns `DdagsError::Snapshot` if serialization fails.
    pub fn render_json(&self, resolved: &[ResolvedModel]) -> Result<String, DdagsError> {
        let json = if self.config.output().pretty() {
            serde_json::to_string_pretty(resolved)?
        } else {
            serde_json::to_string(resolved)?
        };
        Ok(json)
    }
}
