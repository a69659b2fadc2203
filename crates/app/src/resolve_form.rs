//! Form resolver use case.

use regform_domain::{PersonalDetailsInput, Schema, ValidationOutcome, personal_details_schema};
use regform_ports::{BoxFuture, FormResolverPort, LogFields, LoggerPort};
use regform_shared::{ErrorEnvelope, FieldSource, Result, present_fields};
use serde_json::Value;
use std::sync::Arc;

/// Resolver backed by a compiled [`Schema`].
///
/// Holds no per-call state; clones share the schema.
pub struct SchemaResolver<R> {
    schema: Arc<Schema<R>>,
    logger: Option<Arc<dyn LoggerPort>>,
}

impl<R> Clone for SchemaResolver<R> {
    fn clone(&self) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
            logger: self.logger.clone(),
        }
    }
}

impl<R> SchemaResolver<R>
where
    R: FieldSource + Clone + Send + 'static,
{
    /// Wrap a schema.
    #[must_use]
    pub fn new(schema: Schema<R>) -> Self {
        Self {
            schema: Arc::new(schema),
            logger: None,
        }
    }

    /// Attach a logger for resolve events.
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn LoggerPort>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The schema this resolver applies.
    #[must_use]
    pub fn schema(&self) -> &Schema<R> {
        &self.schema
    }

    #[tracing::instrument(level = "debug", name = "form.resolve", skip_all)]
    fn run(&self, input: &R) -> ValidationOutcome<R> {
        let logger = self.logger.as_deref();
        if let Some(logger) = logger {
            logger.debug(
                "form.resolve.start",
                "Form submission received",
                Some(presence_fields(input)),
            );
        }

        let outcome = self.schema.validate(input);

        if let Some(logger) = logger {
            match &outcome {
                ValidationOutcome::Valid { values } => logger.info(
                    "form.resolve.valid",
                    "Form submission accepted",
                    Some(presence_fields(values)),
                ),
                ValidationOutcome::Invalid { errors } => {
                    let failed = errors
                        .field_names()
                        .map(Value::from)
                        .collect::<Vec<_>>();
                    let mut fields = LogFields::new();
                    fields.insert("failedFields".into(), Value::Array(failed));
                    fields.insert("errorCount".into(), Value::from(errors.len()));
                    logger.warn(
                        "form.resolve.invalid",
                        "Form submission rejected",
                        Some(fields),
                    );
                },
            }
        }

        outcome
    }
}

impl<R> FormResolverPort<R> for SchemaResolver<R>
where
    R: FieldSource + Clone + Send + Sync + 'static,
{
    fn resolve(&self, input: R) -> BoxFuture<'_, ValidationOutcome<R>> {
        Box::pin(async move { self.run(&input) })
    }
}

/// Resolver for the Step-1 personal details form.
pub type PersonalDetailsResolver = SchemaResolver<PersonalDetailsInput>;

/// Build the Step-1 resolver.
pub fn personal_details_resolver() -> Result<PersonalDetailsResolver> {
    let schema = personal_details_schema().map_err(ErrorEnvelope::from)?;
    Ok(SchemaResolver::new(schema))
}

fn presence_fields<R: FieldSource>(input: &R) -> LogFields {
    // Field names only; values stay out of logs.
    let present = present_fields(input)
        .into_keys()
        .map(Value::from)
        .collect::<Vec<_>>();
    let mut fields = LogFields::new();
    fields.insert("fieldCount".into(), Value::from(present.len()));
    fields.insert("presentFields".into(), Value::Array(present));
    fields
}
