// File: src/submit.rs
// Purpose: The per-submission state machine - decode, merge, prune, validate
// fail-fast, then hand the entity to the caller's commit handler

use crate::list_size::ListSizes;
use crate::mutator::{decode_inputs, fold_edits, prune_lists, RawInput};
use crate::upload::merge_uploads;
use formfold_types::{Entity, FieldDescriptor, FieldType, Rule, UploadResult, Value};
use formfold_validation::{message, validate, validate_article, validate_showcase};
use std::collections::HashMap;
use std::future::Future;
use thiserror::Error;
use tracing::error;

/// Phases of one submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Decoding,
    Merging,
    Pruning,
    Validating,
    Committed,
    Rejected,
}

impl SubmitPhase {
    fn is_busy(&self) -> bool {
        matches!(
            self,
            SubmitPhase::Decoding
                | SubmitPhase::Merging
                | SubmitPhase::Pruning
                | SubmitPhase::Validating
        )
    }
}

/// Sink for human-readable error messages, one call per failure
pub trait ErrorSink {
    fn show_error(&mut self, message: &str);
}

#[derive(Debug, Error)]
pub enum SubmitError {
    /// Expected, user-correctable; the working entity is retained so the
    /// user does not lose input.
    #[error("{message}")]
    Validation { field: String, message: String },

    /// The commit handler failed after validation passed. Surfaced as its
    /// own class rather than swallowed.
    #[error("submission failed after validation passed")]
    CommitFailed(#[source] anyhow::Error),

    /// A submission attempt is already running for this form instance
    #[error("another submission is in progress")]
    Busy,
}

/// One form instance: the descriptor set, the working entity, the tracked
/// list sizes and checkbox states, and the current submission phase.
///
/// Single logical thread of control: all decode/merge/validate steps for one
/// submission run to completion before another may start.
pub struct FormSession {
    descriptors: Vec<FieldDescriptor>,
    entity: Entity,
    sizes: ListSizes,
    checkboxes: HashMap<String, bool>,
    phase: SubmitPhase,
    known_attributes: Vec<String>,
}

impl FormSession {
    pub fn new(descriptors: Vec<FieldDescriptor>, entity: Entity) -> Self {
        let sizes = ListSizes::initialize(&descriptors, &entity);
        let known_attributes = descriptors
            .iter()
            .filter(|d| d.condition)
            .map(|d| d.attribute.clone())
            .collect();
        Self {
            descriptors,
            entity,
            sizes,
            checkboxes: HashMap::new(),
            phase: SubmitPhase::Idle,
            known_attributes,
        }
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn row_count(&self, attribute: &str) -> usize {
        self.sizes.get(attribute)
    }

    /// Add a rendered row to a list field (bounded)
    pub fn add_row(&mut self, attribute: &str) {
        self.sizes.grow(attribute);
    }

    /// Remove a rendered row from a list field (bounded). The UI re-renders
    /// remaining rows densely; the engine only shrinks the accepted size.
    pub fn remove_row(&mut self, attribute: &str) {
        self.sizes.shrink(attribute);
    }

    /// Track the single checkbox state for a checkbox-typed field. Applied
    /// as an overwrite at finalize time.
    pub fn set_checkbox(&mut self, attribute: &str, checked: bool) {
        self.checkboxes.insert(attribute.to_string(), checked);
    }

    /// Merge an upload that resolved mid-session into the working entity.
    pub fn merge_upload(&mut self, result: &UploadResult) {
        merge_uploads(
            &mut self.entity,
            std::slice::from_ref(result),
            &self.known_attributes,
        );
    }

    /// Run one submission attempt.
    ///
    /// Decodes the flat input set, folds it onto a working copy of the
    /// entity, applies upload results last (last write wins), overwrites
    /// checkbox attributes from tracked state, prunes list rows, validates
    /// fail-fast, and on success awaits the caller's commit handler with an
    /// owned copy of the entity.
    ///
    /// On rejection the mutated working entity is retained, so the user's
    /// partial edits survive for correction; resubmission restarts the
    /// state machine against that entity.
    pub async fn submit<F, Fut>(
        &mut self,
        inputs: &[RawInput],
        uploads: &[UploadResult],
        sink: &mut dyn ErrorSink,
        on_success: F,
    ) -> Result<Entity, SubmitError>
    where
        F: FnOnce(Entity) -> Fut,
        Fut: Future<Output = anyhow::Result<()>>,
    {
        if self.phase.is_busy() {
            return Err(SubmitError::Busy);
        }

        self.phase = SubmitPhase::Decoding;
        let edits = decode_inputs(inputs, &self.descriptors, &self.sizes);

        self.phase = SubmitPhase::Merging;
        let mut working = self.entity.clone();
        fold_edits(&mut working, &edits);
        merge_uploads(&mut working, uploads, &self.known_attributes);
        for descriptor in self
            .descriptors
            .iter()
            .filter(|d| d.condition && d.kind == FieldType::Checkbox)
        {
            let checked = self
                .checkboxes
                .get(&descriptor.attribute)
                .copied()
                .unwrap_or(false);
            working.set(&descriptor.attribute, Value::Bool(checked));
        }

        self.phase = SubmitPhase::Pruning;
        prune_lists(&mut working, &self.descriptors, &self.sizes);

        self.phase = SubmitPhase::Validating;
        if let Err((field, msg)) = run_validations(&self.descriptors, &mut working) {
            self.entity = working;
            self.phase = SubmitPhase::Rejected;
            sink.show_error(&msg);
            return Err(SubmitError::Validation {
                field,
                message: msg,
            });
        }

        self.entity = working.clone();
        // The future may be dropped at the commit await (caller timeout);
        // park the phase in a resubmittable state before yielding so an
        // abandoned attempt does not leave the machine busy forever.
        self.phase = SubmitPhase::Rejected;
        match on_success(working.clone()).await {
            Ok(()) => {
                self.phase = SubmitPhase::Committed;
                Ok(working)
            }
            Err(err) => {
                error!(error = %err, "commit handler failed after validation passed");
                Err(SubmitError::CommitFailed(err))
            }
        }
    }
}

/// Evaluate every participating descriptor's rules in declared order, then
/// its composite validator. Stops at the first failing rule of the first
/// failing field.
fn run_validations(
    descriptors: &[FieldDescriptor],
    entity: &mut Entity,
) -> Result<(), (String, String)> {
    for descriptor in descriptors.iter().filter(|d| d.condition) {
        let mut rules: Vec<Rule> = Vec::new();
        if descriptor.required && !descriptor.validations.contains(&Rule::RequiredField) {
            rules.push(Rule::RequiredField);
        }
        rules.extend(descriptor.validations.iter().copied());

        for rule in rules {
            if let Err(violation) = validate(entity.get(&descriptor.attribute), rule) {
                return Err((
                    descriptor.attribute.clone(),
                    message(&violation, &descriptor.display_name),
                ));
            }
        }

        let composite = match descriptor.kind {
            FieldType::Article => validate_article(entity, &descriptor.attribute),
            FieldType::Showcase => {
                validate_showcase(entity, &descriptor.attribute, &descriptor.extra_param)
            }
            _ => Ok(()),
        };
        if let Err(violation) = composite {
            return Err((
                descriptor.attribute.clone(),
                message(&violation, &descriptor.display_name),
            ));
        }
    }
    Ok(())
}
