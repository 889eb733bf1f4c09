//! Validation of composed stacks, ahead of their synthesis.
//!
//! Validation walks the stack's resources in declaration order, and
//! collects every error it finds rather than stopping at the first.

use lazy_static::lazy_static;
use models::{LogicalId, ResourceKind, Stack};
use regex::Regex;
use std::collections::BTreeMap;
use validator::Validate;

mod errors;
mod fields;
mod reference;

pub use errors::{Error, Errors, ScopedError};
pub use fields::is_valid_period;

lazy_static! {
    // Stack names begin with a letter, followed by letters, digits, or '-'.
    static ref STACK_NAME_RE: Regex = Regex::new(r"[A-Za-z][A-Za-z0-9\-]*").unwrap();
}

/// Validate the `stack`, returning all encountered errors.
pub fn validate(stack: &Stack) -> Errors {
    let mut errors = Errors::new();

    if let Some(unmatched) = models::unmatched(&STACK_NAME_RE, &stack.name) {
        Error::NameRegex {
            entity: "stack",
            name: stack.name.clone(),
            unmatched,
        }
        .push("/name", &mut errors);
    }

    let mut declared: BTreeMap<&LogicalId, ResourceKind> = BTreeMap::new();

    for (index, resource) in stack.resources.iter().enumerate() {
        let scope = format!("/resources/{index}");
        let kind = resource.spec.kind();
        let this_thing = format!("{kind} {}", resource.id);

        fields::push_invalid_name(
            &scope,
            kind.as_str(),
            &resource.id,
            resource.id.validate(),
            &mut errors,
        );

        if let Some(first) = declared.get(&resource.id) {
            Error::Duplicate {
                entity: kind.as_str(),
                name: resource.id.to_string(),
                first_entity: first.as_str(),
            }
            .push(&scope, &mut errors);
        } else {
            declared.insert(&resource.id, kind);
        }

        fields::walk_fields(&scope, &this_thing, &resource.spec, &mut errors);

        for (reference, expect_kind) in resource.spec.references() {
            reference::walk_reference(
                &scope,
                &this_thing,
                index,
                reference,
                expect_kind,
                &stack.resources,
                &mut errors,
            );
        }
    }

    tracing::debug!(stack = %stack.name, errors = errors.len(), "validated stack");
    errors
}
