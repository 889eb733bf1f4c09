#[must_use]
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("{name} cannot be used as name for {entity} ({unmatched:?} is invalid)")]
    NameRegex {
        entity: &'static str,
        name: String,
        unmatched: String,
    },
    #[error("{entity} {name} collides with {first_entity} {name}, declared earlier in the stack")]
    Duplicate {
        entity: &'static str,
        name: String,
        first_entity: &'static str,
    },
    #[error("{ref_entity} {ref_name}, referenced by {this_thing}, is not defined")]
    NoSuchEntity {
        this_thing: String,
        ref_entity: &'static str,
        ref_name: String,
    },
    #[error("{ref_entity} {ref_name}, referenced by {this_thing}, is not defined; did you mean {suggest_entity} {suggest_name}?")]
    NoSuchEntitySuggest {
        this_thing: String,
        ref_entity: &'static str,
        ref_name: String,
        suggest_entity: &'static str,
        suggest_name: String,
    },
    #[error("{ref_entity} {ref_name}, referenced by {this_thing}, must be declared before it")]
    ForwardReference {
        this_thing: String,
        ref_entity: &'static str,
        ref_name: String,
    },
    #[error("{this_thing} references {ref_name}, which is a {actual} and not a {expected}")]
    WrongEntityKind {
        this_thing: String,
        ref_name: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("{ref_entity} {ref_name}, referenced by {this_thing}, has no attribute {attribute}")]
    UnsupportedAttribute {
        this_thing: String,
        ref_entity: &'static str,
        ref_name: String,
        attribute: &'static str,
    },
    #[error("{this_thing} field {field} is invalid: {detail}")]
    InvalidField {
        this_thing: String,
        field: String,
        detail: String,
    },
    #[error("{this_thing} has period {period}, but periods must be 10s, 30s, or a multiple of 60s")]
    InvalidPeriod { this_thing: String, period: String },
}

impl Error {
    pub fn push(self, scope: &str, errors: &mut Errors) {
        tracing::debug!(%scope, error = %self, "validation error");
        errors.0.push(ScopedError {
            scope: scope.to_string(),
            error: self,
        });
    }
}

/// ScopedError is an Error and the location within the stack at which it occurred.
#[derive(Debug, PartialEq)]
pub struct ScopedError {
    /// JSON pointer of the erroring resource within the stack document.
    pub scope: String,
    pub error: Error,
}

/// Errors are validation errors, in the order they were encountered.
#[derive(Debug, Default, PartialEq)]
pub struct Errors(Vec<ScopedError>);

impl Errors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScopedError> {
        self.0.iter()
    }

    /// Errors without their scopes.
    pub fn errors(&self) -> impl Iterator<Item = &Error> {
        self.0.iter().map(|e| &e.error)
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl IntoIterator for Errors {
    type Item = ScopedError;
    type IntoIter = std::vec::IntoIter<ScopedError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl std::fmt::Display for Errors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, ScopedError { scope, error }) in self.0.iter().enumerate() {
            if index != 0 {
                writeln!(f)?;
            }
            write!(f, "{scope}: {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Errors {}
