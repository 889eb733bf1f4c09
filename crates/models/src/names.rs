use lazy_static::lazy_static;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{from_value, json};
use validator::{Validate, ValidationError, ValidationErrors};

// This module holds type-safe wrappers for the names and references which
// tie stack descriptors to one another. They use the newtype pattern so that
// a construct id can't be confused with, say, a secret name.

lazy_static! {
    // CONSTRUCT_ID_RE is a construct id: a leading ASCII letter followed by
    // letters, digits, '-' or '_'. Synthesis strips the punctuation when
    // deriving template logical ids.
    static ref CONSTRUCT_ID_RE: Regex = Regex::new(r"[A-Za-z][A-Za-z0-9_\-]*").unwrap();
    // SECRET_NAME_RE matches the character set accepted for managed secret names.
    static ref SECRET_NAME_RE: Regex = Regex::new(r"[A-Za-z0-9/_+=\.@\-]+").unwrap();
    // RULE_NAME_RE matches the character set accepted for event rule names.
    static ref RULE_NAME_RE: Regex = Regex::new(r"[A-Za-z0-9\.\-_]+").unwrap();
    // FREETEXT_RE allows anything except for Zl: Separator:line,
    // Zp: Separator:paragraph, or Other. Note Zs: Separator:space is allowed.
    static ref FREETEXT_RE: Regex = Regex::new(r"[^\p{Other}\p{Zl}\p{Zp}]+").unwrap();
}

macro_rules! name_types {
    (
        $(#[$outer:meta])*
        $vis:vis struct $Wrapper:ident($WrapperStr:literal, pattern = $Regex:ident, example = $Example:literal);

        $($rest:tt)*
    ) => {

        $(#[$outer])*
        #[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, JsonSchema, Eq, PartialOrd, Ord, Hash)]
        #[schemars(example = "Self::example")]
        pub struct $Wrapper(#[schemars(schema_with = $WrapperStr)] String);

        impl $Wrapper {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }
            pub fn as_str(&self) -> &str {
                &self.0
            }
            pub fn example() -> Self {
                Self($Example.into())
            }

            fn schema(_: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
                from_value(json!({
                    "type": "string",
                    "pattern": &["^", $Regex.as_str(), "$"].concat(),
                }))
                .unwrap()
            }
        }

        impl std::ops::Deref for $Wrapper {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $Wrapper {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $Wrapper {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Validate for $Wrapper {
            fn validate(&self) -> Result<(), ValidationErrors> {
                match unmatched(&$Regex, &self.0) {
                    None => Ok(()),
                    Some(unmatched) => {
                        let mut errors = ValidationErrors::new();
                        errors.add(
                            "",
                            ValidationError {
                                code: "regex mismatch".into(),
                                message: None,
                                params: vec![
                                    ("pattern".into(), json!($Regex.to_string())),
                                    ("value".into(), json!(self.0)),
                                    ("unmatched".into(), json!(unmatched)),
                                ]
                                .into_iter()
                                .collect(),
                            },
                        );
                        Err(errors)
                    }
                }
            }
        }

        name_types! {
            $($rest)*
        }
    };

    () => {};
}

/// Returns the portion of `s` which isn't covered by a full match of `re`,
/// or None if `re` matches all of `s`.
pub fn unmatched(re: &Regex, s: &str) -> Option<String> {
    match re.find(s) {
        Some(m) if m.start() == 0 && m.end() == s.len() => None, // Full match.
        Some(m) => Some([&s[..m.start()], &s[m.end()..]].concat()), // Partial match.
        None => Some(s.to_string()),                              // No match.
    }
}

name_types! {
    /// LogicalId is the construct id of a descriptor within its stack.
    /// It begins with an ASCII letter, followed by letters, digits, '-' or '_'.
    pub struct LogicalId("LogicalId::schema", pattern = CONSTRUCT_ID_RE, example = "testEC2CpuAlarm");

    /// SecretName names a managed secret.
    pub struct SecretName("SecretName::schema", pattern = SECRET_NAME_RE, example = "ChatWorkApiKey");

    /// RuleName is the physical name of an event rule.
    pub struct RuleName("RuleName::schema", pattern = RULE_NAME_RE, example = "testAlarmRule");

    /// HeaderName is the name of the HTTP header which carries an API key.
    /// Any printable text is accepted, including spaces.
    pub struct HeaderName("HeaderName::schema", pattern = FREETEXT_RE, example = "X-ChatWorkToken");
}

/// Attributes which a descriptor exposes to references beyond its default `Ref` value.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema)]
pub enum Attribute {
    Arn,
    Name,
    Id,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arn => "Arn",
            Self::Name => "Name",
            Self::Id => "Id",
        }
    }
}

/// Reference to another descriptor of the same stack, resolved by the
/// deployment engine. Without an attribute, it's the descriptor's default
/// value (for example, the ARN of a secret or the id of an instance).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Reference {
    /// # Logical id of the referenced descriptor.
    pub target: LogicalId,
    /// # Attribute of the referenced descriptor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<Attribute>,
}

impl Reference {
    pub fn to_ref(target: &LogicalId) -> Self {
        Self {
            target: target.clone(),
            attribute: None,
        }
    }
    pub fn attr(target: &LogicalId, attribute: Attribute) -> Self {
        Self {
            target: target.clone(),
            attribute: Some(attribute),
        }
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.attribute {
            Some(attr) => write!(f, "{}.{}", self.target, attr.as_str()),
            None => write!(f, "{}", self.target),
        }
    }
}

/// A string which is either known at composition time,
/// or is resolved from another descriptor at deployment time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub enum StringValue {
    Literal(String),
    Ref(Reference),
}

impl StringValue {
    pub fn literal(s: impl Into<String>) -> Self {
        Self::Literal(s.into())
    }
    pub fn reference(&self) -> Option<&Reference> {
        match self {
            Self::Literal(_) => None,
            Self::Ref(r) => Some(r),
        }
    }
}

impl From<Reference> for StringValue {
    fn from(r: Reference) -> Self {
        Self::Ref(r)
    }
}

#[cfg(test)]
mod test {
    use super::{HeaderName, LogicalId, Reference, RuleName, SecretName, Validate};

    #[test]
    fn test_logical_id_re() {
        for (case, expect) in [
            ("testEC2CpuAlarm", true),
            ("Secret", true),
            ("my-vpc_1", true),
            ("1leadingDigit", false),
            ("has space", false),
            ("slash/ed", false),
            ("", false),
        ] {
            let out = LogicalId::new(case).validate();
            if expect {
                out.unwrap();
            } else {
                out.unwrap_err();
            }
        }
    }

    #[test]
    fn test_secret_and_rule_name_re() {
        SecretName::new("ChatWorkApiKey").validate().unwrap();
        SecretName::new("team/prod+key@v1").validate().unwrap();
        SecretName::new("no spaces").validate().unwrap_err();

        RuleName::new("testAlarmRule").validate().unwrap();
        RuleName::new("alarm.rule-1_a").validate().unwrap();
        RuleName::new("no/slashes").validate().unwrap_err();
    }

    #[test]
    fn test_header_name_allows_spaces() {
        HeaderName::new("Token if Nedded").validate().unwrap();
        HeaderName::new("X-ChatWorkToken").validate().unwrap();
        HeaderName::new("bad\nheader").validate().unwrap_err();
        HeaderName::new("").validate().unwrap_err();
    }

    #[test]
    fn test_reference_display() {
        let id = LogicalId::new("testEC2CpuAlarm");
        assert_eq!(Reference::to_ref(&id).to_string(), "testEC2CpuAlarm");
        assert_eq!(
            Reference::attr(&id, super::Attribute::Arn).to_string(),
            "testEC2CpuAlarm.Arn"
        );
    }
}
