use super::{Error, Errors};
use models::{Reference, Resource, ResourceKind};

/// Walk a `reference` made by the resource at `this_index` of `resources`,
/// returning the referenced resource if it's valid.
pub fn walk_reference<'a>(
    scope: &str,
    this_thing: &str,
    this_index: usize,
    reference: &Reference,
    expect_kind: Option<ResourceKind>,
    resources: &'a [Resource],
    errors: &mut Errors,
) -> Option<&'a Resource> {
    let ref_name = reference.target.as_str();

    let Some(index) = resources.iter().position(|r| r.id == reference.target) else {
        let ref_entity = expect_kind.map(|k| k.as_str()).unwrap_or("resource");

        let closest = resources
            .iter()
            .filter(|r| expect_kind.map(|k| r.spec.kind() == k).unwrap_or(true))
            .filter_map(|r| {
                let dist = strsim::osa_distance(ref_name, r.id.as_str());

                if dist <= 4 {
                    Some((dist, r.id.as_str(), r.spec.kind()))
                } else {
                    None
                }
            })
            .min();

        if let Some((_, suggest_name, suggest_kind)) = closest {
            Error::NoSuchEntitySuggest {
                this_thing: this_thing.to_string(),
                ref_entity,
                ref_name: ref_name.to_string(),
                suggest_entity: suggest_kind.as_str(),
                suggest_name: suggest_name.to_string(),
            }
            .push(scope, errors);
        } else {
            Error::NoSuchEntity {
                this_thing: this_thing.to_string(),
                ref_entity,
                ref_name: ref_name.to_string(),
            }
            .push(scope, errors);
        }
        return None;
    };
    let target = &resources[index];
    let kind = target.spec.kind();

    if index >= this_index {
        Error::ForwardReference {
            this_thing: this_thing.to_string(),
            ref_entity: kind.as_str(),
            ref_name: ref_name.to_string(),
        }
        .push(scope, errors);
        return None;
    }

    if let Some(expected) = expect_kind {
        if expected != kind {
            Error::WrongEntityKind {
                this_thing: this_thing.to_string(),
                ref_name: ref_name.to_string(),
                expected: expected.as_str(),
                actual: kind.as_str(),
            }
            .push(scope, errors);
            return None;
        }
    }

    if let Some(attribute) = reference.attribute {
        if !kind.attributes().contains(&attribute) {
            Error::UnsupportedAttribute {
                this_thing: this_thing.to_string(),
                ref_entity: kind.as_str(),
                ref_name: ref_name.to_string(),
                attribute: attribute.as_str(),
            }
            .push(scope, errors);
            return None;
        }
    }

    Some(target)
}
