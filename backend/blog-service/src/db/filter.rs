//! Evaluation of Mongo-style filter documents against stored documents.
//!
//! Supports the operators the API layer emits: plain equality (which also
//! matches array elements), `$eq`, `$in`, `$regex` with `$options`, `$or`
//! and `$and`.

use super::{StoreError, StoreResult};
use bson::{Bson, Document};
use regex::RegexBuilder;

/// Whether `doc` satisfies every clause of `filter`.
pub fn matches(doc: &Document, filter: &Document) -> StoreResult<bool> {
    for (key, condition) in filter {
        let satisfied = match key.as_str() {
            "$or" => any_of(doc, condition)?,
            "$and" => all_of(doc, condition)?,
            op if op.starts_with('$') => {
                return Err(StoreError::UnsupportedFilter(op.to_string()));
            }
            field => field_matches(doc.get(field), condition)?,
        };
        if !satisfied {
            return Ok(false);
        }
    }
    Ok(true)
}

fn clauses(condition: &Bson) -> StoreResult<impl Iterator<Item = &Document>> {
    let Bson::Array(items) = condition else {
        return Err(StoreError::UnsupportedFilter(
            "logical operator expects an array".to_string(),
        ));
    };
    Ok(items.iter().filter_map(Bson::as_document))
}

fn any_of(doc: &Document, condition: &Bson) -> StoreResult<bool> {
    for clause in clauses(condition)? {
        if matches(doc, clause)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn all_of(doc: &Document, condition: &Bson) -> StoreResult<bool> {
    for clause in clauses(condition)? {
        if !matches(doc, clause)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn is_operator_document(condition: &Bson) -> bool {
    matches!(condition, Bson::Document(d) if d.keys().next().is_some_and(|k| k.starts_with('$')))
}

fn field_matches(value: Option<&Bson>, condition: &Bson) -> StoreResult<bool> {
    if let (Bson::Document(ops), true) = (condition, is_operator_document(condition)) {
        return operators_match(value, ops);
    }
    if let Bson::RegularExpression(regex) = condition {
        return pattern_matches(value, &regex.pattern, &regex.options);
    }
    Ok(equals(value, condition))
}

fn operators_match(value: Option<&Bson>, ops: &Document) -> StoreResult<bool> {
    for (op, operand) in ops {
        let satisfied = match op.as_str() {
            "$eq" => equals(value, operand),
            "$in" => {
                let Bson::Array(candidates) = operand else {
                    return Err(StoreError::UnsupportedFilter("$in expects an array".to_string()));
                };
                candidates.iter().any(|candidate| equals(value, candidate))
            }
            "$regex" => {
                let options = ops.get_str("$options").unwrap_or_default();
                match operand {
                    Bson::String(pattern) => pattern_matches(value, pattern, options)?,
                    Bson::RegularExpression(regex) => {
                        pattern_matches(value, &regex.pattern, &regex.options)?
                    }
                    _ => {
                        return Err(StoreError::UnsupportedFilter(
                            "$regex expects a string".to_string(),
                        ))
                    }
                }
            }
            "$options" => true,
            other => return Err(StoreError::UnsupportedFilter(other.to_string())),
        };
        if !satisfied {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Equality with array-element semantics; a missing field equals null.
fn equals(value: Option<&Bson>, expected: &Bson) -> bool {
    match value {
        None => matches!(expected, Bson::Null),
        Some(actual) if actual == expected => true,
        Some(Bson::Array(items)) => items.iter().any(|item| item == expected),
        Some(_) => false,
    }
}

fn pattern_matches(value: Option<&Bson>, pattern: &str, options: &str) -> StoreResult<bool> {
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(options.contains('i'))
        .multi_line(options.contains('m'))
        .dot_matches_new_line(options.contains('s'))
        .build()
        .map_err(|e| StoreError::Backend(format!("invalid $regex: {}", e)))?;

    Ok(match value {
        Some(Bson::String(s)) => regex.is_match(s),
        Some(Bson::Array(items)) => items
            .iter()
            .any(|item| matches!(item, Bson::String(s) if regex.is_match(s))),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    fn post() -> Document {
        doc! {
            "title": "FOO bar",
            "excerpt": Bson::Null,
            "content": "body text",
            "category": "rust",
            "tags": ["async", "web"],
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(matches(&post(), &doc! {}).unwrap());
    }

    #[test]
    fn equality_and_array_membership() {
        assert!(matches(&post(), &doc! { "category": "rust" }).unwrap());
        assert!(!matches(&post(), &doc! { "category": "go" }).unwrap());
        assert!(matches(&post(), &doc! { "tags": "web" }).unwrap());
        assert!(matches(&post(), &doc! { "tags": { "$in": ["web"] } }).unwrap());
    }

    #[test]
    fn membership_is_exact() {
        assert!(!matches(&post(), &doc! { "tags": { "$in": ["as"] } }).unwrap());
        assert!(!matches(&post(), &doc! { "tags": { "$in": ["Async"] } }).unwrap());
    }

    #[test]
    fn missing_field_only_equals_null() {
        assert!(matches(&post(), &doc! { "author": Bson::Null }).unwrap());
        assert!(!matches(&post(), &doc! { "author": "Admin" }).unwrap());
    }

    #[test]
    fn case_insensitive_regex_in_or() {
        let filter = doc! {
            "$or": [
                { "title": { "$regex": "foo", "$options": "i" } },
                { "excerpt": { "$regex": "foo", "$options": "i" } },
                { "content": { "$regex": "foo", "$options": "i" } },
            ]
        };
        assert!(matches(&post(), &filter).unwrap());

        let filter = doc! { "title": { "$regex": "foo" } };
        assert!(!matches(&post(), &filter).unwrap());
    }

    #[test]
    fn clauses_combine_with_and() {
        let filter = doc! {
            "category": "rust",
            "$or": [{ "content": { "$regex": "nothing", "$options": "i" } }],
        };
        assert!(!matches(&post(), &filter).unwrap());

        let filter = doc! {
            "$and": [{ "category": "rust" }, { "tags": { "$in": ["async"] } }],
        };
        assert!(matches(&post(), &filter).unwrap());
    }

    #[test]
    fn unknown_operator_is_rejected() {
        let err = matches(&post(), &doc! { "views": { "$gt": 3 } }).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedFilter(op) if op == "$gt"));
    }
}
