//! Path-addressed mutation of a document.
//!
//! All three operations walk the intermediate segments of a [`Path`] the same
//! way and differ only in what they do with the terminal segment. Descent
//! never creates structure: every intermediate key must exist, every index
//! must be in bounds, and every step must land on an object.
//!
//! All checks happen before the single terminal write, so a failed operation
//! leaves the document untouched.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::path::{Index, Path, Segment};

/// The root of a codemeta document.
pub type Document = Map<String, Value>;

/// Whether an update may create the terminal key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Create the key if it is absent (`set`).
    Upsert,
    /// The key must already exist (`edit`).
    Strict,
}

/// Add a key that does not exist yet.
///
/// The terminal segment must not carry an index: insertion only ever creates
/// object keys, never array slots.
pub fn insert(document: &mut Document, path: &Path, value: Value) -> Result<()> {
    let (intermediate, last) = path.split_last();
    if value.is_null() {
        return Err(Error::NilValueRejected(path.to_string()));
    }
    if last.index.is_some() {
        return Err(Error::CannotIndexOnInsert(path.to_string()));
    }

    let target = descend(document, intermediate)?;
    if target.contains_key(&last.key) {
        return Err(Error::KeyAlreadyExists(path.to_string()));
    }
    target.insert(last.key.clone(), value);
    Ok(())
}

/// Overwrite the value at `path`.
///
/// With an index of `-1` the value is appended to the array instead.
pub fn update(document: &mut Document, path: &Path, value: Value, mode: UpdateMode) -> Result<()> {
    let (intermediate, last) = path.split_last();
    if value.is_null() {
        return Err(Error::NilValueRejected(path.to_string()));
    }

    let target = descend(document, intermediate)?;
    match last.index {
        None => {
            if mode == UpdateMode::Strict && !target.contains_key(&last.key) {
                return Err(Error::KeyNotFound(last.key.clone()));
            }
            // Overwriting keeps the key's position in the object.
            target.insert(last.key.clone(), value);
        }
        Some(index) => {
            let array = terminal_array(target, last)?;
            match index {
                Index::Last => array.push(value),
                Index::At(i) => {
                    let len = array.len();
                    let slot = array
                        .get_mut(i)
                        .ok_or_else(|| out_of_bounds(last, index, len))?;
                    *slot = value;
                }
            }
        }
    }
    Ok(())
}

/// Delete the value at `path`.
///
/// An indexed terminal removes a single array element and shifts the
/// following elements down; `-1` removes the last element.
pub fn remove(document: &mut Document, path: &Path) -> Result<Value> {
    let (intermediate, last) = path.split_last();
    let target = descend(document, intermediate)?;

    match last.index {
        None => target
            .shift_remove(&last.key)
            .ok_or_else(|| Error::KeyNotFound(last.key.clone())),
        Some(index) => {
            if matches!(target.get(&last.key), Some(Value::Null)) {
                return Err(Error::KeyNotFound(last.key.clone()));
            }
            let array = terminal_array(target, last)?;
            let len = array.len();
            let i = match index {
                Index::At(i) => i,
                Index::Last => len
                    .checked_sub(1)
                    .ok_or_else(|| out_of_bounds(last, index, len))?,
            };
            if i >= len {
                return Err(out_of_bounds(last, index, len));
            }
            Ok(array.remove(i))
        }
    }
}

/// Read the value at `path`, following the same rules as the mutations.
pub fn get<'a>(document: &'a Document, path: &Path) -> Result<&'a Value> {
    let (intermediate, last) = path.split_last();
    let mut current = document;
    for segment in intermediate {
        current = step(current, segment)?;
    }
    let value = current
        .get(&last.key)
        .ok_or_else(|| Error::KeyNotFound(last.key.clone()))?;
    match last.index {
        None => Ok(value),
        Some(index) => {
            let array = value
                .as_array()
                .ok_or_else(|| Error::NotASequence(last.key.clone()))?;
            let len = array.len();
            let i = match index {
                Index::At(i) => i,
                Index::Last => len.wrapping_sub(1),
            };
            array.get(i).ok_or_else(|| out_of_bounds(last, index, len))
        }
    }
}

/// Follow the intermediate segments down to the object that holds the
/// terminal key.
fn descend<'a>(document: &'a mut Document, segments: &[Segment]) -> Result<&'a mut Document> {
    let mut current = document;
    for segment in segments {
        let value = current
            .get_mut(&segment.key)
            .ok_or_else(|| Error::KeyNotFound(segment.key.clone()))?;
        let next = match segment.index {
            None => value,
            Some(index) => {
                let array = value
                    .as_array_mut()
                    .ok_or_else(|| Error::NotASequence(segment.key.clone()))?;
                let len = array.len();
                match index {
                    // `-1` is only meaningful on the terminal segment.
                    Index::Last => return Err(out_of_bounds(segment, index, len)),
                    Index::At(i) => array
                        .get_mut(i)
                        .ok_or_else(|| out_of_bounds(segment, index, len))?,
                }
            }
        };
        current = next
            .as_object_mut()
            .ok_or_else(|| Error::NotATraversableElement(segment.to_string()))?;
    }
    Ok(current)
}

/// Read-only counterpart of one [`descend`] step.
fn step<'a>(current: &'a Document, segment: &Segment) -> Result<&'a Document> {
    let value = current
        .get(&segment.key)
        .ok_or_else(|| Error::KeyNotFound(segment.key.clone()))?;
    let next = match segment.index {
        None => value,
        Some(index) => {
            let array = value
                .as_array()
                .ok_or_else(|| Error::NotASequence(segment.key.clone()))?;
            match index {
                Index::Last => return Err(out_of_bounds(segment, index, array.len())),
                Index::At(i) => array
                    .get(i)
                    .ok_or_else(|| out_of_bounds(segment, index, array.len()))?,
            }
        }
    };
    next.as_object()
        .ok_or_else(|| Error::NotATraversableElement(segment.to_string()))
}

fn terminal_array<'a>(target: &'a mut Document, last: &Segment) -> Result<&'a mut Vec<Value>> {
    target
        .get_mut(&last.key)
        .ok_or_else(|| Error::KeyNotFound(last.key.clone()))?
        .as_array_mut()
        .ok_or_else(|| Error::NotASequence(last.key.clone()))
}

fn out_of_bounds(segment: &Segment, index: Index, len: usize) -> Error {
    Error::IndexOutOfBounds {
        key: segment.key.clone(),
        index,
        len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("test document must be an object"),
        }
    }

    fn path(text: &str) -> Path {
        text.parse().unwrap()
    }

    fn nested() -> Document {
        doc(json!({
            "key1": [
                {"key2": 2},
                {"key4": 4}
            ],
            "key3": ["one", "two"],
            "key5": "hello",
            "key6": {
                "key7": "seven",
                "key8": 8,
                "key9": {
                    "key10": [1, 2, 3],
                    "key11": {
                        "key12": "twelve"
                    },
                    "key13": "world"
                }
            }
        }))
    }

    #[test]
    fn test_remove_last_element() {
        let mut d = doc(json!({"key": "value", "key2": [1, 2, 3]}));
        remove(&mut d, &path("key2.-1")).unwrap();
        assert_eq!(Value::Object(d), json!({"key": "value", "key2": [1, 2]}));
    }

    #[test]
    fn test_remove_first_element() {
        let mut d = doc(json!({"key": "value", "key2": [1, 2, 3]}));
        let removed = remove(&mut d, &path("key2.0")).unwrap();
        assert_eq!(removed, json!(1));
        assert_eq!(Value::Object(d), json!({"key": "value", "key2": [2, 3]}));
    }

    #[test]
    fn test_remove_whole_key() {
        let mut d = doc(json!({"key": "value", "key2": [1, 2, 3]}));
        remove(&mut d, &path("key2")).unwrap();
        assert_eq!(Value::Object(d), json!({"key": "value"}));
    }

    #[test]
    fn test_remove_struct_value() {
        let mut d = doc(json!({"key": "value", "key2": {"first": "value3", "second": "value4"}}));
        remove(&mut d, &path("key2")).unwrap();
        assert_eq!(Value::Object(d), json!({"key": "value"}));
    }

    #[test]
    fn test_remove_splice_keeps_order() {
        let mut d = doc(json!({"list": ["a", "b", "c", "d", "e"]}));
        remove(&mut d, &path("list[2]")).unwrap();
        assert_eq!(d["list"], json!(["a", "b", "d", "e"]));
    }

    #[test]
    fn test_remove_last_is_len_minus_one() {
        let mut a = doc(json!({"list": [1, 2, 3, 4]}));
        let mut b = a.clone();
        remove(&mut a, &path("list[-1]")).unwrap();
        remove(&mut b, &path("list[3]")).unwrap();
        assert_eq!(a, b);
        // "last" is recomputed on every call
        remove(&mut a, &path("list[-1]")).unwrap();
        assert_eq!(a["list"], json!([1, 2]));
    }

    #[test]
    fn test_remove_nested_in_array_element() {
        let mut d = nested();
        remove(&mut d, &path("key1[1].key4")).unwrap();
        assert_eq!(d["key1"], json!([{"key2": 2}, {}]));
    }

    #[test]
    fn test_remove_keeps_remaining_key_order() {
        let mut d = doc(json!({"a": 1, "b": 2, "c": 3}));
        remove(&mut d, &path("a")).unwrap();
        let keys: Vec<&String> = d.keys().collect();
        assert_eq!(keys, vec!["b", "c"]);
    }

    #[test]
    fn test_remove_missing_keys() {
        let mut d = nested();
        let before = d.clone();
        assert_eq!(
            remove(&mut d, &path("nope")),
            Err(Error::KeyNotFound("nope".to_string()))
        );
        assert_eq!(
            remove(&mut d, &path("nope.key")),
            Err(Error::KeyNotFound("nope".to_string()))
        );
        assert_eq!(
            remove(&mut d, &path("key6.key9.nope")),
            Err(Error::KeyNotFound("nope".to_string()))
        );
        assert_eq!(d, before);
    }

    #[test]
    fn test_remove_out_of_bounds() {
        let mut d = doc(json!({"key2": [1, 2, 3]}));
        assert!(matches!(
            remove(&mut d, &path("key2[3]")),
            Err(Error::IndexOutOfBounds { len: 3, .. })
        ));
        assert_eq!(d["key2"], json!([1, 2, 3]));
    }

    #[test]
    fn test_remove_last_of_empty_array() {
        let mut d = doc(json!({"key2": []}));
        assert!(matches!(
            remove(&mut d, &path("key2[-1]")),
            Err(Error::IndexOutOfBounds {
                index: Index::Last,
                len: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_remove_last_of_null() {
        let mut d = doc(json!({"key2": null}));
        assert_eq!(
            remove(&mut d, &path("key2[-1]")),
            Err(Error::KeyNotFound("key2".to_string()))
        );
    }

    #[test]
    fn test_remove_index_of_non_array() {
        let mut d = doc(json!({"key": "value"}));
        assert_eq!(
            remove(&mut d, &path("key[0]")),
            Err(Error::NotASequence("key".to_string()))
        );
    }

    #[test]
    fn test_set_new_key() {
        let mut d = doc(json!({"key": "value"}));
        update(&mut d, &path("key2"), json!("value2"), UpdateMode::Upsert).unwrap();
        assert_eq!(Value::Object(d.clone()), json!({"key": "value", "key2": "value2"}));

        update(
            &mut d,
            &path("key2"),
            json!({"first": "value3", "second": "value4"}),
            UpdateMode::Upsert,
        )
        .unwrap();
        assert_eq!(
            Value::Object(d),
            json!({"key": "value", "key2": {"first": "value3", "second": "value4"}})
        );
    }

    #[test]
    fn test_set_append() {
        let mut d = doc(json!({"key": "value", "key2": [1, 2, 3]}));
        update(&mut d, &path("key2.-1"), json!(4), UpdateMode::Upsert).unwrap();
        update(&mut d, &path("key2[-1]"), json!(5), UpdateMode::Upsert).unwrap();
        assert_eq!(d["key2"], json!([1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_append_to_missing_array() {
        let mut d = doc(json!({"key": "value"}));
        assert_eq!(
            update(&mut d, &path("key2.-1"), json!(4), UpdateMode::Upsert),
            Err(Error::KeyNotFound("key2".to_string()))
        );
    }

    #[test]
    fn test_set_array_index() {
        let mut d = doc(json!({"key": "value", "key2": [1, 2, 3]}));
        update(&mut d, &path("key2.0"), json!(0), UpdateMode::Upsert).unwrap();
        update(&mut d, &path("key2.2"), json!(9), UpdateMode::Upsert).unwrap();
        assert_eq!(d["key2"], json!([0, 2, 9]));
        assert!(matches!(
            update(&mut d, &path("key2.3"), json!(9), UpdateMode::Upsert),
            Err(Error::IndexOutOfBounds { len: 3, .. })
        ));
    }

    #[test]
    fn test_set_overwrite_keeps_position() {
        let mut d = doc(json!({"a": 1, "b": 2, "c": 3}));
        update(&mut d, &path("a"), json!(10), UpdateMode::Upsert).unwrap();
        let keys: Vec<&String> = d.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_edit_nested() {
        let mut d = nested();
        update(&mut d, &path("key1[0].key2"), json!(20), UpdateMode::Strict).unwrap();
        update(&mut d, &path("key1[0].key2"), json!(30), UpdateMode::Strict).unwrap();
        update(&mut d, &path("key3[0]"), json!("four"), UpdateMode::Strict).unwrap();
        update(
            &mut d,
            &path("key6.key9.key11.key12"),
            json!("twenty-twelve"),
            UpdateMode::Strict,
        )
        .unwrap();
        update(&mut d, &path("key5"), json!("goodbye"), UpdateMode::Strict).unwrap();
        update(&mut d, &path("key6.key9.key10[2]"), json!(30), UpdateMode::Strict).unwrap();

        assert_eq!(
            update(&mut d, &path("key4"), json!(4), UpdateMode::Strict),
            Err(Error::KeyNotFound("key4".to_string()))
        );
        assert_eq!(
            update(&mut d, &path("key5"), Value::Null, UpdateMode::Strict),
            Err(Error::NilValueRejected("key5".to_string()))
        );

        assert_eq!(
            Value::Object(d),
            json!({
                "key1": [{"key2": 30}, {"key4": 4}],
                "key3": ["four", "two"],
                "key5": "goodbye",
                "key6": {
                    "key7": "seven",
                    "key8": 8,
                    "key9": {
                        "key10": [1, 2, 30],
                        "key11": {"key12": "twenty-twelve"},
                        "key13": "world"
                    }
                }
            })
        );
    }

    #[test]
    fn test_update_missing_intermediate() {
        let mut d = nested();
        for mode in [UpdateMode::Upsert, UpdateMode::Strict] {
            assert_eq!(
                update(&mut d, &path("missing.key"), json!(1), mode),
                Err(Error::KeyNotFound("missing".to_string()))
            );
        }
    }

    #[test]
    fn test_update_descend_through_leaf() {
        let mut d = nested();
        assert_eq!(
            update(&mut d, &path("key5.inner"), json!(1), UpdateMode::Upsert),
            Err(Error::NotATraversableElement("key5".to_string()))
        );
        assert_eq!(
            update(&mut d, &path("key3[0].inner"), json!(1), UpdateMode::Upsert),
            Err(Error::NotATraversableElement("key3[0]".to_string()))
        );
        assert_eq!(
            update(&mut d, &path("key5[0].inner"), json!(1), UpdateMode::Upsert),
            Err(Error::NotASequence("key5".to_string()))
        );
    }

    #[test]
    fn test_last_on_intermediate_segment() {
        let mut d = nested();
        assert!(matches!(
            update(&mut d, &path("key1[-1].key2"), json!(1), UpdateMode::Upsert),
            Err(Error::IndexOutOfBounds {
                index: Index::Last,
                ..
            })
        ));
    }

    #[test]
    fn test_insert_into_array_elements() {
        let mut d = doc(json!({"key1": [{"key2": 2}, {"key4": 4}]}));
        insert(&mut d, &path("key1[0].key3"), json!(3)).unwrap();
        assert_eq!(
            Value::Object(d.clone()),
            json!({"key1": [{"key2": 2, "key3": 3}, {"key4": 4}]})
        );
        insert(&mut d, &path("key1[1].key14"), json!(14)).unwrap();
        assert_eq!(
            Value::Object(d.clone()),
            json!({"key1": [{"key2": 2, "key3": 3}, {"key14": 14, "key4": 4}]})
        );
        assert_eq!(
            insert(&mut d, &path("key1[1].key14"), json!(14)),
            Err(Error::KeyAlreadyExists("key1[1].key14".to_string()))
        );
    }

    #[test]
    fn test_insert_rules() {
        let mut d = nested();
        let before = d.clone();
        assert_eq!(
            insert(&mut d, &path("key1[1].key14"), Value::Null),
            Err(Error::NilValueRejected("key1[1].key14".to_string()))
        );
        assert_eq!(
            insert(&mut d, &path("key3[2]"), json!("three")),
            Err(Error::CannotIndexOnInsert("key3[2]".to_string()))
        );
        assert_eq!(
            insert(&mut d, &path("key3[0]"), json!("three")),
            Err(Error::CannotIndexOnInsert("key3[0]".to_string()))
        );
        assert_eq!(
            insert(&mut d, &path("key6.key9.key10[2]"), json!(30)),
            Err(Error::CannotIndexOnInsert("key6.key9.key10[2]".to_string()))
        );
        assert_eq!(
            insert(&mut d, &path("key5"), json!("goodbye")),
            Err(Error::KeyAlreadyExists("key5".to_string()))
        );
        assert_eq!(
            insert(&mut d, &path("key6"), json!({})),
            Err(Error::KeyAlreadyExists("key6".to_string()))
        );
        assert_eq!(
            insert(&mut d, &path("nope.key"), json!(1)),
            Err(Error::KeyNotFound("nope".to_string()))
        );
        assert_eq!(
            insert(&mut d, &path("key1[5].key"), json!(1)),
            Err(Error::IndexOutOfBounds {
                key: "key1".to_string(),
                index: Index::At(5),
                len: 2
            })
        );
        assert_eq!(d, before);

        insert(&mut d, &path("key6.key9.key11.key23"), json!("twenty-three")).unwrap();
        assert_eq!(d["key6"]["key9"]["key11"]["key23"], json!("twenty-three"));
    }

    #[test]
    fn test_insert_then_overwrite() {
        let mut d = nested();
        for (p, first, second) in [
            ("fresh", json!(1), json!("two")),
            ("key6.fresh", json!([1]), json!({"x": 1})),
            ("key1[0].fresh", json!(true), json!(false)),
        ] {
            insert(&mut d, &path(p), first).unwrap();
            update(&mut d, &path(p), second.clone(), UpdateMode::Strict).unwrap();
            assert_eq!(get(&d, &path(p)).unwrap(), &second);
        }
    }

    #[test]
    fn test_get() {
        let d = nested();
        assert_eq!(get(&d, &path("key6.key9.key10[1]")).unwrap(), &json!(2));
        assert_eq!(get(&d, &path("key3.-1")).unwrap(), &json!("two"));
        assert_eq!(get(&d, &path("key1.1.key4")).unwrap(), &json!(4));
        assert!(get(&d, &path("key3[2]")).is_err());
    }
}
