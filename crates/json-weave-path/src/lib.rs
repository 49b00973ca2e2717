//! Dotted-path addressing over JSON values.
//!
//! A path is a string of segments separated by `.`. A segment is either a
//! plain object key, a `key[index]` pair, or a purely numeric array index.
//!
//! # Example
//!
//! ```
//! use json_weave_path::{parse, resolve, assign, Step};
//! use serde_json::json;
//!
//! let steps = parse("articles[1].title");
//! assert_eq!(
//!     steps,
//!     vec![
//!         Step::Key("articles".to_string()),
//!         Step::Index(1),
//!         Step::Key("title".to_string()),
//!     ]
//! );
//!
//! let mut doc = json!({"articles": [{"title": "a"}, {"title": "b"}]});
//! assert_eq!(resolve(&doc, "articles[1].title"), Some(&json!("b")));
//!
//! assign(&mut doc, "articles[1].title", json!("c")).unwrap();
//! assert_eq!(resolve(&doc, "articles[1].title"), Some(&json!("c")));
//! ```

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// One step of a parsed path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Key(String),
    Index(usize),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Key(k) => write!(f, "{k}"),
            Step::Index(i) => write!(f, "[{i}]"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// An intermediate container along the path does not exist or has the
    /// wrong shape. Assignment never materializes missing structure.
    #[error("undefined container at `{segment}` while assigning `{path}`")]
    Traversal { path: String, segment: String },
    /// The final index points past the end of the target array.
    #[error("index {index} out of bounds while assigning `{path}`")]
    IndexOutOfBounds { path: String, index: usize },
}

/// Returns `true` when the segment consists only of ASCII digits.
fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse one dot-separated segment into steps.
///
/// A purely numeric segment is always an array index, even when the
/// container happens to be a mapping with that digit-string key. A
/// `key[index]` segment yields a key step followed by an index step. Any
/// other shape, including malformed bracket forms, is a literal key.
fn parse_segment(segment: &str, out: &mut Vec<Step>) {
    if is_digits(segment) {
        if let Ok(index) = segment.parse() {
            out.push(Step::Index(index));
            return;
        }
    }
    if let Some(open) = segment.find('[') {
        let (key, rest) = segment.split_at(open);
        if !key.is_empty() && rest.ends_with(']') {
            let inner = &rest[1..rest.len() - 1];
            if is_digits(inner) {
                if let Ok(index) = inner.parse() {
                    out.push(Step::Key(key.to_string()));
                    out.push(Step::Index(index));
                    return;
                }
            }
        }
    }
    out.push(Step::Key(segment.to_string()));
}

/// Parse a path string into steps.
///
/// Parsing is infallible; the empty path addresses the root value.
///
/// # Example
///
/// ```
/// use json_weave_path::{parse, Step};
///
/// assert_eq!(parse(""), Vec::<Step>::new());
/// assert_eq!(parse("0"), vec![Step::Index(0)]);
/// assert_eq!(
///     parse("a[2].b"),
///     vec![
///         Step::Key("a".to_string()),
///         Step::Index(2),
///         Step::Key("b".to_string()),
///     ]
/// );
/// ```
pub fn parse(path: &str) -> Vec<Step> {
    if path.is_empty() {
        return Vec::new();
    }
    let mut steps = Vec::new();
    for segment in path.split('.') {
        parse_segment(segment, &mut steps);
    }
    steps
}

/// Format steps back into a path string.
///
/// An index renders in bracket form directly after a key and as a bare
/// numeric segment otherwise, so formatted output re-parses to the same
/// steps (for keys that contain no separator characters).
pub fn format_path(steps: &[Step]) -> String {
    let mut out = String::new();
    let mut after_key = false;
    for step in steps {
        match step {
            Step::Key(k) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(k);
                after_key = true;
            }
            Step::Index(i) => {
                if after_key {
                    out.push('[');
                    out.push_str(&i.to_string());
                    out.push(']');
                } else {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(&i.to_string());
                }
                after_key = false;
            }
        }
    }
    out
}

/// Resolve a path against a JSON value.
///
/// Reduction is left to right. Index steps only index arrays and key steps
/// only index objects; a missing key, an out-of-range index, or any other
/// mismatch short-circuits to `None`. Resolution never fails.
///
/// # Example
///
/// ```
/// use json_weave_path::resolve;
/// use serde_json::json;
///
/// let doc = json!({"a": {"b": [10, 20]}});
/// assert_eq!(resolve(&doc, "a.b[1]"), Some(&json!(20)));
/// assert_eq!(resolve(&doc, "a.missing.deeper"), None);
/// ```
pub fn resolve<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    resolve_steps(root, &parse(path))
}

/// Resolve pre-parsed steps against a JSON value.
pub fn resolve_steps<'a>(root: &'a Value, steps: &[Step]) -> Option<&'a Value> {
    let mut current = root;
    for step in steps {
        current = match step {
            Step::Key(k) => match current {
                Value::Object(map) => map.get(k)?,
                _ => return None,
            },
            Step::Index(i) => match current {
                Value::Array(arr) => arr.get(*i)?,
                _ => return None,
            },
        };
    }
    Some(current)
}

/// Assign a value at a path.
///
/// Every container along the path except the final location must already
/// exist; assignment never materializes missing structure and reports a
/// [`PathError::Traversal`] instead. The final step may insert a new key
/// into an existing object, replace an array element in bounds, or append
/// exactly at the array's length. The empty path replaces the root value.
///
/// # Example
///
/// ```
/// use json_weave_path::{assign, resolve, PathError};
/// use serde_json::json;
///
/// let mut doc = json!({"a": {"b": 1}});
/// assign(&mut doc, "a.b", json!(2)).unwrap();
/// assign(&mut doc, "a.c", json!(3)).unwrap(); // new leaf key is fine
/// assert_eq!(resolve(&doc, "a.c"), Some(&json!(3)));
///
/// let err = assign(&mut doc, "x.y", json!(0)).unwrap_err();
/// assert!(matches!(err, PathError::Traversal { .. }));
/// ```
pub fn assign(root: &mut Value, path: &str, value: Value) -> Result<(), PathError> {
    let steps = parse(path);
    let Some((last, intermediate)) = steps.split_last() else {
        *root = value;
        return Ok(());
    };

    let mut current = root;
    for step in intermediate {
        current = match step {
            Step::Key(k) => match current {
                Value::Object(map) => map.get_mut(k).ok_or_else(|| PathError::Traversal {
                    path: path.to_string(),
                    segment: step.to_string(),
                })?,
                _ => {
                    return Err(PathError::Traversal {
                        path: path.to_string(),
                        segment: step.to_string(),
                    })
                }
            },
            Step::Index(i) => match current {
                Value::Array(arr) => arr.get_mut(*i).ok_or_else(|| PathError::Traversal {
                    path: path.to_string(),
                    segment: step.to_string(),
                })?,
                _ => {
                    return Err(PathError::Traversal {
                        path: path.to_string(),
                        segment: step.to_string(),
                    })
                }
            },
        };
    }

    match (last, current) {
        (Step::Key(k), Value::Object(map)) => {
            map.insert(k.clone(), value);
            Ok(())
        }
        (Step::Index(i), Value::Array(arr)) => {
            if *i < arr.len() {
                arr[*i] = value;
                Ok(())
            } else if *i == arr.len() {
                arr.push(value);
                Ok(())
            } else {
                Err(PathError::IndexOutOfBounds {
                    path: path.to_string(),
                    index: *i,
                })
            }
        }
        (step, _) => Err(PathError::Traversal {
            path: path.to_string(),
            segment: step.to_string(),
        }),
    }
}

/// Join two path fragments with a dot, ignoring empty sides.
///
/// # Example
///
/// ```
/// use json_weave_path::join;
///
/// assert_eq!(join("articles[0]", "title"), "articles[0].title");
/// assert_eq!(join("articles[0]", ""), "articles[0]");
/// assert_eq!(join("", "title"), "title");
/// ```
pub fn join(base: &str, relative: &str) -> String {
    if base.is_empty() {
        relative.to_string()
    } else if relative.is_empty() {
        base.to_string()
    } else {
        format!("{base}.{relative}")
    }
}

/// Compose an array element path: `base[index]`.
///
/// # Example
///
/// ```
/// use json_weave_path::indexed;
///
/// assert_eq!(indexed("articles", 2), "articles[2]");
/// ```
pub fn indexed(base: &str, index: usize) -> String {
    format!("{base}[{index}]")
}
