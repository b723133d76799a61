//! Declarative query-string encoding of typed option structs.
//!
//! Options are plain serde structs. Each field's serde attributes are the
//! declarative tag of the encoding contract: `rename` supplies the
//! parameter name (sequence fields carry the `[]` suffix, e.g.
//! `activityTypeId[]`), and `skip_serializing_if = "Option::is_none"`
//! expresses omit-when-absent. The encoder flattens the serialized value
//! into `(name, value)` pairs:
//!
//! - `null` fields are omitted
//! - scalars contribute one pair
//! - sequences contribute one pair per element, in element order
//! - fields rendering to an empty string are omitted
//! - nested objects are rejected as an options-encode error

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{Error, ErrorKind, Result};

/// Encode an options value into query-string pairs.
pub fn to_query_pairs<T: Serialize>(options: &T) -> Result<Vec<(String, String)>> {
    let value = serde_json::to_value(options)
        .map_err(|e| Error::with_source(ErrorKind::QueryEncode(e.to_string()), e))?;

    let map = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(Error::new(ErrorKind::QueryEncode(format!(
                "options must serialize to an object, got {other}"
            ))))
        }
    };

    let mut pairs = Vec::new();
    for (name, value) in map {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    pairs.push((name.clone(), scalar_to_string(&name, item)?));
                }
            }
            scalar => {
                let rendered = scalar_to_string(&name, scalar)?;
                if !rendered.is_empty() {
                    pairs.push((name, rendered));
                }
            }
        }
    }

    Ok(pairs)
}

fn scalar_to_string(name: &str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(Error::new(ErrorKind::QueryEncode(format!(
            "unsupported value for parameter '{name}': {other}"
        )))),
    }
}

/// Merge an options value into the query string of `url`, preserving any
/// pre-existing parameters. `None` leaves the URL unchanged.
pub fn append_options<T: Serialize>(url: &mut Url, options: Option<&T>) -> Result<()> {
    let Some(options) = options else {
        return Ok(());
    };

    let pairs = to_query_pairs(options)?;
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
    Ok(())
}
