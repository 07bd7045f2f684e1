//! Conversion from `serde_json::Value` into the dynamic model.

use std::rc::Rc;

use crate::key::MapKey;
use crate::value::Value;

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Absent,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Uint(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::Seq(Rc::new(items.into_iter().map(Value::from).collect()))
            }
            serde_json::Value::Object(entries) => Value::Map(Rc::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (MapKey::Text(k), Value::from(v)))
                    .collect(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::value::{Kind, Value};
    use serde_json::json;

    #[test]
    fn json_scalars_convert() {
        assert_eq!(Value::from(json!(null)).kind(), Kind::Absent);
        assert_eq!(Value::from(json!(true)).kind(), Kind::Bool);
        assert_eq!(Value::from(json!(-3)).kind(), Kind::Int);
        assert_eq!(Value::from(json!(u64::MAX)).kind(), Kind::Uint);
        assert_eq!(Value::from(json!(1.25)).kind(), Kind::Float);
        assert_eq!(Value::from(json!("hi")).kind(), Kind::Text);
    }

    #[test]
    fn json_composites_convert() {
        assert_eq!(Value::from(json!([1, 2])).kind(), Kind::Seq);
        let v = Value::from(json!({"a": 1, "b": [true]}));
        match v {
            Value::Map(entries) => assert_eq!(entries.len(), 2),
            other => panic!("expected Map, got {other:?}"),
        }
    }
}
