//! Document to JSON conversion for HTTP responses.
//! Object ids render as their 24-char hex form, which is what the frontend
//! keys on; other non-JSON scalars fall back to relaxed extended JSON.

use mongodb::bson::{Bson, Document};
use serde_json::Value;

pub fn doc_to_json(doc: Document) -> Value {
    bson_to_json(Bson::Document(doc))
}

pub fn docs_to_json(docs: Vec<Document>) -> Vec<Value> {
    docs.into_iter().map(doc_to_json).collect()
}

pub fn bson_to_json(bson: Bson) -> Value {
    match bson {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(doc) => {
            Value::Object(doc.into_iter().map(|(k, v)| (k, bson_to_json(v))).collect())
        }
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};

    #[test]
    fn object_ids_render_as_hex() {
        let oid = ObjectId::parse_str("65a1b2c3d4e5f6a7b8c9d0e1").expect("hex");
        let v = doc_to_json(doc! { "_id": oid, "name": "Sea View Suite", "price": 120 });
        assert_eq!(v["_id"], "65a1b2c3d4e5f6a7b8c9d0e1");
        assert_eq!(v["name"], "Sea View Suite");
        assert_eq!(v["price"], 120);
    }

    #[test]
    fn nested_documents_and_arrays_recurse() {
        let oid = ObjectId::new();
        let v = doc_to_json(doc! { "rooms": [{ "ref": oid }], "meta": { "stars": 4.5 } });
        assert_eq!(v["rooms"][0]["ref"], oid.to_hex());
        assert_eq!(v["meta"]["stars"], 4.5);
    }
}
