use {
    mongodb::bson::Document,
    serde::{Deserialize, Serialize},
};

/// Body of a bulk update: merge `values` onto every record matching `query`.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(crate = "rocket::serde")]
pub struct UpdateAnimals {
    pub query: Document,
    pub values: Document,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(crate = "rocket::serde")]
pub struct UpdateOutcome {
    pub modified: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(crate = "rocket::serde")]
pub struct DeleteOutcome {
    pub deleted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn update_body_deserializes_query_and_values() {
        let body: UpdateAnimals =
            serde_json::from_str(r#"{"query":{"name":"Fido"},"values":{"species":"cat"}}"#)
                .expect("well-formed update body");

        assert_eq!(body.query, doc! { "name": "Fido" });
        assert_eq!(body.values, doc! { "species": "cat" });
    }

    #[test]
    fn update_body_requires_both_mappings() {
        let missing_values = serde_json::from_str::<UpdateAnimals>(r#"{"query":{"name":"Fido"}}"#);
        assert!(missing_values.is_err());
    }
}
