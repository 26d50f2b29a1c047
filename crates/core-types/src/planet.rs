use serde::{Deserialize, Serialize};

/// A planet record as it travels over HTTP and between the layers of the API.
///
/// Every field is optional on input and falls back to its default, so a
/// payload like `{"name":"Hoth"}` decodes into a complete record. The `id` is
/// always a plain string here; its native storage form never leaves the
/// `database` crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Planet {
    /// Identifier assigned by the store on creation. Empty until then.
    pub id: String,
    pub name: String,
    pub climate: String,
    pub terrain: String,
    /// Number of films the planet appears in.
    pub films: i64,
}

impl Planet {
    /// Builds an unsaved planet (no `id` yet).
    pub fn new(
        name: impl Into<String>,
        climate: impl Into<String>,
        terrain: impl Into<String>,
        films: i64,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            climate: climate.into(),
            terrain: terrain.into(),
            films,
        }
    }

    /// Returns the same planet carrying the given identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let planet: Planet = serde_json::from_str(r#"{"name":"mocked-planet"}"#).unwrap();
        assert_eq!(planet, Planet::new("mocked-planet", "", "", 0));
    }

    #[test]
    fn serializes_fields_in_wire_order() {
        let planet = Planet::new("Naboo", "temperate", "grassy hills", 4).with_id("5e27096d0c326694932a4cc8");
        let json = serde_json::to_string(&planet).unwrap();
        assert_eq!(
            json,
            r#"{"id":"5e27096d0c326694932a4cc8","name":"Naboo","climate":"temperate","terrain":"grassy hills","films":4}"#
        );
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        assert!(serde_json::from_str::<Planet>(r#"{"name":0}"#).is_err());
        assert!(serde_json::from_str::<Planet>(r#"{"films":"many"}"#).is_err());
    }
}
