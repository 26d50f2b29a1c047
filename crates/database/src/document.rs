use core_types::Planet;
use mongodb::bson::oid::ObjectId;
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A planet as it is laid out in the `planets` collection.
///
/// `_id` is skipped when absent so that inserts let the store assign it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub climate: String,
    pub terrain: String,
    #[serde(deserialize_with = "deserialize_films")]
    pub films: i64,
}

/// Accepts Int32, Int64 and whole-valued Double. The mongo shell stores
/// plain numeric literals as doubles.
fn deserialize_films<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct FilmsVisitor;

    impl Visitor<'_> for FilmsVisitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a whole number of films")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
            i64::try_from(value).map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<i64, E> {
            // Bounds are exclusive at the top: i64::MAX is not representable as f64.
            if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
                Ok(value as i64)
            } else {
                Err(E::invalid_value(Unexpected::Float(value), &self))
            }
        }
    }

    deserializer.deserialize_any(FilmsVisitor)
}

impl From<PlanetDocument> for Planet {
    fn from(doc: PlanetDocument) -> Self {
        Planet {
            id: doc.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            name: doc.name,
            climate: doc.climate,
            terrain: doc.terrain,
            films: doc.films,
        }
    }
}

/// Builds the document to insert. Any `id` on the planet is ignored.
impl From<&Planet> for PlanetDocument {
    fn from(planet: &Planet) -> Self {
        PlanetDocument {
            id: None,
            name: planet.name.clone(),
            climate: planet.climate.clone(),
            terrain: planet.terrain.clone(),
            films: planet.films,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};

    #[test]
    fn insert_document_has_no_id() {
        let planet = Planet::new("Hoth", "frozen", "tundra", 1).with_id("5e27096d0c326694932a4cc8");
        let document = bson::to_document(&PlanetDocument::from(&planet)).unwrap();
        assert!(!document.contains_key("_id"));
        assert_eq!(document.get_str("name").unwrap(), "Hoth");
    }

    #[test]
    fn stored_document_maps_to_hex_id() {
        let oid = ObjectId::parse_str("5e27096d0c326694932a4cc8").unwrap();
        let stored = doc! { "_id": oid, "name": "Endor", "films": 1_i32 };
        let planet: Planet = bson::from_document::<PlanetDocument>(stored).unwrap().into();
        assert_eq!(planet.id, "5e27096d0c326694932a4cc8");
        assert_eq!(planet.name, "Endor");
        assert_eq!(planet.climate, "");
        assert_eq!(planet.films, 1);
    }

    #[test]
    fn whole_double_film_count_decodes() {
        let stored = doc! { "_id": ObjectId::new(), "name": "Alderaan", "films": 2.0_f64 };
        let document = bson::from_document::<PlanetDocument>(stored).unwrap();
        assert_eq!(document.films, 2);
    }

    #[test]
    fn int64_and_missing_film_counts_decode() {
        let stored = doc! { "name": "Naboo", "films": 4_i64 };
        assert_eq!(bson::from_document::<PlanetDocument>(stored).unwrap().films, 4);

        let stored = doc! { "name": "Stewjon" };
        assert_eq!(bson::from_document::<PlanetDocument>(stored).unwrap().films, 0);
    }

    #[test]
    fn fractional_film_count_is_rejected() {
        let stored = doc! { "name": "Hoth", "films": 1.5_f64 };
        assert!(bson::from_document::<PlanetDocument>(stored).is_err());

        let stored = doc! { "name": "Hoth", "films": "one" };
        assert!(bson::from_document::<PlanetDocument>(stored).is_err());
    }
}
