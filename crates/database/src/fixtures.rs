use crate::document::PlanetDocument;
use crate::error::DbError;
use crate::store::PlanetCollection;
use mongodb::bson::doc;

/// (name, climate, terrain, films) for the planets a fresh store starts with.
const CANONICAL_PLANETS: &[(&str, &str, &str, i64)] = &[
    ("Alderaan", "temperate", "grasslands, mountains", 2),
    ("Yavin IV", "temperate, tropical", "jungle, rainforests", 3),
    ("Hoth", "frozen", "tundra, ice caves, mountain ranges", 1),
    ("Dagobah", "murky", "swamp, jungles", 3),
    ("Bespin", "temperate", "gas giant", 1),
    ("Endor", "temperate", "forests, mountains, lakes", 1),
    ("Naboo", "temperate", "grassy hills, swamps, forests, mountains", 4),
    ("Coruscant", "temperate", "cityscape, mountains", 4),
    ("Kamino", "temperate", "ocean", 1),
    ("Geonosis", "temperate, arid", "rock, desert, mountain, barren", 1),
    ("Utapau", "temperate, arid, windy", "scrublands, savanna, canyons, sinkholes", 1),
    ("Mustafar", "hot", "volcanoes, lava rivers, mountains, caves", 1),
    ("Kashyyyk", "tropical", "jungle, forests, lakes, rivers", 1),
    ("Polis Massa", "artificial temperate ", "airless asteroid", 1),
    ("Mygeeto", "frigid", "glaciers, mountains, ice canyons", 1),
    ("Felucia", "hot, humid", "fungus forests", 1),
    ("Cato Neimoidia", "temperate, moist", "mountains, fields, forests, rock arches", 1),
    ("Saleucami", "hot", "caves, desert, mountains, volcanoes", 1),
    ("Stewjon", "temperate", "grass", 0),
    ("Eriadu", "polluted", "cityscape", 0),
];

/// Inserts the canonical planets if the collection holds no documents yet.
///
/// Returns how many documents were inserted (zero when the collection was
/// already populated).
pub async fn seed_if_empty<C: PlanetCollection + ?Sized>(collection: &C) -> Result<usize, DbError> {
    if !collection.find(doc! {}).await?.is_empty() {
        tracing::debug!("Planets collection already populated, skipping seed.");
        return Ok(0);
    }

    for &(name, climate, terrain, films) in CANONICAL_PLANETS {
        collection
            .insert_one(PlanetDocument {
                id: None,
                name: name.to_string(),
                climate: climate.to_string(),
                terrain: terrain.to_string(),
                films,
            })
            .await?;
    }

    tracing::info!(count = CANONICAL_PLANETS.len(), "Seeded planets collection.");
    Ok(CANONICAL_PLANETS.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryCollection;

    #[tokio::test]
    async fn seeds_only_an_empty_collection() {
        let store = MemoryCollection::new();
        assert_eq!(seed_if_empty(&store).await.unwrap(), CANONICAL_PLANETS.len());
        assert_eq!(seed_if_empty(&store).await.unwrap(), 0);
        assert_eq!(store.len().await, CANONICAL_PLANETS.len());
    }
}
