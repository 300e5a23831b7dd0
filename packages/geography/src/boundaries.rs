//! Precinct boundary collection and the name → id lookup built from it.

use std::collections::BTreeMap;
use std::path::Path;

use geojson::{FeatureCollection, GeoJson, feature::Id};
use la_arrests_geography_models::BoundaryFields;

use crate::GeoError;
use crate::names::NameNormalizer;

/// Boundary polygons keyed by precinct id, plus the lookup from
/// normalized precinct name to id.
#[derive(Debug, Clone)]
pub struct PrecinctBoundaries {
    collection: FeatureCollection,
    lookup: BTreeMap<String, String>,
}

impl PrecinctBoundaries {
    /// Reads and indexes the boundary file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError`] if the file cannot be read, is not a `GeoJSON`
    /// `FeatureCollection`, or any feature cannot be identified.
    pub fn load(
        path: &Path,
        fields: &BoundaryFields,
        names: &NameNormalizer,
    ) -> Result<Self, GeoError> {
        let body = std::fs::read_to_string(path).map_err(|source| GeoError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let boundaries = Self::from_geojson_str(&body, fields, names)?;
        log::info!(
            "Loaded {} precinct boundaries from {}",
            boundaries.collection.features.len(),
            path.display()
        );
        Ok(boundaries)
    }

    /// Parses and indexes a `GeoJSON` document.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn from_geojson_str(
        body: &str,
        fields: &BoundaryFields,
        names: &NameNormalizer,
    ) -> Result<Self, GeoError> {
        match body.parse::<GeoJson>()? {
            GeoJson::FeatureCollection(collection) => {
                Self::from_collection(collection, fields, names)
            }
            GeoJson::Feature(_) | GeoJson::Geometry(_) => Err(GeoError::Conversion {
                message: "Boundary file must be a FeatureCollection".to_string(),
            }),
        }
    }

    /// Stamps every feature's `id` with its precinct id and records the
    /// name → id mapping.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::MissingProperty`] for a feature without a name or
    /// id, and [`GeoError::ConflictingId`] when one name maps to two ids.
    pub fn from_collection(
        mut collection: FeatureCollection,
        fields: &BoundaryFields,
        names: &NameNormalizer,
    ) -> Result<Self, GeoError> {
        let mut lookup: BTreeMap<String, String> = BTreeMap::new();

        for (index, feature) in collection.features.iter_mut().enumerate() {
            let id = feature
                .property(&fields.id_property)
                .and_then(property_text)
                .ok_or_else(|| GeoError::MissingProperty {
                    index,
                    property: fields.id_property.clone(),
                })?;
            let name = feature
                .property(&fields.name_property)
                .and_then(property_text)
                .map(|raw| names.normalize(&raw))
                .ok_or_else(|| GeoError::MissingProperty {
                    index,
                    property: fields.name_property.clone(),
                })?;

            feature.id = Some(Id::String(id.clone()));

            match lookup.get(&name) {
                Some(existing) if *existing != id => {
                    return Err(GeoError::ConflictingId {
                        name,
                        first: existing.clone(),
                        second: id,
                    });
                }
                Some(_) => {}
                None => {
                    lookup.insert(name, id);
                }
            }
        }

        Ok(Self { collection, lookup })
    }

    /// Returns the boundary id for a normalized precinct name.
    #[must_use]
    pub fn id_for(&self, name: &str) -> Option<&str> {
        self.lookup.get(name).map(String::as_str)
    }

    /// The boundary polygons, each with its `id` set.
    #[must_use]
    pub const fn feature_collection(&self) -> &FeatureCollection {
        &self.collection
    }
}

/// Renders a string or numeric property as text. Integral floats drop
/// their fractional part so `7.0` and `7` produce the same id.
fn property_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else {
                n.as_f64().map(|f| {
                    if f.fract() == 0.0 {
                        format!("{f:.0}")
                    } else {
                        f.to_string()
                    }
                })
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "APREC": "TOPANGA", "PREC": 21 },
                "geometry": { "type": "Polygon", "coordinates": [[[-118.6, 34.2], [-118.5, 34.2], [-118.5, 34.1], [-118.6, 34.2]]] }
            },
            {
                "type": "Feature",
                "properties": { "APREC": "West LA", "PREC": 8.0 },
                "geometry": { "type": "Polygon", "coordinates": [[[-118.5, 34.0], [-118.4, 34.0], [-118.4, 34.1], [-118.5, 34.0]]] }
            }
        ]
    }"#;

    fn load(body: &str) -> Result<PrecinctBoundaries, GeoError> {
        PrecinctBoundaries::from_geojson_str(
            body,
            &BoundaryFields::default(),
            &NameNormalizer::default(),
        )
    }

    #[test]
    fn builds_name_to_id_lookup() {
        let boundaries = load(SAMPLE).unwrap();
        assert_eq!(boundaries.feature_collection().features.len(), 2);
        assert_eq!(boundaries.id_for("TOPANGA"), Some("21"));
        assert_eq!(boundaries.id_for("WEST LOS ANGELES"), Some("8"));
        assert_eq!(boundaries.id_for("WEST LA"), None);
    }

    #[test]
    fn stamps_feature_ids() {
        let boundaries = load(SAMPLE).unwrap();
        let ids: Vec<Option<Id>> = boundaries
            .feature_collection()
            .features
            .iter()
            .map(|f| f.id.clone())
            .collect();
        assert_eq!(
            ids,
            vec![
                Some(Id::String("21".to_string())),
                Some(Id::String("8".to_string()))
            ]
        );
    }

    #[test]
    fn missing_name_property_is_an_error() {
        let body = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"PREC":1},"geometry":null}
        ]}"#;
        let err = load(body).unwrap_err();
        assert!(
            matches!(err, GeoError::MissingProperty { index: 0, ref property } if property == "APREC")
        );
    }

    #[test]
    fn conflicting_ids_are_rejected() {
        let body = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"APREC":"CENTRAL","PREC":1},"geometry":null},
            {"type":"Feature","properties":{"APREC":"Central","PREC":2},"geometry":null}
        ]}"#;
        assert!(matches!(
            load(body).unwrap_err(),
            GeoError::ConflictingId { .. }
        ));
    }

    #[test]
    fn rejects_non_collection_documents() {
        let body = r#"{"type":"Point","coordinates":[-118.0,34.0]}"#;
        assert!(matches!(
            load(body).unwrap_err(),
            GeoError::Conversion { .. }
        ));
    }
}
