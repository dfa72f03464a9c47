//! GeoJSON boundary loader.

use std::io::Read;
use std::path::Path;

use geo::{Geometry, MultiPolygon};
use geojson::{Feature, GeoJson};

use crate::error::MapError;
use crate::geometry::limits;
use crate::model::{Boundary, JsonObject};

pub const DEFAULT_NAME_FIELD: &str = "name";

pub fn load_boundaries(path: &Path, name_field: &str) -> Result<Vec<Boundary>, MapError> {
    let file = std::fs::File::open(path).map_err(|e| MapError::io(path, e))?;
    let boundaries = boundaries_from_reader(std::io::BufReader::new(file), name_field)
        .map_err(|e| match e {
            MapError::Io { source, .. } => MapError::io(path, source),
            other => other,
        })?;
    tracing::info!(path = %path.display(), regions = boundaries.len(), "loaded boundaries");
    Ok(boundaries)
}

pub fn boundaries_from_reader<R: Read>(
    reader: R,
    name_field: &str,
) -> Result<Vec<Boundary>, MapError> {
    let mut text = String::new();
    let cap = limits::MAX_GEOJSON_BYTES as u64 + 1;
    reader
        .take(cap)
        .read_to_string(&mut text)
        .map_err(|e| MapError::io("<reader>", e))?;
    boundaries_from_str(&text, name_field)
}

pub fn boundaries_from_str(text: &str, name_field: &str) -> Result<Vec<Boundary>, MapError> {
    if text.len() > limits::MAX_GEOJSON_BYTES {
        return Err(MapError::LimitExceeded {
            what: "boundary file size",
            limit: limits::MAX_GEOJSON_BYTES,
        });
    }
    let features = match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(_) => return Err(MapError::NotFeatureCollection),
    };
    if features.len() > limits::MAX_FEATURES {
        return Err(MapError::LimitExceeded {
            what: "feature count",
            limit: limits::MAX_FEATURES,
        });
    }
    let mut vertices = 0usize;
    let mut out = Vec::with_capacity(features.len());
    for (ordinal, feature) in features.into_iter().enumerate() {
        let b = boundary_from_feature(ordinal, feature, name_field)?;
        if let Some(mp) = &b.geometry {
            vertices += vertex_count(mp);
            if vertices > limits::MAX_VERTICES_TOTAL {
                return Err(MapError::LimitExceeded {
                    what: "total vertex count",
                    limit: limits::MAX_VERTICES_TOTAL,
                });
            }
        }
        out.push(b);
    }
    Ok(out)
}

fn boundary_from_feature(
    ordinal: usize,
    feature: Feature,
    name_field: &str,
) -> Result<Boundary, MapError> {
    let properties: JsonObject = feature.properties.unwrap_or_default();
    let name = match properties.get(name_field) {
        Some(serde_json::Value::String(s)) => s.clone(),
        _ => {
            return Err(MapError::MissingName {
                ordinal,
                field: name_field.to_string(),
            })
        }
    };
    let geometry = match feature.geometry {
        None => None,
        Some(g) => Some(to_multipolygon(&name, Geometry::<f64>::try_from(g)?)?),
    };
    Ok(Boundary { name, geometry, properties })
}

fn to_multipolygon(name: &str, g: Geometry<f64>) -> Result<MultiPolygon<f64>, MapError> {
    let kind = match g {
        Geometry::Polygon(p) => return Ok(MultiPolygon(vec![p])),
        Geometry::MultiPolygon(mp) => return Ok(mp),
        Geometry::Point(_) => "Point",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::Line(_) | Geometry::LineString(_) => "LineString",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    };
    Err(MapError::UnsupportedGeometry { name: name.to_string(), kind })
}

fn vertex_count(mp: &MultiPolygon<f64>) -> usize {
    mp.0.iter()
        .map(|p| p.exterior().0.len() + p.interiors().iter().map(|r| r.0.len()).sum::<usize>())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,1],[0,0]]]}"#;

    fn collection(features: &[String]) -> String {
        format!(r#"{{"type":"FeatureCollection","features":[{}]}}"#, features.join(","))
    }

    fn feature(name: &str, geometry: &str) -> String {
        format!(r#"{{"type":"Feature","properties":{{"name":"{}"}},"geometry":{}}}"#, name, geometry)
    }

    #[test]
    fn polygon_is_lifted_to_multipolygon() {
        let doc = collection(&[feature("경기도", SQUARE)]);
        let b = boundaries_from_str(&doc, "name").unwrap();
        assert_eq!(b.len(), 1);
        assert_eq!(b[0].name, "경기도");
        assert_eq!(b[0].geometry.as_ref().unwrap().0.len(), 1);
    }

    #[test]
    fn null_geometry_is_kept() {
        let doc = collection(&[feature("독도", "null")]);
        let b = boundaries_from_str(&doc, "name").unwrap();
        assert!(b[0].geometry.is_none());
    }

    #[test]
    fn missing_name_reports_ordinal() {
        let doc = collection(&[
            feature("경기도", SQUARE),
            format!(r#"{{"type":"Feature","properties":{{"NAME_1":"x"}},"geometry":{}}}"#, SQUARE),
        ]);
        match boundaries_from_str(&doc, "name") {
            Err(MapError::MissingName { ordinal, field }) => {
                assert_eq!(ordinal, 1);
                assert_eq!(field, "name");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(boundaries_from_str(&doc, "NAME_1").is_err());
    }

    #[test]
    fn custom_name_field() {
        let doc = collection(&[format!(
            r#"{{"type":"Feature","properties":{{"CTP_KOR_NM":"경기도"}},"geometry":{}}}"#,
            SQUARE
        )]);
        let b = boundaries_from_str(&doc, "CTP_KOR_NM").unwrap();
        assert_eq!(b[0].name, "경기도");
    }

    #[test]
    fn point_geometry_rejected() {
        let doc = collection(&[feature("x", r#"{"type":"Point","coordinates":[1,2]}"#)]);
        assert!(matches!(
            boundaries_from_str(&doc, "name"),
            Err(MapError::UnsupportedGeometry { kind: "Point", .. })
        ));
    }

    #[test]
    fn bare_geometry_rejected() {
        assert!(matches!(
            boundaries_from_str(SQUARE, "name"),
            Err(MapError::NotFeatureCollection)
        ));
    }

    #[test]
    fn malformed_json_is_geojson_error() {
        assert!(matches!(
            boundaries_from_str("{not json", "name"),
            Err(MapError::GeoJson(_))
        ));
    }

    #[test]
    fn missing_file_names_path() {
        let err = load_boundaries(Path::new("/no/such/skorea-geo.json"), "name").unwrap_err();
        assert!(err.to_string().contains("skorea-geo.json"));
    }
}
