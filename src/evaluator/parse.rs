//! Field extraction from loosely typed area payloads
//!
//! Vendor forms send numbers as JSON numbers or, straight from text inputs,
//! as numeric strings. Both are accepted here; range and finiteness checks
//! happen afterwards in [`GeoPoint::new`].

use serde_json::Value;

use crate::domain::GeoPoint;

/// Read a number or a numeric string
pub(crate) fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read a `[lng, lat]` pair or a GeoJSON `{"type": "Point", "coordinates": [lng, lat]}`
pub(crate) fn point(value: &Value) -> Result<GeoPoint, String> {
    let pair = match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => {
            if let Some(kind) = map.get("type")
                && kind.as_str() != Some("Point")
            {
                return Err(format!("expected a GeoJSON Point, got type {}", kind));
            }
            map.get("coordinates")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .ok_or_else(|| "point has no coordinates array".to_string())?
        }
        Value::Null => return Err("missing".to_string()),
        other => return Err(format!("expected [longitude, latitude], got {}", other)),
    };

    let [lng, lat] = pair else {
        return Err(format!(
            "expected [longitude, latitude], got {} values",
            pair.len()
        ));
    };

    let longitude = number(lng).ok_or_else(|| format!("longitude {} is not a number", lng))?;
    let latitude = number(lat).ok_or_else(|| format!("latitude {} is not a number", lat))?;

    GeoPoint::new(longitude, latitude).map_err(|e| e.to_string())
}

/// True when `value` looks like a single position rather than a ring
pub(crate) fn is_position(value: &Value) -> bool {
    value
        .as_array()
        .and_then(|items| items.first())
        .is_some_and(|first| number(first).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_forms() {
        assert_eq!(number(&json!(1.5)), Some(1.5));
        assert_eq!(number(&json!(" 42 ")), Some(42.0));
        assert_eq!(number(&json!("abc")), None);
        assert_eq!(number(&json!(true)), None);
        assert_eq!(number(&Value::Null), None);
    }

    #[test]
    fn test_point_from_pair() {
        let p = point(&json!([-73.9857, 40.7484])).unwrap();
        assert_eq!(p.longitude(), -73.9857);
        assert_eq!(p.latitude(), 40.7484);
    }

    #[test]
    fn test_point_from_geojson() {
        let p = point(&json!({"type": "Point", "coordinates": [2.35, 48.85]})).unwrap();
        assert_eq!(p.longitude(), 2.35);
        assert_eq!(p.latitude(), 48.85);
    }

    #[test]
    fn test_point_from_form_strings() {
        let p = point(&json!(["2.35", "48.85"])).unwrap();
        assert_eq!(p.longitude(), 2.35);
    }

    #[test]
    fn test_point_rejects_bad_shapes() {
        assert!(point(&json!([1.0])).is_err());
        assert!(point(&json!([1.0, 2.0, 3.0])).is_err());
        assert!(point(&json!({"type": "LineString", "coordinates": [0, 0]})).is_err());
        assert!(point(&json!("0,0")).is_err());
        assert!(point(&json!(["NaN", 0])).is_err());
        assert_eq!(point(&Value::Null), Err("missing".to_string()));
    }

    #[test]
    fn test_is_position() {
        assert!(is_position(&json!([1.0, 2.0])));
        assert!(!is_position(&json!([[1.0, 2.0]])));
        assert!(!is_position(&json!([])));
    }
}
