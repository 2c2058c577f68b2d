//! Triangulation sample model.
//!
//! Samples are produced by the upstream positioning service and stored
//! opaquely; the core never recomputes geometry from them.

use serde::{Deserialize, Serialize};

/// A 2-D point in the site coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A source circle used by the positioning service: detection centre plus
/// estimated range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    #[serde(rename = "Centre")]
    pub centre: Point,
    #[serde(rename = "Radius")]
    pub radius: f64,
}

/// One position estimate for a beacon: the three source circles, the raw
/// circle intersection, and the final resolved point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangulationSample {
    #[serde(rename = "Circle1")]
    pub circle1: Circle,
    #[serde(rename = "Circle2")]
    pub circle2: Circle,
    #[serde(rename = "Circle3")]
    pub circle3: Circle,
    #[serde(rename = "IntersectionPoint")]
    pub intersection_point: Point,
    #[serde(rename = "FinalPoint")]
    pub final_point: Point,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_shape() {
        let payload = r#"{
            "Circle1": { "Centre": { "x": 1.0, "y": 2.0 }, "Radius": 3.5 },
            "Circle2": { "Centre": { "x": 4.0, "y": 5.0 }, "Radius": 2.0 },
            "Circle3": { "Centre": { "x": 6.0, "y": 7.0 }, "Radius": 1.0 },
            "IntersectionPoint": { "x": 3.1, "y": 4.2 },
            "FinalPoint": { "x": 3.0, "y": 4.0 }
        }"#;

        let sample: TriangulationSample = serde_json::from_str(payload).unwrap();
        assert_eq!(sample.circle1.radius, 3.5);
        assert_eq!(sample.final_point, Point { x: 3.0, y: 4.0 });
    }
}
