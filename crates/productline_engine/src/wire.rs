//! JSON shapes returned by the jobs service.
//!
//! Product lines and jobs arrive as GeoJSON-style features: an `id`, an
//! optional `geometry` and a `properties` object.

use productline_core::{Job, JobId, ProductLine, Timestamp};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductLinesEnvelope {
    pub product_lines: Vec<ProductLineFeature>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobIdsEnvelope {
    pub job_ids: Vec<JobId>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobsEnvelope {
    pub jobs: Vec<JobFeature>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductLineFeature {
    id: String,
    #[serde(default)]
    geometry: Option<Value>,
    properties: ProductLineProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductLineProperties {
    name: String,
    created_on: Timestamp,
    starts_on: Timestamp,
    #[serde(default)]
    expires_on: Option<Timestamp>,
    #[serde(default)]
    algorithm_name: String,
    #[serde(default)]
    image_cloud_cover: f64,
    #[serde(default)]
    spatial_filter_name: Option<String>,
    #[serde(default)]
    owner: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobFeature {
    id: JobId,
    #[serde(default)]
    geometry: Option<Value>,
    properties: JobProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobProperties {
    created_on: Timestamp,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<ProductLineFeature> for ProductLine {
    fn from(feature: ProductLineFeature) -> Self {
        let props = feature.properties;
        ProductLine {
            id: feature.id,
            name: props.name,
            created_on: props.created_on,
            starts_on: props.starts_on,
            expires_on: props.expires_on,
            algorithm_name: props.algorithm_name,
            image_cloud_cover: props.image_cloud_cover,
            spatial_filter_name: props.spatial_filter_name,
            owner: props.owner,
            geometry: feature.geometry,
        }
    }
}

impl From<JobFeature> for Job {
    fn from(feature: JobFeature) -> Self {
        let props = feature.properties;
        Job {
            id: feature.id,
            created_on: props.created_on,
            name: props.name,
            status: props.status,
            properties: props.extra,
            geometry: feature.geometry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_feature_keeps_unknown_properties() {
        let raw = r#"{
            "id": "job-1",
            "geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
            "properties": {
                "createdOn": "2024-02-01T10:00:00Z",
                "name": "Shoreline 2024-02-01",
                "status": "Success",
                "sceneId": "landsat:LC80"
            }
        }"#;

        let job: Job = serde_json::from_str::<JobFeature>(raw).unwrap().into();
        assert_eq!(job.id, "job-1");
        assert_eq!(job.name.as_deref(), Some("Shoreline 2024-02-01"));
        assert_eq!(job.status.as_deref(), Some("Success"));
        assert_eq!(job.properties.len(), 1);
        assert_eq!(job.properties["sceneId"], "landsat:LC80");
        assert!(job.geometry.is_some());
    }

    #[test]
    fn product_line_accepts_fractional_cloud_cover() {
        let raw = r#"{
            "id": "pl-1",
            "properties": {
                "name": "Coastline",
                "createdOn": "2023-06-01T08:30:00Z",
                "startsOn": "2023-06-02T00:00:00Z",
                "imageCloudCover": 10.5
            }
        }"#;

        let line: ProductLine = serde_json::from_str::<ProductLineFeature>(raw).unwrap().into();
        assert_eq!(line.image_cloud_cover, 10.5);
    }

    #[test]
    fn job_feature_requires_creation_date() {
        let raw = r#"{"id": "job-1", "properties": {"name": "no date"}}"#;
        assert!(serde_json::from_str::<JobFeature>(raw).is_err());
    }
}
