//! Region/commune dataset model
//!
//! Only the feature properties are read; geometries are ignored.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeoCollection {
    #[serde(default)]
    pub features: Vec<GeoFeature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoFeature {
    pub properties: GeoProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoProperties {
    #[serde(rename = "NOM_REGION", default, deserialize_with = "null_as_empty")]
    pub region: String,
    #[serde(rename = "NOM_COMUNA", default, deserialize_with = "null_as_empty")]
    pub commune: String,
}

/// Missing or null names read as empty and are skipped by the commune index
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl GeoCollection {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            features: pairs
                .into_iter()
                .map(|(region, commune)| GeoFeature {
                    properties: GeoProperties {
                        region: region.to_string(),
                        commune: commune.to_string(),
                    },
                })
                .collect(),
        }
    }
}
