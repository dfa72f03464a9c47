use serde::Serialize;
use serde_json::Value;

use crate::geometry::centroid::{region_area, region_centroid};
use crate::join::{JoinReport, Joined};

pub fn summary_json_impl(joined: &Joined) -> Result<Value, serde_json::Error> {
    #[derive(Serialize)]
    struct RegionSer<'a> {
        name: &'a str,
        #[serde(rename = "CT_Index")]
        ct_index: Option<f64>,
        has_geometry: bool,
        area: Option<f64>,
        centroid: Option<[f64; 2]>,
        labelled: bool,
    }
    #[derive(Serialize)]
    struct SummarySer<'a> {
        version: u32,
        regions: Vec<RegionSer<'a>>,
        report: &'a JoinReport,
    }
    let regions = joined
        .regions
        .iter()
        .map(|r| {
            let centroid = r.geometry.as_ref().and_then(region_centroid);
            RegionSer {
                name: &r.name,
                ct_index: r.ct_index,
                has_geometry: r.geometry.is_some(),
                area: r.geometry.as_ref().map(region_area),
                centroid: centroid.map(|c| [c.x, c.y]),
                labelled: r.is_labelled() && centroid.is_some(),
            }
        })
        .collect();
    let doc = SummarySer { version: 1, regions, report: &joined.report };
    serde_json::to_value(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexTable;
    use crate::join::left_join;
    use crate::model::{Boundary, JsonObject};
    use geo::{polygon, MultiPolygon};

    #[test]
    fn summary_lists_every_region() {
        let sq = MultiPolygon(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 0.0),
            (x: 2.0, y: 2.0),
            (x: 0.0, y: 2.0)
        ]]);
        let boundaries = vec![
            Boundary { name: "부산광역시".into(), geometry: Some(sq.clone()), properties: JsonObject::new() },
            Boundary { name: "없는도".into(), geometry: Some(sq), properties: JsonObject::new() },
        ];
        let v = summary_json_impl(&left_join(boundaries, &IndexTable::embedded())).unwrap();
        assert_eq!(v["version"], 1);
        assert_eq!(v["regions"][0]["CT_Index"], 0.81);
        assert!((v["regions"][0]["centroid"][0].as_f64().unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(v["regions"][0]["labelled"], true);
        assert!(v["regions"][1]["CT_Index"].is_null());
        assert_eq!(v["regions"][1]["labelled"], false);
        assert_eq!(v["report"]["unmatched_regions"][0], "없는도");
    }
}
