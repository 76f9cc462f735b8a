//! Overpass QL query construction.

/// Builds the query selecting every named street of a district.
///
/// The district is looked up by its `name:en` tag. Trunk to living-street
/// highways are included; primary roads tagged as bridges are not.
pub fn district_streets_query(district_name_en: &str) -> String {
    let district = escape(district_name_en);
    format!(
        r#"[out:json];
area["name:en"="{district}"]->.district;
(
way(area.district)["highway"="trunk"]["name"];
way(area.district)["highway"="primary"]["name"]["bridge"!="Yes"];
way(area.district)["highway"="secondary"]["name"];
way(area.district)["highway"="tertiary"]["name"];
way(area.district)["highway"="residential"]["name"];
way(area.district)["highway"="living_street"]["name"];
);
out tags;
"#
    )
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
