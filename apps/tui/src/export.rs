//! JSON export of every essay, read by the browser dashboard.

use crate::content::exports::{self, share_percent};
use crate::content::heritage::{Site, SITES};
use crate::content::rugs::{RugTradition, RUGS};
use crate::content::Essay;
use crate::geometry::{layout_arcs, wedge_path, ArcLayoutConfig, ArcSegment, GeometryError, Segment};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct EssaysExport {
    pub generated_at: String,
    pub essays: Vec<EssayHeader>,
    pub heritage: &'static [Site],
    pub exports: ExportsPanel,
    pub rugs: &'static [RugTradition],
}

#[derive(Debug, Serialize)]
pub struct EssayHeader {
    pub id: Essay,
    pub title: &'static str,
    pub prologue: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ExportsPanel {
    pub title: &'static str,
    pub unit: &'static str,
    pub layout: ArcLayoutConfig,
    pub segments: Vec<Segment>,
    pub arcs: Vec<ExportArc>,
}

#[derive(Debug, Serialize)]
pub struct ExportArc {
    #[serde(flatten)]
    pub arc: ArcSegment,
    pub share_percent: f64,
    /// SVG path centred on the origin.
    pub path: String,
}

pub fn build_export() -> Result<EssaysExport, GeometryError> {
    let layout = ArcLayoutConfig::default();
    let segments = exports::segments();
    let arcs = layout_arcs(&segments, &layout)?
        .into_iter()
        .enumerate()
        .map(|(index, arc)| ExportArc {
            share_percent: share_percent(&segments, index).unwrap_or_default(),
            path: wedge_path(
                (0.0, 0.0),
                layout.inner_radius,
                arc.outer_radius,
                arc.start_angle,
                arc.end_angle,
            ),
            arc,
        })
        .collect();

    Ok(EssaysExport {
        generated_at: chrono::Local::now().to_rfc3339(),
        essays: Essay::ALL
            .iter()
            .map(|essay| EssayHeader {
                id: *essay,
                title: essay.label(),
                prologue: essay.prologue(),
            })
            .collect(),
        heritage: SITES,
        exports: ExportsPanel {
            title: exports::TITLE,
            unit: exports::UNIT,
            layout,
            segments,
            arcs,
        },
        rugs: RUGS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_serializes_every_essay() {
        let export = build_export().unwrap();
        let json = serde_json::to_value(&export).unwrap();

        assert_eq!(json["essays"].as_array().unwrap().len(), Essay::ALL.len());
        assert_eq!(json["heritage"].as_array().unwrap().len(), SITES.len());
        assert_eq!(json["rugs"].as_array().unwrap().len(), RUGS.len());
        assert_eq!(json["heritage"][0]["region"], "morocco");
        assert!(json["heritage"][0].get("search").is_none());

        let arcs = json["exports"]["arcs"].as_array().unwrap();
        assert_eq!(arcs.len(), export.exports.segments.len());
        assert!(arcs[0]["path"].as_str().unwrap().starts_with("M "));
        assert!(arcs[0]["start_angle"].is_number());
    }
}
