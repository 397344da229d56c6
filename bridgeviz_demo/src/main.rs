// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bridge chart demo.
//!
//! Renders a chart to SVG, clicks the first bar, acknowledges the toggle, and writes the
//! emphasized chart next to it. Pass a JSON file to use your own rows and settings:
//!
//! ```json
//! { "rows": [["Q1", 120], ["Q2", "95.5"]], "config": { "aggregate_mode": "Sum" } }
//! ```
//!
//! Set `RUST_LOG=debug` to trace the pipeline.

mod svg;

use std::error::Error;
use std::path::Path;
use std::time::Instant;

use bridgeviz_charts::{
    BridgeChartConfig, BridgeVisual, Cell, ClickOutcome, LocalSelectionService, Palette, Size,
    UpdateOptions, bar_id,
};
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DemoInput {
    rows: Vec<Vec<Cell>>,
    config: BridgeChartConfig,
    width: f64,
    height: f64,
    locale: String,
}

impl Default for DemoInput {
    fn default() -> Self {
        let rows = [("Budget", 480.0), ("Actual", 415.0)];
        Self {
            rows: rows
                .iter()
                .map(|(c, v)| vec![Cell::from(*c), Cell::from(*v)])
                .collect(),
            config: BridgeChartConfig::default(),
            width: 640.0,
            height: 480.0,
            locale: String::from("en-US"),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let input = match std::env::args().nth(1) {
        Some(path) => {
            info!(%path, "reading chart input");
            serde_json::from_str::<DemoInput>(&std::fs::read_to_string(path)?)?
        }
        None => DemoInput::default(),
    };

    let clock = Instant::now();
    let mut visual =
        BridgeVisual::new(input.config, Palette::default(), LocalSelectionService::new());
    let mut canvas = svg::SvgScene::default();
    let viewport = Size::new(input.width, input.height);

    let diffs = visual.update(UpdateOptions {
        rows: &input.rows,
        viewport,
        locale: &input.locale,
    })?;
    canvas.set_view_box(kurbo::Rect::new(0.0, 0.0, viewport.width, viewport.height));
    canvas.apply_diffs(&diffs);
    write(Path::new("bridgeviz_demo.svg"), &canvas)?;

    let Some(first) = visual.view_model().data_points.first() else {
        return Ok(());
    };
    let target = visual
        .scene()
        .get(bar_id(first.key))
        .and_then(|m| m.bounds());
    let Some(target) = target else {
        warn!("first bar has no bounds, skipping selection");
        return Ok(());
    };

    match visual.click(target.center(), clock.elapsed()) {
        ClickOutcome::Consumed(request) => info!(request = request.0, "bar clicked"),
        ClickOutcome::Propagate => {
            info!("selection disabled, nothing to emphasize");
            return Ok(());
        }
    }
    if let Some(ack) = visual.service_mut().acknowledge_next() {
        let diffs = visual.acknowledge(ack, clock.elapsed());
        info!(changed = diffs.len(), "selection applied");
        canvas.apply_diffs(&diffs);
    }
    write(Path::new("bridgeviz_demo_selected.svg"), &canvas)?;
    Ok(())
}

fn write(path: &Path, canvas: &svg::SvgScene) -> std::io::Result<()> {
    std::fs::write(path, canvas.to_svg_string())?;
    info!(path = %path.display(), marks = canvas.len(), "wrote svg");
    Ok(())
}
