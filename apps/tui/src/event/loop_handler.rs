use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use lions_essays::content::exports::{self, share_percent};
use lions_essays::content::heritage::SITES;
use lions_essays::content::rugs::RUGS;
use lions_essays::content::Essay;
use lions_essays::domain::{Category, Region};
use lions_essays::export::build_export;
use lions_essays::filter::FilterState;
use lions_essays::geometry::{layout_arcs, ArcLayoutConfig};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;
use tracing::{debug, info};

use crate::app::{handle_input, handle_mouse, App};
use crate::ui;

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Prints every essay without a terminal UI.
pub fn run_headless(json: bool) -> Result<()> {
    if json {
        let export = build_export()?;
        println!("{}", serde_json::to_string_pretty(&export)?);
    } else {
        render_headless_summary()?;
    }
    Ok(())
}

fn render_headless_summary() -> Result<()> {
    println!("\nDancing with Lions");
    println!("==================");

    for essay in Essay::ALL {
        println!("\n{} ({})", essay.label(), essay.as_str());
        match essay {
            Essay::Heritage => print_heritage_summary(),
            Essay::Exports => print_exports_summary()?,
            Essay::Rugs => print_rugs_summary(),
        }
    }

    Ok(())
}

fn print_heritage_summary() {
    let mut filter = FilterState::new();
    println!("Sites: {}", SITES.len());

    println!("\nSites by region:");
    for region in Region::ALL {
        filter.toggle_region(region);
        println!("- {}: {}", region.label(), filter.visible_indices(SITES).len());
        filter.toggle_region(region);
    }

    println!("\nSites by category:");
    for category in Category::ALL {
        filter.toggle_category(category);
        println!("- {}: {}", category.label(), filter.visible_indices(SITES).len());
        filter.toggle_category(category);
    }
}

fn print_exports_summary() -> Result<()> {
    let segments = exports::segments();
    let arcs = layout_arcs(&segments, &ArcLayoutConfig::default())?;
    println!("{} ({})", exports::TITLE, exports::UNIT);
    for (index, arc) in arcs.iter().enumerate() {
        println!(
            "- {} | {:.0} | {:.1}% | sweep {:.3} rad | reach {:.1}",
            arc.label,
            arc.value,
            share_percent(&segments, index).unwrap_or_default(),
            arc.sweep(),
            arc.outer_radius
        );
    }
    Ok(())
}

fn print_rugs_summary() {
    for rug in RUGS {
        println!(
            "- {} | {} | {} knots/dm²",
            rug.name,
            rug.region.label(),
            rug.knot_density
        );
    }
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    info!(essay = app.essay.as_str(), "entering event loop");

    loop {
        let size = terminal
            .size()
            .map_err(|e| eyre!("Failed to read terminal size: {e}"))?;
        app.viewport_rows = ui::page_viewport_rows(Rect::new(0, 0, size.width, size.height));

        // Map loads, camera flights and reveal latches
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(eyre!("Terminal draw error: {e}"));
        }

        if matches!(event::poll(EVENT_POLL_TIMEOUT), Ok(true)) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Mouse(mouse)) => handle_mouse(app, mouse),
                Ok(Event::Resize(width, height)) => {
                    debug!(width, height, "terminal resized");
                }
                Ok(_) | Err(_) => {}
            }
        }

        // Yield so the basemap loader task can make progress.
        tokio::task::yield_now().await;
    }

    info!("event loop finished");
    Ok(())
}
