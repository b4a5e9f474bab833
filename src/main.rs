//! schema-table - a schema-driven data table in the terminal
//!
//! Opens a resource file (schema, table schema, items) and shows it as a
//! paginated table with new/edit/destroy dialogs.

mod action;
mod app;
mod component;
mod components;
mod config;
mod handler;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::{builtin_renderers, App};
use crate::component::Component;
use crate::config::Config;
use crate::services::MemoryStore;
use crate::tui::Tui;
use anyhow::{Context, Result};
use crossterm::event::Event;

fn main() -> Result<()> {
    let loaded = Config::load();
    let config = loaded.as_ref().ok().cloned().flatten().unwrap_or_default();
    let _log_guard = logging::init_tracing(&config.log_dir())?;

    match loaded {
        Ok(Some(_)) => {}
        Ok(None) => match config.save() {
            Ok(()) => tracing::info!("wrote default config"),
            Err(err) => tracing::debug!(error = %err, "could not write default config"),
        },
        Err(err) => tracing::warn!(error = ?err, "ignoring config, using defaults"),
    }

    let Some(resource_path) = config.resource_path(std::env::args().nth(1)) else {
        eprintln!("Usage: schema-table <resource.json|resource.yaml>");
        eprintln!(
            "Or set \"resource_path\" in {}",
            Config::config_dir()
                .map(|dir| dir.join("config.json").display().to_string())
                .unwrap_or_else(|| "~/.schema-table/config.json".to_string())
        );
        std::process::exit(2);
    };

    let store = MemoryStore::open(&resource_path, config.per_page)
        .with_context(|| format!("Failed to open {}", resource_path.display()))?;
    let mut app = App::new(store, builtin_renderers());

    tracing::info!(path = %resource_path.display(), "starting");

    let mut tui = Tui::new()?;
    tui.enter()?;

    let result = run_app(&mut tui, &mut app);

    tui.exit()?;

    if let Err(err) = result {
        tracing::error!(error = ?err, "exited with error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    tracing::info!("bye");
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!(error = %e, "draw failed");
            }
        })?;

        let action = match tui.next_event()? {
            Some(Event::Key(key)) => app.handle_key_event(key)?,
            Some(Event::Resize(w, h)) => Some(Action::Resize(w, h)),
            Some(_) => None,
            None => Some(Action::Tick),
        };

        // An action may produce a follow-up action
        let mut current = action;
        while let Some(a) = current {
            current = app.update(a)?;
        }
    }

    Ok(())
}
