pub mod action;
pub mod state;
pub mod view;

use crate::client::CatalogClient;
use crate::config;

use action::{Action, AppEvent};
use state::{AppState, Focus, Screen, Tab};
use view::draw;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{env, io, time::Duration};
use tokio::sync::mpsc;

pub async fn run() -> Result<()> {
    // --- 1. PREAMBLE & CONFIG ---
    let args: Vec<String> = env::args().collect();
    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        println!("Maqui - Terminal Makeup Catalog");
        println!("----------------------------------------");
        println!("Usage: maqui [OPTIONS]");
        println!();
        if let Ok(path) = config::Config::get_path_string() {
            println!("Configuration File: {}", path);
        } else {
            println!("Configuration Path: ~/.config/maqui/config.toml (Standard XDG)");
        }
        println!();
        println!("Config Options:");
        println!("  endpoint = \"https://...\"   (catalog URL)");
        println!("  brand = \"maybelline\"       (Optional filter)");
        println!("  allow_insecure_certs = false");
        return Ok(());
    }

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        use std::io::Write;
        if let Ok(mut file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("maqui_panic.log")
        {
            let _ = writeln!(file, "PANIC: {:?}", info);
        }
        default_hook(info);
    }));

    let cfg = config::Config::load_or_default();
    let endpoint = cfg.endpoint.clone();
    let brand = cfg.brand.clone();
    let allow_insecure = cfg.allow_insecure_certs;

    // --- 2. TERMINAL SETUP ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // --- 3. STATE INIT ---
    let mut app_state = AppState::new();

    let (action_tx, mut action_rx) = mpsc::channel(10);
    let (event_tx, mut event_rx) = mpsc::channel(10);

    // --- NETWORK TASK ---
    let first_seq = app_state.mount_seq;
    tokio::spawn(async move {
        let client = match CatalogClient::new(&endpoint, allow_insecure) {
            Ok(c) => c,
            Err(_) => {
                // The catalog screen only knows "loading" and "loaded"; a
                // broken endpoint config lands as a loaded, empty catalog.
                let _ = event_tx
                    .send(AppEvent::CatalogLoaded {
                        seq: first_seq,
                        products: vec![],
                    })
                    .await;
                return;
            }
        };

        // A. One fetch for the initial mount.
        let products = client.load_catalog(brand.as_deref()).await;
        let _ = event_tx
            .send(AppEvent::CatalogLoaded {
                seq: first_seq,
                products,
            })
            .await;

        // B. One fetch per remount request, nothing else.
        while let Some(action) = action_rx.recv().await {
            match action {
                Action::FetchCatalog { seq } => {
                    let products = client.load_catalog(brand.as_deref()).await;
                    let _ = event_tx
                        .send(AppEvent::CatalogLoaded { seq, products })
                        .await;
                }
                Action::Quit => break,
            }
        }
    });

    // --- 4. UI LOOP ---
    loop {
        terminal.draw(|f| draw(f, &mut app_state))?;

        // A. Network Events
        if let Ok(event) = event_rx.try_recv() {
            match event {
                AppEvent::CatalogLoaded { seq, products } => {
                    // Drops completions whose screen has been torn down.
                    app_state.apply_catalog(seq, products);
                }
            }
        }

        // B. User Input
        if crossterm::event::poll(Duration::from_millis(50))? {
            let event = event::read()?;
            match event {
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => app_state.next(),
                    MouseEventKind::ScrollUp => app_state.previous(),
                    _ => {}
                },
                Event::Key(key) => match key.code {
                    KeyCode::Char('q') => {
                        let _ = action_tx.send(Action::Quit).await;
                        break;
                    }
                    KeyCode::Tab => app_state.toggle_focus(),

                    KeyCode::Down | KeyCode::Char('j') => app_state.next(),
                    KeyCode::Up | KeyCode::Char('k') => app_state.previous(),
                    KeyCode::PageDown => app_state.jump_forward(10),
                    KeyCode::PageUp => app_state.jump_backward(10),

                    KeyCode::Char('1') => {
                        if app_state.screen == Screen::Tabs {
                            app_state.tab = Tab::Home;
                        }
                    }
                    KeyCode::Char('2') => {
                        if app_state.screen == Screen::Tabs {
                            app_state.tab = Tab::Feed;
                        }
                    }

                    KeyCode::Esc | KeyCode::Backspace => {
                        // Stack pop; a no-op outside the detail screen.
                        app_state.close_detail();
                    }

                    KeyCode::Enter => match app_state.active_focus {
                        Focus::Drawer => match app_state.drawer_state.selected() {
                            Some(0) => {
                                // Re-mounting the catalog costs exactly one
                                // fetch; selecting it while mounted is a no-op.
                                if let Some(seq) = app_state.open_catalog() {
                                    app_state.active_focus = Focus::Main;
                                    let _ = action_tx.send(Action::FetchCatalog { seq }).await;
                                }
                            }
                            Some(1) => {
                                app_state.open_about();
                                app_state.active_focus = Focus::Main;
                            }
                            _ => {}
                        },
                        Focus::Main => {
                            if app_state.screen == Screen::Tabs && app_state.tab == Tab::Home {
                                app_state.open_detail();
                            }
                        }
                    },

                    _ => {}
                },
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
