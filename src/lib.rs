mod api;
mod config;
mod core;
mod shared;

use tauri::{
    menu::{Menu, MenuItem},
    tray::{TrayIconBuilder, TrayIconEvent},
    Manager, WebviewUrl, WebviewWindowBuilder,
};
use tauri_plugin_global_shortcut::{GlobalShortcutExt, Shortcut, ShortcutState};

use crate::api::commands;
use crate::api::commands::reorder::ReorderState;
use crate::api::commands::timer::TimerState;
use crate::core::clipboard::ClipboardMonitor;
use crate::core::store::{persist, HostMirror, ListStore};
use crate::shared::emit::emit_event;
use crate::shared::events::AppEvent;
use crate::shared::settings::AppSettings;
use crate::shared::types::{ClipboardEntry, LinkEntry, TaskEntry};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_store::Builder::default().build())
        .plugin(tauri_plugin_global_shortcut::Builder::new().build())
        .plugin(tauri_plugin_clipboard_manager::init())
        .setup(|app| {
            // Load settings
            let settings = AppSettings::load().unwrap_or_else(|e| {
                eprintln!("Failed to load settings: {}", e);
                AppSettings::default()
            });

            // One store per list kind, all sharing the snapshot database.
            // The mirrors start empty; load() prefers the persisted copy.
            let snapshots = persist::open_default();
            let clipboard_store =
                ListStore::new(HostMirror::<ClipboardEntry>::new(), snapshots.clone());
            let link_store = ListStore::new(HostMirror::<LinkEntry>::new(), snapshots.clone());
            let task_store = ListStore::new(HostMirror::<TaskEntry>::new(), snapshots);

            tauri::async_runtime::block_on(async {
                clipboard_store.load().await;
                link_store.load().await;
                task_store.load().await;
            });

            app.manage(clipboard_store);
            app.manage(link_store);
            app.manage(task_store);
            app.manage(ReorderState::new());
            app.manage(TimerState::new());

            // Start clipboard capture
            let monitor = ClipboardMonitor::new(settings.preferences.clipboard_capture);
            app.manage(monitor.clone_arc());
            monitor.start(app.handle().clone());
            println!("✅ Clipboard capture started");

            // Tray menu
            let show_item = MenuItem::with_id(app, "show", "Show ClipDock", true, None::<&str>)?;
            let capture_item =
                MenuItem::with_id(app, "toggle_capture", "⏸ Pause Capture", true, None::<&str>)?;
            let clear_item =
                MenuItem::with_id(app, "clear_history", "Clear Clipboard History", true, None::<&str>)?;
            let settings_item = MenuItem::with_id(app, "settings", "Settings", true, None::<&str>)?;
            let separator = tauri::menu::PredefinedMenuItem::separator(app)?;
            let quit_item = MenuItem::with_id(app, "quit", "Quit", true, None::<&str>)?;

            let menu = Menu::with_items(
                app,
                &[
                    &show_item,
                    &separator,
                    &capture_item,
                    &clear_item,
                    &separator,
                    &settings_item,
                    &separator,
                    &quit_item,
                ],
            )?;

            let mut tray = TrayIconBuilder::new().menu(&menu);
            if let Some(icon) = app.default_window_icon() {
                tray = tray.icon(icon.clone());
            }
            let _tray = tray
                .on_menu_event(|app, event| match event.id().as_ref() {
                    "quit" => {
                        app.exit(0);
                    }
                    "show" => {
                        if let Err(e) = show_widget_window(app, "widget") {
                            eprintln!("Failed to show widget: {}", e);
                        }
                    }
                    "toggle_capture" => {
                        if let Some(monitor) = app.try_state::<ClipboardMonitor>() {
                            let enabled = monitor.toggle();
                            println!(
                                "Clipboard capture: {}",
                                if enabled { "enabled" } else { "disabled" }
                            );
                        }
                    }
                    "clear_history" => {
                        let app = app.clone();
                        tauri::async_runtime::spawn(async move {
                            let store = app.state::<ListStore<ClipboardEntry>>();
                            match store.clear_all().await {
                                Ok(items) => {
                                    emit_event(&app, AppEvent::ClipboardListUpdated(items));
                                    println!("Clipboard history cleared");
                                }
                                Err(e) => eprintln!("Failed to clear history: {}", e),
                            }
                        });
                    }
                    "settings" => {
                        if let Err(e) = show_widget_window(app, "settings") {
                            eprintln!("Failed to show settings: {}", e);
                        }
                    }
                    _ => {}
                })
                .on_tray_icon_event(|tray, event| {
                    if let TrayIconEvent::Click { .. } = event {
                        if let Err(e) = show_widget_window(tray.app_handle(), "widget") {
                            eprintln!("Failed to show widget from tray: {}", e);
                        }
                    }
                })
                .build(app)?;

            // Global shortcut toggles the widget window
            let shortcut_str = settings.hotkeys.toggle_widget.clone();
            match shortcut_str.parse::<Shortcut>() {
                Ok(shortcut) => {
                    // Clean slate; a failed unregister just means first run
                    let _ = app.global_shortcut().unregister(shortcut);

                    let registered = app
                        .global_shortcut()
                        .on_shortcut(shortcut, move |app, _shortcut, event| {
                            // The hotkey library fires on both press and release
                            if event.state != ShortcutState::Pressed {
                                return;
                            }
                            if let Err(e) = toggle_widget_window(app) {
                                eprintln!("[Shortcut] Failed to toggle widget: {}", e);
                            }
                        });

                    match registered {
                        Ok(_) => println!("✅ Registered global shortcut: {}", shortcut_str),
                        Err(e) => {
                            eprintln!("⚠️  Failed to register shortcut '{}': {}", shortcut_str, e);
                            eprintln!("⚠️  App will continue; use the tray menu instead.");
                        }
                    }
                }
                Err(e) => eprintln!("Failed to parse shortcut '{}': {}", shortcut_str, e),
            }

            // The floating widget itself
            show_widget_window(app.handle(), "widget")?;

            println!("✅ ClipDock initialized");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::lists::get_clipboard_items,
            commands::lists::add_clipboard_item,
            commands::lists::delete_clipboard_item,
            commands::lists::reorder_clipboard,
            commands::lists::clear_clipboard,
            commands::lists::copy_clipboard_item,
            commands::lists::get_link_items,
            commands::lists::add_link,
            commands::lists::delete_link,
            commands::lists::reorder_links,
            commands::lists::clear_links,
            commands::lists::get_task_items,
            commands::lists::add_task,
            commands::lists::update_task,
            commands::lists::delete_task,
            commands::lists::reorder_tasks,
            commands::lists::clear_tasks,
            commands::lists::toggle_clipboard_capture,
            commands::lists::get_clipboard_capture_status,
            commands::reorder::drag_begin,
            commands::reorder::drag_hover,
            commands::reorder::drag_drop,
            commands::reorder::drag_end,
            commands::timer::timer_start,
            commands::timer::timer_pause,
            commands::timer::timer_resume,
            commands::timer::timer_reset,
            commands::timer::timer_tick,
            commands::timer::timer_status,
            commands::assistant::check_grammar,
            commands::assistant::generate_image,
            commands::assistant::save_generated_image,
            commands::assistant::send_chat_message,
            commands::settings::get_settings,
            commands::settings::save_settings,
            commands::window::show_widget,
            commands::window::hide_widget,
            commands::window::set_always_on_top,
            commands::window::log_message,
        ])
        .run(tauri::generate_context!())
        .unwrap_or_else(|e| {
            eprintln!("FATAL: Failed to start ClipDock: {}", e);
            std::process::exit(1);
        });
}

/// Show one of the app windows, creating it on first use.
pub(crate) fn show_widget_window(
    app: &tauri::AppHandle,
    widget: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let window_label = format!("{}-window", widget);
    let cfg = config::get_window_config(widget);

    if let Some(window) = app.get_webview_window(&window_label) {
        window.show()?;
        window.set_focus()?;
        return Ok(());
    }

    let settings = AppSettings::load().unwrap_or_default();
    let always_on_top = cfg.always_on_top && settings.preferences.always_on_top;

    let mut builder = WebviewWindowBuilder::new(
        app,
        &window_label,
        WebviewUrl::App(format!("index.html?widget={}", widget).into()),
    )
    .title(&cfg.title)
    .inner_size(cfg.width, cfg.height)
    .resizable(cfg.resizable)
    .focused(true)
    .always_on_top(always_on_top)
    .transparent(cfg.transparent)
    .decorations(false)
    .skip_taskbar(true);

    // The widget floats near the cursor; other windows center
    if widget == "widget" {
        builder = match widget_position(app, cfg.width, cfg.height) {
            Some((x, y)) => builder.position(x, y),
            None => builder.center(),
        };
    } else {
        builder = builder.center();
    }

    builder.build()?;
    Ok(())
}

/// Toggle the main widget window from the global shortcut
fn toggle_widget_window(app: &tauri::AppHandle) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(window) = app.get_webview_window("widget-window") {
        if window.is_visible()? {
            window.hide()?;
            return Ok(());
        }
    }
    show_widget_window(app, "widget")
}

/// Cursor-relative position for the widget, clamped to the monitor the
/// cursor is on. `None` falls back to centering.
fn widget_position(app: &tauri::AppHandle, width: f64, height: f64) -> Option<(f64, f64)> {
    use mouse_position::mouse_position::Mouse;

    let Mouse::Position { x: cursor_x, y: cursor_y } = Mouse::get_mouse_position() else {
        return None;
    };

    let monitors = app.available_monitors().ok()?;
    let monitor = monitors
        .into_iter()
        .find(|monitor| {
            let pos = monitor.position();
            let size = monitor.size();
            cursor_x >= pos.x
                && cursor_x < pos.x + size.width as i32
                && cursor_y >= pos.y
                && cursor_y < pos.y + size.height as i32
        })
        .or_else(|| app.primary_monitor().ok().flatten())?;

    let scale = monitor.scale_factor();
    let bounds = (
        monitor.position().x as f64 / scale,
        monitor.position().y as f64 / scale,
        monitor.size().width as f64 / scale,
        monitor.size().height as f64 / scale,
    );

    Some(clamp_to_bounds(
        cursor_x as f64 / scale,
        cursor_y as f64 / scale,
        bounds,
        width,
        height,
    ))
}

/// Keep a window fully inside the (x, y, width, height) screen bounds
fn clamp_to_bounds(
    mut x: f64,
    mut y: f64,
    bounds: (f64, f64, f64, f64),
    width: f64,
    height: f64,
) -> (f64, f64) {
    let (screen_x, screen_y, screen_width, screen_height) = bounds;

    if x + width > screen_x + screen_width {
        x = screen_x + screen_width - width;
    }
    if y + height > screen_y + screen_height {
        y = screen_y + screen_height - height;
    }
    if x < screen_x {
        x = screen_x;
    }
    if y < screen_y {
        y = screen_y;
    }

    (x, y)
}
