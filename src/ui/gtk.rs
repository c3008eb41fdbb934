//! GTK4 launcher window that runs on the **main thread**.
//!
//! # Widget tree
//!
//! ```text
//! window                              (optionally layer-shell)
//! └ gtk4::Overlay
//!     ├ hbox
//!     │   ├ .nav                      (previous page chevron)
//!     │   ├ gtk4::Stack               (slide left/right, drag gesture)
//!     │   │   ├ page1 ─ GtkGrid
//!     │   │   │          └ .tile ─ vbox
//!     │   │   │                     ├ .tile-icon-box.bg-* ─ .tile-icon
//!     │   │   │                     └ .tile-label
//!     │   │   └ page2 ─ …
//!     │   └ .nav                      (next page chevron)
//!     └ .scheme-bar                   (bottom-left overlay child)
//!         └ .scheme-btn × 3
//! ```
//!
//! All decisions are made by the [`LauncherShell`]; widgets only forward
//! input into it and apply the [`ViewEvent`]s it sends back.  The event
//! channel is drained synchronously right after every dispatch.

use crate::catalog::{CHEVRON_LEFT, CHEVRON_RIGHT};
use crate::config::WindowConfig;
use crate::gesture::{PageStep, Point};
use crate::layout::{apply_page, page_views, PageLayout, TileLayout, TileView};
use crate::shell::{Key, LauncherShell, PointerEvent};
use crate::theme::Scheme;
use crate::traits::{Spawner, TileSurface, ViewEvent};
use gtk4::prelude::*;
use gtk4::{gdk, glib};
use gtk4_layer_shell::LayerShell;
use log::{debug, error, info, warn};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::mpsc;
use std::time::Instant;

const NAV_MARGIN: i32 = 18;

fn page_name(index: usize) -> String {
    format!("page{}", index + 1)
}

//  Tiles

/// One tile button.
struct TileWidget {
    button: gtk4::Button,
    vbox: gtk4::Box,
    icon_box: gtk4::Box,
    text: gtk4::Label,
}

impl TileWidget {
    fn new(view: &TileView) -> Self {
        let icon = gtk4::Label::new(Some(&view.glyph));
        for class in view.icon_classes() {
            icon.add_css_class(class);
        }
        icon.set_halign(gtk4::Align::Center);
        icon.set_valign(gtk4::Align::Center);
        icon.set_vexpand(true);

        let icon_box = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
        icon_box.add_css_class("tile-icon-box");
        if !view.color_class.is_empty() {
            icon_box.add_css_class(&view.color_class);
        }
        icon_box.set_halign(gtk4::Align::Center);
        icon_box.set_valign(gtk4::Align::Center);
        icon_box.append(&icon);

        let text = gtk4::Label::new(Some(&view.label));
        text.add_css_class("tile-label");

        let vbox = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
        vbox.set_halign(gtk4::Align::Center);
        vbox.set_valign(gtk4::Align::Center);
        vbox.append(&icon_box);
        vbox.append(&text);

        let button = gtk4::Button::new();
        button.add_css_class("tile");
        button.set_has_frame(false);
        button.set_can_focus(false);
        button.set_child(Some(&vbox));

        Self {
            button,
            vbox,
            icon_box,
            text,
        }
    }
}

impl TileSurface for TileWidget {
    fn apply_layout(&self, layout: &TileLayout) {
        self.vbox.set_spacing(layout.spacing);
        self.icon_box.set_size_request(layout.box_px, layout.box_px);
        self.text.set_visible(layout.show_label);
    }
}

//  Pages

struct PageWidget {
    root: gtk4::Box,
    grid: gtk4::Grid,
    tiles: Vec<TileWidget>,
}

impl PageWidget {
    fn new(views: &[TileView]) -> Self {
        let grid = gtk4::Grid::new();
        grid.set_row_homogeneous(true);
        grid.set_column_homogeneous(true);
        grid.set_halign(gtk4::Align::Center);
        grid.set_valign(gtk4::Align::Center);
        grid.set_hexpand(true);
        grid.set_vexpand(true);

        let tiles: Vec<TileWidget> = views
            .iter()
            .map(|view| {
                let tile = TileWidget::new(view);
                grid.attach(&tile.button, view.col as i32, view.row as i32, 1, 1);
                tile
            })
            .collect();

        let root = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
        root.append(&grid);

        Self { root, grid, tiles }
    }

    fn apply(&self, layout: &PageLayout) {
        self.root.set_margin_start(layout.margin);
        self.root.set_margin_end(layout.margin);
        self.root.set_margin_top(layout.margin);
        self.root.set_margin_bottom(layout.margin);
        self.grid.set_row_spacing(layout.row_spacing.max(0) as u32);
        self.grid.set_column_spacing(layout.col_spacing.max(0) as u32);
        apply_page(layout, &self.tiles);
    }
}

//  Window

/// Every widget a [`ViewEvent`] can touch.
struct LauncherView {
    stack: gtk4::Stack,
    prev: gtk4::Button,
    next: gtk4::Button,
    scheme_buttons: Vec<(Scheme, gtk4::Button)>,
    pages: Vec<PageWidget>,
    provider: gtk4::CssProvider,
}

impl LauncherView {
    fn apply(&self, event: ViewEvent) {
        match event {
            ViewEvent::ShowPage {
                index,
                can_prev,
                can_next,
            } => {
                self.stack.set_visible_child_name(&page_name(index));
                self.prev.set_sensitive(can_prev);
                self.next.set_sensitive(can_next);
            }
            ViewEvent::Rescale(ui) => {
                let layout = PageLayout::for_scale(&ui);
                for page in &self.pages {
                    page.apply(&layout);
                }
            }
            ViewEvent::Restyle(css) => {
                debug!("restyle ({} bytes)", css.len());
                #[allow(deprecated)]
                self.provider.load_from_data(&css);
            }
            ViewEvent::SchemeChanged(active) => {
                for (scheme, button) in &self.scheme_buttons {
                    if *scheme == active {
                        button.add_css_class("active");
                    } else {
                        button.remove_css_class("active");
                    }
                }
            }
        }
    }
}

fn chrome_button(label: &str, classes: &[&str]) -> gtk4::Button {
    let button = gtk4::Button::with_label(label);
    button.set_has_frame(false);
    button.set_can_focus(false);
    for class in classes {
        button.add_css_class(class);
    }
    button
}

fn map_key(keyval: gdk::Key) -> Key {
    match keyval {
        gdk::Key::Left | gdk::Key::KP_Left => Key::Left,
        gdk::Key::Right | gdk::Key::KP_Right => Key::Right,
        gdk::Key::Page_Up | gdk::Key::KP_Page_Up => Key::PageUp,
        gdk::Key::Page_Down | gdk::Key::KP_Page_Down => Key::PageDown,
        other => other
            .to_unicode()
            .and_then(|c| c.to_digit(10))
            .map(Key::Digit)
            .unwrap_or(Key::Other),
    }
}

fn install_provider() -> gtk4::CssProvider {
    let provider = gtk4::CssProvider::new();
    if let Some(display) = gdk::Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
        info!("CSS provider registered on display");
    } else {
        warn!("no GDK display — CSS will not be applied");
    }
    provider
}

//  Public API

/// Build the launcher window and run the GLib main loop on the **current**
/// (main) thread until the window is closed.
pub fn run_main_loop<S: Spawner + 'static>(
    mut shell: LauncherShell<S>,
    config: &WindowConfig,
) -> Result<(), glib::BoolError> {
    gtk4::init()?;
    info!("GTK4 initialised on main thread");

    let provider = install_provider();

    //  Window
    let window = gtk4::Window::new();
    window.set_title(Some("SV Dashboard"));
    window.set_default_size(config.width, config.height);
    if config.layer_shell {
        window.init_layer_shell();
        window.set_layer(gtk4_layer_shell::Layer::Bottom);
        window.set_namespace("sv-dashboard");
        window.set_keyboard_mode(gtk4_layer_shell::KeyboardMode::OnDemand);
        for edge in [
            gtk4_layer_shell::Edge::Left,
            gtk4_layer_shell::Edge::Right,
            gtk4_layer_shell::Edge::Top,
            gtk4_layer_shell::Edge::Bottom,
        ] {
            window.set_anchor(edge, true);
        }
        info!("running as layer-shell surface");
    } else if config.fullscreen {
        window.fullscreen();
    }

    //  Pages
    let stack = gtk4::Stack::new();
    stack.set_transition_type(gtk4::StackTransitionType::SlideLeftRight);
    stack.set_transition_duration(config.transition_ms);
    stack.set_hexpand(true);
    stack.set_vexpand(true);

    let pages: Vec<PageWidget> = shell
        .catalog()
        .pages()
        .iter()
        .enumerate()
        .map(|(i, specs)| {
            let page = PageWidget::new(&page_views(specs));
            stack.add_named(&page.root, Some(&page_name(i)));
            page
        })
        .collect();

    //  Chrome
    let prev = chrome_button(&CHEVRON_LEFT.to_string(), &["nav"]);
    let next = chrome_button(&CHEVRON_RIGHT.to_string(), &["nav"]);
    prev.set_margin_start(NAV_MARGIN);
    prev.set_margin_end(NAV_MARGIN);
    next.set_margin_start(NAV_MARGIN);
    next.set_margin_end(NAV_MARGIN);

    let hbox = gtk4::Box::new(gtk4::Orientation::Horizontal, 10);
    hbox.append(&prev);
    hbox.append(&stack);
    hbox.append(&next);

    let scheme_bar = gtk4::Box::new(gtk4::Orientation::Horizontal, 10);
    scheme_bar.add_css_class("scheme-bar");
    scheme_bar.set_halign(gtk4::Align::Start);
    scheme_bar.set_valign(gtk4::Align::End);
    scheme_bar.set_margin_start(22);
    scheme_bar.set_margin_bottom(18);
    let scheme_buttons: Vec<(Scheme, gtk4::Button)> = Scheme::ALL
        .iter()
        .map(|&scheme| {
            let button = chrome_button(scheme.symbol(), &["scheme-btn", scheme.css_class()]);
            scheme_bar.append(&button);
            (scheme, button)
        })
        .collect();

    let overlay = gtk4::Overlay::new();
    overlay.set_child(Some(&hbox));
    overlay.add_overlay(&scheme_bar);
    window.set_child(Some(&overlay));

    //  Shell <-> view wiring
    let view = Rc::new(LauncherView {
        stack: stack.clone(),
        prev: prev.clone(),
        next: next.clone(),
        scheme_buttons,
        pages,
        provider,
    });

    let (view_tx, view_rx) = mpsc::channel::<ViewEvent>();
    shell.set_view(view_tx);
    let shell = Rc::new(RefCell::new(shell));

    let pump: Rc<dyn Fn()> = {
        let view = view.clone();
        Rc::new(move || {
            while let Ok(event) = view_rx.try_recv() {
                view.apply(event);
            }
        })
    };

    //  Tile clicks
    for (page_index, page) in view.pages.iter().enumerate() {
        for (tile_index, tile) in page.tiles.iter().enumerate() {
            let shell = shell.clone();
            let pump = pump.clone();
            tile.button.connect_clicked(move |_| {
                let result = shell.borrow_mut().activate_tile(page_index, tile_index);
                if let Err(e) = result {
                    error!("tile error: {}", e);
                }
                pump();
            });
        }
    }

    //  Nav + scheme buttons
    for (button, step) in [(&prev, PageStep::Previous), (&next, PageStep::Next)] {
        let shell = shell.clone();
        let pump = pump.clone();
        button.connect_clicked(move |_| {
            shell.borrow_mut().go(step);
            pump();
        });
    }
    for (scheme, button) in &view.scheme_buttons {
        let scheme = *scheme;
        let shell = shell.clone();
        let pump = pump.clone();
        button.connect_clicked(move |_| {
            shell.borrow_mut().set_scheme(scheme);
            pump();
        });
    }

    //  Keyboard
    let keys = gtk4::EventControllerKey::new();
    {
        let shell = shell.clone();
        let pump = pump.clone();
        keys.connect_key_pressed(move |_, keyval, _, _| {
            let handled = shell.borrow_mut().handle_key(map_key(keyval));
            pump();
            if handled.is_consumed() {
                glib::Propagation::Stop
            } else {
                glib::Propagation::Proceed
            }
        });
    }
    window.add_controller(keys);

    //  Swipe
    let drag = gtk4::GestureDrag::new();
    drag.set_propagation_phase(gtk4::PropagationPhase::Capture);
    {
        let shell = shell.clone();
        drag.connect_drag_begin(move |_, x, y| {
            shell.borrow_mut().handle_pointer(PointerEvent::Press {
                at: Point::new(x, y),
                time: Instant::now(),
            });
        });
    }
    {
        let shell = shell.clone();
        drag.connect_drag_update(move |gesture, dx, dy| {
            let Some((x0, y0)) = gesture.start_point() else {
                return;
            };
            let handled = shell.borrow_mut().handle_pointer(PointerEvent::Motion {
                at: Point::new(x0 + dx, y0 + dy),
            });
            if handled.is_consumed() {
                // Denies the tile's own click gesture.
                gesture.set_state(gtk4::EventSequenceState::Claimed);
            }
        });
    }
    {
        let shell = shell.clone();
        let pump = pump.clone();
        drag.connect_drag_end(move |gesture, dx, dy| {
            if let Some((x0, y0)) = gesture.start_point() {
                let handled = shell.borrow_mut().handle_pointer(PointerEvent::Release {
                    at: Point::new(x0 + dx, y0 + dy),
                    time: Instant::now(),
                });
                if handled.is_consumed() {
                    gesture.set_state(gtk4::EventSequenceState::Claimed);
                }
            }
            pump();
        });
    }
    {
        let shell = shell.clone();
        drag.connect_cancel(move |_, _| {
            shell.borrow_mut().handle_pointer(PointerEvent::Cancel);
        });
    }
    stack.add_controller(drag);

    //  Resize
    {
        let shell = shell.clone();
        let pump = pump.clone();
        let last = Cell::new((0, 0));
        overlay.add_tick_callback(move |widget, _| {
            let size = (widget.width(), widget.height());
            if size != last.get() && size.0 > 0 && size.1 > 0 {
                last.set(size);
                shell
                    .borrow_mut()
                    .handle_resize(f64::from(size.0), f64::from(size.1));
                pump();
            }
            glib::ControlFlow::Continue
        });
    }

    //  Initial state + present
    shell.borrow().sync_view();
    pump();

    let main_loop = glib::MainLoop::new(None, false);
    {
        let main_loop = main_loop.clone();
        window.connect_close_request(move |_| {
            info!("window closed");
            main_loop.quit();
            glib::Propagation::Proceed
        });
    }
    window.present();

    info!("entering GLib main loop");
    main_loop.run();
    info!("GLib main loop exited");
    Ok(())
}
