//! Headless walk through a wallet-style navigation flow.
//!
//! Run with:
//!
//! ```text
//! RUST_LOG=horizon_nav=debug,horizon_nav_core=debug cargo run --example wallet_flow
//! ```

use std::sync::{Arc, Weak};
use std::thread;
use std::time::Duration;

use horizon_nav::prelude::*;
use horizon_nav::{LoopControl, RecordingSurface, SurfaceCall};

struct Screen {
    base: PageModalBase,
}

impl Screen {
    fn new(id: &str) -> Arc<Self> {
        Arc::new(Self {
            base: PageModalBase::new(id),
        })
    }
}

impl Page for Screen {
    fn id(&self) -> &str {
        self.base.id()
    }
    fn on_attached_to_navigator(&self, navigator: Weak<dyn PageNavigator>) {
        self.base.attach_to_page_navigator(navigator);
    }
    fn on_navigated_to(&self) {
        println!("  -> {}", self.base.id());
    }
    fn handle_user_interactions(&self) {}
    fn layout(&self, ctx: &mut LayoutContext) -> Dimensions {
        Dimensions::of(ctx.max)
    }
    fn on_navigated_from(&self) {
        println!("  <- {}", self.base.id());
    }
}

struct Notice {
    base: PageModalBase,
}

impl Modal for Notice {
    fn id(&self) -> &str {
        self.base.id()
    }
    fn on_attached_to_navigator(&self, navigator: Weak<dyn WindowNavigator>) {
        self.base.attach_to_window(navigator);
    }
    fn on_resume(&self) {
        println!("  [modal] {}", self.base.id());
    }
    fn handle(&self) {}
    fn layout(&self, ctx: &mut LayoutContext) -> Dimensions {
        Dimensions::of(ctx.max)
    }
    fn on_dismiss(&self) {
        println!("  [modal dismissed] {}", self.base.id());
    }
}

fn describe(calls: &[SurfaceCall]) -> String {
    calls
        .iter()
        .filter_map(|call| match call {
            SurfaceCall::Page(id) => Some(format!("page {id}")),
            SurfaceCall::Modal { id, layer } => Some(format!("modal {id}@{layer}")),
            SurfaceCall::Toast(message) => Some(format!("toast '{message}'")),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = AppConfig::from_toml_str(
        r#"
        title = "Wallet"
        toast_duration_ms = 1500
        "#,
    )?;

    let (app, mut event_loop) = App::builder(config)
        .on_startup(|app| {
            app.display(Screen::new("wallets"));
            Ok(())
        })
        .build()?;
    let mut surface = RecordingSurface::new();

    println!("startup");
    event_loop.run_pending(&mut surface);
    println!("  frame: {}", describe(&surface.take()));

    println!("open the DEX with nested markets");
    let dex = MasterPage::new("dex");
    app.display(dex.clone());
    dex.display(Screen::new("markets"));
    dex.display(Screen::new("order-book"));
    event_loop.run_pending(&mut surface);
    println!("  frame: {}", describe(&surface.take()));

    println!("a background sync finishes and shows a notice");
    let background = Arc::clone(&app);
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        background.show_modal(Arc::new(Notice {
            base: PageModalBase::new("sync-complete"),
        }));
        background.show_toast("Wallet synced", ToastKind::Success);
    })
    .join()
    .map_err(|_| "background thread panicked")?;
    event_loop.run_pending(&mut surface);
    println!("  frame: {}", describe(&surface.take()));

    println!("dismiss and go back");
    app.dismiss_modal("sync-complete");
    app.close_current_page();
    event_loop.run_pending(&mut surface);
    println!("  frame: {}", describe(&surface.take()));

    println!("window closed");
    app.event_sender().destroy()?;
    if event_loop.run_pending(&mut surface) == LoopControl::Exit {
        println!("  event loop stopped after {} frames", event_loop.frames_rendered());
    }
    Ok(())
}
