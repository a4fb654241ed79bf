//! Counter Example - host input → effect → state → prop → terminal
//!
//! Press `+` to count, `r` to reset, Ctrl+C to quit. The key handler only
//! touches a host object; the components notice through their watch on the
//! next frame.
//!
//! Run with: cargo run --example counter
//! Logs go to stderr: RUST_LOG=reactive_tick=trace cargo run --example counter 2>trace.log

use std::cell::RefCell;
use std::io::{stdout, Write};
use std::rc::Rc;

use crossterm::cursor::MoveTo;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};
use tracing_subscriber::EnvFilter;

use reactive_tick::{
    mount, run, Component, ComponentManager, ComponentTree, HostConfig, MountContext, Prop,
    RenderContext, State,
};

// =============================================================================
// Host object
// =============================================================================

/// Owned by the "scene", written by input handling.
#[derive(Default)]
struct Clicks {
    total: u32,
}

// =============================================================================
// Components
// =============================================================================

/// Mirrors the click count into its own state and hands a caption to its
/// label child.
struct App {
    clicks: Option<Rc<RefCell<Clicks>>>,
    counter: Option<State<u32>>,
}

impl Component for App {
    fn on_mount(&mut self, cx: &mut MountContext<'_>) {
        let counter = cx.use_state(0u32);

        let (source, sink) = (self.clicks.clone(), counter.clone());
        let watched = cx.use_effect(self.clicks.as_ref(), "total", |c: &Clicks| c.total, move || {
            if let Some(clicks) = &source {
                sink.set(clicks.borrow().total);
            }
        });
        if let Err(err) = watched {
            eprintln!("counter will not update: {err}");
        }

        self.counter = Some(counter);
    }

    fn render(&mut self, cx: &RenderContext<'_>) {
        let count = self.counter.as_ref().map(State::get).unwrap_or_default();
        if let Some(caption) = cx.child::<Label>(0).and_then(|label| label.caption.as_ref()) {
            caption.set(format!("Clicked {count} time(s)"));
        }
    }
}

/// Draws its caption on one terminal row.
struct Label {
    row: u16,
    caption: Option<Prop<String>>,
}

impl Component for Label {
    fn on_mount(&mut self, cx: &mut MountContext<'_>) {
        self.caption = Some(cx.use_prop(String::from("Press + to count")));
    }

    fn render(&mut self, _cx: &RenderContext<'_>) {
        let caption = self.caption.as_ref().map(Prop::get).unwrap_or_default();
        let mut out = stdout();
        let _ = queue!(out, MoveTo(0, self.row), Clear(ClearType::CurrentLine), Print(caption));
        let _ = out.flush();
    }
}

// =============================================================================
// Main
// =============================================================================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let clicks = Rc::new(RefCell::new(Clicks::default()));

    // Static wiring, done before boot.
    let mut tree = ComponentTree::new();
    let app = tree.insert(App {
        clicks: Some(clicks.clone()),
        counter: None,
    });
    let label = tree.insert(Label { row: 1, caption: None });
    tree.set_children(app, [Some(label)])?;
    tree.add_root(app)?;

    execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0), Print("+ count, r reset, Ctrl+C quit"))?;

    let mut handle = mount(ComponentManager::new(tree), HostConfig::default())?;
    run(&mut handle, |event| {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return;
            }
            match key.code {
                KeyCode::Char('+') => clicks.borrow_mut().total += 1,
                KeyCode::Char('r') => clicks.borrow_mut().total = 0,
                _ => {}
            }
        }
    })?;
    handle.unmount();

    execute!(stdout(), MoveTo(0, 3), Print("bye\r\n"))?;
    Ok(())
}
