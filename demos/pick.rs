//! kraken-pick: choose from a list in the terminal and print the choice.
//!
//! Browses with the select list by default; `--complete` filters as you
//! type. Chosen values go to stdout, one per line. Ctrl+C exits with 130.

use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kraken_input::types::COLOR_BLUE;
use kraken_input::{
    render_autocomplete, write_lines, AutoComplete, AutoCompleteOptions, CellAttrs,
    CrosstermSource, InputEvent, Item, Line, ListController, ListRenderer, Mount, SelectOptions,
    SessionRegistry, Spinner, SpinnerKind, StyledSpan, Widget,
};

const FRAME_POLL: Duration = Duration::from_millis(80);

#[derive(Parser)]
#[command(name = "kraken-pick")]
#[command(about = "Pick items from a list in the terminal")]
#[command(version)]
struct Args {
    /// Items to choose from
    #[arg(required = true)]
    items: Vec<String>,

    /// Widget options as JSON, e.g. '{"limit": 4, "multi": true}'
    #[arg(long)]
    options: Option<String>,

    /// Filter as you type instead of browsing
    #[arg(long)]
    complete: bool,

    /// Prompt shown before the filter input
    #[arg(long, default_value = "")]
    prompt: String,

    /// Write logs to this file (the terminal is in raw mode)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "debug")]
    log_level: String,
}

fn setup_logging(path: &Path, level: &str) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);
    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
    Ok(())
}

/// Passes everything through, except that Ctrl+C ends the run.
struct Interruptible<W> {
    inner: W,
    interrupted: bool,
}

impl<W: Widget> Widget for Interruptible<W> {
    fn handle_event(&mut self, event: &InputEvent) -> bool {
        if *event == InputEvent::Interrupt {
            tracing::info!("interrupted");
            self.interrupted = true;
            return true;
        }
        self.inner.handle_event(event)
    }

    fn set_focus(&mut self, focus: bool) {
        self.inner.set_focus(focus);
    }
}

type Choice = Rc<RefCell<Option<Vec<String>>>>;

/// Drive `widget` until a choice lands in `done` or the user interrupts.
/// Every frame is padded to `height` rows so shorter frames erase longer ones.
fn run<W: Widget>(
    widget: W,
    done: &Choice,
    height: usize,
    render: impl Fn(&W) -> Vec<Line>,
) -> kraken_input::Result<bool> {
    let mut mount = Mount::new(
        SessionRegistry::global(),
        Box::new(CrosstermSource::new()),
        Interruptible {
            inner: widget,
            interrupted: false,
        },
    )?;
    let mut spinner = Spinner::new(SpinnerKind::Dots);
    let mut out = io::stdout();

    loop {
        spinner.tick(Instant::now());
        let mut lines = vec![vec![
            StyledSpan::colored(format!("{} ", spinner.frame()), COLOR_BLUE),
            StyledSpan::plain("enter to choose, ctrl+c to quit").with_attrs(CellAttrs::DIM),
        ]];
        lines.extend(render(&mount.widget().inner));
        lines.resize(height, Line::new());
        write_lines(&mut out, &lines)?;

        if done.borrow().is_some() || mount.widget().interrupted {
            break;
        }
        mount.pump(FRAME_POLL)?;
    }

    mount.unmount();
    for _ in 0..height {
        writeln!(out)?;
    }
    Ok(!mount.widget().interrupted)
}

/// A list that stores its outcome in `done`. In multi mode only Enter ends
/// the pick; Space toggles without finishing.
fn choice_list(
    items: Rc<[Item<String>]>,
    options: SelectOptions<String>,
    done: &Choice,
) -> kraken_input::Result<ListController<String>> {
    let multi = options.multi;
    let submitted = done.clone();
    let mut list = ListController::new(items, options)?.on_submit(move |chosen| {
        *submitted.borrow_mut() = Some(chosen.iter().map(|i| i.value.clone()).collect());
    });
    if !multi {
        let selected = done.clone();
        list = list.on_select(move |item| *selected.borrow_mut() = Some(vec![item.value.clone()]));
    }
    Ok(list)
}

fn pick(args: &Args) -> kraken_input::Result<Option<Vec<String>>> {
    let items: Rc<[Item<String>]> = args
        .items
        .iter()
        .map(|s| Item::new(s.clone(), s.clone()))
        .collect::<Vec<_>>()
        .into();
    let width = crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(80);
    let done: Choice = Rc::default();

    let completed = if args.complete {
        let mut options = match &args.options {
            Some(json) => AutoCompleteOptions::from_json(json)?,
            None => AutoCompleteOptions::default(),
        };
        if !args.prompt.is_empty() {
            options.prompt = args.prompt.clone();
        }
        let height = 2 + options.limit.min(items.len());
        let slot = done.clone();
        let ac = AutoComplete::new(items, options)?
            .on_submit(move |item| *slot.borrow_mut() = Some(vec![item.value.clone()]));
        let renderer = ListRenderer::new().with_max_width(width);
        run(ac, &done, height, |ac| render_autocomplete(ac, &renderer))?
    } else {
        let options: SelectOptions<String> = match &args.options {
            Some(json) => SelectOptions::from_json(json)?,
            None => SelectOptions::default(),
        };
        let height = 1 + options.limit.min(items.len());
        let list = choice_list(items, options, &done)?;
        let renderer = ListRenderer::new().with_max_width(width);
        run(list, &done, height, |list| renderer.render(list))?
    };

    let choice = done.borrow_mut().take();
    Ok(if completed { choice } else { None })
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(path) = &args.log {
        if let Err(e) = setup_logging(path, &args.log_level) {
            eprintln!("kraken-pick: cannot open log file {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    }

    match pick(&args) {
        Ok(Some(values)) => {
            for value in values {
                println!("{value}");
            }
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::from(130),
        Err(e) => {
            eprintln!("kraken-pick: {e}");
            ExitCode::FAILURE
        }
    }
}
