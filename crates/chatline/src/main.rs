//! A terminal chat client for a `/chat` backend.

#[macro_use]
extern crate tracing;

use std::io::Write as _;
use std::pin::pin;
use std::time::Duration;

use chatline::Session;
use chatline::config::Config;
use chatline::input::is_quit_command;
use chatline::render::{self, Printer};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufReadExt};
use tokio::select;
use tokio::time::sleep;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(err) = dotenvy::dotenv() {
        debug!("no .env file loaded: {err}");
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };
    info!("using backend at {}", config.api_url());

    let mut session = Session::from_config(&config);
    let mut printer = Printer::default();

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    println!("{}", render::header(true));
    println!("{}", render::transcript(&session.controller().view(), true));
    println!("{}", render::PLACEHOLDER.dimmed());

    let mut stdin = io::BufReader::new(io::stdin());

    loop {
        print!("{}", if session.is_composing() { ". " } else { "> " });
        std::io::stdout().flush().ok();

        let Some(line) = read_line(&mut stdin).await else {
            break;
        };
        if !session.is_composing() && is_quit_command(&line) {
            break;
        }
        if !session.push_line(&line) {
            continue;
        }

        let controller = session.controller().clone();
        let mut view_rx = controller.subscribe();
        let mut send = pin!(session.send());
        let mut progress_bar: Option<ProgressBar> = None;

        loop {
            let tick = sleep(Duration::from_millis(100));
            select! {
                _ = &mut send => {
                    break;
                }
                changed = view_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let view = view_rx.borrow_and_update().clone();
                    print_new(&mut printer, &view, progress_bar.as_ref());
                }
                _ = tick => {
                    progress_bar
                        .get_or_insert_with(|| {
                            let progress_bar = ProgressBar::new_spinner();
                            progress_bar.set_style(progress_style.clone());
                            progress_bar.set_message(render::COMPOSING);
                            progress_bar
                        })
                        .inc(1);
                }
            }
        }

        // Finish the progress bar before printing anything else.
        if let Some(progress_bar) = progress_bar.take() {
            progress_bar.finish_and_clear();
        }
        print_new(&mut printer, &controller.view(), None);
    }
}

fn print_new(
    printer: &mut Printer,
    view: &chatline::core::ConversationView,
    progress_bar: Option<&ProgressBar>,
) {
    let new = printer.take_new(view);
    if new.is_empty() {
        return;
    }
    let text: String =
        new.iter().map(|msg| render::message(msg, true)).collect();
    match progress_bar {
        Some(progress_bar) => progress_bar.suspend(|| println!("{text}")),
        None => println!("{text}"),
    }
}

async fn read_line<R>(stdin: &mut R) -> Option<String>
where
    R: AsyncBufReadExt + Unpin,
{
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
