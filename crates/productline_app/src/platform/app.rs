use std::io::BufRead;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use chrono::Utc;
use productline_core::{update, AppState, Msg, StoreAction};
use productline_engine::{EngineHandle, ReqwestJobsClient};
use productline_logging::{set_dispatch_seq, sync_debug, sync_info, sync_warn};

use super::config::{self, AppConfig, CONFIG_FILENAME};
use super::console::{self, ConsoleCommand};
use super::effects::{ConsoleMapSink, EffectRunner, NotificationSink};
use super::logging;
use super::render;

pub fn run_app() -> anyhow::Result<()> {
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let (app_config, warning) = config::load_config(&config_path);
    logging::initialize(app_config.log_destination, app_config.log_level());
    config::report(&config_path, warning.as_deref());

    let client = ReqwestJobsClient::new(&app_config.client_settings())
        .context("invalid jobs service settings")?;
    let engine = EngineHandle::new(Arc::new(client)).context("starting engine runtime")?;
    let runner = EffectRunner::new(engine, ConsoleMapSink);

    let (input_tx, input_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if input_tx.send(line).is_err() {
                break;
            }
        }
    });

    println!("{}", console::HELP);
    let mut app = AppLoop::new(runner);
    app.dispatch(Msg::LoadProductLines);
    app.run(&input_rx, &app_config);
    sync_info!("console closed");
    Ok(())
}

/// Owns the state and applies every message on this thread, one at a time.
struct AppLoop<S: NotificationSink> {
    state: AppState,
    runner: EffectRunner<S>,
    seq: u64,
}

impl<S: NotificationSink> AppLoop<S> {
    fn new(runner: EffectRunner<S>) -> Self {
        Self {
            state: AppState::new(),
            runner,
            seq: 0,
        }
    }

    fn run(&mut self, input_rx: &mpsc::Receiver<String>, app_config: &AppConfig) {
        loop {
            for msg in self.runner.poll_events() {
                self.dispatch(msg);
            }
            self.dispatch(Msg::Tick);
            self.render_if_dirty();

            match input_rx.recv_timeout(app_config.render_interval()) {
                Ok(line) => {
                    if !self.handle_line(&line) {
                        self.runner.engine().shutdown();
                        return;
                    }
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    self.runner.engine().shutdown();
                    return;
                }
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        self.seq += 1;
        set_dispatch_seq(self.seq);
        match &msg {
            Msg::Tick => {}
            Msg::Store(StoreAction::Route {
                product_line_id,
                action,
            }) => sync_debug!("route {} to {}", action.name(), product_line_id),
            other => sync_debug!("dispatch {:?}", other),
        }
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }

    fn render_if_dirty(&mut self) {
        if self.state.consume_dirty() {
            self.render();
        }
    }

    fn render(&self) {
        for line in render::render(&self.state.view(Utc::now())) {
            println!("{line}");
        }
    }

    /// Returns `false` when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> bool {
        let command = match console::parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return true,
            Err(err) => {
                println!("{err}");
                return true;
            }
        };

        match command {
            ConsoleCommand::Quit => return false,
            ConsoleCommand::Help => println!("{}", console::HELP),
            ConsoleCommand::Show => self.render(),
            ConsoleCommand::Load => self.dispatch(Msg::LoadProductLines),
            ConsoleCommand::Import { line, job } => {
                sync_info!("import requested product_line={} job={}", line, job);
                self.runner.engine().import_job(line, job);
            }
            panel_command => match console::panel_msg(&self.state, &panel_command, Utc::now()) {
                Ok(msg) => self.dispatch(msg),
                Err(err) => {
                    sync_warn!("rejected console command: {}", err);
                    println!("{err}");
                }
            },
        }
        true
    }
}
