//! Line-oriented commands standing in for panel clicks.

use anyhow::{anyhow, bail, Context};
use productline_core::{since_date_options, AppState, JobRecord, Msg, PanelMsg, Timestamp};

pub(crate) const HELP: &str = "\
commands:
  load                          reload product lines
  show                          render all panels
  toggle <line>                 expand or collapse a panel
  since <line> <24h|7d|30d|all> change the date window
  click <line> <job>            select or deselect a job row
  hover <line> <job>            hover a job row
  unhover <line> <job>          leave a job row
  pan <line>                    pan the map to a product line
  import <line> <job>           import a job discovered out-of-band
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Window {
    Last24Hours,
    Last7Days,
    Last30Days,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConsoleCommand {
    Load,
    Show,
    Help,
    Quit,
    Toggle { line: String },
    Since { line: String, window: Window },
    Click { line: String, job: String },
    Hover { line: String, job: String },
    Unhover { line: String, job: String },
    Pan { line: String },
    Import { line: String, job: String },
}

/// Parses one input line. Blank lines yield `None`.
pub(crate) fn parse_command(raw: &str) -> anyhow::Result<Option<ConsoleCommand>> {
    let mut words = raw.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let mut arg = |name: &str| -> anyhow::Result<String> {
        words
            .next()
            .map(ToOwned::to_owned)
            .with_context(|| format!("`{verb}` needs a <{name}> argument"))
    };

    let command = match verb {
        "load" => ConsoleCommand::Load,
        "show" => ConsoleCommand::Show,
        "help" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        "toggle" => ConsoleCommand::Toggle { line: arg("line")? },
        "since" => {
            let line = arg("line")?;
            let window = match arg("window")?.as_str() {
                "24h" => Window::Last24Hours,
                "7d" => Window::Last7Days,
                "30d" => Window::Last30Days,
                "all" => Window::All,
                other => bail!("unknown window `{other}`"),
            };
            ConsoleCommand::Since { line, window }
        }
        "click" => ConsoleCommand::Click {
            line: arg("line")?,
            job: arg("job")?,
        },
        "hover" => ConsoleCommand::Hover {
            line: arg("line")?,
            job: arg("job")?,
        },
        "unhover" => ConsoleCommand::Unhover {
            line: arg("line")?,
            job: arg("job")?,
        },
        "pan" => ConsoleCommand::Pan { line: arg("line")? },
        "import" => ConsoleCommand::Import {
            line: arg("line")?,
            job: arg("job")?,
        },
        other => bail!("unknown command `{other}`"),
    };
    Ok(Some(command))
}

/// Translates a panel command into a message against the current state.
/// Job arguments must name a row the panel currently shows.
pub(crate) fn panel_msg(
    state: &AppState,
    command: &ConsoleCommand,
    now: Timestamp,
) -> anyhow::Result<Msg> {
    let (line, msg) = match command {
        ConsoleCommand::Toggle { line } => (line, PanelMsg::ToggleExpansion),
        ConsoleCommand::Pan { line } => (line, PanelMsg::PanToRequested),
        ConsoleCommand::Since { line, window } => {
            let panel = state
                .panel(line)
                .ok_or_else(|| anyhow!("unknown product line `{line}`"))?;
            let options = since_date_options(panel.product_line(), now);
            let index = match window {
                Window::Last24Hours => 0,
                Window::Last7Days => 1,
                Window::Last30Days => 2,
                Window::All => 3,
            };
            (line, PanelMsg::SinceDateChanged(options[index].value))
        }
        ConsoleCommand::Click { line, job } => {
            (line, PanelMsg::RowClicked(find_job(state, line, job)?))
        }
        ConsoleCommand::Hover { line, job } => {
            (line, PanelMsg::HoverIn(find_job(state, line, job)?))
        }
        ConsoleCommand::Unhover { line, job } => {
            (line, PanelMsg::HoverOut(find_job(state, line, job)?))
        }
        other => bail!("{other:?} is not a panel command"),
    };

    if state.panel(line).is_none() {
        bail!("unknown product line `{line}`");
    }
    Ok(Msg::Panel {
        product_line_id: line.clone(),
        msg,
    })
}

fn find_job(state: &AppState, line: &str, job: &str) -> anyhow::Result<JobRecord> {
    let panel = state
        .panel(line)
        .ok_or_else(|| anyhow!("unknown product line `{line}`"))?;
    panel
        .visible_jobs()
        .find(|record| record.id() == job)
        .cloned()
        .ok_or_else(|| anyhow!("product line `{line}` has no job `{job}`"))
}
