//! Line-oriented panel simulator
//!
//! Reads commands such as `turn selection 150` or `ok` and turns them into
//! the drag samples and button presses a host UI would deliver. The
//! display is echoed whenever it changes, including countdown updates.

use std::str::FromStr;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::knob::{Bounds, KnobId, Point};
use crate::oven::Button;
use crate::panel::{PanelHandle, PanelResult, PanelView, Reaction};
use crate::utils::error::{AppError, AppResult};

/// Largest angle covered by one synthesized drag sample
pub const MAX_STEP_DEGREES: f64 = 10.0;

/// Largest single turn accepted, ten full revolutions
pub const MAX_TURN_DEGREES: f64 = 3600.0;

/// Distance from the knob centre at which the simulated pointer grabs it
const GRAB_RADIUS: f64 = 40.0;

const KNOB_SIZE: f64 = 120.0;

pub const HELP_TEXT: &str = "\
commands:
  turn <selection|adjustment> <degrees>   rotate a knob, at most 3600 (negative = counter-clockwise)
  ok                                      confirm power / timer
  start                                   start or stop cooking
  stop                                    stop cooking
  back                                    step back one setting
  status                                  print the full panel state
  help                                    show this text
  quit                                    exit";

/// Command parse errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Unknown knob: {0} (expected selection or adjustment)")]
    InvalidKnob(String),

    #[error("Invalid degrees: {0}")]
    InvalidDegrees(String),
}

/// A parsed console command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsoleCommand {
    Turn { knob: KnobId, degrees: f64 },
    Press(Button),
    Status,
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Err(ParseError::Empty);
        };

        match command.to_ascii_lowercase().as_str() {
            "turn" | "t" => {
                let knob = words.next().ok_or(ParseError::MissingArgument("knob"))?;
                let knob = match knob.to_ascii_lowercase().as_str() {
                    "selection" | "sel" | "s" => KnobId::Selection,
                    "adjustment" | "adj" | "a" => KnobId::Adjustment,
                    _ => return Err(ParseError::InvalidKnob(knob.to_string())),
                };

                let degrees = words.next().ok_or(ParseError::MissingArgument("degrees"))?;
                let degrees = degrees
                    .parse::<f64>()
                    .ok()
                    .filter(|d| d.is_finite() && d.abs() <= MAX_TURN_DEGREES)
                    .ok_or_else(|| ParseError::InvalidDegrees(degrees.to_string()))?;

                Ok(Self::Turn { knob, degrees })
            }
            "ok" | "confirm" => Ok(Self::Press(Button::Confirm)),
            "start" => Ok(Self::Press(Button::StartStop)),
            "stop" => Ok(Self::Press(Button::Stop)),
            "back" => Ok(Self::Press(Button::Back)),
            "status" => Ok(Self::Status),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

/// Where each knob sits on the simulated screen
pub fn knob_center(knob: KnobId) -> Point {
    match knob {
        KnobId::Selection => Point::new(100.0, 100.0),
        KnobId::Adjustment => Point::new(300.0, 100.0),
    }
}

/// Drag `knob` by `degrees` in samples of at most [`MAX_STEP_DEGREES`]
///
/// The pointer grabs the knob at its current visual angle, so the drag
/// looks like a hand turning the knob's indicator. Turns beyond
/// [`MAX_TURN_DEGREES`] are clamped; a non-finite turn moves nothing.
pub async fn turn_knob(panel: &PanelHandle, knob: KnobId, degrees: f64) -> PanelResult<Reaction> {
    let requested = degrees;
    let degrees = if degrees.is_finite() {
        degrees.clamp(-MAX_TURN_DEGREES, MAX_TURN_DEGREES)
    } else {
        0.0
    };
    if degrees != requested {
        tracing::warn!(requested, degrees, "Knob turn out of range, clamped");
    }

    let center = knob_center(knob);
    let bounds = Bounds::centered(center, KNOB_SIZE);

    let view = panel.view().await?;
    let start = match knob {
        KnobId::Selection => view.selection_angle,
        KnobId::Adjustment => view.adjustment_angle,
    };

    panel
        .drag_start(knob, Point::on_circle(center, GRAB_RADIUS, start), bounds)
        .await?;

    let steps = ((degrees.abs() / MAX_STEP_DEGREES).ceil() as usize).max(1);
    let mut rejection = None;
    for i in 1..=steps {
        let angle = start + degrees * i as f64 / steps as f64;
        let reaction = panel
            .drag_move(Point::on_circle(center, GRAB_RADIUS, angle))
            .await?;
        rejection = reaction.rejection.or(rejection);
    }

    let end = panel.drag_end().await?;
    Ok(Reaction {
        view: end.view,
        rejection,
    })
}

fn render_line(view: &PanelView) -> String {
    format!("[{}] {}\n", view.start_button_label.as_str(), view.display_text)
}

/// Carry out one command; `Help` and `Status` write their output directly
async fn execute<W>(
    panel: &PanelHandle,
    command: ConsoleCommand,
    output: &mut W,
) -> AppResult<Option<Reaction>>
where
    W: AsyncWrite + Unpin,
{
    let write = |e: std::io::Error| AppError::Internal(e.to_string());

    match command {
        ConsoleCommand::Turn { knob, degrees } => Ok(Some(turn_knob(panel, knob, degrees).await?)),
        ConsoleCommand::Press(button) => Ok(Some(panel.press(button).await?)),
        ConsoleCommand::Status => {
            let view = panel.view().await?;
            let json = serde_json::to_string_pretty(&view)
                .map_err(|e| AppError::Internal(e.to_string()))?;
            output.write_all(json.as_bytes()).await.map_err(write)?;
            output.write_all(b"\n").await.map_err(write)?;
            Ok(None)
        }
        ConsoleCommand::Help => {
            output.write_all(HELP_TEXT.as_bytes()).await.map_err(write)?;
            output.write_all(b"\n").await.map_err(write)?;
            Ok(None)
        }
        ConsoleCommand::Quit => Ok(None),
    }
}

/// Run the simulator until `quit` or end of input
pub async fn run_console<R, W>(panel: PanelHandle, input: R, mut output: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut views = panel.subscribe().await?;

    let first = panel.view().await?;
    output.write_all(render_line(&first).as_bytes()).await?;
    let mut shown = first.display_text;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                let command = match line.parse::<ConsoleCommand>() {
                    Ok(ConsoleCommand::Quit) => break,
                    Ok(command) => command,
                    Err(e) => {
                        tracing::debug!(line = %line, error = %e, "Unparseable console input");
                        output.write_all(format!("error: {}\n", e).as_bytes()).await?;
                        output.flush().await?;
                        continue;
                    }
                };

                // Rejections come back as notices on the display, so only panel or IO failures land here
                let reaction = match execute(&panel, command, &mut output).await {
                    Ok(reaction) => reaction,
                    Err(e) => {
                        tracing::error!(code = ?e.code(), error = %e, "Console command failed");
                        output.write_all(format!("error: {}\n", e.user_message()).as_bytes()).await?;
                        output.flush().await?;
                        return Err(e.into());
                    }
                };

                if let Some(reaction) = reaction {
                    // Views published while the command ran are older than the reaction
                    while views.try_recv().is_ok() {}
                    if reaction.view.display_text != shown {
                        output.write_all(render_line(&reaction.view).as_bytes()).await?;
                        shown = reaction.view.display_text;
                    }
                }
                output.flush().await?;
            }
            Some(view) = views.recv() => {
                if view.display_text != shown {
                    output.write_all(render_line(&view).as_bytes()).await?;
                    output.flush().await?;
                    shown = view.display_text;
                }
            }
        }
    }

    output.flush().await?;
    Ok(())
}
