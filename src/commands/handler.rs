use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::app_context::AppContext;

use super::command_def::Command;
use super::router::{Reply, route_command};

/// Why the command input stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEnd {
    Quit,
    Closed,
}

/// Reads commands from stdin until `quit` or end of input.
pub async fn run_command_loop(app_context: AppContext) -> std::io::Result<InputEnd> {
    serve_commands(
        &app_context,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
}

async fn serve_commands<R, W>(
    app_context: &AppContext,
    input: R,
    mut output: W,
) -> std::io::Result<InputEnd>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let reply = match Command::parse(input) {
            Some(cmd) => {
                log::info!("command_received command={:?}", cmd);
                route_command(app_context, cmd).await
            }
            None => Reply::Lines(vec![format!(
                "Unknown command: {} (type `help` for the list)",
                input
            )]),
        };

        match reply {
            Reply::Quit => {
                log::info!("command_loop_finished reason=quit");
                return Ok(InputEnd::Quit);
            }
            Reply::Lines(text_lines) => {
                for text in text_lines {
                    output.write_all(text.as_bytes()).await?;
                    output.write_all(b"\n").await?;
                }
                output.flush().await?;
            }
        }
    }

    log::info!("command_loop_finished reason=input_closed");
    Ok(InputEnd::Closed)
}
