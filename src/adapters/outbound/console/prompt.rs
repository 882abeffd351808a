use crate::application::ui::{ConfirmationOptions, ConfirmationService};
use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// ConsolePrompt answers confirmation requests from the terminal
///
/// With `auto_accept` (the `--yes` flag) every request is accepted without
/// reading stdin.
pub struct ConsolePrompt {
    auto_accept: bool,
}

impl ConsolePrompt {
    pub fn new(auto_accept: bool) -> Self {
        Self { auto_accept }
    }

    /// Writes the question and reads one answer; anything but yes is a no
    pub fn ask<R: BufRead, W: Write>(
        &self,
        options: &ConfirmationOptions,
        input: &mut R,
        output: &mut W,
    ) -> io::Result<bool> {
        if options.danger {
            writeln!(output, "{}", options.title.red().bold())?;
        } else {
            writeln!(output, "{}", options.title.bold())?;
        }
        writeln!(output, "{}", options.message)?;
        if self.auto_accept {
            writeln!(output, "{} (--yes)", options.confirm_text)?;
            return Ok(true);
        }
        write!(
            output,
            "{} / {} [o/N] ",
            options.confirm_text, options.cancel_text
        )?;
        output.flush()?;

        let mut line = String::new();
        input.read_line(&mut line)?;
        Ok(is_yes(&line))
    }

    /// Serves every request published by `confirmations`
    pub fn spawn(self, confirmations: Arc<ConfirmationService>) -> JoinHandle<()> {
        let prompt = Arc::new(self);
        tokio::spawn(async move {
            let mut requests = confirmations.subscribe();
            loop {
                let options = match requests.wait_for(Option::is_some).await {
                    Ok(current) => current.clone(),
                    Err(_) => break,
                };
                let Some(options) = options else { continue };

                let asking = Arc::clone(&prompt);
                let answer = tokio::task::spawn_blocking(move || {
                    asking.ask(&options, &mut io::stdin().lock(), &mut io::stderr())
                })
                .await;
                match answer {
                    Ok(Ok(confirmed)) => confirmations.respond(confirmed),
                    Ok(Err(error)) => {
                        tracing::warn!(%error, "could not read the answer");
                        confirmations.dismiss();
                    }
                    Err(error) => {
                        tracing::warn!(%error, "prompt task failed");
                        confirmations.dismiss();
                    }
                }
            }
        })
    }
}

fn is_yes(line: &str) -> bool {
    matches!(
        line.trim().to_lowercase().as_str(),
        "o" | "oui" | "y" | "yes"
    )
}
