//! Read-dispatch-settle-render loop.
//!
//! One line of input is one command. After each command the driver waits
//! for every request it started, so what is printed is always the settled
//! state of the app.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::app::{Action, App};
use crate::models::PhotoUpload;

use super::commands::{parse_command, Input};
use super::render;

/// Drive `app` from `input` until it ends or `quit` is read.
pub async fn run<R, W>(app: &mut App, input: R, output: &mut W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    app.settle().await;
    write!(output, "{}", render::render(app))?;
    prompt(output)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let parsed = match parse_command(&line, app) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => {
                prompt(output)?;
                continue;
            }
            Err(err) => {
                writeln!(output, "  {}", err)?;
                prompt(output)?;
                continue;
            }
        };

        match parsed {
            Input::Quit => break,
            Input::Help => write!(output, "{}", render::help())?,
            Input::Cuisines => write!(output, "{}", render::cuisines())?,
            Input::Act(action) => {
                debug!("Command: {:?}", action);
                app.dispatch(action);
                app.settle().await;
                write!(output, "{}", render::render(app))?;
            }
            Input::AttachPhotos(paths) => {
                let mut photos = Vec::with_capacity(paths.len());
                for path in &paths {
                    match PhotoUpload::from_path(path).await {
                        Ok(photo) => photos.push(photo),
                        Err(err) => {
                            warn!("Could not read {}: {}", path.display(), err);
                            writeln!(output, "  cannot read {}: {}", path.display(), err)?;
                        }
                    }
                }
                if !photos.is_empty() {
                    app.dispatch(Action::AddReviewPhotos(photos));
                    write!(output, "{}", render::render(app))?;
                }
            }
            Input::SaveProfileWithAvatar { mut form, avatar } => {
                match PhotoUpload::from_path(&avatar).await {
                    Ok(photo) => {
                        form.photo = Some(photo);
                        app.dispatch(Action::SaveProfile(form));
                        app.settle().await;
                        write!(output, "{}", render::render(app))?;
                    }
                    Err(err) => {
                        writeln!(output, "  cannot read {}: {}", avatar.display(), err)?;
                    }
                }
            }
        }
        prompt(output)?;
    }
    Ok(())
}

fn prompt<W: Write>(output: &mut W) -> std::io::Result<()> {
    write!(output, "> ")?;
    output.flush()
}
