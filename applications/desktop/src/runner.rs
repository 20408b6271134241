//! Host event loop
//!
//! One current-thread task owns the coordinator. A reader task parses input
//! lines into [`Command`]s and feeds them through a channel; the loop
//! multiplexes those with a fixed-period frame clock and only ticks the
//! coordinator when it asked for a tick.

use crate::commands::{parse_line, Command};
use crate::sink::{print_queue, HostSink};
use mymp3_shell::ShellCoordinator;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Commands buffered between the reader and the loop
pub const COMMAND_BUFFER: usize = 64;

/// Read commands from `reader` until EOF or `quit`
///
/// `wait` is handled here: the reader pauses while the loop keeps
/// animating. Malformed lines are logged and skipped.
pub async fn read_commands<R>(reader: R, tx: mpsc::Sender<Command>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut line_number = 0usize;

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Failed to read input");
                break;
            }
        };
        line_number += 1;

        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(Command::Wait(duration))) => tokio::time::sleep(duration).await,
            Ok(Some(command)) => {
                let quit = command == Command::Quit;
                if tx.send(command).await.is_err() || quit {
                    break;
                }
            }
            Err(e) => warn!(line = line_number, error = %e, "Skipping command"),
        }
    }

    debug!(lines = line_number, "Input finished");
}

/// Drive the coordinator until `quit`, or until input ends and every
/// drawer has come to rest
pub async fn run(
    shell: &mut ShellCoordinator<HostSink>,
    mut commands: mpsc::Receiver<Command>,
    tick_period: Duration,
) {
    let mut frames = tokio::time::interval(tick_period);
    frames.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last_frame = Instant::now();
    let mut input_open = true;

    info!(tick_ms = tick_period.as_millis() as u64, "Host loop started");

    loop {
        tokio::select! {
            command = commands.recv(), if input_open => match command {
                Some(Command::Quit) => {
                    info!("Quit requested");
                    break;
                }
                Some(command) => execute(shell, command),
                None => {
                    debug!("Command channel closed");
                    input_open = false;
                }
            },
            now = frames.tick() => {
                let elapsed = now.duration_since(last_frame);
                last_frame = now;

                if shell.sink_mut().take_tick_request() {
                    shell.tick(elapsed);
                } else if !input_open {
                    break;
                }
            }
        }
    }

    info!(
        effects = shell.sink().emitted(),
        queued = shell.queue().len(),
        "Host loop stopped"
    );
}

/// Apply one command to the coordinator
pub fn execute(shell: &mut ShellCoordinator<HostSink>, command: Command) {
    debug!(?command, "Executing");

    match command {
        Command::Menu => shell.toggle_menu_drawer(),
        Command::Queue => shell.toggle_queue_drawer(),
        Command::Resize { width, height } => shell.on_container_resized(width, height),
        Command::Controls(height) => shell.set_control_bar_height(height),
        Command::Add {
            title,
            artist,
            album,
        } => {
            shell.enqueue_track(title, artist, album);
        }
        Command::Remove(index) => match shell.queue().nth_ref(index) {
            Some(track) => {
                if let Err(e) = shell.remove_track(track) {
                    warn!(error = %e, "Remove failed");
                }
            }
            None => warn!(index, len = shell.queue().len(), "No track at that row"),
        },
        Command::List => print_queue(shell.sink().mode(), shell.queue().entries()),
        Command::Volume(level) => shell.set_volume(level),
        Command::Mute => shell.toggle_mute(),
        Command::Seek(position) => {
            shell.seek(position);
        }
        Command::Report { position, duration } => shell.on_transport_report(position, duration),
        Command::Page(index) => {
            if let Err(e) = shell.select_menu_page(index) {
                warn!(error = %e, pages = shell.pages().page_count(), "Page not selected");
            }
        }
        // Handled by the reader and the loop
        Command::Wait(_) | Command::Quit => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::OutputMode;
    use mymp3_shell::{DrawerPhase, ShellConfig};

    fn shell() -> ShellCoordinator<HostSink> {
        ShellCoordinator::new(&ShellConfig::default(), HostSink::new(OutputMode::Log))
    }

    async fn run_script(shell: &mut ShellCoordinator<HostSink>, script: &'static str) {
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        let reader = tokio::spawn(read_commands(script.as_bytes(), tx));
        run(shell, rx, Duration::from_millis(16)).await;
        reader.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_lets_drawer_finish() {
        let mut shell = shell();
        run_script(&mut shell, "menu\nwait 2000\nquit\n").await;

        assert_eq!(shell.menu_drawer().phase(), DrawerPhase::Open);
        assert_eq!(shell.menu_drawer().position(), shell.menu_drawer().open_target());
    }

    #[tokio::test(start_paused = true)]
    async fn test_eof_waits_for_animations() {
        let mut shell = shell();
        run_script(&mut shell, "queue\n").await;

        assert_eq!(shell.queue_drawer().phase(), DrawerPhase::Open);
        assert!(!shell.is_animating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_quick_double_toggle_ends_closed() {
        let mut shell = shell();
        run_script(&mut shell, "menu\nwait 100\nmenu\nwait 2000\nquit\n").await;

        assert_eq!(shell.menu_drawer().phase(), DrawerPhase::Closed);
        assert!(!shell.menu_drawer().is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_bad_lines_are_skipped() {
        let mut shell = shell();
        let script = "\
            # build a small queue\n\
            add A | Artist | Album\n\
            dance\n\
            add B\n\
            remove nine\n\
            remove 0\n\
            remove 5\n\
            volume 30\n\
            page 9\n\
            quit\n";
        run_script(&mut shell, script).await;

        let titles: Vec<&str> = shell.queue().entries().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["B"]);
        assert_eq!(shell.volume().level(), 30);
        assert_eq!(shell.pages().current_index(), Some(0));
    }

    #[test]
    fn test_execute_transport_commands() {
        let mut shell = shell();
        execute(
            &mut shell,
            Command::Report {
                position: Duration::from_secs(1),
                duration: Duration::from_secs(10),
            },
        );
        execute(&mut shell, Command::Seek(Duration::from_secs(30)));
        execute(&mut shell, Command::Mute);

        assert_eq!(shell.transport().position(), Duration::from_secs(10));
        assert!(shell.volume().is_muted());
    }

    #[test]
    fn test_execute_resize_and_controls() {
        let mut shell = shell();
        execute(
            &mut shell,
            Command::Resize {
                width: 1000.0,
                height: 600.0,
            },
        );
        execute(&mut shell, Command::Controls(50.0));

        assert_eq!(shell.menu_drawer().closed_target().x, 1000.0);
        assert_eq!(shell.queue_drawer().closed_target().y, 550.0);
    }
}
