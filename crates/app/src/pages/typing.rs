use std::error::Error;
use std::io::{self, Write};
use std::time::Duration;

use prep_core::model::SessionUser;
use prep_core::typing::{
    Difficulty, InputOutcome, Language, TickOutcome, TypingMode, TypingResult, TypingSettings,
    TypingTrainer,
};
use services::{AppServices, Notice, TypingServiceError};
use tokio::io::{AsyncBufRead, Lines};
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use super::{PageResult, print_notice, stdin_lines, usage_error};

const USAGE: &str = "typing [leaderboard] | typing [--language en|ne] \
                     [--difficulty easy|medium|hard] [--timed 60|120|300]";
const HELP: &str = "Type the text and press Enter. Commands: :pause :resume :reset :quit";
const TICK: Duration = Duration::from_secs(1);

pub(super) async fn render(app: &AppServices, args: &[String]) -> PageResult {
    if matches!(args, [action] if action == "leaderboard") {
        return print_leaderboard(app).await;
    }
    let settings = parse_settings(args)?;
    let user = app.auth().require_user()?;
    let typing = app.typing();

    let mut trainer = typing.new_trainer(settings)?;
    typing.start(&mut trainer)?;
    println!("{HELP}");
    print_target(&trainer);

    let mut lines = stdin_lines();
    if let Some(result) = run(app, &user, &mut trainer, &mut lines).await? {
        finish(&result);
    }
    Ok(())
}

/// Drives one attempt until it completes, the user quits, or input ends.
///
/// The trainer ticks every second whether or not a line arrives, so a timed
/// attempt expires on schedule.
async fn run<R>(
    app: &AppServices,
    user: &SessionUser,
    trainer: &mut TypingTrainer,
    lines: &mut Lines<R>,
) -> Result<Option<TypingResult>, Box<dyn Error>>
where
    R: AsyncBufRead + Unpin,
{
    let typing = app.typing();
    let mut ticker = interval_at(Instant::now() + TICK, TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    print_prompt()?;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match typing.advance(user, trainer, 1).await? {
                    TickOutcome::Completed(result) => return Ok(Some(result)),
                    TickOutcome::Ticked => {
                        if let Some(secs) = trainer.remaining_secs().filter(|s| s % 10 == 0) {
                            println!("{secs}s left");
                        }
                    }
                    TickOutcome::Stopped => {}
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    return Ok(None);
                };
                match line.as_str() {
                    ":quit" => return Ok(None),
                    ":pause" => {
                        if trainer.pause() {
                            println!("Paused.");
                        }
                    }
                    ":resume" => {
                        if trainer.resume() {
                            println!("Resumed.");
                        }
                    }
                    ":reset" => {
                        typing.restart(trainer)?;
                        print_target(trainer);
                    }
                    value => match typing.input(user, trainer, value).await {
                        Ok(InputOutcome::Progress(score)) => {
                            let remaining = trainer
                                .remaining_secs()
                                .map(|secs| format!("  {secs}s left"))
                                .unwrap_or_default();
                            println!(
                                "{} WPM  {}% accuracy  {} errors{remaining}",
                                score.wpm, score.accuracy, score.errors
                            );
                        }
                        Ok(InputOutcome::Completed(result)) => return Ok(Some(result)),
                        Ok(InputOutcome::Ignored) => return Ok(None),
                        Err(TypingServiceError::Typing(err)) => println!("{err}"),
                        Err(err) => return Err(err.into()),
                    },
                }
                print_prompt()?;
            }
        }
    }
}

fn print_prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

fn parse_settings(args: &[String]) -> Result<TypingSettings, Box<dyn Error>> {
    let mut settings = TypingSettings::default();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let value = iter.next().ok_or_else(|| usage_error(USAGE))?;
        match flag.as_str() {
            "--language" => {
                settings.language = Language::parse(value).ok_or_else(|| usage_error(USAGE))?;
            }
            "--difficulty" => {
                settings.difficulty = Difficulty::parse(value).ok_or_else(|| usage_error(USAGE))?;
            }
            "--timed" => {
                let seconds: u32 = value.parse().map_err(|_| usage_error(USAGE))?;
                settings.mode = TypingMode::timed(seconds)?;
            }
            _ => return Err(usage_error(USAGE)),
        }
    }
    Ok(settings)
}

fn print_target(trainer: &TypingTrainer) {
    println!();
    println!("{}", trainer.target());
    if let Some(secs) = trainer.remaining_secs() {
        println!("({secs}s on the clock)");
    }
}

fn finish(result: &TypingResult) {
    print_notice(&Notice::typing_completed(result));
    println!(
        "{} errors, {} corrections, {}s",
        result.errors, result.corrections, result.elapsed_secs
    );
}

fn mode_label(mode: TypingMode) -> String {
    match mode {
        TypingMode::Text => "text".to_owned(),
        TypingMode::Timed { seconds } => format!("{seconds}s"),
    }
}

async fn print_leaderboard(app: &AppServices) -> PageResult {
    let entries = app.typing().leaderboard().await?;
    if entries.is_empty() {
        println!("No attempts yet.");
    }
    for entry in entries {
        println!(
            "{}  {:>3} WPM  {:>3}%  {:?} / {:?} / {}",
            entry.date.format("%Y-%m-%d %H:%M"),
            entry.wpm,
            entry.accuracy,
            entry.language,
            entry.difficulty,
            mode_label(entry.mode)
        );
    }
    Ok(())
}
