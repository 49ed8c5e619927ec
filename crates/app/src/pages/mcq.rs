use prep_core::quiz::{QuizResult, QuizRunner, QuizStep};
use services::{AppServices, Notice, QuizServiceError};

use super::{PageResult, joined, print_notice, prompt, stdin_lines};

const HELP: &str = "Enter an option number, 'b' for previous, 'r' to restart, 'q' to quit.";

pub(super) async fn render(app: &AppServices, args: &[String]) -> PageResult {
    let quiz = app.quiz();
    let topic = match args {
        [action] if action == "topics" => {
            for topic in quiz.topics() {
                println!("{topic}");
            }
            return Ok(());
        }
        [] => None,
        [action, rest @ ..] if action == "topic" && !rest.is_empty() => Some(joined(rest)),
        _ => return Err(super::usage_error("mcq [topics | topic <name...>]")),
    };

    let user = app.auth().require_user()?;
    let mut runner = quiz.start(topic.as_deref())?;
    println!("{HELP}");
    let mut lines = stdin_lines();

    loop {
        print_question(&runner);
        let Some(line) = prompt(&mut lines, "> ").await? else {
            return Ok(());
        };
        match line.trim() {
            "q" => return Ok(()),
            "b" => {
                if !runner.previous() {
                    println!("Already at the first question.");
                }
            }
            "r" => runner.restart(),
            raw => {
                let Some(option) = raw.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) else {
                    println!("{HELP}");
                    continue;
                };
                if let Err(err) = runner.select(option) {
                    println!("{err}");
                    continue;
                }
                match quiz.next(&user, &mut runner).await {
                    Ok(QuizStep::Moved(_)) => {}
                    Ok(QuizStep::Finished(result)) => {
                        print_notice(&Notice::quiz_completed(result.score, result.total));
                        print_review(&runner, &result);
                        return Ok(());
                    }
                    Err(QuizServiceError::Quiz(err)) => println!("{err}"),
                    Err(err) => return Err(err.into()),
                }
            }
        }
    }
}

fn print_question(runner: &QuizRunner) {
    let question = runner.current();
    println!();
    println!(
        "Question {} of {} [{}]",
        runner.current_index() + 1,
        runner.questions().len(),
        question.topic
    );
    println!("{}", question.prompt);
    for (i, option) in question.options.iter().enumerate() {
        let marker = if runner.selected() == Some(i) { "*" } else { " " };
        println!(" {marker}{}. {option}", i + 1);
    }
}

fn print_review(runner: &QuizRunner, result: &QuizResult) {
    let mut wrong = result.wrong().peekable();
    if wrong.peek().is_none() {
        println!("Perfect score!");
        return;
    }
    println!("Review:");
    for review in wrong {
        let question = &runner.questions()[review.index];
        let chosen = review
            .chosen
            .and_then(|i| question.options.get(i))
            .map_or("-", String::as_str);
        println!("  {}", question.prompt);
        println!("    your answer: {chosen}");
        println!("    correct:     {}", question.options[review.correct]);
    }
}
