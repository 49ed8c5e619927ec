use services::{AppServices, Notice, SyllabusOverview, SyllabusServiceError};

use super::{PageResult, usage_error};

const USAGE: &str = "syllabus [show | toggle <unit-id> | docs]";

pub(super) async fn render(app: &AppServices, args: &[String]) -> PageResult {
    let user = app.auth().require_user()?;
    let service = app.syllabus();

    match args {
        [] => print_overview(app, &service.overview(&user).await?),
        [action] if action == "show" => print_overview(app, &service.overview(&user).await?),
        [action, unit] if action == "toggle" => match service.toggle(&user, unit).await {
            Ok(overview) => {
                let state = if overview.completed.contains(unit) {
                    "done"
                } else {
                    "not done"
                };
                println!("{unit}: {state}. Overall {}%.", overview.progress.percent);
                Ok(())
            }
            Err(SyllabusServiceError::Syllabus(err)) => {
                Err(Notice::error("Error", err.to_string()).into())
            }
            Err(err) => Err(err.into()),
        },
        [action] if action == "docs" => {
            for doc in service.documents() {
                println!("{}  {}", doc.title, doc.path);
            }
            Ok(())
        }
        _ => Err(usage_error(USAGE)),
    }
}

fn print_overview(app: &AppServices, overview: &SyllabusOverview) -> PageResult {
    let service = app.syllabus();
    let progress = &overview.progress;
    println!(
        "Overall: {}% ({}/{} units)",
        progress.percent, progress.completed, progress.total
    );

    for (section, section_progress) in service.syllabus().sections.iter().zip(&progress.sections) {
        println!();
        println!(
            "{}  {}% ({}/{})",
            section.title,
            section_progress.percent,
            section_progress.completed,
            section_progress.total
        );
        for topic in &section.topics {
            if topic.is_leaf() {
                println!("  {} {}  [{}]", mark(overview, &topic.id), topic.title, topic.id);
                continue;
            }
            println!("  {}", topic.title);
            for sub in &topic.subtopics {
                println!("    {} {}  [{}]", mark(overview, &sub.id), sub.title, sub.id);
            }
        }
    }
    Ok(())
}

fn mark(overview: &SyllabusOverview, id: &str) -> &'static str {
    if overview.completed.contains(id) {
        "[x]"
    } else {
        "[ ]"
    }
}
