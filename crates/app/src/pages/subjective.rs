use prep_core::model::{NoteDraft, NoteId, NoteKind, PRACTICE_PROMPTS};
use services::{AppServices, Notice};

use super::{PageResult, joined, print_notice, usage_error};

const USAGE: &str = "subjective [list [short|long] | show <id> | add <short|long> <title> <content...> \
                     | edit <id> <short|long> <title> <content...> | delete <id> | prompts]";

fn parse_kind(raw: &str) -> Result<NoteKind, Box<dyn std::error::Error>> {
    NoteKind::parse(raw).ok_or_else(|| usage_error(USAGE))
}

pub(super) async fn render(app: &AppServices, args: &[String]) -> PageResult {
    let user = app.auth().require_user()?;
    let notes = app.notes();

    match args {
        [] => list(app, None).await,
        [action] if action == "list" => list(app, None).await,
        [action, kind] if action == "list" => list(app, Some(parse_kind(kind)?)).await,
        [action] if action == "prompts" => {
            for prompt in &PRACTICE_PROMPTS {
                println!("[{}] {}", prompt.kind.as_str(), prompt.question);
            }
            Ok(())
        }
        [action, id] if action == "show" => {
            let note = notes.get(&user, &NoteId::new(id.as_str())).await?;
            println!("{} ({})", note.title, note.kind.as_str());
            println!("{}", note.created_at.format("%Y-%m-%d %H:%M"));
            println!();
            println!("{}", note.content);
            Ok(())
        }
        [action, kind, title, content @ ..] if action == "add" => {
            let draft = NoteDraft::new(title.as_str(), joined(content), parse_kind(kind)?);
            let note = notes
                .create(&user, draft)
                .await
                .map_err(|err| Notice::for_note_error(&err))?;
            print_notice(&Notice::note_created());
            println!("id: {}", note.id);
            Ok(())
        }
        [action, id, kind, title, content @ ..] if action == "edit" => {
            let draft = NoteDraft::new(title.as_str(), joined(content), parse_kind(kind)?);
            notes
                .update(&user, &NoteId::new(id.as_str()), draft)
                .await
                .map_err(|err| Notice::for_note_error(&err))?;
            print_notice(&Notice::note_saved());
            Ok(())
        }
        [action, id] if action == "delete" => {
            notes
                .delete(&user, &NoteId::new(id.as_str()))
                .await
                .map_err(|err| Notice::for_note_error(&err))?;
            print_notice(&Notice::note_deleted());
            Ok(())
        }
        _ => Err(usage_error(USAGE)),
    }
}

async fn list(app: &AppServices, kind: Option<NoteKind>) -> PageResult {
    let user = app.auth().require_user()?;
    let notes = app.notes().list(&user, kind).await?;
    if notes.is_empty() {
        println!("No notes yet.");
    }
    for note in notes {
        println!(
            "{}  [{}] {}  ({})",
            note.id,
            note.kind.as_str(),
            note.title,
            note.created_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}
