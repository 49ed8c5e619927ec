use prep_core::model::{CATEGORIES, CategoryFilter, ResourceDraft, ResourceId, ResourceKind};
use services::{AppServices, Notice, ResourceServiceError};

use super::{PageResult, joined, print_notice, usage_error};

const USAGE: &str = "resources [list [category] | categories \
                     | add <title> <url> [--type pdf|video|link] [--category <name>] | delete <id>]";

pub(super) async fn render(app: &AppServices, args: &[String]) -> PageResult {
    let user = app.auth().require_user()?;
    let service = app.resources();

    match args {
        [] => list(app, &CategoryFilter::All).await,
        [action, category @ ..] if action == "list" => {
            let filter = if category.is_empty() {
                CategoryFilter::All
            } else {
                CategoryFilter::parse(&joined(category))
            };
            list(app, &filter).await
        }
        [action] if action == "categories" => {
            for category in CATEGORIES {
                println!("{category}");
            }
            Ok(())
        }
        [action, title, url, options @ ..] if action == "add" => {
            let draft = parse_options(ResourceDraft::bookmark(title.as_str(), url.as_str()), options)?;
            let resource = service
                .add(&user, draft)
                .await
                .map_err(|err| Notice::for_resource_error(&err))?;
            print_notice(&Notice::resource_added());
            println!("id: {}", resource.id);
            Ok(())
        }
        [action, id] if action == "delete" => {
            match service.delete(&user, &ResourceId::new(id.as_str())).await {
                Ok(()) => {
                    print_notice(&Notice::resource_deleted());
                    Ok(())
                }
                Err(err @ ResourceServiceError::NotFound(_)) => {
                    Err(Notice::for_resource_error(&err).into())
                }
                Err(err) => Err(err.into()),
            }
        }
        _ => Err(usage_error(USAGE)),
    }
}

fn parse_options(
    mut draft: ResourceDraft,
    options: &[String],
) -> Result<ResourceDraft, Box<dyn std::error::Error>> {
    let mut iter = options.iter();
    while let Some(flag) = iter.next() {
        let value = iter.next().ok_or_else(|| usage_error(USAGE))?;
        match flag.as_str() {
            "--type" => {
                let kind = ResourceKind::parse(value).ok_or_else(|| usage_error(USAGE))?;
                draft = draft.with_kind(kind);
            }
            "--category" => draft = draft.with_category(value.as_str()),
            _ => return Err(usage_error(USAGE)),
        }
    }
    Ok(draft)
}

async fn list(app: &AppServices, filter: &CategoryFilter) -> PageResult {
    let user = app.auth().require_user()?;
    let resources = app.resources().list(&user, filter).await?;
    if resources.is_empty() {
        println!("No resources in this category.");
    }
    for resource in resources {
        println!(
            "{}  [{}] {} ({})  {}",
            resource.id,
            resource.kind.as_str(),
            resource.title,
            resource.category,
            resource.url
        );
    }
    Ok(())
}
