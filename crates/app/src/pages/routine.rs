use prep_core::model::{Period, Routine, RoutineItemId};
use services::{AppServices, Notice, RoutineServiceError};

use super::{PageResult, joined, print_notice, usage_error};

const USAGE: &str = "routine [show | add <morning|evening> \
                     | edit <morning|evening> <id> <time> <activity...> \
                     | delete <morning|evening> <id>]";

fn parse_period(raw: &str) -> Result<Period, Box<dyn std::error::Error>> {
    Period::parse(raw).ok_or_else(|| usage_error(USAGE))
}

fn not_found(err: RoutineServiceError) -> Box<dyn std::error::Error> {
    match err {
        RoutineServiceError::Routine(err) => Notice::error("Error", err.to_string()).into(),
        other => other.into(),
    }
}

pub(super) async fn render(app: &AppServices, args: &[String]) -> PageResult {
    let user = app.auth().require_user()?;
    let service = app.routine();

    match args {
        [] => print_routine(&service.load(&user).await?),
        [action] if action == "show" => print_routine(&service.load(&user).await?),
        [action, period] if action == "add" => {
            let item = service.add(&user, parse_period(period)?).await?;
            print_notice(&Notice::routine_saved());
            println!("{}  {}  {}", item.id, item.time, item.activity);
            Ok(())
        }
        [action, period, id, time, activity @ ..] if action == "edit" && !activity.is_empty() => {
            service
                .update(
                    &user,
                    parse_period(period)?,
                    &RoutineItemId::new(id.as_str()),
                    time,
                    &joined(activity),
                )
                .await
                .map_err(not_found)?;
            print_notice(&Notice::routine_saved());
            Ok(())
        }
        [action, period, id] if action == "delete" => {
            service
                .delete(&user, parse_period(period)?, &RoutineItemId::new(id.as_str()))
                .await
                .map_err(not_found)?;
            print_notice(&Notice::routine_saved());
            Ok(())
        }
        _ => Err(usage_error(USAGE)),
    }
}

fn print_routine(routine: &Routine) -> PageResult {
    for (label, period) in [("Morning", Period::Morning), ("Evening", Period::Evening)] {
        println!("{label}");
        for item in routine.items(period) {
            println!("  {:>8}  {}  ({})", item.time, item.activity, item.id);
        }
    }
    Ok(())
}
