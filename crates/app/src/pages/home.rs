use services::AppServices;

use super::PageResult;

pub(super) async fn render(app: &AppServices) -> PageResult {
    let user = app.auth().current_user();
    let dashboard = app.stats().dashboard(user.as_ref()).await?;

    println!("Welcome back, {}!", dashboard.greeting_name);
    println!();
    for card in &dashboard.cards {
        println!(
            "{:<20} {}{} / {}{}  ({}%)",
            card.label,
            card.value,
            card.suffix,
            card.target,
            card.suffix,
            card.percent()
        );
    }
    Ok(())
}
