use prep_core::model::{NoteDraft, NoteKind, Period};
use prep_core::quiz::QuizStep;
use prep_core::time::fixed_now;
use prep_core::typing::{InputOutcome, TypingSettings};
use services::{AppServices, Clock};
use storage::repository::Storage;

#[tokio::test]
async fn study_day_updates_dashboard() {
    let storage = Storage::sqlite("sqlite:file:memdb_study_flow?mode=memory&cache=shared")
        .await
        .expect("connect sqlite");
    let app = AppServices::from_storage(&storage, Clock::fixed(fixed_now()))
        .await
        .expect("build services");

    let user = app
        .auth()
        .register("sunita@example.com", "secret1", "Sunita")
        .await
        .expect("register");

    let quiz = app.quiz();
    let mut runner = quiz.start(None).expect("start quiz");
    let mut score = None;
    for answer in [1, 0, 2, 1, 2] {
        runner.select(answer).expect("select");
        if let QuizStep::Finished(result) = quiz.next(&user, &mut runner).await.expect("next") {
            score = Some(result.score);
        }
    }
    assert_eq!(score, Some(5));

    app.notes()
        .create(
            &user,
            NoteDraft::new("E-governance", "Digital delivery of services.", NoteKind::Long),
        )
        .await
        .expect("create note");

    let typing = app.typing();
    let mut trainer = typing
        .new_trainer(TypingSettings::default())
        .expect("trainer");
    typing.start(&mut trainer).expect("start typing");
    typing
        .advance(&user, &mut trainer, 30)
        .await
        .expect("advance");
    let target = trainer.target().to_owned();
    let outcome = typing
        .input(&user, &mut trainer, &target)
        .await
        .expect("type");
    assert!(matches!(outcome, InputOutcome::Completed(_)));

    let overview = app
        .syllabus()
        .toggle(&user, "i-current")
        .await
        .expect("toggle unit");

    app.routine()
        .add(&user, Period::Evening)
        .await
        .expect("add routine item");

    let dashboard = app.stats().dashboard(Some(&user)).await.expect("dashboard");
    assert_eq!(dashboard.greeting_name, "Sunita");
    let values: Vec<u32> = dashboard.cards.iter().map(|c| c.value).collect();
    assert_eq!(values, vec![1, 1, 1, overview.progress.percent]);
}

#[tokio::test]
async fn session_survives_restart_and_data_stays_after_logout() {
    let storage = Storage::sqlite("sqlite:file:memdb_session_restore?mode=memory&cache=shared")
        .await
        .expect("connect sqlite");
    let clock = Clock::fixed(fixed_now());

    let first = AppServices::from_storage(&storage, clock)
        .await
        .expect("build services");
    let user = first
        .auth()
        .register("kiran@example.com", "secret1", "Kiran")
        .await
        .expect("register");
    first
        .notes()
        .create(&user, NoteDraft::new("CPU", "Central processing unit.", NoteKind::Short))
        .await
        .expect("create note");

    let second = AppServices::from_storage(&storage, clock)
        .await
        .expect("rebuild services");
    assert_eq!(second.auth().current_user(), Some(user.clone()));

    second.auth().logout().await.expect("logout");
    let third = AppServices::from_storage(&storage, clock)
        .await
        .expect("rebuild services");
    assert_eq!(third.auth().current_user(), None);

    let again = third
        .auth()
        .login("kiran@example.com", "secret1")
        .await
        .expect("login");
    let notes = third.notes().list(&again, None).await.expect("list notes");
    assert_eq!(notes.len(), 1);
}
