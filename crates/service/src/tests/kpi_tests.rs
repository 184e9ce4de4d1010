//! KPI edit-ratio query tests.

use std::sync::Arc;

use crate::tests::{
    CountingMock, create_test_storage, create_test_user, mock_config, write_test_prompts,
};
use crate::{ChatService, KpiService, ReportService, SessionService};

#[tokio::test]
async fn edit_ratio_report_covers_finalized_sessions_only() {
    let (storage, _db) = create_test_storage();
    let (_prompts_dir, prompts) = write_test_prompts();
    let prompts = Arc::new(prompts);
    let llm: Arc<dyn kokoro_llm::ChatModel> = Arc::new(CountingMock::new());
    let user = create_test_user(&storage);

    let sessions =
        SessionService::new(Arc::clone(&storage), Arc::clone(&prompts), mock_config());
    let chat = ChatService::new(Arc::clone(&storage), Arc::clone(&prompts), Arc::clone(&llm));
    let reports =
        ReportService::new(Arc::clone(&storage), prompts, llm, mock_config());
    let kpi = KpiService::new(Arc::clone(&storage));

    // Two finalized sessions, one with an untouched draft.
    let (first, _) = sessions.start_phase3(user.id).unwrap();
    chat.append_phase3_turn(first.id, "一日目").await.unwrap();
    let draft = reports.generate_draft(first.id).await.unwrap();
    reports.save_final(first.id, &draft).unwrap();

    let (second, _) = sessions.start_phase3(user.id).unwrap();
    chat.append_phase3_turn(second.id, "二日目").await.unwrap();
    let draft = reports.generate_draft(second.id).await.unwrap();
    reports.save_final(second.id, &format!("{draft}追記あり")).unwrap();

    // A drafted-but-never-finalized session must not appear.
    let (third, _) = sessions.start_phase3(user.id).unwrap();
    chat.append_phase3_turn(third.id, "三日目").await.unwrap();
    reports.generate_draft(third.id).await.unwrap();

    let report = kpi.edit_ratio_report(user.id).unwrap();
    assert_eq!(report.user_id, user.id);
    assert_eq!(report.items.len(), 2);
    assert_eq!(report.summary.count, 2);
    assert_eq!(report.summary.min, Some(0.0));
    assert!(report.summary.max.unwrap() > 0.0);
    assert_eq!(report.items[0].session_id, first.id);
    assert_eq!(report.items[0].ratio, 0.0);
}

#[tokio::test]
async fn summary_rolls_up_completion_and_retention() {
    let (storage, _db) = create_test_storage();
    let (_prompts_dir, prompts) = write_test_prompts();
    let prompts = Arc::new(prompts);
    let llm: Arc<dyn kokoro_llm::ChatModel> = Arc::new(CountingMock::new());
    let user = create_test_user(&storage);

    let sessions =
        SessionService::new(Arc::clone(&storage), Arc::clone(&prompts), mock_config());
    let chat = ChatService::new(Arc::clone(&storage), Arc::clone(&prompts), Arc::clone(&llm));
    let reports = ReportService::new(Arc::clone(&storage), prompts, llm, mock_config());
    let kpi = KpiService::new(Arc::clone(&storage));

    sessions.start_phase1(user.id).unwrap();
    let (finished, _) = sessions.start_phase3(user.id).unwrap();
    chat.append_phase3_turn(finished.id, "振り返り").await.unwrap();
    let draft = reports.generate_draft(finished.id).await.unwrap();
    reports.save_final(finished.id, &draft).unwrap();
    sessions.start_phase3(user.id).unwrap();

    let summary = kpi.summary(user.id).unwrap();
    assert_eq!(summary.user_id, user.id);
    assert_eq!(summary.completion.total_phase3_sessions, 2);
    assert_eq!(summary.completion.completed_sessions, 1);
    assert_eq!(summary.completion.completion_rate, 0.5);
    assert_eq!(summary.retention.total_sessions, 3);
    assert_eq!(summary.retention.active_days, 1);
}

#[test]
fn user_with_no_sessions_gets_empty_report() {
    let (storage, _db) = create_test_storage();
    let user = create_test_user(&storage);
    let kpi = KpiService::new(Arc::clone(&storage));

    let report = kpi.edit_ratio_report(user.id).unwrap();
    assert!(report.items.is_empty());
    assert_eq!(report.summary.count, 0);
    assert_eq!(report.summary.avg, None);
    assert_eq!(report.summary.median, None);
}
