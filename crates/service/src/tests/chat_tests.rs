//! Chat turn tests, including the safety short-circuit.

use std::sync::Arc;

use kokoro_core::{ESCALATION_RESPONSE, Phase, Role};
use uuid::Uuid;

use crate::tests::{
    CountingMock, create_test_storage, create_test_user, mock_config, write_test_prompts,
};
use crate::{ChatService, ServiceError, SessionService};

fn build_services() -> (
    Arc<kokoro_storage::Storage>,
    SessionService,
    ChatService,
    Arc<CountingMock>,
    tempfile::TempDir,
    tempfile::TempDir,
) {
    let (storage, db_dir) = create_test_storage();
    let (prompts_dir, prompts) = write_test_prompts();
    let prompts = Arc::new(prompts);
    let llm = Arc::new(CountingMock::new());

    let sessions =
        SessionService::new(Arc::clone(&storage), Arc::clone(&prompts), mock_config());
    let chat = ChatService::new(
        Arc::clone(&storage),
        prompts,
        Arc::clone(&llm) as Arc<dyn kokoro_llm::ChatModel>,
    );
    (storage, sessions, chat, llm, db_dir, prompts_dir)
}

#[tokio::test]
async fn normal_phase1_turn_appends_user_and_assistant() {
    let (storage, sessions, chat, llm, _db, _prompts) = build_services();
    let user = create_test_user(&storage);
    let session = sessions.start_phase1(user.id).unwrap();

    let outcome = chat.append_phase1_turn(session.id, "  今日は少し疲れました  ").await.unwrap();

    assert!(!outcome.emergency);
    assert!(outcome.assistant_message.starts_with("[MOCK RESPONSE]"));
    assert!(outcome.assistant_message.contains("今日は少し疲れました"));
    assert_eq!(llm.calls(), 1);

    let stored = storage.get_session(&session.id).unwrap().unwrap();
    assert_eq!(stored.log.len(), 3);
    assert_eq!(stored.log[1].role, Role::User);
    assert_eq!(stored.log[1].content, "今日は少し疲れました");
    assert_eq!(stored.log[2].role, Role::Assistant);
    assert_eq!(outcome.turn_index, 2);
}

#[tokio::test]
async fn high_risk_message_escalates_without_llm_call() {
    let (storage, sessions, chat, llm, _db, _prompts) = build_services();
    let user = create_test_user(&storage);
    let session = sessions.start_phase1(user.id).unwrap();

    let outcome = chat.append_phase1_turn(session.id, "もう終わりたい").await.unwrap();

    assert!(outcome.emergency);
    assert_eq!(outcome.assistant_message, ESCALATION_RESPONSE);
    assert_eq!(llm.calls(), 0);

    let stored = storage.get_session(&session.id).unwrap().unwrap();
    assert_eq!(stored.log.last().unwrap().content, ESCALATION_RESPONSE);
    assert_eq!(stored.meta_data["safety_triggered"], true);
    assert_eq!(stored.meta_data["safety_reason"], "high_risk_keyword");
    assert_eq!(stored.meta_data["safety_version"], "guardrails_v1");
}

#[tokio::test]
async fn keyword_inside_longer_message_still_escalates() {
    let (storage, sessions, chat, llm, _db, _prompts) = build_services();
    let user = create_test_user(&storage);
    let session = sessions.start_phase1(user.id).unwrap();

    let outcome =
        chat.append_phase1_turn(session.id, "最近ずっと、消えたいと思ってしまう").await.unwrap();
    assert!(outcome.emergency);
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn empty_message_is_invalid_input() {
    let (storage, sessions, chat, _llm, _db, _prompts) = build_services();
    let user = create_test_user(&storage);
    let session = sessions.start_phase1(user.id).unwrap();

    let err = chat.append_phase1_turn(session.id, "   ").await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let (_storage, _sessions, chat, _llm, _db, _prompts) = build_services();
    let err = chat.append_phase1_turn(Uuid::new_v4(), "hello").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn phase1_turn_on_phase3_session_is_mismatch() {
    let (storage, sessions, chat, _llm, _db, _prompts) = build_services();
    let user = create_test_user(&storage);
    let (session, _) = sessions.start_phase3(user.id).unwrap();

    let err = chat.append_phase1_turn(session.id, "hello").await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::PhaseMismatch { expected: Phase::One, actual: Phase::Three }
    ));
}

#[tokio::test]
async fn phase3_turn_uses_stored_system_prompt() {
    let (storage, sessions, chat, llm, _db, _prompts) = build_services();
    let user = create_test_user(&storage);
    let (session, _) = sessions.start_phase3(user.id).unwrap();

    let outcome = chat.append_phase3_turn(session.id, "今日の振り返りです").await.unwrap();
    assert!(!outcome.emergency);
    assert_eq!(llm.calls(), 1);

    let stored = storage.get_session(&session.id).unwrap().unwrap();
    assert_eq!(stored.log.len(), 3);
}

#[tokio::test]
async fn phase3_turn_without_system_prompt_is_invalid_log() {
    let (storage, sessions, chat, _llm, _db, _prompts) = build_services();
    let user = create_test_user(&storage);
    let (session, _) = sessions.start_phase3(user.id).unwrap();

    // Corrupt the transcript: drop the system entry.
    storage.update_session_log(&session.id, &[]).unwrap();

    let err = chat.append_phase3_turn(session.id, "hello").await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidLog(_)));
}

#[tokio::test]
async fn phase3_turn_skips_safety_short_circuit() {
    let (storage, sessions, chat, llm, _db, _prompts) = build_services();
    let user = create_test_user(&storage);
    let (session, _) = sessions.start_phase3(user.id).unwrap();

    let outcome = chat.append_phase3_turn(session.id, "もう終わりたい").await.unwrap();
    assert!(!outcome.emergency);
    assert_eq!(llm.calls(), 1);
    assert_ne!(outcome.assistant_message, ESCALATION_RESPONSE);
}
