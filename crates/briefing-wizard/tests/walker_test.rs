//! Renderer walker against the in-memory store.

use briefing_client::{ClientError, InMemoryStore};
use briefing_config::{ConditionType, Definition, FieldEntry, InputType, Step};
use briefing_wizard::{Walker, WizardError};
use tokio_util::sync::CancellationToken;

fn store_with_briefing() -> (InMemoryStore, String) {
  let store = InMemoryStore::new(
    vec![InputType {
      id: "text".to_string(),
      name: "Text".to_string(),
      value_kind: "text".to_string(),
      ..Default::default()
    }],
    vec![ConditionType {
      id: "equals".to_string(),
      name: "Equals".to_string(),
    }],
  );

  let mut first = Step::new(1);
  first.title = "About you".to_string();
  first.inputs.push(FieldEntry {
    input_type_id: "text".to_string(),
    label: "Name".to_string(),
    ..Default::default()
  });
  let mut second = Step::new(2);
  second.title = "Project".to_string();

  let id = store.insert(Definition {
    title: "Kickoff".to_string(),
    author: "ana@example.com".to_string(),
    steps: vec![first, second],
    ..Default::default()
  });
  (store, id)
}

#[tokio::test]
async fn test_walk_two_steps() {
  let (store, id) = store_with_briefing();
  let cancel = CancellationToken::new();

  let mut walker = Walker::load(&store, &store, &id, &cancel)
    .await
    .expect("failed to load briefing");

  assert_eq!(walker.current_index(), 0);
  assert!(!walker.is_finished());
  assert_eq!(walker.fields().len(), 1);

  walker.next();
  assert_eq!(walker.next(), 2);
  assert!(walker.is_finished());

  assert_eq!(walker.back(), 1);
  assert_eq!(walker.current_step().map(|s| s.title.as_str()), Some("Project"));
}

#[tokio::test]
async fn test_missing_briefing() {
  let (store, _) = store_with_briefing();

  let result = Walker::load(&store, &store, "nope", &CancellationToken::new()).await;

  assert!(matches!(result, Err(WizardError::Remote(ClientError::NotFound(_)))));
}

#[tokio::test]
async fn test_declared_error_payload() {
  let (store, id) = store_with_briefing();
  store.fail_with(404, "Briefing not found");

  let result = Walker::load(&store, &store, &id, &CancellationToken::new()).await;

  match result {
    Err(WizardError::Remote(ClientError::Remote { status, message })) => {
      assert_eq!(status, 404);
      assert_eq!(message, "Briefing not found");
    }
    other => panic!("expected a remote error, got {:?}", other.map(|w| w.current_index())),
  }
}

#[tokio::test]
async fn test_load_ignored_after_view_closed() {
  let (store, id) = store_with_briefing();
  let cancel = CancellationToken::new();
  cancel.cancel();

  let result = Walker::load(&store, &store, &id, &cancel).await;

  assert!(matches!(result, Err(WizardError::Cancelled)));
  assert_eq!(store.fetch_calls(), 0);
}

#[tokio::test]
async fn test_rejected_answer_is_surfaced_until_moved_on() {
  let (store, id) = store_with_briefing();
  let mut walker = Walker::load(&store, &store, &id, &CancellationToken::new())
    .await
    .expect("failed to load briefing");

  assert!(walker.set_answer(1, 4, "Ana").is_err());
  let notice = walker.error().expect("error should be surfaced");
  assert_eq!(notice.field, None);
  assert_eq!(notice.message, "step 1 has no field at index 4");

  walker.clear_error();
  assert!(walker.error().is_none());

  assert!(walker.set_answer(7, 0, "Ana").is_err());
  assert_eq!(
    walker.error().map(|n| n.message.as_str()),
    Some("step not found at position 7")
  );
  walker.next();
  assert!(walker.error().is_none());

  walker.set_answer(1, 0, "Ana").unwrap();
  assert!(walker.error().is_none());
  walker.back();
  assert_eq!(walker.fields()[0].answer, Some("Ana"));
}
