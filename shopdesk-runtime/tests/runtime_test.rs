use std::sync::Arc;

use shopdesk_core::errors::{ShopdeskError, TRY_AGAIN_MESSAGE};
use shopdesk_core::traits::IHistoryStore;
use shopdesk_observability::QueryOutcome;
use shopdesk_retrieval::Strategy;
use shopdesk_runtime::{RuntimeOptions, ShopdeskRuntime};
use shopdesk_storage::CatalogKind;
use test_fixtures::{catalog_records, ScriptedCompletion};

fn seeded(completion: &Arc<ScriptedCompletion>, opts: RuntimeOptions) -> ShopdeskRuntime {
    let runtime = ShopdeskRuntime::with_completion(opts, completion.clone()).unwrap();
    for kind in CatalogKind::ALL {
        runtime.load_feed(kind, &catalog_records(kind)).unwrap();
    }
    runtime
}

#[test]
fn stock_question_is_rendered_and_recorded() {
    let completion = Arc::new(
        ScriptedCompletion::new()
            .reply("How many wood caskets are available at Indiana? (inventory-query)"),
    );
    let runtime = seeded(&completion, RuntimeOptions::default());

    let reply = runtime
        .handle_query("C042", "how many wood caskets at indiana")
        .unwrap();

    assert_eq!(reply.retrieval.strategy, Strategy::Inventory);
    assert!(!reply.generated);
    assert_eq!(
        reply.text,
        "Here is the list of inventory:\n\n\
         • CHERRY-02 - Warehouse: Indiana - Qty Available: 3\n\
         • OAK-01 - Warehouse: Indiana - Qty Available: 4\n\n\
         Total Quantity Available: 7"
    );
    assert_eq!(completion.call_count(), 1);

    let history = runtime.storage.get(&reply.session_id).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].content, "how many wood caskets at indiana");

    let log = runtime.query_log.lock().unwrap();
    let latest = log.latest().unwrap();
    assert_eq!(latest.outcome, QueryOutcome::Found);
    assert_eq!(latest.strategy.as_deref(), Some("inventory"));
    assert_eq!(latest.rule.as_deref(), Some("wood_material"));
}

#[test]
fn follow_up_in_the_same_channel_sees_the_previous_question() {
    let completion = Arc::new(
        ScriptedCompletion::new()
            .reply("How many wood caskets are available at Indiana? (inventory-query)")
            .reply("How many wood caskets are available at Los Angeles? (inventory-query)"),
    );
    let runtime = seeded(&completion, RuntimeOptions::default());

    runtime.handle_query("C042", "wood at indiana?").unwrap();
    let reply = runtime.handle_query("C042", "what about LA?").unwrap();

    assert!(reply.text.contains("• CHERRY-02 - Warehouse: Los Angeles - Qty Available: 5"));
    assert!(completion.calls()[1].messages[0].content.contains("wood at indiana?"));
    assert_eq!(runtime.sessions.session_count(), 1);
}

#[test]
fn classification_failure_apologises_and_records_nothing() {
    let completion = Arc::new(ScriptedCompletion::new().fail());
    let runtime = seeded(&completion, RuntimeOptions::default());

    assert_eq!(runtime.answer_or_apology("C042", "where is my order"), TRY_AGAIN_MESSAGE);
    assert_eq!(runtime.sessions.session_count(), 0);

    let log = runtime.query_log.lock().unwrap();
    assert_eq!(log.latest().unwrap().outcome, QueryOutcome::Failed);
    assert!(log.latest().unwrap().strategy.is_none());
}

#[test]
fn page_question_is_generated_from_context() {
    let completion = Arc::new(
        ScriptedCompletion::new()
            .reply("What does the shipping policy say? (pages-query)")
            .reply("Orders ship within three business days of confirmation."),
    );
    let runtime = seeded(&completion, RuntimeOptions::default());
    assert_eq!(runtime.reindex().unwrap().total(), 9);

    let reply = runtime.handle_query("C7", "shipping policy?").unwrap();

    assert_eq!(reply.retrieval.strategy, Strategy::Semantic);
    assert!(reply.generated);
    assert_eq!(reply.text, "Orders ship within three business days of confirmation.");
    assert_eq!(completion.call_count(), 2);
}

#[test]
fn file_backed_runtime_reads_toml_and_answers_generated_sql() {
    let dir = tempfile::tempdir().unwrap();
    let opts = RuntimeOptions {
        db_path: Some(dir.path().join("shopdesk.db")),
        config_toml: Some("[retrieval]\ngenerated_sql_fallback = true\n".to_string()),
    };
    let completion = Arc::new(
        ScriptedCompletion::new().reply("```sql\nSELECT COUNT(*) FROM orders;\n```\nCounts orders."),
    );
    let runtime = seeded(&completion, opts);

    assert!(runtime.config.retrieval.generated_sql_fallback);
    let doc = runtime.generated_query("how many orders are there").unwrap();
    assert_eq!(doc.content, "The result of user query: how many orders are there is result-> 5");
}

#[test]
fn invalid_toml_is_a_config_error() {
    let opts = RuntimeOptions {
        db_path: None,
        config_toml: Some("[session\nmax_turns = ".to_string()),
    };
    let result = ShopdeskRuntime::with_completion(opts, Arc::new(ScriptedCompletion::new()));
    assert!(matches!(result, Err(ShopdeskError::ConfigError(_))));
}

#[test]
fn catalog_only_runtime_loads_but_cannot_answer() {
    let runtime = ShopdeskRuntime::catalog_only(RuntimeOptions::default()).unwrap();
    let report = runtime
        .load_feed(CatalogKind::Inventory, &catalog_records(CatalogKind::Inventory))
        .unwrap();
    assert_eq!(report.loaded, 5);
    assert_eq!(runtime.answer_or_apology("C1", "wood at indiana?"), TRY_AGAIN_MESSAGE);
}
