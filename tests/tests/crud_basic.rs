use crudkit::{Action, Operation, Record, Value};
use pretty_assertions::assert_eq;
use tests::{
    models::{Status, UserAccount},
    Setup,
};

fn user_persistence(setup: &Setup) -> crudkit::Persistence {
    setup.persistence([
        ("user/create", "user_account", Action::with_args(Operation::Create, ["id"])),
        ("user/retrieve", "user_account", Action::new(Operation::Retrieve)),
        ("user/update", "user_account", Action::new(Operation::Update)),
        ("user/delete", "user_account", Action::new(Operation::Delete)),
    ])
}

#[test]
fn create_retrieve_update_delete() {
    let setup = Setup::new();
    let conn = setup.conn();
    let persistence = user_persistence(&setup);

    let mut account = UserAccount::new("ada@example.com", Status::Closed);
    account.age = Some(36);

    let keys = persistence.execute_insert(conn, "user/create", &account, true).unwrap();
    assert_eq!(keys, [1]);
    account.id = keys[0];

    let found: Vec<UserAccount> = persistence
        .get_results(conn, "user/retrieve", &account)
        .unwrap();
    assert_eq!(found, [account.clone()]);

    // Absent fields keep their column value
    let patch = Record::new("Patch")
        .with("id", 1)
        .with("email", "grace@example.com");
    assert_eq!(persistence.execute_update(conn, "user/update", &patch).unwrap(), 1);

    let found: Vec<UserAccount> = persistence
        .get_results(conn, "user/retrieve", &account)
        .unwrap();
    assert_eq!(found[0].email.as_deref(), Some("grace@example.com"));
    assert_eq!(found[0].status, Status::Closed);
    assert_eq!(found[0].age, Some(36));

    assert_eq!(persistence.execute_update(conn, "user/delete", &account).unwrap(), 1);
    let found: Vec<UserAccount> = persistence
        .get_results(conn, "user/retrieve", &account)
        .unwrap();
    assert!(found.is_empty());

    let sql = setup.log().sql();
    assert_eq!(
        sql[..2],
        [
            "INSERT INTO user_account(email, status, age, joined_on) VALUES(?, ?, ?, ?)",
            "SELECT * FROM user_account WHERE id = ?",
        ]
    );
}

#[test]
fn create_without_keys() {
    let setup = Setup::new();
    let persistence = user_persistence(&setup);

    let account = UserAccount::new("ada@example.com", Status::Active);
    let counts = persistence
        .execute_insert(setup.conn(), "user/create", &account, false)
        .unwrap();
    assert_eq!(counts, [1]);

    let again = persistence
        .execute_insert(setup.conn(), "user/create", &account, true)
        .unwrap();
    assert_eq!(again, [2]);
}

#[test]
fn create_with_literal_restriction() {
    let setup = Setup::new();
    let conn = setup.conn();
    let persistence = setup.persistence([
        (
            "user/register",
            "user_account",
            Action::with_args_and_restriction(Operation::Create, ["id"], [("status", "'Active'")]),
        ),
        ("user/retrieve", "user_account", Action::new(Operation::Retrieve)),
    ]);

    let request = Record::new("Registration").with("email", "new@example.com");
    let keys = persistence.execute_insert(conn, "user/register", &request, true).unwrap();

    let op = setup.log().pop();
    assert_eq!(
        op.sql,
        "INSERT INTO user_account(email, status, age, joined_on) VALUES(?, 'Active', ?, ?)"
    );
    assert_eq!(
        op.bindings,
        [vec![Value::from("new@example.com"), Value::Null, Value::Null]]
    );

    let found = persistence
        .get_cached(conn, "user/retrieve", &Record::new("Key").with("id", keys[0]))
        .unwrap();
    assert_eq!(found.get(0, "status"), Some(&Value::from("Active")));
}

#[test]
fn update_with_literal_restriction() {
    let setup = Setup::new();
    let conn = setup.conn();
    setup.execute("INSERT INTO user_account (id, email, status) VALUES (5, 'x@example.com', 'Active')");

    let persistence = setup.persistence([(
        "user/close",
        "user_account",
        Action::with_restriction(Operation::Update, [("status", "'Closed'")]),
    )]);

    let key = Record::new("Key").with("id", 5);
    assert_eq!(persistence.execute_update(conn, "user/close", &key).unwrap(), 1);
    assert_eq!(
        setup.log().pop().sql,
        "UPDATE user_account SET email = COALESCE(?, email), status = 'Closed', age = COALESCE(?, age), joined_on = COALESCE(?, joined_on) WHERE id = ?"
    );

    let missing = Record::new("Key").with("id", 6);
    assert_eq!(persistence.execute_update(conn, "user/close", &missing).unwrap(), 0);
}

#[test]
fn unknown_statement_name() {
    let setup = Setup::new();
    let persistence = user_persistence(&setup);

    let err = persistence
        .execute_update(setup.conn(), "user/archive", &Record::new("Key"))
        .unwrap_err();
    assert!(err.is_statement_not_found());
    assert_eq!(err.to_string(), "statement 'user/archive' not found");

    let err = persistence
        .get_cached(setup.conn(), "user/delete", &Record::new("Key").with("id", 1))
        .unwrap_err();
    assert!(err.is_invalid_result());
    assert!(setup.log().is_empty());
}

#[test]
fn equal_actions_reuse_the_compiled_model() {
    let setup = Setup::new();

    let first = setup.command("user_account", Action::with_args(Operation::Search, ["*status"]));
    let second = setup.command("user_account", Action::with_args(Operation::Search, ["*status"]));

    assert!(std::sync::Arc::ptr_eq(first.model(), second.model()));
}
