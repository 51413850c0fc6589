use crudkit::{Action, Operation, Record, Value};
use pretty_assertions::assert_eq;
use tests::{
    models::{Status, UserAccount},
    Setup,
};

fn seeded() -> Setup {
    let setup = Setup::new();
    setup.execute(
        "INSERT INTO user_account (id, email, status, age, joined_on) VALUES
            (1, 'ada@example.com', 'Active', 36, '2021-04-01'),
            (2, 'grace@example.com', 'Active', 45, NULL),
            (3, 'linus@example.com', 'Closed', 28, NULL);",
    );
    setup
}

fn emails(accounts: &[UserAccount]) -> Vec<&str> {
    accounts.iter().filter_map(|a| a.email.as_deref()).collect()
}

#[test]
fn optional_filter_selects_variant() {
    let setup = seeded();
    let conn = setup.conn();
    let persistence = setup.persistence([(
        "user/search",
        "user_account",
        Action::with_args(Operation::Search, ["*status", "email"]),
    )]);

    let request = Record::new("Request").with("status", "Active");
    let found: Vec<UserAccount> = persistence.get_results(conn, "user/search", &request).unwrap();
    assert_eq!(emails(&found), ["ada@example.com", "grace@example.com"]);
    assert_eq!(found[0].joined_on, chrono::NaiveDate::from_ymd_opt(2021, 4, 1));

    let narrowed = request.clone().with("email", "grace@example.com");
    let found: Vec<UserAccount> = persistence.get_results(conn, "user/search", &narrowed).unwrap();
    assert_eq!(emails(&found), ["grace@example.com"]);

    // A blank filter is treated as absent
    let blank = request.with("email", "");
    let found: Vec<UserAccount> = persistence.get_results(conn, "user/search", &blank).unwrap();
    assert_eq!(found.len(), 2);

    assert_eq!(
        setup.log().sql(),
        [
            "SELECT * FROM user_account WHERE status = ?",
            "SELECT * FROM user_account WHERE status = ? AND email = ?",
            "SELECT * FROM user_account WHERE status = ?",
        ]
    );
}

#[test]
fn search_by_model_enum() {
    let setup = seeded();
    let persistence = setup.persistence([(
        "user/by-status",
        "user_account",
        Action::with_args(Operation::Search, ["*status"]),
    )]);

    let request = UserAccount {
        status: Status::Closed,
        ..UserAccount::default()
    };
    let found: Vec<UserAccount> = persistence
        .get_results(setup.conn(), "user/by-status", &request)
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 3);
    assert_eq!(found[0].status, Status::Closed);
    assert_eq!(setup.log().pop().bindings, [vec![Value::from("Closed")]]);
}

#[test]
fn comparator_with_long_argument() {
    let setup = seeded();
    let persistence = setup.persistence([(
        "user/older",
        "user_account",
        Action::with_args(Operation::Search, ["age>="]),
    )]);

    let mut out = vec![];
    let request = Record::new("Request").with("age", 40i64);
    let count = persistence
        .get_results_into::<UserAccount, _>(setup.conn(), "user/older", &request, &mut out)
        .unwrap();

    assert_eq!(count, 1);
    assert_eq!(out[0].age, Some(45));

    // The 64-bit argument was narrowed to the INTEGER column
    let op = setup.log().pop();
    assert_eq!(op.sql, "SELECT * FROM user_account WHERE age >= ?");
    assert_eq!(op.bindings, [vec![Value::I32(40)]]);
}

#[test]
fn negative_restriction() {
    let setup = seeded();
    let persistence = setup.persistence([(
        "user/open",
        "user_account",
        Action::with_restriction(Operation::Search, [("status", "!'Closed'")]),
    )]);

    let found = persistence
        .get_cached(setup.conn(), "user/open", &Record::new("Request"))
        .unwrap();
    assert_eq!(found.len(), 2);

    let found = persistence
        .get_cached(
            setup.conn(),
            "user/open",
            &Record::new("Request").with("status", "Closed"),
        )
        .unwrap();
    assert!(found.rows().is_none());
}

#[test]
fn cached_results_distinguish_no_rows() {
    let setup = seeded();
    let persistence = setup.persistence([(
        "user/search",
        "user_account",
        Action::with_args(Operation::Search, ["*status", "email"]),
    )]);

    let found = persistence
        .get_cached(
            setup.conn(),
            "user/search",
            &Record::new("Request").with("status", "Active").with("email", "ada@example.com"),
        )
        .unwrap();
    assert_eq!(found.columns(), ["id", "email", "status", "age", "joinedOn"]);
    assert_eq!(found.get(0, "age"), Some(&Value::I32(36)));
    assert_eq!(
        found.to_json().unwrap(),
        r#"{"columns":["id","email","status","age","joinedOn"],"rows":[[1,"ada@example.com","Active",36,"2021-04-01"]]}"#
    );

    let empty = persistence
        .get_cached(
            setup.conn(),
            "user/search",
            &Record::new("Request").with("status", "Suspended"),
        )
        .unwrap();
    assert!(empty.is_empty());
    assert_eq!(
        empty.to_json().unwrap(),
        r#"{"columns":["id","email","status","age","joinedOn"],"rows":null}"#
    );
}

#[test]
fn worker_sees_the_cursor() {
    let setup = seeded();
    let persistence = setup.persistence([(
        "user/all",
        "user_account",
        Action::with_args(Operation::Search, ["status"]),
    )]);

    let ids = persistence
        .execute_select(
            setup.conn(),
            "user/all",
            &Record::new("Request"),
            |cursor: &mut dyn crudkit::Cursor| -> crudkit::Result<Vec<Value>> {
                let mut ids = vec![];
                while let Some(row) = cursor.next_row()? {
                    ids.push(row[0].clone());
                }
                Ok(ids)
            },
        )
        .unwrap();

    assert_eq!(ids, [Value::I32(1), Value::I32(2), Value::I32(3)]);
}
