use crudkit::{Action, Operation, ParametricStatement, Record, Value};
use pretty_assertions::assert_eq;
use tests::{
    models::{Status, UserAccount},
    Setup,
};

fn count(setup: &Setup) -> usize {
    let persistence = setup.persistence([(
        "user/all",
        "user_account",
        Action::with_args(Operation::Search, ["status"]),
    )]);
    persistence
        .get_cached(setup.conn(), "user/all", &Record::new("Request"))
        .unwrap()
        .len()
}

#[test]
fn batch_insert() {
    let setup = Setup::new();
    let persistence = setup.persistence([(
        "user/create",
        "user_account",
        Action::with_args(Operation::Create, ["id"]),
    )]);

    let accounts = [
        UserAccount::new("a@example.com", Status::Active),
        UserAccount::new("b@example.com", Status::Active),
        UserAccount::new("c@example.com", Status::Closed),
    ];
    let rows = persistence
        .execute_update_batch(setup.conn(), "user/create", &accounts)
        .unwrap();
    assert_eq!(rows, 3);

    let op = setup.log().pop();
    assert_eq!(op.bindings.len(), 3);
    assert_eq!(op.bindings[2][..2], [Value::from("c@example.com"), Value::from("Closed")]);

    let statement = ParametricStatement::parse(
        "email?:VARCHAR, status:VARCHAR",
        "INSERT INTO user_account (email, status) VALUES (?, ?)",
    )
    .unwrap();
    let more = [UserAccount::new("d@example.com", Status::Active)];
    assert_eq!(statement.execute_insert_batch(setup.conn(), &more).unwrap(), 1);

    assert_eq!(count(&setup), 4);
}

#[test]
fn missing_required_field() {
    let setup = Setup::new();
    let persistence = setup.persistence([(
        "user/create",
        "user_account",
        Action::with_args(Operation::Create, ["id"]),
    )]);

    let request = Record::new("Registration").with("email", "a@example.com");
    let err = persistence
        .execute_insert(setup.conn(), "user/create", &request, true)
        .unwrap_err();

    assert!(err.is_binding());
    assert_eq!(
        err.to_string(),
        "statement UserAccount `INSERT INTO user_account(email, status, age, joined_on) VALUES(?, ?, ?, ?)`: \
         binding failed: missing non-nullable 'status' on Registration"
    );

    // A present NULL is no better than an absent value
    let request = request.with("status", Value::Null);
    assert!(persistence
        .execute_insert(setup.conn(), "user/create", &request, true)
        .unwrap_err()
        .is_binding());

    assert_eq!(count(&setup), 0);
}

#[test]
fn value_does_not_fit_placeholder() {
    let setup = Setup::new();
    let persistence = setup.persistence([(
        "user/create",
        "user_account",
        Action::with_args(Operation::Create, ["id"]),
    )]);

    let request = Record::new("Registration")
        .with("status", "Active")
        .with("age", "forty");
    let err = persistence
        .execute_insert(setup.conn(), "user/create", &request, true)
        .unwrap_err();

    assert!(err.is_binding());
    assert!(err
        .to_string()
        .ends_with("binding failed: 'age' on Registration: String(\"forty\") does not fit INTEGER"));
}

#[test]
fn descriptor_checks_sizes() {
    let setup = Setup::new();
    let command = setup.command("user_account", Action::with_args(Operation::Create, ["id"]));
    let descriptor = command.descriptor();

    let ok = UserAccount::new("a@example.com", Status::Active);
    descriptor.validate(&ok).unwrap();

    let long = UserAccount::new(&"x".repeat(70), Status::Active);
    let err = descriptor.validate(&long).unwrap_err();
    assert!(err.is_binding());
    assert!(err.to_string().ends_with("length 70 exceeds size 64"));
}

#[test]
fn driver_errors_name_the_statement() {
    let setup = Setup::new();
    setup.execute("INSERT INTO user_account (id, email, status) VALUES (1, 'a@example.com', 'Active')");

    let statement = ParametricStatement::parse(
        "id:INTEGER, status:VARCHAR",
        "INSERT INTO user_account (id, status) VALUES (?, ?)",
    )
    .unwrap();
    let duplicate = Record::new("Row").with("id", 1).with("status", "Active");

    let err = statement.execute_update(setup.conn(), &duplicate).unwrap_err();
    assert!(err.is_driver());
    assert!(err
        .to_string()
        .starts_with("statement `INSERT INTO user_account (id, status) VALUES (?, ?)`: "));
}
