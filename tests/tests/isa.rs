use crudkit::{Action, Operation, Record, Value};
use pretty_assertions::assert_eq;
use tests::{
    models::{Employee, Status},
    Setup,
};

fn employee_persistence(setup: &Setup) -> crudkit::Persistence {
    setup.persistence([
        ("employee/create", "person, employee", Action::new(Operation::Create)),
        ("employee/retrieve", "person, employee", Action::new(Operation::Retrieve)),
        ("employee/update", "person, employee", Action::new(Operation::Update)),
        ("employee/delete", "person, employee", Action::new(Operation::Delete)),
        (
            "employee/search",
            "person, *employee",
            Action::with_args(Operation::Search, ["name", "salary>="]),
        ),
    ])
}

fn ada() -> Employee {
    Employee {
        id: 7,
        name: "Ada".to_string(),
        salary: Some(100),
        status_code: Status::Closed,
    }
}

#[test]
fn create_and_retrieve_across_tables() {
    let setup = Setup::new();
    let conn = setup.conn();
    let persistence = employee_persistence(&setup);

    let keys = persistence.execute_insert(conn, "employee/create", &ada(), true).unwrap();
    assert_eq!(keys, [7]);

    let log = setup.log();
    let person = log.pop();
    assert_eq!(person.sql, "INSERT INTO person(id, name) VALUES(?, ?)");
    assert_eq!(person.bindings, [vec![Value::I32(7), Value::from("Ada")]]);

    // The enum binds by ordinal to the SMALLINT column
    let employee = log.pop();
    assert_eq!(employee.sql, "INSERT INTO employee(id, salary, status_code) VALUES(?, ?, ?)");
    assert_eq!(
        employee.bindings,
        [vec![Value::I32(7), Value::I32(100), Value::I16(1)]]
    );

    let found: Vec<Employee> = persistence
        .get_results(conn, "employee/retrieve", &Record::new("Key").with("id", 7))
        .unwrap();
    assert_eq!(found, [ada()]);
    assert_eq!(
        log.pop().sql,
        "SELECT * FROM person, employee WHERE person.id = ? AND employee.id = person.id"
    );
}

#[test]
fn create_without_keys_counts_rows_per_table() {
    let setup = Setup::new();
    let conn = setup.conn();
    let persistence = employee_persistence(&setup);

    let counts = persistence.execute_insert(conn, "employee/create", &ada(), false).unwrap();
    assert_eq!(counts, [1, 1]);
    assert_eq!(setup.log().len(), 2);
}

#[test]
fn update_and_delete_every_table() {
    let setup = Setup::new();
    let conn = setup.conn();
    let persistence = employee_persistence(&setup);
    persistence.execute_insert(conn, "employee/create", &ada(), true).unwrap();
    setup.log().clear();

    let raise = Record::new("Raise").with("id", 7).with("salary", 250);
    assert_eq!(persistence.execute_update(conn, "employee/update", &raise).unwrap(), 2);
    assert_eq!(
        setup.log().sql(),
        [
            "UPDATE person SET name = COALESCE(?, name) WHERE id = ?",
            "UPDATE employee SET salary = COALESCE(?, salary), status_code = COALESCE(?, status_code) WHERE id = ?",
        ]
    );

    let found: Vec<Employee> = persistence
        .get_results(conn, "employee/retrieve", &raise)
        .unwrap();
    assert_eq!(found[0].salary, Some(250));
    assert_eq!(found[0].name, "Ada");

    setup.log().clear();
    assert_eq!(persistence.execute_update(conn, "employee/delete", &raise).unwrap(), 2);
    // The sub-table row goes first; it references the person row
    assert_eq!(
        setup.log().sql(),
        [
            "DELETE FROM employee WHERE id = ?",
            "DELETE FROM person WHERE id = ?",
        ]
    );
    let found = persistence.get_cached(conn, "employee/retrieve", &raise).unwrap();
    assert!(found.rows().is_none());
}

#[test]
fn search_dominant_table() {
    let setup = Setup::new();
    let conn = setup.conn();
    let persistence = employee_persistence(&setup);
    persistence.execute_insert(conn, "employee/create", &ada(), true).unwrap();
    setup.execute(
        "INSERT INTO person (id, name) VALUES (8, 'Grace');
         INSERT INTO employee (id, salary, status_code) VALUES (8, 300, 0);",
    );

    let found = persistence
        .get_cached(conn, "employee/search", &Record::new("Request").with("salary", 200))
        .unwrap();
    assert_eq!(found.columns(), ["id", "salary", "statusCode"]);
    assert_eq!(found.len(), 1);
    assert_eq!(found.get(0, "statusCode"), Some(&Value::I16(0)));

    let found: Vec<Employee> = persistence
        .get_results(conn, "employee/search", &Record::new("Request").with("name", "Ada"))
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 7);
    assert_eq!(found[0].status_code, Status::Closed);
    // Only employee columns are selected
    assert_eq!(found[0].name, "");
}
